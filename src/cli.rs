//! CLI argument definitions for the demo binary.

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "rvsrg-judge")]
#[command(about = "Plays a .osu map with autoplay input and prints the judgement result", version)]
pub struct Args {
    /// Beatmap to play (.osu, mania or taiko)
    #[arg(value_name = "MAP")]
    pub map: PathBuf,

    /// Judgement settings (TOML); defaults are used when omitted
    #[arg(value_name = "SETTINGS", env = "RVSRG_JUDGE_SETTINGS")]
    pub settings: Option<PathBuf>,

    /// Autoplay jitter seed (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Autoplay timing error bound (ms)
    #[arg(long, default_value_t = 25.0)]
    pub jitter: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_map_only() {
        let args = Args::try_parse_from(["rvsrg-judge", "song.osu"]).unwrap();
        assert_eq!(args.map, PathBuf::from("song.osu"));
        assert_eq!(args.seed, None);
        assert_eq!(args.jitter, 25.0);
    }

    #[test]
    fn test_parse_all_options() {
        let args = Args::try_parse_from([
            "rvsrg-judge",
            "song.osu",
            "judge.toml",
            "--seed",
            "42",
            "--jitter",
            "5",
        ])
        .unwrap();
        assert_eq!(args.settings, Some(PathBuf::from("judge.toml")));
        assert_eq!(args.seed, Some(42));
        assert_eq!(args.jitter, 5.0);
    }

    #[test]
    fn test_map_is_required() {
        assert!(Args::try_parse_from(["rvsrg-judge"]).is_err());
    }
}

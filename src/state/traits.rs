//! Traits for state management.

/// Trait for creating read-only snapshots.
///
/// Snapshots are immutable captures of state handed to renderers and
/// reporters. They decouple judging from presentation.
pub trait Snapshot {
    /// The snapshot type produced.
    type Output;

    /// Creates an immutable snapshot.
    fn create_snapshot(&self) -> Self::Output;
}

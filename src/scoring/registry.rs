//! Registry for the available scoring strategies.

use super::builtin::{ComboBlendScoring, FixedScoring};
use super::calculator::ScoringStrategy;
use std::collections::HashMap;
use std::sync::Arc;

/// Registry holding all available scoring strategies.
#[derive(Debug)]
pub struct ScoringRegistry {
    strategies: HashMap<String, Arc<dyn ScoringStrategy>>,
}

impl Default for ScoringRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoringRegistry {
    /// Creates a registry with the built-in strategies.
    pub fn new() -> Self {
        let mut registry = Self {
            strategies: HashMap::new(),
        };

        registry.register(Arc::new(ComboBlendScoring::new()));
        registry.register(Arc::new(FixedScoring::new()));

        registry
    }

    /// Registers a strategy, replacing any with the same id.
    pub fn register(&mut self, strategy: Arc<dyn ScoringStrategy>) {
        let id = strategy.id().to_string();
        self.strategies.insert(id, strategy);
    }

    pub fn get(&self, id: &str) -> Option<&Arc<dyn ScoringStrategy>> {
        self.strategies.get(id)
    }

    /// Returns the default strategy (`combo_blend`).
    pub fn default_strategy(&self) -> Arc<dyn ScoringStrategy> {
        self.strategies
            .get(ComboBlendScoring::ID)
            .cloned()
            .unwrap_or_else(|| Arc::new(ComboBlendScoring::new()))
    }

    /// Looks up `id`, falling back to the default strategy.
    pub fn resolve(&self, id: &str) -> Arc<dyn ScoringStrategy> {
        match self.strategies.get(id) {
            Some(strategy) => strategy.clone(),
            None => {
                let fallback = self.default_strategy();
                log::warn!(
                    "SESSION: Unknown scoring strategy '{}' (available: {}), using '{}'",
                    id,
                    self.strategy_ids().join(", "),
                    fallback.id()
                );
                fallback
            }
        }
    }

    /// Returns all registered strategy IDs, sorted.
    pub fn strategy_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.strategies.keys().map(|s| s.as_str()).collect();
        ids.sort_unstable();
        ids
    }
}

//! Priority-ordered strategy registry

use std::sync::Arc;

use crate::errors::HealError;
use crate::strategies::{AriaStrategy, HealStrategy, TestIdStrategy, TextStrategy};

/// Ordered collection of recovery strategies.
///
/// Iteration order is by ascending priority, ties broken by registration
/// order. Each call to [`StrategyRegistry::iter`] starts a fresh traversal,
/// so no iterator state leaks between healing attempts.
#[derive(Default)]
pub struct StrategyRegistry {
    strategies: Vec<Arc<dyn HealStrategy>>,
}

impl StrategyRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the three built-in strategies in the fixed
    /// data-testid > aria-label > text order.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        let built_ins: [Arc<dyn HealStrategy>; 3] = [
            Arc::new(TestIdStrategy::new()),
            Arc::new(AriaStrategy::new()),
            Arc::new(TextStrategy::new()),
        ];
        for strategy in built_ins {
            // Built-in names are distinct, registration cannot fail.
            let _ = registry.register(strategy);
        }
        registry
    }

    /// Register a strategy.
    ///
    /// Duplicate names are a configuration error, reported rather than
    /// silently overwritten.
    pub fn register(&mut self, strategy: Arc<dyn HealStrategy>) -> Result<(), HealError> {
        if self.strategies.iter().any(|s| s.name() == strategy.name()) {
            return Err(HealError::DuplicateStrategy {
                name: strategy.name().to_string(),
            });
        }
        self.strategies.push(strategy);
        // Stable sort preserves registration order within equal priorities.
        self.strategies.sort_by_key(|s| s.priority());
        Ok(())
    }

    /// Iterate strategies in priority order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn HealStrategy>> {
        self.strategies.iter()
    }

    /// Names of registered strategies in iteration order.
    pub fn names(&self) -> Vec<String> {
        self.strategies.iter().map(|s| s.name().to_string()).collect()
    }

    /// Number of registered strategies.
    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}

//! Healing orchestrator

use std::sync::Arc;

use page_adapter::PageQuery;
use tracing::{debug, info, warn};

use crate::{
    errors::HealError,
    info::ElementInfo,
    registry::StrategyRegistry,
    store::InfoStore,
    strategies::HealStrategy,
    types::HealingOutcome,
};

/// Drives recovery strategies in priority order against a failed selector.
///
/// Strategies run strictly sequentially; the first match short-circuits the
/// rest (priority dominates confidence). A strategy fault is logged and
/// treated as a decline so one misbehaving strategy cannot abort the whole
/// attempt. The orchestrator imposes no timeout of its own; callers bound
/// the attempt externally (e.g. `tokio::time::timeout`), which takes effect
/// at the await boundaries between strategies.
pub struct SelectorHealer {
    registry: StrategyRegistry,
    store: Arc<dyn InfoStore>,
    min_confidence: f64,
}

impl SelectorHealer {
    /// Create a healer with the three built-in strategies.
    pub fn new(store: Arc<dyn InfoStore>) -> Self {
        Self::with_registry(StrategyRegistry::with_defaults(), store)
    }

    /// Create a healer with a caller-configured registry.
    pub fn with_registry(registry: StrategyRegistry, store: Arc<dyn InfoStore>) -> Self {
        Self {
            registry,
            store,
            min_confidence: 0.0,
        }
    }

    /// Set a confidence floor; matches below it are treated as declines.
    pub fn with_min_confidence(mut self, min_confidence: f64) -> Result<Self, HealError> {
        if !(0.0..=1.0).contains(&min_confidence) {
            return Err(HealError::InvalidInput(format!(
                "confidence floor out of range: {}",
                min_confidence
            )));
        }
        self.min_confidence = min_confidence;
        Ok(self)
    }

    /// Register an additional strategy at startup.
    pub fn register_strategy(&mut self, strategy: Arc<dyn HealStrategy>) -> Result<(), HealError> {
        self.registry.register(strategy)
    }

    /// Names of registered strategies in priority order.
    pub fn list_strategies(&self) -> Vec<String> {
        self.registry.names()
    }

    /// Heal a failed selector, looking up stored metadata from the store.
    pub async fn heal(&self, selector: &str, page: &dyn PageQuery) -> HealingOutcome {
        let stored = self.store.lookup(selector);
        self.heal_with_info(selector, stored.as_ref(), page).await
    }

    /// Heal a failed selector with caller-supplied metadata.
    ///
    /// Always returns exactly one outcome. On success the outcome carries a
    /// freshly captured [`ElementInfo`] proposal for the caller to persist;
    /// the healer itself never writes to the store.
    pub async fn heal_with_info(
        &self,
        selector: &str,
        stored: Option<&ElementInfo>,
        page: &dyn PageQuery,
    ) -> HealingOutcome {
        info!("healing attempt for '{}'", selector);
        let mut tried = Vec::new();

        for strategy in self.registry.iter() {
            debug!("trying strategy: {}", strategy.name());
            tried.push(strategy.name().to_string());

            let result = match strategy.heal(selector, stored, page).await {
                Ok(result) => result,
                Err(e) => {
                    // A fault in one strategy must not abort the attempt.
                    warn!("strategy '{}' faulted: {}", strategy.name(), e);
                    continue;
                }
            };

            if !result.is_match() {
                debug!(
                    "strategy '{}' declined: {}",
                    strategy.name(),
                    result.reason.as_deref().unwrap_or("no reason given")
                );
                continue;
            }

            // Constructors guarantee a match carries selector + confidence.
            if let (Some(new_selector), Some(confidence)) = (result.selector, result.confidence) {
                if confidence < self.min_confidence {
                    debug!(
                        "strategy '{}' match below confidence floor ({:.2} < {:.2})",
                        strategy.name(),
                        confidence,
                        self.min_confidence
                    );
                    continue;
                }

                let proposed = result.element.as_ref().map(ElementInfo::capture);
                info!(
                    "healed '{}' -> '{}' via {} (confidence {:.2})",
                    selector,
                    new_selector,
                    strategy.name(),
                    confidence
                );
                return HealingOutcome::Healed {
                    strategy: strategy.name().to_string(),
                    selector: new_selector,
                    confidence,
                    element: result.element,
                    proposed,
                };
            }
        }

        info!("no strategy matched for '{}'", selector);
        HealingOutcome::Unresolved {
            original: selector.to_string(),
            tried,
        }
    }
}

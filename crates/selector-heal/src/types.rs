//! Core outcome types for the healing engine

use page_adapter::ElementHandle;
use serde::{Deserialize, Serialize};

use crate::info::ElementInfo;

/// Outcome of a single strategy attempt.
///
/// Constructed only through [`StrategyResult::matched`] and
/// [`StrategyResult::declined`], which enforce the invariant that a match
/// always carries a replacement selector and a decline never carries a
/// selector or element reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyResult {
    matched: bool,

    /// Replacement selector, present iff the strategy matched
    pub selector: Option<String>,

    /// Confidence score in [0.0, 1.0], present iff the strategy matched
    pub confidence: Option<f64>,

    /// Live element reference, session-only, never persisted
    pub element: Option<ElementHandle>,

    /// Why the strategy declined, for diagnostics
    pub reason: Option<String>,
}

impl StrategyResult {
    /// A successful match with a replacement selector.
    pub fn matched(selector: impl Into<String>, confidence: f64, element: ElementHandle) -> Self {
        Self {
            matched: true,
            selector: Some(selector.into()),
            confidence: Some(confidence.clamp(0.0, 1.0)),
            element: Some(element),
            reason: None,
        }
    }

    /// An explicit non-match (missing signal, zero or ambiguous matches).
    pub fn declined(reason: impl Into<String>) -> Self {
        Self {
            matched: false,
            selector: None,
            confidence: None,
            element: None,
            reason: Some(reason.into()),
        }
    }

    /// Check if the strategy produced a match.
    pub fn is_match(&self) -> bool {
        self.matched
    }
}

/// Final outcome of one healing attempt.
///
/// Constructed fresh per attempt and never mutated after return. The caller
/// decides whether to persist the proposed snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum HealingOutcome {
    /// A strategy produced a working replacement selector
    Healed {
        /// Name of the strategy that produced the match
        strategy: String,

        /// Replacement selector
        selector: String,

        /// Confidence of the match
        confidence: f64,

        /// Live element reference, session-only
        element: Option<ElementHandle>,

        /// Fresh metadata snapshot the caller should persist
        proposed: Option<ElementInfo>,
    },

    /// Every strategy declined; no healing possible
    Unresolved {
        /// The original selector that failed
        original: String,

        /// Names of the strategies that were tried, in order
        tried: Vec<String>,
    },
}

impl HealingOutcome {
    /// Check if healing succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, HealingOutcome::Healed { .. })
    }

    /// Get the replacement selector if healed.
    pub fn selector(&self) -> Option<&str> {
        match self {
            HealingOutcome::Healed { selector, .. } => Some(selector),
            _ => None,
        }
    }

    /// Get the producing strategy name if healed.
    pub fn strategy(&self) -> Option<&str> {
        match self {
            HealingOutcome::Healed { strategy, .. } => Some(strategy),
            _ => None,
        }
    }

    /// Get the confidence if healed.
    pub fn confidence(&self) -> Option<f64> {
        match self {
            HealingOutcome::Healed { confidence, .. } => Some(*confidence),
            _ => None,
        }
    }

    /// Get the proposed metadata snapshot if healed.
    pub fn proposed(&self) -> Option<&ElementInfo> {
        match self {
            HealingOutcome::Healed { proposed, .. } => proposed.as_ref(),
            _ => None,
        }
    }
}

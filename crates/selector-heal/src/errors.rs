//! Error types for the healing engine

use page_adapter::PageError;
use thiserror::Error;

/// Healing engine error enumeration
///
/// Strategy declines and unresolved outcomes are values, not errors; this
/// type covers configuration mistakes and faults in the underlying page
/// query capability.
#[derive(Debug, Error, Clone)]
pub enum HealError {
    /// A strategy with the same name is already registered
    #[error("Strategy '{name}' is already registered")]
    DuplicateStrategy { name: String },

    /// The page query capability itself failed
    #[error("Page query failed: {0}")]
    Page(#[from] PageError),

    /// Invalid caller input (empty selector, out-of-range threshold)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl HealError {
    /// Check if this is a setup-time configuration error.
    ///
    /// Configuration errors are fatal and must not be swallowed; everything
    /// else is converted to a decline at the orchestrator boundary.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            HealError::DuplicateStrategy { .. } | HealError::InvalidInput(_)
        )
    }
}

//! Read-only page query capability for the selector healing engine
//!
//! The engine never drives the browser itself; it consumes an opaque
//! [`PageQuery`] capability offering the three element-query operations the
//! recovery strategies need (by attribute, by role + accessible name, by
//! text). Concrete automation backends implement the trait; [`StaticPage`]
//! is an in-memory implementation for tests and embedders without a live
//! browser.

pub mod errors;
pub mod static_page;

pub use errors::*;
pub use static_page::*;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Session-scoped reference to a live element plus its observed attributes.
///
/// The `remote_id` is only meaningful within the current automation session
/// and must never be persisted; the attribute fields are the raw values
/// observed on the page at query time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementHandle {
    /// Backend-specific node reference, valid for this session only
    pub remote_id: String,

    /// Element tag name (lowercase)
    pub tag_name: String,

    /// Raw visible text, if any
    pub text: Option<String>,

    /// Test-id attribute value, if present
    pub test_id: Option<String>,

    /// ARIA role, if present
    pub aria_role: Option<String>,

    /// ARIA label, if present
    pub aria_label: Option<String>,

    /// Structural path from the document root (ancestor chain)
    pub dom_path: Option<String>,
}

impl ElementHandle {
    /// Create a handle with only the required fields set.
    pub fn new(remote_id: impl Into<String>, tag_name: impl Into<String>) -> Self {
        Self {
            remote_id: remote_id.into(),
            tag_name: tag_name.into(),
            text: None,
            test_id: None,
            aria_role: None,
            aria_label: None,
            dom_path: None,
        }
    }

    /// Set the visible text.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set the test-id attribute value.
    pub fn with_test_id(mut self, test_id: impl Into<String>) -> Self {
        self.test_id = Some(test_id.into());
        self
    }

    /// Set the ARIA role.
    pub fn with_aria_role(mut self, role: impl Into<String>) -> Self {
        self.aria_role = Some(role.into());
        self
    }

    /// Set the ARIA label.
    pub fn with_aria_label(mut self, label: impl Into<String>) -> Self {
        self.aria_label = Some(label.into());
        self
    }

    /// Set the structural path.
    pub fn with_dom_path(mut self, path: impl Into<String>) -> Self {
        self.dom_path = Some(path.into());
        self
    }

    /// Accessible name: ARIA label when present, visible text otherwise.
    pub fn accessible_name(&self) -> Option<&str> {
        self.aria_label.as_deref().or(self.text.as_deref())
    }
}

/// Read-only element query capability.
///
/// All operations query the current document without mutating page state.
/// Implementations must tolerate concurrent read queries if callers intend
/// to run independent healing attempts in parallel.
#[async_trait]
pub trait PageQuery: Send + Sync {
    /// Find elements carrying `name="value"` exactly.
    async fn query_by_attribute(
        &self,
        name: &str,
        value: &str,
    ) -> Result<Vec<ElementHandle>, PageError>;

    /// Find elements with the given ARIA role and accessible name.
    ///
    /// The accessible name comparison is whitespace-collapsed and
    /// case-folded.
    async fn query_by_role(&self, role: &str, name: &str)
        -> Result<Vec<ElementHandle>, PageError>;

    /// Find elements by visible text.
    ///
    /// With `exact = true` the match is whitespace-collapsed, case-folded
    /// equality. With `exact = false` the implementation returns a looser
    /// candidate set (e.g. token overlap or substring); callers apply their
    /// own similarity scoring on top.
    async fn query_by_text(&self, text: &str, exact: bool)
        -> Result<Vec<ElementHandle>, PageError>;
}

/// Normalize text for comparison (case-fold, trim, collapse whitespace).
pub fn normalize_text(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_text() {
        assert_eq!(normalize_text("  Click   Here \n"), "click here");
        assert_eq!(normalize_text("SUBMIT"), "submit");
        assert_eq!(normalize_text(""), "");
    }

    #[test]
    fn test_accessible_name_prefers_label() {
        let handle = ElementHandle::new("n1", "button")
            .with_text("Go")
            .with_aria_label("Submit order");
        assert_eq!(handle.accessible_name(), Some("Submit order"));

        let unlabeled = ElementHandle::new("n2", "button").with_text("Go");
        assert_eq!(unlabeled.accessible_name(), Some("Go"));
    }
}

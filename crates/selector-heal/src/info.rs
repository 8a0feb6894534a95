//! Persisted element metadata snapshots

use page_adapter::{normalize_text, ElementHandle};
use serde::{Deserialize, Serialize};

/// Snapshot of an element's identifying attributes, captured at the last
/// successful match.
///
/// Immutable once captured: a new successful match replaces the whole
/// snapshot, fields are never merged. The caller's persistence layer owns
/// storage; the engine only reads snapshots and proposes new ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementInfo {
    /// Element tag name (lowercase)
    pub tag_name: String,

    /// Visible text, normalized (whitespace-collapsed, case-folded)
    pub text: Option<String>,

    /// Test-id attribute value
    pub test_id: Option<String>,

    /// ARIA role
    pub aria_role: Option<String>,

    /// ARIA label
    pub aria_label: Option<String>,

    /// Structural path from the document root, last-resort disambiguator
    pub dom_path: Option<String>,
}

impl ElementInfo {
    /// Create a snapshot with only the tag name set.
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            text: None,
            test_id: None,
            aria_role: None,
            aria_label: None,
            dom_path: None,
        }
    }

    /// Capture a snapshot from a live element handle.
    ///
    /// Text is normalized on capture so stored snapshots compare cleanly
    /// against future page states regardless of source formatting.
    pub fn capture(handle: &ElementHandle) -> Self {
        Self {
            tag_name: handle.tag_name.clone(),
            text: handle
                .text
                .as_deref()
                .map(normalize_text)
                .filter(|t| !t.is_empty()),
            test_id: handle.test_id.clone(),
            aria_role: handle.aria_role.clone(),
            aria_label: handle.aria_label.clone(),
            dom_path: handle.dom_path.clone(),
        }
    }

    /// Set the normalized text.
    pub fn with_text(mut self, text: impl AsRef<str>) -> Self {
        let normalized = normalize_text(text.as_ref());
        self.text = (!normalized.is_empty()).then_some(normalized);
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
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_normalizes_text() {
        let handle = ElementHandle::new("n1", "button")
            .with_text("  Click   HERE ")
            .with_test_id("go");
        let info = ElementInfo::capture(&handle);
        assert_eq!(info.text.as_deref(), Some("click here"));
        assert_eq!(info.test_id.as_deref(), Some("go"));
        assert_eq!(info.tag_name, "button");
    }

    #[test]
    fn test_capture_drops_empty_text() {
        let handle = ElementHandle::new("n1", "div").with_text("   ");
        let info = ElementInfo::capture(&handle);
        assert!(info.text.is_none());
    }

    #[test]
    fn test_with_text_normalizes() {
        let info = ElementInfo::new("a").with_text("Sign  In");
        assert_eq!(info.text.as_deref(), Some("sign in"));
    }
}

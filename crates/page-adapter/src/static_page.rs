//! In-memory page implementation for tests and offline embedding

use async_trait::async_trait;
use tracing::debug;

use crate::{normalize_text, ElementHandle, PageError, PageQuery};

/// Attribute names treated as test-id carriers by the static backend.
const TEST_ID_ATTRIBUTES: &[&str] = &["data-testid", "data-test", "data-qa"];

/// A fixed snapshot of page elements implementing [`PageQuery`].
///
/// Useful for unit tests and for replaying recorded page states without a
/// live browser. Queries run over the element list with the same
/// normalization semantics a real backend is expected to provide.
#[derive(Debug, Clone, Default)]
pub struct StaticPage {
    elements: Vec<ElementHandle>,
}

impl StaticPage {
    /// Create a page from a list of elements.
    pub fn new(elements: Vec<ElementHandle>) -> Self {
        Self { elements }
    }

    /// Create an empty page.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Add an element to the page.
    pub fn push(&mut self, element: ElementHandle) {
        self.elements.push(element);
    }

    /// Number of elements on the page.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the page has no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    fn attribute_of<'a>(element: &'a ElementHandle, name: &str) -> Option<&'a str> {
        if TEST_ID_ATTRIBUTES.contains(&name) {
            element.test_id.as_deref()
        } else if name.eq_ignore_ascii_case("aria-label") {
            element.aria_label.as_deref()
        } else if name.eq_ignore_ascii_case("role") {
            element.aria_role.as_deref()
        } else {
            None
        }
    }

    fn text_matches_loosely(element_text: &str, needle: &str) -> bool {
        let haystack = normalize_text(element_text);
        if haystack.contains(needle) {
            return true;
        }
        // Token overlap keeps typo'd or partially rewritten labels in the
        // candidate set for the caller's similarity scoring.
        needle
            .split_whitespace()
            .any(|token| haystack.split_whitespace().any(|word| word == token))
    }
}

#[async_trait]
impl PageQuery for StaticPage {
    async fn query_by_attribute(
        &self,
        name: &str,
        value: &str,
    ) -> Result<Vec<ElementHandle>, PageError> {
        debug!("static query by attribute {}={}", name, value);
        Ok(self
            .elements
            .iter()
            .filter(|e| Self::attribute_of(e, name) == Some(value))
            .cloned()
            .collect())
    }

    async fn query_by_role(
        &self,
        role: &str,
        name: &str,
    ) -> Result<Vec<ElementHandle>, PageError> {
        debug!("static query by role {} name {}", role, name);
        let wanted = normalize_text(name);
        Ok(self
            .elements
            .iter()
            .filter(|e| {
                e.aria_role
                    .as_deref()
                    .map(|r| r.eq_ignore_ascii_case(role))
                    .unwrap_or(false)
                    && e.accessible_name()
                        .map(|n| normalize_text(n) == wanted)
                        .unwrap_or(false)
            })
            .cloned()
            .collect())
    }

    async fn query_by_text(
        &self,
        text: &str,
        exact: bool,
    ) -> Result<Vec<ElementHandle>, PageError> {
        debug!("static query by text '{}' (exact={})", text, exact);
        let needle = normalize_text(text);
        Ok(self
            .elements
            .iter()
            .filter(|e| match e.text.as_deref() {
                Some(t) if exact => normalize_text(t) == needle,
                Some(t) => Self::text_matches_loosely(t, &needle),
                None => false,
            })
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_page() -> StaticPage {
        StaticPage::new(vec![
            ElementHandle::new("n1", "button")
                .with_text("Submit")
                .with_test_id("submit-btn")
                .with_aria_role("button")
                .with_aria_label("Submit order"),
            ElementHandle::new("n2", "a")
                .with_text("  Click   Here ")
                .with_dom_path("body>main>a[0]"),
        ])
    }

    #[tokio::test]
    async fn test_query_by_attribute() {
        let page = sample_page();
        let hits = page
            .query_by_attribute("data-testid", "submit-btn")
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].remote_id, "n1");

        let none = page
            .query_by_attribute("data-testid", "missing")
            .await
            .unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_query_by_role_normalizes_name() {
        let page = sample_page();
        let hits = page.query_by_role("button", "submit  ORDER").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].remote_id, "n1");
    }

    #[tokio::test]
    async fn test_query_by_text_exact_and_loose() {
        let page = sample_page();
        let exact = page.query_by_text("click here", true).await.unwrap();
        assert_eq!(exact.len(), 1);
        assert_eq!(exact[0].remote_id, "n2");

        // Typo'd needle misses exactly but stays in the loose candidate set.
        let exact_miss = page.query_by_text("click heer", true).await.unwrap();
        assert!(exact_miss.is_empty());
        let loose = page.query_by_text("click heer", false).await.unwrap();
        assert_eq!(loose.len(), 1);
    }
}

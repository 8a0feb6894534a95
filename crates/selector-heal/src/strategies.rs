//! Recovery strategies
//!
//! Three built-in strategies in priority order:
//! 1. data-testid - purpose-built stable identifiers
//! 2. aria-label  - accessibility attributes, moderately stable
//! 3. text        - visible text, most volatile, fuzzy fallback
//!
//! Every strategy is stateless between calls, queries the page read-only,
//! and declines rather than faults when its required signal is absent or
//! the match is ambiguous.

use async_trait::async_trait;
use page_adapter::{normalize_text, PageQuery};
use tracing::debug;

use crate::{errors::HealError, info::ElementInfo, types::StrategyResult};

/// Priority of the test-id strategy (tried first).
pub const PRIORITY_TEST_ID: u32 = 10;
/// Priority of the ARIA strategy.
pub const PRIORITY_ARIA: u32 = 20;
/// Priority of the text strategy (tried last).
pub const PRIORITY_TEXT: u32 = 30;

/// Confidence reported for a unique test-id match.
pub const CONFIDENCE_TEST_ID: f64 = 0.9;
/// Confidence reported for a unique ARIA match.
pub const CONFIDENCE_ARIA: f64 = 0.75;
/// Base confidence for text matches; fuzzy matches scale it by similarity.
pub const CONFIDENCE_TEXT: f64 = 0.6;

/// Minimum normalized-Levenshtein similarity for the fuzzy text fallback.
pub const FUZZY_TEXT_THRESHOLD: f64 = 0.8;

/// A single recovery technique using one attribute signal.
#[async_trait]
pub trait HealStrategy: Send + Sync {
    /// Stable, human-readable strategy identity.
    fn name(&self) -> &str;

    /// Priority rank; lower values are tried first. Fixed at registration,
    /// ties broken by registration order.
    fn priority(&self) -> u32;

    /// Attempt to locate a replacement for a failed selector.
    ///
    /// `info` may be absent (nothing recorded yet); strategies must decline
    /// in that case rather than fault. An `Err` signals a fault in the
    /// underlying query mechanism, which the orchestrator converts to a
    /// decline for this strategy.
    async fn heal(
        &self,
        original: &str,
        info: Option<&ElementInfo>,
        page: &dyn PageQuery,
    ) -> Result<StrategyResult, HealError>;
}

/// Escape a value for embedding in a double-quoted selector attribute.
fn escape_attribute(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Recovery via test-id attributes.
///
/// The attribute name is configurable at construction so projects using
/// `data-test` or `data-qa` can register a variant; the strategy identity
/// follows the attribute name.
pub struct TestIdStrategy {
    attribute: String,
}

impl TestIdStrategy {
    /// Create a strategy for the standard `data-testid` attribute.
    pub fn new() -> Self {
        Self::with_attribute("data-testid")
    }

    /// Create a strategy for a project-specific test-id attribute.
    pub fn with_attribute(attribute: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
        }
    }
}

impl Default for TestIdStrategy {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HealStrategy for TestIdStrategy {
    fn name(&self) -> &str {
        &self.attribute
    }

    fn priority(&self) -> u32 {
        PRIORITY_TEST_ID
    }

    async fn heal(
        &self,
        original: &str,
        info: Option<&ElementInfo>,
        page: &dyn PageQuery,
    ) -> Result<StrategyResult, HealError> {
        let Some(test_id) = info.and_then(|i| i.test_id.as_deref()) else {
            return Ok(StrategyResult::declined("no recorded test-id"));
        };

        debug!(
            "test-id heal for '{}': {}={}",
            original, self.attribute, test_id
        );
        let mut matches = page.query_by_attribute(&self.attribute, test_id).await?;

        match matches.len() {
            1 => {
                let selector = format!("[{}=\"{}\"]", self.attribute, escape_attribute(test_id));
                Ok(StrategyResult::matched(
                    selector,
                    CONFIDENCE_TEST_ID,
                    matches.remove(0),
                ))
            }
            0 => Ok(StrategyResult::declined(format!(
                "no element carries {}=\"{}\"",
                self.attribute, test_id
            ))),
            n => Ok(StrategyResult::declined(format!(
                "{} elements carry {}=\"{}\"",
                n, self.attribute, test_id
            ))),
        }
    }
}

/// Recovery via ARIA role and accessible name.
#[derive(Default)]
pub struct AriaStrategy;

impl AriaStrategy {
    /// Create an ARIA strategy.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl HealStrategy for AriaStrategy {
    fn name(&self) -> &str {
        "aria-label"
    }

    fn priority(&self) -> u32 {
        PRIORITY_ARIA
    }

    async fn heal(
        &self,
        original: &str,
        info: Option<&ElementInfo>,
        page: &dyn PageQuery,
    ) -> Result<StrategyResult, HealError> {
        let Some(info) = info else {
            return Ok(StrategyResult::declined("no stored metadata"));
        };
        let Some(label) = info.aria_label.as_deref() else {
            return Ok(StrategyResult::declined("no recorded ARIA label"));
        };

        let (mut matches, selector) = match info.aria_role.as_deref() {
            Some(role) => {
                debug!("aria heal for '{}': role={} name={}", original, role, label);
                let matches = page.query_by_role(role, label).await?;
                let selector = format!(
                    "[role=\"{}\"][aria-label=\"{}\"]",
                    escape_attribute(role),
                    escape_attribute(label)
                );
                (matches, selector)
            }
            None => {
                debug!("aria heal for '{}': label={}", original, label);
                let matches = page.query_by_attribute("aria-label", label).await?;
                let selector = format!("[aria-label=\"{}\"]", escape_attribute(label));
                (matches, selector)
            }
        };

        match matches.len() {
            1 => Ok(StrategyResult::matched(
                selector,
                CONFIDENCE_ARIA,
                matches.remove(0),
            )),
            0 => Ok(StrategyResult::declined(format!(
                "no element matches ARIA label \"{}\"",
                label
            ))),
            n => Ok(StrategyResult::declined(format!(
                "{} elements match ARIA label \"{}\"",
                n, label
            ))),
        }
    }
}

/// Recovery via visible text, with a fuzzy fallback.
///
/// Exact normalized match first; when nothing matches exactly, loose
/// candidates are scored with normalized Levenshtein similarity and the
/// match is accepted only if exactly one candidate clears
/// [`FUZZY_TEXT_THRESHOLD`].
#[derive(Default)]
pub struct TextStrategy;

impl TextStrategy {
    /// Create a text strategy.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl HealStrategy for TextStrategy {
    fn name(&self) -> &str {
        "text"
    }

    fn priority(&self) -> u32 {
        PRIORITY_TEXT
    }

    async fn heal(
        &self,
        original: &str,
        info: Option<&ElementInfo>,
        page: &dyn PageQuery,
    ) -> Result<StrategyResult, HealError> {
        let Some(text) = info.and_then(|i| i.text.as_deref()) else {
            return Ok(StrategyResult::declined("no recorded text"));
        };
        // Stored snapshots normalize on capture; normalize again so
        // hand-built snapshots behave the same.
        let needle = normalize_text(text);
        if needle.is_empty() {
            return Ok(StrategyResult::declined("recorded text is empty"));
        }

        debug!("text heal for '{}': \"{}\"", original, needle);
        let mut exact = page.query_by_text(&needle, true).await?;
        match exact.len() {
            1 => {
                let selector = format!("text=\"{}\"", escape_attribute(&needle));
                return Ok(StrategyResult::matched(
                    selector,
                    CONFIDENCE_TEXT,
                    exact.remove(0),
                ));
            }
            0 => {}
            n => {
                return Ok(StrategyResult::declined(format!(
                    "{} elements share text \"{}\"",
                    n, needle
                )));
            }
        }

        // Fuzzy fallback over the loose candidate set.
        let candidates = page.query_by_text(&needle, false).await?;
        let mut cleared = candidates
            .into_iter()
            .filter_map(|handle| {
                let candidate_text = normalize_text(handle.text.as_deref()?);
                let similarity = strsim::normalized_levenshtein(&candidate_text, &needle);
                (similarity >= FUZZY_TEXT_THRESHOLD).then(|| (handle, candidate_text, similarity))
            })
            .collect::<Vec<_>>();

        match cleared.len() {
            1 => {
                let (handle, candidate_text, similarity) = cleared.remove(0);
                debug!(
                    "fuzzy text match \"{}\" (similarity {:.2})",
                    candidate_text, similarity
                );
                let selector = format!("text=\"{}\"", escape_attribute(&candidate_text));
                Ok(StrategyResult::matched(
                    selector,
                    CONFIDENCE_TEXT * similarity,
                    handle,
                ))
            }
            0 => Ok(StrategyResult::declined(format!(
                "no element close to text \"{}\"",
                needle
            ))),
            n => Ok(StrategyResult::declined(format!(
                "{} elements close to text \"{}\"",
                n, needle
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use page_adapter::{ElementHandle, StaticPage};
    use tokio_test::block_on;

    fn page_with(elements: Vec<ElementHandle>) -> StaticPage {
        StaticPage::new(elements)
    }

    #[test]
    fn test_test_id_unique_match() {
        let page = page_with(vec![
            ElementHandle::new("n1", "button").with_test_id("submit-btn"),
            ElementHandle::new("n2", "button").with_test_id("cancel-btn"),
        ]);
        let info = ElementInfo::new("button").with_test_id("submit-btn");

        let result = block_on(TestIdStrategy::new().heal("#old", Some(&info), &page)).unwrap();
        assert!(result.is_match());
        assert_eq!(
            result.selector.as_deref(),
            Some("[data-testid=\"submit-btn\"]")
        );
        assert_eq!(result.confidence, Some(CONFIDENCE_TEST_ID));
        assert_eq!(result.element.unwrap().remote_id, "n1");
    }

    #[test]
    fn test_test_id_ambiguous_declines() {
        let page = page_with(vec![
            ElementHandle::new("n1", "button").with_test_id("row"),
            ElementHandle::new("n2", "button").with_test_id("row"),
        ]);
        let info = ElementInfo::new("button").with_test_id("row");

        let result = block_on(TestIdStrategy::new().heal("#old", Some(&info), &page)).unwrap();
        assert!(!result.is_match());
    }

    #[test]
    fn test_test_id_missing_signal_declines() {
        let page = page_with(vec![ElementHandle::new("n1", "button")]);

        let no_info = block_on(TestIdStrategy::new().heal("#old", None, &page)).unwrap();
        assert!(!no_info.is_match());

        let info = ElementInfo::new("button").with_text("Submit");
        let no_field = block_on(TestIdStrategy::new().heal("#old", Some(&info), &page)).unwrap();
        assert!(!no_field.is_match());
    }

    #[test]
    fn test_test_id_custom_attribute() {
        let page = page_with(vec![ElementHandle::new("n1", "input").with_test_id("email")]);
        let info = ElementInfo::new("input").with_test_id("email");

        let strategy = TestIdStrategy::with_attribute("data-qa");
        assert_eq!(strategy.name(), "data-qa");
        let result = block_on(strategy.heal("#old", Some(&info), &page)).unwrap();
        assert_eq!(result.selector.as_deref(), Some("[data-qa=\"email\"]"));
    }

    #[test]
    fn test_aria_role_and_label_match() {
        let page = page_with(vec![
            ElementHandle::new("n1", "button")
                .with_aria_role("button")
                .with_aria_label("Submit"),
            ElementHandle::new("n2", "a").with_aria_role("link"),
        ]);
        let info = ElementInfo::new("button")
            .with_aria_role("button")
            .with_aria_label("Submit");

        let result = block_on(AriaStrategy::new().heal("#old", Some(&info), &page)).unwrap();
        assert!(result.is_match());
        assert_eq!(
            result.selector.as_deref(),
            Some("[role=\"button\"][aria-label=\"Submit\"]")
        );
        assert_eq!(result.confidence, Some(CONFIDENCE_ARIA));
    }

    #[test]
    fn test_aria_label_only_match() {
        let page = page_with(vec![
            ElementHandle::new("n1", "span").with_aria_label("Close dialog")
        ]);
        let info = ElementInfo::new("span").with_aria_label("Close dialog");

        let result = block_on(AriaStrategy::new().heal("#old", Some(&info), &page)).unwrap();
        assert!(result.is_match());
        assert_eq!(
            result.selector.as_deref(),
            Some("[aria-label=\"Close dialog\"]")
        );
    }

    #[test]
    fn test_aria_zero_matches_declines() {
        let page = page_with(vec![ElementHandle::new("n1", "button")]);
        let info = ElementInfo::new("button").with_aria_label("Submit");

        let result = block_on(AriaStrategy::new().heal("#old", Some(&info), &page)).unwrap();
        assert!(!result.is_match());
    }

    #[test]
    fn test_text_exact_match() {
        let page = page_with(vec![
            ElementHandle::new("n1", "a").with_text("  Click   Here "),
            ElementHandle::new("n2", "a").with_text("Elsewhere"),
        ]);
        let info = ElementInfo::new("a").with_text("Click Here");

        let result = block_on(TextStrategy::new().heal("#old", Some(&info), &page)).unwrap();
        assert!(result.is_match());
        assert_eq!(result.selector.as_deref(), Some("text=\"click here\""));
        assert_eq!(result.confidence, Some(CONFIDENCE_TEXT));
    }

    #[test]
    fn test_text_ambiguous_exact_declines() {
        let page = page_with(vec![
            ElementHandle::new("n1", "a").with_text("Click Here"),
            ElementHandle::new("n2", "button").with_text("click   HERE"),
        ]);
        let info = ElementInfo::new("a").with_text("Click Here");

        let result = block_on(TextStrategy::new().heal("#old", Some(&info), &page)).unwrap();
        assert!(!result.is_match());
    }

    #[test]
    fn test_text_fuzzy_fallback_unique() {
        // "submit order" vs "submit orders": similarity well above 0.8.
        let page = page_with(vec![
            ElementHandle::new("n1", "button").with_text("Submit orders"),
            ElementHandle::new("n2", "a").with_text("Cancel"),
        ]);
        let info = ElementInfo::new("button").with_text("Submit order");

        let result = block_on(TextStrategy::new().heal("#old", Some(&info), &page)).unwrap();
        assert!(result.is_match());
        assert_eq!(result.selector.as_deref(), Some("text=\"submit orders\""));
        let confidence = result.confidence.unwrap();
        assert!(confidence < CONFIDENCE_TEXT);
        assert!(confidence > 0.0);
    }

    #[test]
    fn test_text_fuzzy_ambiguous_declines() {
        let page = page_with(vec![
            ElementHandle::new("n1", "a").with_text("Submit orders"),
            ElementHandle::new("n2", "a").with_text("Submit ordered"),
        ]);
        let info = ElementInfo::new("a").with_text("Submit order");

        let result = block_on(TextStrategy::new().heal("#old", Some(&info), &page)).unwrap();
        assert!(!result.is_match());
    }

    #[test]
    fn test_text_fuzzy_below_threshold_declines() {
        let page = page_with(vec![
            ElementHandle::new("n1", "a").with_text("Submit completely different")
        ]);
        let info = ElementInfo::new("a").with_text("Submit order");

        let result = block_on(TextStrategy::new().heal("#old", Some(&info), &page)).unwrap();
        assert!(!result.is_match());
    }

    #[test]
    fn test_escape_attribute() {
        assert_eq!(escape_attribute("a\"b"), "a\\\"b");
        assert_eq!(escape_attribute("a\\b"), "a\\\\b");
    }
}

//! Persistence interface for element metadata

use std::collections::HashMap;
use std::sync::Mutex;

use crate::errors::HealError;
use crate::info::ElementInfo;

/// Narrow read interface the engine uses to look up stored metadata.
///
/// The engine never writes through this trait: on a successful heal it
/// returns a proposed [`ElementInfo`] inside the outcome and the caller
/// performs the actual write.
pub trait InfoStore: Send + Sync {
    /// Look up the last-known snapshot for a selector.
    fn lookup(&self, selector: &str) -> Option<ElementInfo>;
}

/// In-memory selector-to-snapshot store.
///
/// Suitable as the backing store for a single run; embedders that persist
/// between runs can snapshot it to JSON and reload it through their own I/O.
#[derive(Debug, Default)]
pub struct MemoryInfoStore {
    entries: Mutex<HashMap<String, ElementInfo>>,
}

impl MemoryInfoStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a snapshot for a selector, replacing any previous one
    /// wholesale.
    pub fn record(&self, selector: impl Into<String>, info: ElementInfo) {
        let mut entries = self.entries.lock().unwrap();
        entries.insert(selector.into(), info);
    }

    /// Remove the snapshot for a selector.
    pub fn remove(&self, selector: &str) -> Option<ElementInfo> {
        let mut entries = self.entries.lock().unwrap();
        entries.remove(selector)
    }

    /// Number of stored snapshots.
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().unwrap().is_empty()
    }

    /// Export all entries as a JSON object keyed by selector.
    pub fn to_json(&self) -> Result<String, HealError> {
        let entries = self.entries.lock().unwrap();
        serde_json::to_string(&*entries).map_err(|e| HealError::Internal(e.to_string()))
    }

    /// Load entries from a JSON object produced by [`Self::to_json`].
    ///
    /// Existing entries for the same selectors are replaced.
    pub fn load_json(&self, json: &str) -> Result<usize, HealError> {
        let parsed: HashMap<String, ElementInfo> =
            serde_json::from_str(json).map_err(|e| HealError::InvalidInput(e.to_string()))?;
        let count = parsed.len();
        let mut entries = self.entries.lock().unwrap();
        entries.extend(parsed);
        Ok(count)
    }
}

impl InfoStore for MemoryInfoStore {
    fn lookup(&self, selector: &str) -> Option<ElementInfo> {
        let entries = self.entries.lock().unwrap();
        entries.get(selector).cloned()
    }
}

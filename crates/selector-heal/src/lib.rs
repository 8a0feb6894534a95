//! Self-healing element locator engine
//!
//! When a browser-automation selector stops matching (markup drift), this
//! crate attempts to recover a working replacement selector using a
//! prioritized set of independent recovery strategies:
//! - test-id attribute matching (most stable signal)
//! - ARIA role / accessible-name matching
//! - visible text matching with a fuzzy fallback (least stable signal)
//!
//! Strategies run strictly in priority order; the first match wins and
//! short-circuits the rest. Metadata about previously resolved elements
//! ([`ElementInfo`]) is read through a narrow store interface and a fresh
//! snapshot is proposed back to the caller on every successful heal.

pub mod errors;
pub mod healer;
pub mod info;
pub mod registry;
pub mod store;
pub mod strategies;
pub mod types;

pub use errors::*;
pub use healer::*;
pub use info::*;
pub use registry::*;
pub use store::*;
pub use strategies::*;
pub use types::*;

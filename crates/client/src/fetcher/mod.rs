//! Search fetchers invoked on cache misses.
//!
//! Both implementations honor the same contract, so swapping one for the
//! other never changes cache semantics.

pub mod live;
pub mod mock;

pub use live::TavilyFetcher;
pub use mock::{MockTableError, MockTableFetcher};

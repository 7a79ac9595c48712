//! Cache inspection tools.
//!
//! Read-only views over the session's semantic cache.

pub mod get;
pub mod list;

pub use get::{CacheGetParams, get_impl};
pub use list::{CacheListParams, list_impl};

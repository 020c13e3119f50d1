//! Caching utilities.
//!
//! A generic time-based cache with TTL support, used as the session store.

pub mod timed_cache;

pub use timed_cache::TimedCache;

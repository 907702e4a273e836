//! Infrastructure layer - Store implementations
//!
//! The review core only talks to the store traits in `domain`. The adapter
//! here keeps everything in process memory; it backs the test suite and
//! serves as the reference implementation for a database-backed store.

pub mod memory;

pub use memory::{
    InMemoryBookStore, InMemoryRecommendationStore, InMemoryReviewStore, InMemoryUserStore,
};

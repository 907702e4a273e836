//! Store trait definitions
//!
//! These traits define the contract for data access. The review core treats
//! persistence as an external collaborator: a durable keyed store reachable
//! by id and by compound lookup. Implementations live in the infrastructure
//! layer.

use async_trait::async_trait;

use super::DomainError;
use crate::models::{Book, Recommendation, Review, User};

/// Read-only access to reader accounts (owned by the account subsystem)
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Find a user by ID
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError>;
}

/// Store for Book entities
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Find a book by ID
    async fn find_by_id(&self, id: i64) -> Result<Option<Book>, DomainError>;

    /// Exact-match lookup on the (title, author) natural key
    async fn find_by_title_and_author(
        &self,
        title: &str,
        author: &str,
    ) -> Result<Option<Book>, DomainError>;

    /// List all books
    async fn find_all(&self) -> Result<Vec<Book>, DomainError>;

    /// Persist a book, assigning an id when it has none
    async fn save(&self, book: Book) -> Result<Book, DomainError>;
}

/// Store for Review entities
#[async_trait]
pub trait ReviewStore: Send + Sync {
    /// Find a review by ID
    async fn find_by_id(&self, id: i64) -> Result<Option<Review>, DomainError>;

    /// All reviews by a given user for a given book (the uniqueness check)
    async fn find_by_user_and_book(
        &self,
        user_id: i64,
        book_id: i64,
    ) -> Result<Vec<Review>, DomainError>;

    /// All reviews by a user, newest first
    async fn find_by_user_id(&self, user_id: i64) -> Result<Vec<Review>, DomainError>;

    /// All reviews for a book
    async fn find_by_book_id(&self, book_id: i64) -> Result<Vec<Review>, DomainError>;

    /// Persist a review, assigning an id when it has none
    async fn save(&self, review: Review) -> Result<Review, DomainError>;

    /// Delete a review by ID
    async fn delete(&self, id: i64) -> Result<(), DomainError>;
}

/// Store for Recommendation records (append-only AI byproducts)
#[async_trait]
pub trait RecommendationStore: Send + Sync {
    /// Persist a recommendation, assigning an id when it has none
    async fn save(
        &self,
        recommendation: Recommendation,
    ) -> Result<Recommendation, DomainError>;

    /// Recommendations spawned by a given review
    async fn find_by_review_id(&self, review_id: i64) -> Result<Vec<Recommendation>, DomainError>;

    /// Recommendations spawned from a given source book
    async fn find_by_source_book_id(
        &self,
        source_book_id: i64,
    ) -> Result<Vec<Recommendation>, DomainError>;
}

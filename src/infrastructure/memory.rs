//! In-memory store adapters
//!
//! Hash-map-backed implementations of the domain store traits, with
//! store-assigned sequential ids. Locks are only held for the duration of a
//! single map operation, never across an await point.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::domain::{
    BookStore, DomainError, RecommendationStore, ReviewStore, UserStore,
};
use crate::models::{Book, Recommendation, Review, User};

fn poisoned(_: impl std::fmt::Debug) -> DomainError {
    DomainError::Database("store lock poisoned".to_string())
}

#[derive(Default)]
pub struct InMemoryUserStore {
    users: RwLock<HashMap<i64, User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a user; accounts are created by the (external) account subsystem.
    pub fn insert(&self, user: User) {
        if let Ok(mut users) = self.users.write() {
            users.insert(user.id, user);
        }
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError> {
        let users = self.users.read().map_err(poisoned)?;
        Ok(users.get(&id).cloned())
    }
}

#[derive(Default)]
pub struct InMemoryBookStore {
    books: RwLock<HashMap<i64, Book>>,
    next_id: AtomicI64,
}

impl InMemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookStore for InMemoryBookStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<Book>, DomainError> {
        let books = self.books.read().map_err(poisoned)?;
        Ok(books.get(&id).cloned())
    }

    async fn find_by_title_and_author(
        &self,
        title: &str,
        author: &str,
    ) -> Result<Option<Book>, DomainError> {
        let books = self.books.read().map_err(poisoned)?;
        Ok(books
            .values()
            .find(|b| b.title == title && b.author == author)
            .cloned())
    }

    async fn find_all(&self) -> Result<Vec<Book>, DomainError> {
        let books = self.books.read().map_err(poisoned)?;
        let mut all: Vec<Book> = books.values().cloned().collect();
        all.sort_by_key(|b| b.id);
        Ok(all)
    }

    async fn save(&self, mut book: Book) -> Result<Book, DomainError> {
        let id = match book.id {
            Some(id) => id,
            None => {
                let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
                book.id = Some(id);
                id
            }
        };
        let mut books = self.books.write().map_err(poisoned)?;
        books.insert(id, book.clone());
        Ok(book)
    }
}

#[derive(Default)]
pub struct InMemoryReviewStore {
    reviews: RwLock<HashMap<i64, Review>>,
    next_id: AtomicI64,
}

impl InMemoryReviewStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReviewStore for InMemoryReviewStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<Review>, DomainError> {
        let reviews = self.reviews.read().map_err(poisoned)?;
        Ok(reviews.get(&id).cloned())
    }

    async fn find_by_user_and_book(
        &self,
        user_id: i64,
        book_id: i64,
    ) -> Result<Vec<Review>, DomainError> {
        let reviews = self.reviews.read().map_err(poisoned)?;
        Ok(reviews
            .values()
            .filter(|r| r.user_id == user_id && r.book_id == book_id)
            .cloned()
            .collect())
    }

    async fn find_by_user_id(&self, user_id: i64) -> Result<Vec<Review>, DomainError> {
        let reviews = self.reviews.read().map_err(poisoned)?;
        let mut result: Vec<Review> = reviews
            .values()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        // Newest first, id as tie-breaker
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(result)
    }

    async fn find_by_book_id(&self, book_id: i64) -> Result<Vec<Review>, DomainError> {
        let reviews = self.reviews.read().map_err(poisoned)?;
        let mut result: Vec<Review> = reviews
            .values()
            .filter(|r| r.book_id == book_id)
            .cloned()
            .collect();
        result.sort_by_key(|r| r.id);
        Ok(result)
    }

    async fn save(&self, mut review: Review) -> Result<Review, DomainError> {
        let id = match review.id {
            Some(id) => id,
            None => {
                let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
                review.id = Some(id);
                id
            }
        };
        let mut reviews = self.reviews.write().map_err(poisoned)?;
        reviews.insert(id, review.clone());
        Ok(review)
    }

    async fn delete(&self, id: i64) -> Result<(), DomainError> {
        let mut reviews = self.reviews.write().map_err(poisoned)?;
        reviews.remove(&id);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryRecommendationStore {
    recommendations: RwLock<HashMap<i64, Recommendation>>,
    next_id: AtomicI64,
}

impl InMemoryRecommendationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecommendationStore for InMemoryRecommendationStore {
    async fn save(
        &self,
        mut recommendation: Recommendation,
    ) -> Result<Recommendation, DomainError> {
        let id = match recommendation.id {
            Some(id) => id,
            None => {
                let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
                recommendation.id = Some(id);
                id
            }
        };
        let mut recommendations = self.recommendations.write().map_err(poisoned)?;
        recommendations.insert(id, recommendation.clone());
        Ok(recommendation)
    }

    async fn find_by_review_id(&self, review_id: i64) -> Result<Vec<Recommendation>, DomainError> {
        let recommendations = self.recommendations.read().map_err(poisoned)?;
        let mut result: Vec<Recommendation> = recommendations
            .values()
            .filter(|r| r.review_id == Some(review_id))
            .cloned()
            .collect();
        result.sort_by_key(|r| r.id);
        Ok(result)
    }

    async fn find_by_source_book_id(
        &self,
        source_book_id: i64,
    ) -> Result<Vec<Recommendation>, DomainError> {
        let recommendations = self.recommendations.read().map_err(poisoned)?;
        let mut result: Vec<Recommendation> = recommendations
            .values()
            .filter(|r| r.source_book_id == source_book_id)
            .cloned()
            .collect();
        result.sort_by_key(|r| r.id);
        Ok(result)
    }
}

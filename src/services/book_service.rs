//! Book Service - catalog lookups and the on-demand rating aggregate
//!
//! Books are simple catalog entries; the only logic here is the exact-match
//! find-or-create used when a review arrives for a book we don't know yet,
//! and the average rating derived live from the book's reviews.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::domain::{BookStore, DomainError, ReviewStore};
use crate::models::Book;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateBookRequest {
    pub title: String,
    pub author: String,
    pub genre: Option<String>,
    pub isbn: Option<String>,
    pub publisher: Option<String>,
    pub description: Option<String>,
    pub cover_image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BookResponse {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub genre: Option<String>,
    pub isbn: Option<String>,
    pub publisher: Option<String>,
    pub description: Option<String>,
    pub cover_image_url: Option<String>,
    pub average_rating: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BookResponse {
    fn from_book(book: Book, average_rating: f64) -> Self {
        Self {
            id: book.id.unwrap_or_default(),
            title: book.title,
            author: book.author,
            genre: book.genre,
            isbn: book.isbn,
            publisher: book.publisher,
            description: book.description,
            cover_image_url: book.cover_image_url,
            average_rating,
            created_at: book.created_at,
            updated_at: book.updated_at,
        }
    }
}

pub struct BookService {
    books: Arc<dyn BookStore>,
    reviews: Arc<dyn ReviewStore>,
}

impl BookService {
    pub fn new(books: Arc<dyn BookStore>, reviews: Arc<dyn ReviewStore>) -> Self {
        Self { books, reviews }
    }

    pub async fn create_book(&self, request: CreateBookRequest) -> Result<BookResponse, DomainError> {
        tracing::info!("Create book - title={:?}", request.title);

        let mut book = Book::new(request.title, request.author, request.genre);
        book.isbn = request.isbn;
        book.publisher = request.publisher;
        book.description = request.description;
        book.cover_image_url = request.cover_image_url;

        let book = self.books.save(book).await?;
        Ok(BookResponse::from_book(book, 0.0))
    }

    /// Exact (title, author) lookup, creating the book when absent. No fuzzy
    /// matching. Lookup and create are two store calls: concurrent callers
    /// with the same pair can both miss and both insert, so duplicates are
    /// possible without a store-level constraint on (title, author).
    pub async fn find_or_create_book(
        &self,
        title: &str,
        author: &str,
        genre: Option<&str>,
    ) -> Result<BookResponse, DomainError> {
        if let Some(book) = self.books.find_by_title_and_author(title, author).await? {
            let rating = self.average_rating_of(&book).await?;
            return Ok(BookResponse::from_book(book, rating));
        }

        tracing::info!("Book not in catalog, creating - title={:?}", title);
        self.create_book(CreateBookRequest {
            title: title.to_string(),
            author: author.to_string(),
            genre: genre.map(str::to_string),
            ..Default::default()
        })
        .await
    }

    pub async fn get_book(&self, book_id: i64) -> Result<BookResponse, DomainError> {
        let book = self
            .books
            .find_by_id(book_id)
            .await?
            .ok_or(DomainError::BookNotFound)?;
        let rating = self.average_rating_of(&book).await?;
        Ok(BookResponse::from_book(book, rating))
    }

    pub async fn get_all_books(&self) -> Result<Vec<BookResponse>, DomainError> {
        let mut responses = Vec::new();
        for book in self.books.find_all().await? {
            let rating = self.average_rating_of(&book).await?;
            responses.push(BookResponse::from_book(book, rating));
        }
        Ok(responses)
    }

    /// Arithmetic mean of the book's current review ratings, 0.0 when it has
    /// none. Recomputed from live data on every call: reviews can be deleted,
    /// so a cached aggregate would go stale.
    pub async fn average_rating(&self, book_id: i64) -> Result<f64, DomainError> {
        let book = self
            .books
            .find_by_id(book_id)
            .await?
            .ok_or(DomainError::BookNotFound)?;
        self.average_rating_of(&book).await
    }

    async fn average_rating_of(&self, book: &Book) -> Result<f64, DomainError> {
        let Some(book_id) = book.id else {
            return Ok(0.0);
        };
        let reviews = self.reviews.find_by_book_id(book_id).await?;
        if reviews.is_empty() {
            return Ok(0.0);
        }
        let sum: f64 = reviews.iter().map(|r| r.rating).sum();
        Ok(sum / reviews.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::{InMemoryBookStore, InMemoryReviewStore};
    use crate::models::Review;

    fn service() -> (BookService, Arc<InMemoryReviewStore>) {
        let books = Arc::new(InMemoryBookStore::new());
        let reviews = Arc::new(InMemoryReviewStore::new());
        (BookService::new(books, reviews.clone()), reviews)
    }

    fn review(user_id: i64, book_id: i64, rating: f64) -> Review {
        Review::new(
            user_id,
            book_id,
            "Plenty to say about this one.".to_string(),
            rating,
            "curious".to_string(),
            None,
        )
    }

    #[tokio::test]
    async fn find_or_create_returns_existing_on_exact_match() {
        let (service, _) = service();

        let first = service
            .find_or_create_book("Dune", "Frank Herbert", Some("Science fiction"))
            .await
            .unwrap();
        let second = service
            .find_or_create_book("Dune", "Frank Herbert", None)
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.genre.as_deref(), Some("Science fiction"));
    }

    #[tokio::test]
    async fn find_or_create_is_exact_not_fuzzy() {
        let (service, _) = service();

        let first = service
            .find_or_create_book("Dune", "Frank Herbert", None)
            .await
            .unwrap();
        let other = service
            .find_or_create_book("dune", "Frank Herbert", None)
            .await
            .unwrap();

        assert_ne!(first.id, other.id);
    }

    #[tokio::test]
    async fn average_rating_of_unreviewed_book_is_zero() {
        let (service, _) = service();

        let book = service
            .create_book(CreateBookRequest {
                title: "Dune".to_string(),
                author: "Frank Herbert".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(service.average_rating(book.id).await.unwrap(), 0.0);
    }

    #[tokio::test]
    async fn average_rating_is_the_arithmetic_mean() {
        let (service, reviews) = service();

        let book = service
            .create_book(CreateBookRequest {
                title: "Dune".to_string(),
                author: "Frank Herbert".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();

        for (user_id, rating) in [(1, 3.0), (2, 4.0), (3, 5.0)] {
            reviews.save(review(user_id, book.id, rating)).await.unwrap();
        }

        assert_eq!(service.average_rating(book.id).await.unwrap(), 4.0);
    }

    #[tokio::test]
    async fn average_rating_tracks_deletions() {
        let (service, reviews) = service();

        let book = service
            .create_book(CreateBookRequest {
                title: "Dune".to_string(),
                author: "Frank Herbert".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();

        let kept = reviews.save(review(1, book.id, 2.0)).await.unwrap();
        let dropped = reviews.save(review(2, book.id, 5.0)).await.unwrap();
        assert_eq!(service.average_rating(book.id).await.unwrap(), 3.5);

        reviews.delete(dropped.id.unwrap()).await.unwrap();
        assert_eq!(service.average_rating(book.id).await.unwrap(), 2.0);
        assert_eq!(kept.rating, 2.0);
    }

    #[tokio::test]
    async fn average_rating_of_unknown_book_is_an_error() {
        let (service, _) = service();
        let err = service.average_rating(404).await.unwrap_err();
        assert!(matches!(err, DomainError::BookNotFound));
    }
}

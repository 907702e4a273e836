//! Services Layer
//!
//! Business logic of the review core, independent of any HTTP layer.

pub mod book_service;
pub mod review_service;

pub use book_service::{BookResponse, BookService, CreateBookRequest};
pub use review_service::{CreateReviewRequest, ReviewResponse, ReviewService};

//! Domain error types
//!
//! These errors are framework-agnostic and represent business-level failures.

use std::fmt;

#[derive(Debug)]
pub enum DomainError {
    /// Acting user does not exist
    UserNotFound,
    /// Target book does not exist
    BookNotFound,
    /// Review lookup failed
    ReviewNotFound,
    /// The user already has a review for this book
    AlreadyReviewed,
    /// Acting user is not the owner of the review
    UnauthorizedAccess,
    /// Field-level validation failure
    Validation {
        field: &'static str,
        reason: String,
    },
    /// Storage/persistence error
    Database(String),
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::UserNotFound => write!(f, "User not found"),
            DomainError::BookNotFound => write!(f, "Book not found"),
            DomainError::ReviewNotFound => write!(f, "Review not found"),
            DomainError::AlreadyReviewed => write!(f, "This book has already been reviewed"),
            DomainError::UnauthorizedAccess => write!(f, "Access denied"),
            DomainError::Validation { field, reason } => {
                write!(f, "Validation error on '{}': {}", field, reason)
            }
            DomainError::Database(msg) => write!(f, "Database error: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}

//! Review Service - review submission and AI-annotation merge
//!
//! Owns the whole create pipeline: precondition checks, field validation,
//! the one-review-per-user-per-book rule, the AI merge decision, the single
//! persist, and the denormalized response projection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::ai_client::ReviewAnalyzer;
use crate::domain::{
    BookStore, DomainError, RecommendationStore, ReviewStore, UserStore,
};
use crate::models::{Book, Recommendation, Review, User};

/// Payload for submitting a review. The AI fields are optional: a client
/// that already ran the analysis (e.g. before submission) sends them along
/// and they are merged as-is instead of calling the analysis service.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateReviewRequest {
    pub book_id: i64,
    pub content: String,
    pub rating: f64,
    pub user_emotion: String,
    pub reading_date: Option<DateTime<Utc>>,
    pub ai_empathy_message: Option<String>,
    pub ai_book_insights: Option<String>,
    pub ai_emotion_analysis: Option<String>,
    pub ai_book_recommendations: Option<String>,
    pub ai_personalized_insight: Option<String>,
}

/// Review projection with user nickname and book title/author denormalized,
/// so callers don't need a second round trip.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewResponse {
    pub id: i64,
    pub user_id: i64,
    pub user_nickname: String,
    pub book_id: i64,
    pub book_title: String,
    pub book_author: String,
    pub content: String,
    pub rating: f64,
    pub user_emotion: String,
    pub ai_empathy_message: Option<String>,
    pub ai_book_insights: Option<String>,
    pub ai_emotion_analysis: Option<String>,
    pub ai_book_recommendations: Option<String>,
    pub ai_personalized_insight: Option<String>,
    pub reading_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl ReviewResponse {
    fn from_parts(review: &Review, user: &User, book: &Book) -> Self {
        Self {
            id: review.id.unwrap_or_default(),
            user_id: user.id,
            user_nickname: user.nickname.clone(),
            book_id: book.id.unwrap_or_default(),
            book_title: book.title.clone(),
            book_author: book.author.clone(),
            content: review.content.clone(),
            rating: review.rating,
            user_emotion: review.user_emotion.clone(),
            ai_empathy_message: review.ai_empathy_message.clone(),
            ai_book_insights: review.ai_book_insights.clone(),
            ai_emotion_analysis: review.ai_emotion_analysis.clone(),
            ai_book_recommendations: review.ai_book_recommendations.clone(),
            ai_personalized_insight: review.ai_personalized_insight.clone(),
            reading_date: review.reading_date,
            created_at: review.created_at,
        }
    }
}

pub struct ReviewService {
    users: Arc<dyn UserStore>,
    books: Arc<dyn BookStore>,
    reviews: Arc<dyn ReviewStore>,
    recommendations: Arc<dyn RecommendationStore>,
    /// Analysis is caller-controlled: a service built without an analyzer
    /// never calls out, reviews are simply stored with blank AI fields.
    analyzer: Option<Arc<dyn ReviewAnalyzer>>,
}

impl ReviewService {
    pub fn new(
        users: Arc<dyn UserStore>,
        books: Arc<dyn BookStore>,
        reviews: Arc<dyn ReviewStore>,
        recommendations: Arc<dyn RecommendationStore>,
    ) -> Self {
        Self {
            users,
            books,
            reviews,
            recommendations,
            analyzer: None,
        }
    }

    pub fn with_analyzer(mut self, analyzer: Arc<dyn ReviewAnalyzer>) -> Self {
        self.analyzer = Some(analyzer);
        self
    }

    /// Submit a review. AI enrichment is best-effort and never blocks the
    /// write path: a pre-supplied analysis is merged as-is, the analysis
    /// service (when configured) degrades to blank fields on failure.
    pub async fn create_review(
        &self,
        acting_user_id: i64,
        request: CreateReviewRequest,
    ) -> Result<ReviewResponse, DomainError> {
        tracing::info!(
            "Create review - user={}, book={}",
            acting_user_id,
            request.book_id
        );

        let user = self
            .users
            .find_by_id(acting_user_id)
            .await?
            .ok_or(DomainError::UserNotFound)?;

        let book = self
            .books
            .find_by_id(request.book_id)
            .await?
            .ok_or(DomainError::BookNotFound)?;

        // Check-then-insert: NOT atomic. Two concurrent submissions for the
        // same (user, book) can both pass this check and both insert. Real
        // duplicate prevention needs a store-level uniqueness constraint on
        // (user_id, book_id) or per-key serialization.
        if !self
            .reviews
            .find_by_user_and_book(acting_user_id, request.book_id)
            .await?
            .is_empty()
        {
            return Err(DomainError::AlreadyReviewed);
        }

        validate_request(&request)?;

        let mut review = Review::new(
            acting_user_id,
            request.book_id,
            request.content.clone(),
            request.rating,
            request.user_emotion.clone(),
            request.reading_date,
        );

        let mut spawned_recommendations = Vec::new();

        if let Some(empathy) = &request.ai_empathy_message
            && !empathy.is_empty()
        {
            // Client brought its own analysis: merge directly, skip the
            // analysis service entirely.
            if request.ai_book_recommendations.is_some()
                || request.ai_personalized_insight.is_some()
            {
                review.apply_ai_analysis_with_recommendations(
                    request.ai_empathy_message.clone(),
                    request.ai_book_insights.clone(),
                    request.ai_emotion_analysis.clone(),
                    request.ai_book_recommendations.clone(),
                    request.ai_personalized_insight.clone(),
                );
            } else {
                review.apply_ai_analysis(
                    request.ai_empathy_message.clone(),
                    request.ai_book_insights.clone(),
                    request.ai_emotion_analysis.clone(),
                );
            }
        } else if let Some(analyzer) = &self.analyzer {
            let result = analyzer.analyze(&review, &book).await;
            if result.is_empty() {
                tracing::warn!(
                    "AI analysis unavailable, storing review without annotations"
                );
            } else {
                review.apply_ai_analysis(
                    Some(result.empathy_message()),
                    Some(result.book_insights()),
                    Some(result.emotion_analysis()),
                );
                if !result.recommendations.is_empty() {
                    review.ai_book_recommendations =
                        serde_json::to_string(&result.recommendations).ok();
                    spawned_recommendations = result.recommendations;
                }
            }
        }

        let review = self.reviews.save(review).await?;

        // Recommendation records are a byproduct of the analysis merge,
        // written after the save so they carry the assigned review id.
        for rec in spawned_recommendations {
            self.recommendations
                .save(Recommendation {
                    id: None,
                    source_book_id: request.book_id,
                    review_id: review.id,
                    title: rec.title,
                    author: rec.author,
                    reason: rec.reason.unwrap_or_default(),
                    similarity_score: rec.similarity_score.unwrap_or(0.0),
                    created_at: Utc::now(),
                })
                .await?;
        }

        Ok(ReviewResponse::from_parts(&review, &user, &book))
    }

    pub async fn get_review(&self, review_id: i64) -> Result<ReviewResponse, DomainError> {
        let review = self
            .reviews
            .find_by_id(review_id)
            .await?
            .ok_or(DomainError::ReviewNotFound)?;
        self.project(review).await
    }

    /// All reviews by a user, newest first.
    pub async fn get_user_reviews(&self, user_id: i64) -> Result<Vec<ReviewResponse>, DomainError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound)?;

        let mut responses = Vec::new();
        for review in self.reviews.find_by_user_id(user_id).await? {
            let book = self
                .books
                .find_by_id(review.book_id)
                .await?
                .ok_or(DomainError::BookNotFound)?;
            responses.push(ReviewResponse::from_parts(&review, &user, &book));
        }
        Ok(responses)
    }

    pub async fn get_book_reviews(&self, book_id: i64) -> Result<Vec<ReviewResponse>, DomainError> {
        let book = self
            .books
            .find_by_id(book_id)
            .await?
            .ok_or(DomainError::BookNotFound)?;

        let mut responses = Vec::new();
        for review in self.reviews.find_by_book_id(book_id).await? {
            let user = self
                .users
                .find_by_id(review.user_id)
                .await?
                .ok_or(DomainError::UserNotFound)?;
            responses.push(ReviewResponse::from_parts(&review, &user, &book));
        }
        Ok(responses)
    }

    /// Delete a review. Only the review's creator may delete it; spawned
    /// recommendation records are independent and stay behind.
    pub async fn delete_review(
        &self,
        acting_user_id: i64,
        review_id: i64,
    ) -> Result<(), DomainError> {
        let review = self
            .reviews
            .find_by_id(review_id)
            .await?
            .ok_or(DomainError::ReviewNotFound)?;

        if review.user_id != acting_user_id {
            return Err(DomainError::UnauthorizedAccess);
        }

        tracing::info!("Delete review - user={}, review={}", acting_user_id, review_id);
        self.reviews.delete(review_id).await
    }

    async fn project(&self, review: Review) -> Result<ReviewResponse, DomainError> {
        let user = self
            .users
            .find_by_id(review.user_id)
            .await?
            .ok_or(DomainError::UserNotFound)?;
        let book = self
            .books
            .find_by_id(review.book_id)
            .await?
            .ok_or(DomainError::BookNotFound)?;
        Ok(ReviewResponse::from_parts(&review, &user, &book))
    }
}

fn validate_request(request: &CreateReviewRequest) -> Result<(), DomainError> {
    if request.content.chars().count() < 10 {
        return Err(DomainError::Validation {
            field: "content",
            reason: "must be at least 10 characters".to_string(),
        });
    }
    if !(0.0..=5.0).contains(&request.rating) {
        return Err(DomainError::Validation {
            field: "rating",
            reason: "must be between 0.0 and 5.0".to_string(),
        });
    }
    if request.user_emotion.trim().is_empty() {
        return Err(DomainError::Validation {
            field: "user_emotion",
            reason: "must not be empty".to_string(),
        });
    }
    Ok(())
}

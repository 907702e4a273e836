use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Emotional reading review. At most one per (user_id, book_id) pair; the
/// review service enforces that at creation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    /// Assigned by the store on save
    pub id: Option<i64>,
    pub user_id: i64,
    pub book_id: i64,
    pub content: String,
    pub rating: f64,
    pub user_emotion: String,
    /// AI annotation fields, each independently optional. Populated either
    /// from the create request or from the analysis service, never required.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_empathy_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_book_insights: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_emotion_analysis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_book_recommendations: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_personalized_insight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reading_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Review {
    pub fn new(
        user_id: i64,
        book_id: i64,
        content: String,
        rating: f64,
        user_emotion: String,
        reading_date: Option<DateTime<Utc>>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            user_id,
            book_id,
            content,
            rating,
            user_emotion,
            ai_empathy_message: None,
            ai_book_insights: None,
            ai_emotion_analysis: None,
            ai_book_recommendations: None,
            ai_personalized_insight: None,
            reading_date,
            created_at: now,
            updated_at: now,
        }
    }

    /// Base three-field merge: empathy message, insights, emotion analysis.
    /// Recommendations and personalized insight stay untouched.
    pub fn apply_ai_analysis(
        &mut self,
        empathy_message: Option<String>,
        book_insights: Option<String>,
        emotion_analysis: Option<String>,
    ) {
        self.ai_empathy_message = empathy_message;
        self.ai_book_insights = book_insights;
        self.ai_emotion_analysis = emotion_analysis;
        self.updated_at = Utc::now();
    }

    /// Extended five-field merge, used when the caller also supplied
    /// recommendations or a personalized insight.
    pub fn apply_ai_analysis_with_recommendations(
        &mut self,
        empathy_message: Option<String>,
        book_insights: Option<String>,
        emotion_analysis: Option<String>,
        book_recommendations: Option<String>,
        personalized_insight: Option<String>,
    ) {
        self.ai_empathy_message = empathy_message;
        self.ai_book_insights = book_insights;
        self.ai_emotion_analysis = emotion_analysis;
        self.ai_book_recommendations = book_recommendations;
        self.ai_personalized_insight = personalized_insight;
        self.updated_at = Utc::now();
    }
}

//! Client for the external review-analysis service.
//!
//! The service enriches a review with an empathy message, book insights, an
//! emotion analysis and book recommendations. Enrichment is best-effort: any
//! failure (connect error, non-2xx, timeout, bad body) degrades to an empty
//! result so a broken analysis service can never block review creation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::Config;
use crate::models::{Book, Review};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Serialize)]
pub struct AiAnalysisRequest {
    pub review_id: Option<i64>,
    pub book_title: String,
    pub author: String,
    pub content: String,
    pub rating: f64,
    pub user_emotion: String,
    pub genre: Option<String>,
}

/// Analysis payload as returned by the service. All parts are optional;
/// `empty()` is the degraded form used on any failure.
#[derive(Debug, Default, Deserialize)]
pub struct AiAnalysisResult {
    pub review_id: Option<i64>,
    pub ai_response: Option<AiResponse>,
    #[serde(default)]
    pub recommendations: Vec<RecommendedBook>,
}

#[derive(Debug, Deserialize)]
pub struct AiResponse {
    pub empathy_message: Option<String>,
    #[serde(default)]
    pub book_insights: Vec<String>,
    /// Open-ended structure from the service; kept opaque and only
    /// stringified at merge time, never matched on.
    pub emotion_analysis: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendedBook {
    pub title: String,
    pub author: String,
    pub reason: Option<String>,
    pub similarity_score: Option<f64>,
}

impl AiAnalysisResult {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.ai_response.is_none() && self.recommendations.is_empty()
    }

    /// Empathy message, blank when the service returned none.
    pub fn empathy_message(&self) -> String {
        self.ai_response
            .as_ref()
            .and_then(|r| r.empathy_message.clone())
            .unwrap_or_default()
    }

    /// Insights joined into a single string for storage.
    pub fn book_insights(&self) -> String {
        self.ai_response
            .as_ref()
            .map(|r| r.book_insights.join(", "))
            .unwrap_or_default()
    }

    /// Stringified emotion analysis. A bare JSON string is stored unquoted,
    /// any other shape as compact JSON text.
    pub fn emotion_analysis(&self) -> String {
        match self.ai_response.as_ref().and_then(|r| r.emotion_analysis.as_ref()) {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(value) => value.to_string(),
            None => String::new(),
        }
    }
}

/// Seam between the review service and the analysis backend. Infallible by
/// contract: implementations absorb their own failures and return an empty
/// result instead.
#[async_trait]
pub trait ReviewAnalyzer: Send + Sync {
    async fn analyze(&self, review: &Review, book: &Book) -> AiAnalysisResult;
}

pub struct AiServiceClient {
    base_url: String,
    timeout: Duration,
}

impl AiServiceClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.ai_service_url.clone(),
            Duration::from_secs(config.ai_timeout_secs),
        )
    }

    async fn post_analysis(&self, request: &AiAnalysisRequest) -> Result<AiAnalysisResult, String> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| format!("Failed to build client: {}", e))?;

        let url = format!("{}/api/v1/reviews/analyze", self.base_url);

        let resp = client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| format!("Request failed: {}", e))?;

        if !resp.status().is_success() {
            return Err(format!("Analysis service returned {}", resp.status()));
        }

        resp.json::<AiAnalysisResult>()
            .await
            .map_err(|e| format!("Parse error: {}", e))
    }
}

#[async_trait]
impl ReviewAnalyzer for AiServiceClient {
    /// Single attempt, no retry. Timeout and all transport or protocol
    /// errors are logged and downgraded to an empty result.
    async fn analyze(&self, review: &Review, book: &Book) -> AiAnalysisResult {
        let request = AiAnalysisRequest {
            review_id: review.id,
            book_title: book.title.clone(),
            author: book.author.clone(),
            content: review.content.clone(),
            rating: review.rating,
            user_emotion: review.user_emotion.clone(),
            genre: book.genre.clone(),
        };

        match self.post_analysis(&request).await {
            Ok(result) => result,
            Err(e) => {
                tracing::error!("AI analysis call failed: {}", e);
                AiAnalysisResult::empty()
            }
        }
    }
}

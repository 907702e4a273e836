pub mod ai_client;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod models;
pub mod services;

pub use ai_client::{AiServiceClient, ReviewAnalyzer};
pub use config::Config;
pub use domain::DomainError;

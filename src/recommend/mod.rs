/// Recommendation service module - Gateway

mod client;
mod types;

pub use client::RecommendationClient;
pub use types::{
    bloom_level_description, priority_stars, DifficultyIndicators, ModelInfo, QuizStatistics,
    Recommendation, RecommendationResponse, StudentProfile, StudentStatistics,
};

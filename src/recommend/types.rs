use serde::{Deserialize, Serialize};

/// Aggregate quiz statistics for one student
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizStatistics {
    pub total_quizzes: u32,
    pub average_score: f64,
    pub average_percentage: f64,
    pub mastered_count: u32,
    pub not_mastered_count: u32,
    pub mastery_rate: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudentProfile {
    pub student_id: String,
    /// Sub-skills not yet mastered
    pub sous_acquis: Vec<String>,
    pub total_non_mastered: u32,
    pub statistics: QuizStatistics,
    pub recent_quizzes: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudentStatistics {
    pub student_id: String,
    pub statistics: QuizStatistics,
    pub current_non_mastered: u32,
    pub mastery_threshold: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyIndicators {
    pub struggling_students: u32,
    pub bloom_level: u8,
}

/// One lesson the recommender suggests studying next
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Recommendation {
    pub lesson_id: String,
    pub lesson_name: String,
    /// In [0, 1]
    pub priority_score: f64,
    pub bloom_level: u8,
    pub prerequisites: Vec<String>,
    pub difficulty_indicators: DifficultyIndicators,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendationResponse {
    pub student_id: String,
    pub total_non_mastered: u32,
    pub eligible_for_study: u32,
    pub recommendations: Vec<Recommendation>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelInfo {
    pub gcn_available: bool,
    pub model_info: Option<serde_json::Value>,
    pub mastery_threshold: Option<f64>,
    pub message: Option<String>,
}

/// Human label for a Bloom taxonomy level
pub fn bloom_level_description(level: u8) -> &'static str {
    match level {
        1 => "Knowledge (remember)",
        2 => "Comprehension (understand)",
        3 => "Application (apply)",
        4 => "Analysis (analyze)",
        5 => "Synthesis (evaluate)",
        6 => "Evaluation (create)",
        _ => "Unknown level",
    }
}

/// Priority in [0, 1] rendered as zero to five stars
pub fn priority_stars(score: f64) -> String {
    let stars = (score.clamp(0.0, 1.0) * 5.0).round() as usize;
    "*".repeat(stars)
}

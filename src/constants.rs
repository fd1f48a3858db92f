/// Constants module to avoid magic numbers in the codebase

// Network Configuration
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8001/api";
pub const QUIZ_CHAT_PATH: &str = "quiz-chat";
pub const ASSISTANT_CHAT_PATH: &str = "chat";
pub const EVALUATE_QUIZ_PATH: &str = "recommendations/evaluate-quiz";
pub const RECOMMENDATIONS_PATH: &str = "recommendations";

// Timeouts
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 20;
pub const HEALTH_CHECK_TIMEOUT_MS: u64 = 500;

// Student identity
/// Used when no student id was ever provided. The backend accepts it, but it
/// is shared by every anonymous user.
pub const PLACEHOLDER_STUDENT_ID: &str = "STUDENT001";

// Recommendations
pub const DEFAULT_MAX_RECOMMENDATIONS: usize = 5;

// Environment
pub const ENV_PREFIX: &str = "QUIZCHAT_";
pub const APP_NAME: &str = "quizchat";

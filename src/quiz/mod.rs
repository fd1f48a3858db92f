// Gateway module for the quiz flow - follows the Train Station Pattern
// All external access must go through this gateway

// Private submodules - not directly accessible from outside
mod controller;
mod detector;
mod evaluation;
mod feedback;
mod links;

// Public re-exports - the ONLY way to access quiz functionality
pub use controller::{Navigation, QuizController, RoundTrip, SessionSnapshot, TurnOutcome};
pub use detector::{detect, detect_completion, Score};
pub use evaluation::{EvaluationSubmitter, HttpEvaluator, MasteryBadge, MasteryResult};
pub use feedback::ScoreBand;
pub use links::{video_links, VideoLink};

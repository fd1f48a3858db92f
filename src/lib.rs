pub mod app;
pub mod assistant;
pub mod cli;
pub mod constants;
pub mod quiz;
pub mod recommend;
pub mod runtime;
pub mod session;
pub mod utils;

#[cfg(test)]
mod test_support;

pub use app::{load_config, Config};
pub use assistant::{AssistantGateway, HttpAssistant};
pub use quiz::{detect, QuizController, Score};
pub use session::{SessionContext, Transcript, Turn};
pub use utils::QuizError;

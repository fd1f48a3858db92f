use async_trait::async_trait;

use crate::constants::{ASSISTANT_CHAT_PATH, QUIZ_CHAT_PATH};
use crate::session::{SessionContext, Turn};
use crate::utils::QuizError;

/// Which assistant conversation the backend should run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatEndpoint {
    /// Quiz master that asks questions and announces a final score
    Quiz,
    /// Free-form course assistant
    Assistant,
}

impl ChatEndpoint {
    pub fn path(&self) -> &'static str {
        match self {
            ChatEndpoint::Quiz => QUIZ_CHAT_PATH,
            ChatEndpoint::Assistant => ASSISTANT_CHAT_PATH,
        }
    }
}

/// Remote assistant that continues a conversation
///
/// Implementations send the whole transcript and return the transcript the
/// server now considers current. They must not retry on failure.
#[async_trait]
pub trait AssistantGateway: Send + Sync {
    /// Send the transcript (possibly empty) and get back the server's transcript
    async fn send(&self, context: &SessionContext, turns: &[Turn]) -> Result<Vec<Turn>, QuizError>;

    /// Conversation kind this gateway talks to
    fn endpoint(&self) -> ChatEndpoint;
}

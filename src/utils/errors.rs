use thiserror::Error;

/// Main error type for quizchat
#[derive(Error, Debug)]
pub enum QuizError {
    /// Network or HTTP failure talking to the assistant or scoring service
    #[error("Connection error: {0}")]
    Transport(String),

    #[error("Request timed out after {0}s")]
    Timeout(u64),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl QuizError {
    /// Classify a reqwest failure; `timeout_secs` is the client's configured
    /// timeout, which reqwest does not report back
    pub fn from_reqwest(err: reqwest::Error, timeout_secs: u64) -> Self {
        if err.is_timeout() {
            QuizError::Timeout(timeout_secs)
        } else {
            QuizError::Transport(err.to_string())
        }
    }

    /// Message suitable for showing to the student
    pub fn user_message(&self) -> String {
        match self {
            QuizError::Transport(_) => {
                "Could not reach the server. Make sure the backend is running.".to_string()
            }
            QuizError::Timeout(secs) => {
                format!("The server did not answer within {} seconds.", secs)
            }
            other => other.to_string(),
        }
    }
}

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::gateway::{AssistantGateway, ChatEndpoint};
use crate::app::ApiConfig;
use crate::session::{SessionContext, Turn};
use crate::utils::QuizError;

/// Assistant gateway backed by the platform's HTTP API
pub struct HttpAssistant {
    client: Client,
    url: String,
    timeout_secs: u64,
    endpoint: ChatEndpoint,
}

impl HttpAssistant {
    pub fn new(api: &ApiConfig, endpoint: ChatEndpoint) -> Result<Self, QuizError> {
        let client = Client::builder()
            .timeout(api.timeout())
            .build()
            .map_err(|e| QuizError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            timeout_secs: api.timeout().as_secs(),
            url: api.endpoint(endpoint.path()),
            endpoint,
        })
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    course_number: u32,
    part_number: u32,
    messages: &'a [Turn],
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    /// Full server-side transcript; the `response` field repeats its last turn
    conversation: Vec<Turn>,
}

#[async_trait]
impl AssistantGateway for HttpAssistant {
    async fn send(&self, context: &SessionContext, turns: &[Turn]) -> Result<Vec<Turn>, QuizError> {
        let request_body = ChatRequest {
            course_number: context.course_number,
            part_number: context.part_number,
            messages: turns,
        };

        debug!("POST {} with {} turns", self.url, turns.len());

        let response = self
            .client
            .post(&self.url)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| QuizError::from_reqwest(e, self.timeout_secs))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(QuizError::Transport(format!(
                "assistant returned {}: {}",
                status, error_text
            )));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| QuizError::from_reqwest(e, self.timeout_secs))?;
        Ok(body.conversation)
    }

    fn endpoint(&self) -> ChatEndpoint {
        self.endpoint
    }
}

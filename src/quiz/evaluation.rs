use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::detector::Score;
use crate::app::ApiConfig;
use crate::constants::EVALUATE_QUIZ_PATH;
use crate::session::SessionContext;
use crate::utils::QuizError;

/// Authoritative evaluation returned by the scoring service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MasteryResult {
    pub is_mastered: bool,
    /// Mastery threshold in percent, decided server-side
    pub threshold: f64,
    #[serde(default)]
    pub percentage: Option<f64>,
    #[serde(default)]
    pub subskill_id: Option<String>,
    #[serde(default)]
    pub student_profile_updated: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
}

/// What the student sees next to their score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MasteryBadge {
    /// No evaluation yet, or the evaluation failed
    #[default]
    Pending,
    Mastered,
    NotMastered,
}

impl MasteryBadge {
    pub fn from_result(result: &MasteryResult) -> Self {
        if result.is_mastered {
            MasteryBadge::Mastered
        } else {
            MasteryBadge::NotMastered
        }
    }
}

/// Scoring collaborator that turns a detected score into a mastery verdict
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EvaluationSubmitter: Send + Sync {
    async fn submit(&self, context: &SessionContext, score: Score)
        -> Result<MasteryResult, QuizError>;
}

/// Evaluation submitter backed by the recommendation service
pub struct HttpEvaluator {
    client: Client,
    url: String,
    timeout_secs: u64,
}

#[derive(Debug, Serialize)]
struct EvaluationRequest<'a> {
    student_id: &'a str,
    course_number: u32,
    part_number: u32,
    total_questions: u32,
    correct_answers: u32,
}

impl HttpEvaluator {
    pub fn new(api: &ApiConfig) -> Result<Self, QuizError> {
        let client = Client::builder()
            .timeout(api.timeout())
            .build()
            .map_err(|e| QuizError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            timeout_secs: api.timeout().as_secs(),
            url: api.endpoint(EVALUATE_QUIZ_PATH),
        })
    }
}

#[async_trait]
impl EvaluationSubmitter for HttpEvaluator {
    async fn submit(
        &self,
        context: &SessionContext,
        score: Score,
    ) -> Result<MasteryResult, QuizError> {
        let request_body = EvaluationRequest {
            student_id: &context.student_id,
            course_number: context.course_number,
            part_number: context.part_number,
            total_questions: score.total,
            correct_answers: score.correct,
        };

        debug!(
            "POST {} for student {} ({}/{})",
            self.url, context.student_id, score.correct, score.total
        );

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
                "evaluation returned {}: {}",
                status, error_text
            )));
        }

        response
            .json()
            .await
            .map_err(|e| QuizError::from_reqwest(e, self.timeout_secs))
    }
}

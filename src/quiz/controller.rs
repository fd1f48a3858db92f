use parking_lot::Mutex;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::detector::{detect_completion, Score};
use super::evaluation::{EvaluationSubmitter, MasteryBadge, MasteryResult};
use super::links::video_links;
use crate::assistant::{AssistantGateway, ChatEndpoint};
use crate::session::{SessionContext, Transcript, Turn};
use crate::utils::QuizError;

/// Where the latest round-trip stands
///
/// `Pending` covers the window where the student's turn has been appended
/// locally but the server has not answered yet.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RoundTrip {
    #[default]
    Idle,
    Pending { optimistic_len: usize },
    Confirmed,
    Failed { message: String },
}

/// Result of a `start` or `submit_user_turn` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Blank input, nothing sent
    Ignored,
    /// Another round-trip is in flight
    Rejected,
    /// Server transcript applied; `score` is set when this reply completed
    /// the quiz with a new score
    Confirmed { score: Option<Score> },
    Failed { message: String },
}

/// Places the student can go from the quiz screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    CourseOptions { course_number: u32, part_number: u32 },
    CourseVideo { course_number: u32, part_number: u32 },
    Recommendations,
}

impl Navigation {
    /// Route in the web application
    pub fn route(&self) -> String {
        match self {
            Navigation::CourseOptions {
                course_number,
                part_number,
            } => format!("/Cours?course={}&part={}", course_number, part_number),
            Navigation::CourseVideo {
                course_number,
                part_number,
            } => format!(
                "/cours-viewer?course={}&part={}&showVideo=true",
                course_number, part_number
            ),
            Navigation::Recommendations => "/recommendations".to_string(),
        }
    }
}

/// Read-only copy of the controller state for rendering
#[derive(Debug, Clone, Default)]
pub struct SessionSnapshot {
    pub context: Option<SessionContext>,
    pub transcript: Transcript,
    pub busy: bool,
    pub phase: RoundTrip,
    pub error: Option<String>,
    pub score: Option<Score>,
    pub badge: MasteryBadge,
    pub mastery: Option<MasteryResult>,
    pub evaluation_error: Option<String>,
}

#[derive(Debug, Default)]
struct ControllerState {
    context: Option<SessionContext>,
    transcript: Transcript,
    busy: bool,
    phase: RoundTrip,
    error: Option<String>,
    score: Option<Score>,
    badge: MasteryBadge,
    mastery: Option<MasteryResult>,
    evaluation_error: Option<String>,
    /// Last score handed to the evaluator, so repeats are not resubmitted
    last_submitted: Option<Score>,
}

impl ControllerState {
    fn reset(&mut self, context: SessionContext) {
        *self = ControllerState {
            context: Some(context),
            ..Default::default()
        };
    }
}

/// Clears the busy flag when a round-trip ends, including when the caller
/// drops the future mid-flight.
struct InFlight<'a> {
    state: &'a Mutex<ControllerState>,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        let mut state = self.state.lock();
        state.busy = false;
        if matches!(state.phase, RoundTrip::Pending { .. }) {
            state.phase = RoundTrip::Failed {
                message: "Request abandoned before the server answered.".to_string(),
            };
        }
    }
}

/// Drives one quiz (or assistant) conversation
///
/// Owns the transcript and is the only thing that mutates it. All methods
/// take `&self` so the controller can be shared behind an `Arc`; at most one
/// gateway call runs at a time and further calls are rejected, not queued.
pub struct QuizController {
    gateway: Arc<dyn AssistantGateway>,
    evaluator: Option<Arc<dyn EvaluationSubmitter>>,
    timeout: Duration,
    state: Mutex<ControllerState>,
}

impl QuizController {
    pub fn new(
        gateway: Arc<dyn AssistantGateway>,
        evaluator: Option<Arc<dyn EvaluationSubmitter>>,
        timeout: Duration,
    ) -> Self {
        Self {
            gateway,
            evaluator,
            timeout,
            state: Mutex::new(ControllerState::default()),
        }
    }

    fn is_quiz(&self) -> bool {
        self.gateway.endpoint() == ChatEndpoint::Quiz
    }

    /// Begin a session for `context`, discarding any previous one
    ///
    /// In quiz mode an empty transcript is sent so the assistant opens with
    /// its first question. The free-form assistant greets locally instead.
    pub async fn start(&self, context: SessionContext) -> TurnOutcome {
        {
            let mut state = self.state.lock();
            if state.busy {
                return TurnOutcome::Rejected;
            }
            state.reset(context.clone());

            if !self.is_quiz() {
                state.transcript.push(Turn::assistant(greeting(&context)));
                state.phase = RoundTrip::Confirmed;
                return TurnOutcome::Confirmed { score: None };
            }

            state.busy = true;
            state.phase = RoundTrip::Pending { optimistic_len: 0 };
        }
        let _in_flight = InFlight { state: &self.state };

        info!("Starting quiz for {} (student {})", context.label(), context.student_id);

        let result = self
            .bounded(self.gateway.send(&context, &[]))
            .await
            .and_then(|turns| {
                if turns.is_empty() {
                    Err(QuizError::Transport(
                        "assistant returned an empty conversation".to_string(),
                    ))
                } else {
                    Ok(turns)
                }
            });

        let mut state = self.state.lock();
        match result {
            Ok(turns) => {
                debug!("Quiz opened with {} turns", turns.len());
                state.transcript.replace(turns);
                state.phase = RoundTrip::Confirmed;
                TurnOutcome::Confirmed { score: None }
            }
            Err(err) => {
                warn!("Failed to start quiz for {}: {}", context.label(), err);
                let message = err.user_message();
                state.transcript.clear();
                state.error = Some(message.clone());
                state.phase = RoundTrip::Failed {
                    message: message.clone(),
                };
                TurnOutcome::Failed { message }
            }
        }
    }

    /// Send the student's answer and apply the server's transcript
    ///
    /// The turn is appended before the call and stays there if the call
    /// fails; the next successful reply replaces it with the server's view.
    pub async fn submit_user_turn(&self, text: &str) -> TurnOutcome {
        if text.trim().is_empty() {
            return TurnOutcome::Ignored;
        }

        let (context, outbound) = {
            let mut state = self.state.lock();
            let Some(context) = state.context.clone() else {
                return TurnOutcome::Failed {
                    message: "No session started.".to_string(),
                };
            };
            if state.busy {
                return TurnOutcome::Rejected;
            }

            state.transcript.push(Turn::user(text));
            state.busy = true;
            state.error = None;
            state.phase = RoundTrip::Pending {
                optimistic_len: state.transcript.len(),
            };
            (context, state.transcript.turns().to_vec())
        };
        let _in_flight = InFlight { state: &self.state };

        let result = self.bounded(self.gateway.send(&context, &outbound)).await;

        let fresh_score = {
            let mut state = self.state.lock();
            match result {
                Ok(turns) => {
                    debug!("Received {} turns for {}", turns.len(), context.label());
                    state.transcript.replace(turns);
                    state.phase = RoundTrip::Confirmed;
                    if self.is_quiz() {
                        state.apply_detection()
                    } else {
                        None
                    }
                }
                Err(err) => {
                    warn!("Round-trip failed for {}: {}", context.label(), err);
                    let message = err.user_message();
                    state.error = Some(message.clone());
                    state.phase = RoundTrip::Failed {
                        message: message.clone(),
                    };
                    return TurnOutcome::Failed { message };
                }
            }
        };

        if let Some(score) = fresh_score {
            info!(
                "Quiz completed for {}: {}/{} ({}%)",
                context.label(),
                score.correct,
                score.total,
                score.percentage
            );
            self.evaluate(&context, score).await;
        }

        TurnOutcome::Confirmed { score: fresh_score }
    }

    /// Start over with the same context
    pub async fn restart(&self) -> TurnOutcome {
        let context = self.state.lock().context.clone();
        match context {
            Some(context) => self.start(context).await,
            None => TurnOutcome::Failed {
                message: "No session started.".to_string(),
            },
        }
    }

    /// Destinations available right now
    pub fn navigation(&self) -> Vec<Navigation> {
        let state = self.state.lock();
        let Some(context) = &state.context else {
            return Vec::new();
        };

        let mut targets = Vec::new();
        if !context.is_global() {
            targets.push(Navigation::CourseOptions {
                course_number: context.course_number,
                part_number: context.part_number,
            });
            targets.push(Navigation::CourseVideo {
                course_number: context.course_number,
                part_number: context.part_number,
            });
        }

        if let Some(turn) = state.transcript.last_assistant_turn() {
            for link in video_links(&turn.content) {
                let target = Navigation::CourseVideo {
                    course_number: link.course_number,
                    part_number: link.part_number,
                };
                if !targets.contains(&target) {
                    targets.push(target);
                }
            }
        }

        if state.score.is_some() {
            targets.push(Navigation::Recommendations);
        }
        targets
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.state.lock();
        SessionSnapshot {
            context: state.context.clone(),
            transcript: state.transcript.clone(),
            busy: state.busy,
            phase: state.phase.clone(),
            error: state.error.clone(),
            score: state.score,
            badge: state.badge,
            mastery: state.mastery.clone(),
            evaluation_error: state.evaluation_error.clone(),
        }
    }

    pub fn transcript(&self) -> Transcript {
        self.state.lock().transcript.clone()
    }

    pub fn is_busy(&self) -> bool {
        self.state.lock().busy
    }

    pub fn score(&self) -> Option<Score> {
        self.state.lock().score
    }

    pub fn error(&self) -> Option<String> {
        self.state.lock().error.clone()
    }

    async fn evaluate(&self, context: &SessionContext, score: Score) {
        let Some(evaluator) = &self.evaluator else {
            return;
        };

        let result = self.bounded(evaluator.submit(context, score)).await;

        let mut state = self.state.lock();
        // a restart while evaluating is impossible: busy is still held
        match result {
            Ok(mastery) => {
                info!(
                    "Mastery for {}: {} (threshold {}%)",
                    context.label(),
                    mastery.is_mastered,
                    mastery.threshold
                );
                state.badge = MasteryBadge::from_result(&mastery);
                state.mastery = Some(mastery);
                state.evaluation_error = None;
            }
            Err(err) => {
                warn!("Quiz evaluation failed for {}: {}", context.label(), err);
                state.badge = MasteryBadge::Pending;
                state.evaluation_error = Some(err.user_message());
            }
        }
    }

    async fn bounded<T>(
        &self,
        fut: impl Future<Output = Result<T, QuizError>>,
    ) -> Result<T, QuizError> {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(result) => result,
            Err(_) => Err(QuizError::Timeout(self.timeout.as_secs())),
        }
    }
}

impl ControllerState {
    /// Record the score in the latest assistant turn; returns it when it
    /// differs from the last one sent for evaluation.
    fn apply_detection(&mut self) -> Option<Score> {
        let score = detect_completion(&self.transcript)?;
        self.score = Some(score);

        if self.last_submitted == Some(score) {
            return None;
        }
        self.last_submitted = Some(score);
        self.badge = MasteryBadge::Pending;
        self.mastery = None;
        self.evaluation_error = None;
        Some(score)
    }
}

fn greeting(context: &SessionContext) -> String {
    if context.is_global() {
        "Hello! I am your assistant for every course. Ask me anything about courses 1 to 8. \
         How can I help you today?"
            .to_string()
    } else {
        format!(
            "Hello! I am your assistant for Course {}, Part {}. How can I help you today?",
            context.course_number, context.part_number
        )
    }
}

use anyhow::{bail, Result};
use colored::Colorize;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::warn;

use crate::{
    app::{init_config, load_config, load_config_from, Config},
    assistant::{ChatEndpoint, HttpAssistant},
    cli::{
        show_model_info, show_profile, show_recommendations, show_statistics, show_status,
        show_version, Cli, Commands,
    },
    quiz::{EvaluationSubmitter, HttpEvaluator, QuizController},
    recommend::RecommendationClient,
    session::{resolve_position, resolve_student_id, SessionContext, StudentStore},
};

use super::interactive::{transcript_to_stderr, InteractiveSession};

/// Main runtime orchestrator
pub struct Orchestrator {
    cli: Cli,
    config: Config,
    store: StudentStore,
}

impl Orchestrator {
    /// Create a new orchestrator from CLI args
    pub fn new(cli: Cli) -> Result<Self> {
        // Load configuration
        let mut config = if let Some(config_path) = &cli.config {
            load_config_from(config_path)?
        } else {
            match load_config() {
                Ok(cfg) => cfg,
                Err(e) => {
                    warn!("Failed to load config: {}. Using defaults.", e);
                    Config::default()
                }
            }
        };

        // CLI flags win over every config layer
        if let Some(url) = &cli.api_url {
            config.api.base_url = url.clone();
        }
        if let Some(timeout) = cli.timeout {
            config.api.timeout_secs = timeout;
        }
        if !config.ui.color {
            colored::control::set_override(false);
        }

        let store = StudentStore::load().unwrap_or_else(|e| {
            warn!("Failed to load student store: {}", e);
            StudentStore::default()
        });

        Ok(Self { cli, config, store })
    }

    /// Resolve the student for this run, remembering an explicit `--student`
    fn student_id(&mut self) -> String {
        let id = resolve_student_id(
            self.cli.student.as_deref(),
            self.config.student.id.as_deref(),
            &self.store,
        );

        if self.cli.student.is_some() && self.store.student_id.as_deref() != Some(id.as_str()) {
            self.store.set_student(id.clone());
            self.save_store();
        }
        id
    }

    fn save_store(&self) {
        if let Err(e) = self.store.save() {
            warn!("Failed to save student store: {}", e);
        }
    }

    /// Run the orchestrator
    pub async fn run(mut self) -> Result<()> {
        let format = self.cli.output_format;

        match self.cli.command {
            Commands::Version => {
                show_version();
                Ok(())
            }
            Commands::Init => {
                let path = init_config()?;
                println!("Configuration file: {}", path.display().to_string().green());
                Ok(())
            }
            Commands::Status => {
                let student_id = self.student_id();
                let config_path: Option<PathBuf> = self.cli.config.clone();
                show_status(&self.config, config_path.as_deref(), &student_id).await
            }
            Commands::Quiz { course, part } => {
                let Some((course, part)) = resolve_position(course, part, &self.store) else {
                    bail!("No previous quiz to resume. Pass --course and --part.");
                };
                let student_id = self.student_id();
                self.store.set_last_position(course, part);
                self.save_store();
                let context = SessionContext::new(course, part, student_id);
                self.run_session(context, ChatEndpoint::Quiz).await
            }
            Commands::Ask { course, part } => {
                let student_id = self.student_id();
                let context = SessionContext::new(course, part, student_id);
                self.run_session(context, ChatEndpoint::Assistant).await
            }
            Commands::Recommend { max } => {
                let student_id = self.student_id();
                let client = RecommendationClient::new(&self.config.api)?;
                show_recommendations(&client, &student_id, max, format).await
            }
            Commands::Profile => {
                let student_id = self.student_id();
                let client = RecommendationClient::new(&self.config.api)?;
                show_profile(&client, &student_id, format).await
            }
            Commands::Stats => {
                let student_id = self.student_id();
                let client = RecommendationClient::new(&self.config.api)?;
                show_statistics(&client, &student_id, format).await
            }
            Commands::ModelInfo => {
                let client = RecommendationClient::new(&self.config.api)?;
                show_model_info(&client, format).await
            }
        }
    }

    async fn run_session(&self, context: SessionContext, endpoint: ChatEndpoint) -> Result<()> {
        let gateway = Arc::new(HttpAssistant::new(&self.config.api, endpoint)?);
        let evaluator: Option<Arc<dyn EvaluationSubmitter>> = match endpoint {
            ChatEndpoint::Quiz => Some(Arc::new(HttpEvaluator::new(&self.config.api)?)),
            ChatEndpoint::Assistant => None,
        };
        let controller = QuizController::new(gateway, evaluator, self.config.api.timeout());
        let recommendations = RecommendationClient::new(&self.config.api)?;

        let format = self.cli.output_format;
        let ui = &self.config.ui;
        if transcript_to_stderr(format) {
            InteractiveSession::new(&controller, ui, Some(&recommendations), io::stderr())
                .run(context, format)
                .await
        } else {
            InteractiveSession::new(&controller, ui, Some(&recommendations), io::stdout())
                .run(context, format)
                .await
        }
    }
}

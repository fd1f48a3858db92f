use anyhow::Result;
use chrono::{DateTime, Local};
use colored::Colorize;
use serde::Serialize;
use std::io::{self, Write};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::{
    app::UIConfig,
    cli::{write_recommendations, OutputFormat},
    constants::DEFAULT_MAX_RECOMMENDATIONS,
    quiz::{
        MasteryBadge, MasteryResult, Navigation, QuizController, Score, ScoreBand,
        SessionSnapshot, TurnOutcome,
    },
    recommend::RecommendationClient,
    session::{Role, SessionContext, Turn},
};

/// Commands typed at the prompt instead of an answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlashCommand {
    Quit,
    Restart,
    Video,
    Back,
    Recommend,
    Help,
    Unknown(String),
}

impl SlashCommand {
    /// `None` when the line is an answer for the assistant
    pub fn parse(line: &str) -> Option<Self> {
        let trimmed = line.trim();
        let name = trimmed.strip_prefix('/')?;
        let command = match name.split_whitespace().next().unwrap_or("") {
            "quit" | "exit" | "q" => SlashCommand::Quit,
            "restart" => SlashCommand::Restart,
            "video" => SlashCommand::Video,
            "back" => SlashCommand::Back,
            "recommend" | "recommendations" => SlashCommand::Recommend,
            "help" | "?" => SlashCommand::Help,
            other => SlashCommand::Unknown(other.to_string()),
        };
        Some(command)
    }
}

/// Summary printed at the end of a run in JSON mode
#[derive(Debug, Serialize)]
pub struct SessionReport {
    pub context: Option<SessionContext>,
    pub turns: Vec<Turn>,
    pub score: Option<Score>,
    pub badge: MasteryBadge,
    pub mastery: Option<MasteryResult>,
    pub finished_at: DateTime<Local>,
}

impl From<SessionSnapshot> for SessionReport {
    fn from(snapshot: SessionSnapshot) -> Self {
        Self {
            context: snapshot.context,
            turns: snapshot.transcript.turns().to_vec(),
            score: snapshot.score,
            badge: snapshot.badge,
            mastery: snapshot.mastery,
            finished_at: Local::now(),
        }
    }
}

/// Assistant turns after the first `shown` turns; user turns were typed
/// by the student and are not echoed back.
fn unseen_assistant_turns(turns: &[Turn], shown: usize) -> impl Iterator<Item = &Turn> {
    turns
        .iter()
        .skip(shown)
        .filter(|turn| turn.role == Role::Assistant)
}

/// Where the interactive text goes for a given output format
///
/// JSON mode keeps stdout for the final [`SessionReport`].
pub fn transcript_to_stderr(format: OutputFormat) -> bool {
    format == OutputFormat::Json
}

/// Line-oriented front-end for a [`QuizController`]
///
/// Everything the student sees is written to `out`.
pub struct InteractiveSession<'a, W: Write> {
    controller: &'a QuizController,
    ui: &'a UIConfig,
    recommendations: Option<&'a RecommendationClient>,
    out: W,
    shown: usize,
}

impl<'a, W: Write> InteractiveSession<'a, W> {
    pub fn new(
        controller: &'a QuizController,
        ui: &'a UIConfig,
        recommendations: Option<&'a RecommendationClient>,
        out: W,
    ) -> Self {
        Self {
            controller,
            ui,
            recommendations,
            out,
            shown: 0,
        }
    }

    /// Run until the student quits or stdin closes
    pub async fn run(mut self, context: SessionContext, format: OutputFormat) -> Result<()> {
        writeln!(self.out, "{} {}", "Session:".bold(), context.label().cyan())?;
        writeln!(self.out, "{}", "Type /help for commands.".dimmed())?;
        writeln!(self.out)?;

        let outcome = self.controller.start(context).await;
        self.render(&outcome)?;

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            write!(self.out, "{} ", ">".green().bold())?;
            self.out.flush()?;

            let Some(line) = lines.next_line().await? else {
                break;
            };

            match SlashCommand::parse(&line) {
                Some(SlashCommand::Quit) => break,
                Some(SlashCommand::Restart) => {
                    self.shown = 0;
                    writeln!(self.out, "{}", "Restarting...".dimmed())?;
                    let outcome = self.controller.restart().await;
                    self.render(&outcome)?;
                }
                Some(SlashCommand::Video) => self.print_video_targets()?,
                Some(SlashCommand::Back) => {
                    if let Some(target) = self
                        .controller
                        .navigation()
                        .into_iter()
                        .find(|n| matches!(n, Navigation::CourseOptions { .. }))
                    {
                        writeln!(self.out, "Course options: {}", target.route().cyan())?;
                    }
                    break;
                }
                Some(SlashCommand::Recommend) => self.print_recommendations().await?,
                Some(SlashCommand::Help) => print_help(&mut self.out)?,
                Some(SlashCommand::Unknown(name)) => {
                    writeln!(self.out, "{} /{}", "Unknown command:".yellow(), name)?;
                }
                None => {
                    let outcome = self.controller.submit_user_turn(&line).await;
                    self.render(&outcome)?;
                }
            }
        }

        self.out.flush()?;
        if format == OutputFormat::Json {
            crate::cli::print_json(&SessionReport::from(self.controller.snapshot()))?;
        }
        Ok(())
    }

    fn render(&mut self, outcome: &TurnOutcome) -> io::Result<()> {
        let snapshot = self.controller.snapshot();
        let turns = snapshot.transcript.turns();

        match outcome {
            TurnOutcome::Ignored => {}
            TurnOutcome::Rejected => {
                writeln!(self.out, "{}", "Still waiting for the last answer.".yellow())?
            }
            TurnOutcome::Failed { message } => {
                writeln!(self.out, "{} {}", "Error:".red().bold(), message)?
            }
            TurnOutcome::Confirmed { score } => {
                // the server may hand back a shorter history than we showed
                self.shown = self.shown.min(turns.len());
                for turn in unseen_assistant_turns(turns, self.shown) {
                    writeln!(
                        self.out,
                        "{} {}",
                        format!("{}:", turn.role.label()).cyan().bold(),
                        turn.content
                    )?;
                    writeln!(self.out)?;
                }
                self.shown = turns.len();

                if self.ui.show_video_hints {
                    self.print_linked_videos(&snapshot)?;
                }
                if let Some(score) = score {
                    print_score(&mut self.out, score, &snapshot)?;
                }
            }
        }
        Ok(())
    }

    fn print_linked_videos(&mut self, snapshot: &SessionSnapshot) -> io::Result<()> {
        let Some(context) = &snapshot.context else {
            return Ok(());
        };
        for target in self.controller.navigation() {
            if let Navigation::CourseVideo {
                course_number,
                part_number,
            } = target
            {
                // the session's own video is always listed; only show extra ones
                if (course_number, part_number) != (context.course_number, context.part_number) {
                    writeln!(self.out, "{} {}", "Video:".magenta(), target.route())?;
                }
            }
        }
        Ok(())
    }

    fn print_video_targets(&mut self) -> io::Result<()> {
        let videos: Vec<_> = self
            .controller
            .navigation()
            .into_iter()
            .filter(|n| matches!(n, Navigation::CourseVideo { .. }))
            .collect();

        if videos.is_empty() {
            writeln!(self.out, "{}", "No course video for this session.".dimmed())?;
        }
        for target in videos {
            writeln!(self.out, "{} {}", "Video:".magenta(), target.route())?;
        }
        Ok(())
    }

    async fn print_recommendations(&mut self) -> io::Result<()> {
        let Some(client) = self.recommendations else {
            return writeln!(self.out, "{}", "Recommendations are not available here.".dimmed());
        };
        let Some(context) = self.controller.snapshot().context else {
            return Ok(());
        };
        match client
            .recommendations(&context.student_id, DEFAULT_MAX_RECOMMENDATIONS)
            .await
        {
            Ok(response) => write_recommendations(&mut self.out, &context.student_id, &response),
            Err(e) => writeln!(self.out, "{} {}", "Error:".red().bold(), e),
        }
    }
}

fn print_score<W: Write>(out: &mut W, score: &Score, snapshot: &SessionSnapshot) -> io::Result<()> {
    let band = ScoreBand::from_percentage(score.percentage);
    writeln!(
        out,
        "{} {}/{} ({}%)",
        "Quiz finished:".bold(),
        score.correct,
        score.total,
        score.percentage.to_string().color(band.color())
    )?;
    writeln!(out, "  {}", band.message().color(band.color()))?;

    match snapshot.badge {
        MasteryBadge::Mastered => writeln!(out, "  {}", "Mastered".green().bold())?,
        MasteryBadge::NotMastered => {
            let threshold = snapshot.mastery.as_ref().map(|m| m.threshold).unwrap_or_default();
            writeln!(
                out,
                "  {} (threshold {:.0}%). Type /video to review the course.",
                "Not mastered yet".red().bold(),
                threshold
            )?;
        }
        MasteryBadge::Pending => {
            let reason = snapshot
                .evaluation_error
                .as_deref()
                .unwrap_or("evaluation pending");
            writeln!(out, "  {} {}", "Mastery:".dimmed(), reason.dimmed())?;
        }
    }
    writeln!(out, "  {}", "Type /recommend for what to study next.".dimmed())
}

fn print_help<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "  /restart    start the quiz over")?;
    writeln!(out, "  /video      show course video links")?;
    writeln!(out, "  /recommend  show recommended lessons")?;
    writeln!(out, "  /back       back to the course options")?;
    writeln!(out, "  /quit       leave")
}

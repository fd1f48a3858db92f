/// Runtime orchestrator module - Gateway

mod interactive;
mod orchestrator;

pub use interactive::{transcript_to_stderr, InteractiveSession, SessionReport, SlashCommand};
pub use orchestrator::Orchestrator;

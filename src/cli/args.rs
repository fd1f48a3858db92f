use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::constants::DEFAULT_MAX_RECOMMENDATIONS;

#[derive(Parser, Debug)]
#[command(name = "quizchat")]
#[command(version)]
#[command(about = "Take course quizzes with the platform assistant and track mastery", long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Backend API base URL (e.g., http://localhost:8001/api)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Student identifier (remembered for later runs)
    #[arg(short, long, global = true)]
    pub student: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub output_format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Take the quiz for a course part (defaults to the last one taken)
    Quiz {
        /// Course number
        #[arg(long)]
        course: Option<u32>,
        /// Part number within the course
        #[arg(long)]
        part: Option<u32>,
    },
    /// Ask the course assistant (course 0, part 0 covers every course)
    Ask {
        #[arg(long, default_value_t = 0)]
        course: u32,
        #[arg(long, default_value_t = 0)]
        part: u32,
    },
    /// Show lessons recommended for the student
    Recommend {
        /// Maximum number of recommendations
        #[arg(long, default_value_t = DEFAULT_MAX_RECOMMENDATIONS)]
        max: usize,
    },
    /// Show the student's profile
    Profile,
    /// Show the student's quiz statistics
    Stats,
    /// Show recommendation model information
    ModelInfo,
    /// Initialize configuration
    Init,
    /// Check configuration and backend availability
    Status,
    /// Show version information
    Version,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    Text,
    /// JSON structured output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_quiz_arguments() {
        let cli = Cli::parse_from([
            "quizchat", "--student", "E1", "quiz", "--course", "2", "--part", "3",
        ]);
        assert_eq!(cli.student.as_deref(), Some("E1"));
        assert!(matches!(
            cli.command,
            Commands::Quiz {
                course: Some(2),
                part: Some(3)
            }
        ));
        assert_eq!(cli.output_format, OutputFormat::Text);
    }

    #[test]
    fn test_quiz_position_is_optional() {
        let cli = Cli::parse_from(["quizchat", "quiz"]);
        assert!(matches!(
            cli.command,
            Commands::Quiz {
                course: None,
                part: None
            }
        ));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["quizchat", "recommend", "--max", "3", "--output-format", "json"]);
        assert!(matches!(cli.command, Commands::Recommend { max: 3 }));
        assert_eq!(cli.output_format, OutputFormat::Json);
    }

    #[test]
    fn test_ask_defaults_to_all_courses() {
        let cli = Cli::parse_from(["quizchat", "ask"]);
        assert!(matches!(cli.command, Commands::Ask { course: 0, part: 0 }));
    }
}

/// CLI argument parsing and command handling - Gateway
mod args;
mod commands;

pub use args::{Cli, Commands, OutputFormat};
pub use commands::{
    print_json, show_model_info, show_profile, show_recommendations, show_statistics,
    show_status, show_version, write_recommendations,
};

#[macro_use]
pub mod display;
pub mod commands;
pub mod logger;
pub mod routines;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use crate::cli::commands::Commands;
use crate::cli::display::MessageType;
use crate::cli::logger::setup_logging;
use crate::cli::routines::{generate, RoutineFailure, RoutineSuccess};
use crate::project::ProjectConfig;
use crate::utilities::constants::{CLI_VERSION, DEFAULT_CONFIG_FILE};

#[derive(Parser)]
#[command(
    name = "lipidgen",
    version = CLI_VERSION,
    about = "Generates lipid nomenclature tables from delimited reference data"
)]
struct Cli {
    /// Path to the project config file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

pub fn top_command_handler() -> ExitCode {
    let cli = Cli::parse();

    let config = match ProjectConfig::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            show_message!(
                MessageType::Error,
                display::Message::new("Config".to_string(), format!("{e}"))
            );
            return ExitCode::FAILURE;
        }
    };
    setup_logging(&config.logger);

    let result = match cli.command {
        Commands::Generate => generate::run(&config, true),
        Commands::Check => generate::run(&config, false),
    };
    render(result)
}

fn render(result: Result<RoutineSuccess, RoutineFailure>) -> ExitCode {
    match result {
        Ok(success) => {
            show_message!(success.message_type, success.message);
            ExitCode::SUCCESS
        }
        Err(failure) => {
            if let Some(cause) = &failure.error {
                error!("routine failed: {cause:#}");
            }
            show_message!(MessageType::Error, failure.message);
            ExitCode::FAILURE
        }
    }
}

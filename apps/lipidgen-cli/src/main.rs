#[macro_use]
mod cli;
mod generator;
mod project;
mod utilities;

use std::process::ExitCode;

// Entry point for the CLI application
fn main() -> ExitCode {
    cli::top_command_handler()
}

//! # CLI Commands
//! A module for all the commands that can be run from the CLI

use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Process all configured tables and write the generated Rust artifacts
    Generate,
    /// Process all configured tables and report, without writing anything
    Check,
}

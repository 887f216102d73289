#![deny(missing_docs)]

//! # Mockgen CLI
//!
//! Command Line Interface for the mock-backend generator.
//!
//! Supported Commands:
//! - `generate`: OpenAPI/Swagger spec -> mock backend source set.

use clap::{Parser, Subcommand};

use crate::error::CliResult;

mod emitter;
mod error;
mod generate;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Mock backend generator")]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generates a persistent mock backend from an API spec.
    Generate(generate::GenerateArgs),
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Generate(args) => generate::execute(args)?,
    }

    Ok(())
}

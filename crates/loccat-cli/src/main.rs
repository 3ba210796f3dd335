use clap::{Parser, Subcommand};
use colored::Colorize as _;

mod check;
mod common;
mod error;
mod render;
mod ui;

use check::CheckArgs;
use render::RenderArgs;

#[derive(Parser)]
#[command(name = "loccat")]
#[command(about = "Validator and renderer for XML locale catalogs")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the catalog's source files against the index manifest
    Check(CheckArgs),

    /// Render one message for spot-checking a translation
    Render(RenderArgs),
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check(args) => check::run_check(args),
        Commands::Render(args) => render::run_render(args),
    };

    if let Err(err) = result {
        // Validation failures already printed their details line by line.
        eprintln!("{} {err}", ui::PREFIX.red().bold());
        std::process::exit(1);
    }
}

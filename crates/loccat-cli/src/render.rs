//! The `render` subcommand: look up one entry and print the substituted
//! text, exactly as the game client would receive it.

use std::fmt::Display;

use colored::Colorize as _;
use loccat::Loader;

use crate::common::{CatalogArgs, parse_locale};
use crate::error::CliError;
use crate::ui::PREFIX;

#[derive(clap::Args, Debug)]
pub struct RenderArgs {
    #[command(flatten)]
    pub catalog: CatalogArgs,

    /// Locale to render in
    #[arg(short, long, default_value = "en-US")]
    pub locale: String,

    /// Entry id to render
    pub id: String,

    /// Positional substitution values, in placeholder order
    pub args: Vec<String>,
}

pub fn run_render(args: RenderArgs) -> Result<(), CliError> {
    let locale = parse_locale(&args.locale)?;
    let outcome = args.catalog.load(&Loader::new())?;

    // A broken sibling file should not block rendering from the others,
    // but the caller deserves a heads-up.
    for err in &outcome.errors {
        eprintln!("{} {}", PREFIX.yellow().bold(), err.to_string().yellow());
    }

    let arg_refs: Vec<&dyn Display> = args.args.iter().map(|s| s as &dyn Display).collect();
    let text = outcome.catalog.render(&args.id, &locale, &arg_refs)?;
    println!("{text}");
    Ok(())
}

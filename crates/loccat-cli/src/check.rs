//! The `check` subcommand: validate every source file the manifest names.
//!
//! Parse failures are fatal for their file, loader diagnostics (first-wins
//! duplicates, skipped records) surface as warnings, and catalog lints
//! (placeholder mismatches, empty translations) as errors. Exit status is
//! nonzero when anything fatal or erroneous was found, or when warnings are
//! promoted via `--warnings-as-errors`.

use colored::Colorize as _;
use loccat::{FileErrorKind, Loader, check_catalog, coverage, is_supported};

use crate::common::{CatalogArgs, parse_locale};
use crate::error::CliError;
use crate::ui::{self, PREFIX, Reporter};

#[derive(clap::Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub catalog: CatalogArgs,

    /// Also report entries missing a translation for this locale
    #[arg(long, value_name = "TAG")]
    pub show_lang: Option<String>,

    /// Cap on how many missing-translation findings are printed
    #[arg(long, default_value_t = 10)]
    pub display_limit: usize,

    /// Treat warnings as errors
    #[arg(long)]
    pub warnings_as_errors: bool,
}

pub fn run_check(args: CheckArgs) -> Result<(), CliError> {
    println!("{} {}", PREFIX.cyan().bold(), "Locale catalog check".dimmed());

    // Resolve the locale up front so a typo fails fast.
    let show_lang = args.show_lang.as_deref().map(parse_locale).transpose()?;

    let outcome = args.catalog.load(&Loader::new())?;
    let mut reporter = Reporter::new(args.warnings_as_errors);

    for err in &outcome.errors {
        let position = match &err.kind {
            FileErrorKind::Parse(parse) => Some((parse.line, parse.col)),
            FileErrorKind::Io(_) => None,
        };
        reporter.fatal(
            &ui::location(&err.file, position, &[]),
            &format!("Invalid file: {}", err.kind),
        );
    }

    for diag in &outcome.diagnostics {
        reporter.warning(
            &ui::location(diag.file(), Some(diag.position()), &[]),
            &diag.to_string(),
        );
    }

    for lint in check_catalog(&outcome.catalog) {
        let file = outcome
            .catalog
            .get(lint.id().as_str())
            .map(|entry| entry.source_file())
            .unwrap_or_default();
        let trail = [format!("Entry({})", lint.id()), lint.locale().to_string()];
        reporter.error(&ui::location(file, None, &trail), &lint.to_string());
    }

    if let Some(locale) = show_lang {
        if !is_supported(&locale) {
            reporter.warning(
                &locale.to_string(),
                "locale is not in the supported roster",
            );
        }
        let cov = coverage(&outcome.catalog, &locale);
        for id in cov.missing.iter().take(args.display_limit) {
            let file = outcome
                .catalog
                .get(id.as_str())
                .map(|entry| entry.source_file())
                .unwrap_or_default();
            reporter.warning(
                &ui::location(file, None, &[format!("Entry({id})")]),
                &format!("missing translation for '{locale}'"),
            );
        }
        if cov.missing.len() > args.display_limit {
            println!(
                "{} {}",
                PREFIX.yellow().bold(),
                format!("...and {} more", cov.missing.len() - args.display_limit).dimmed()
            );
        }
        println!(
            "{} Total missing translations for '{}': {}. Progress: {}/{} ({}%)",
            PREFIX.cyan().bold(),
            locale,
            cov.missing.len(),
            cov.translated(),
            cov.total,
            cov.percent()
        );
    }

    println!(
        "{} {}",
        PREFIX.cyan().bold(),
        format!("{} entries loaded", outcome.catalog.len()).dimmed()
    );

    reporter.finish()
}

//! Console reporting with colored severities and running counts.

use colored::Colorize as _;

use crate::error::CliError;

pub const PREFIX: &str = "[loccat]";

/// Prints findings as they come in and keeps the tallies for the final
/// summary. Severity markers follow the team's long-standing convention:
/// `[!!!]` fatal (whole file lost), `[!]` error, `[*]` warning.
pub struct Reporter {
    warnings_as_errors: bool,
    fatal: usize,
    errors: usize,
    warnings: usize,
}

impl Reporter {
    pub fn new(warnings_as_errors: bool) -> Self {
        Reporter {
            warnings_as_errors,
            fatal: 0,
            errors: 0,
            warnings: 0,
        }
    }

    pub fn fatal(&mut self, location: &str, message: &str) {
        self.fatal += 1;
        println!("{}", format!("[!!!] {location}:\n{message}\n").red().bold());
    }

    pub fn error(&mut self, location: &str, message: &str) {
        self.errors += 1;
        println!("{}", format!("[!] {location}:\n{message}\n").red());
    }

    pub fn warning(&mut self, location: &str, message: &str) {
        if self.warnings_as_errors {
            self.error(location, message);
            return;
        }
        self.warnings += 1;
        println!("{}", format!("[*] {location}:\n{message}\n").yellow());
    }

    pub fn is_clean(&self) -> bool {
        self.fatal == 0 && self.errors == 0
    }

    /// Prints the summary and turns a dirty run into an error.
    pub fn finish(self) -> Result<(), CliError> {
        if self.fatal > 0 {
            println!("{} {}", PREFIX.red().bold(), format!("Fatal errors: {}", self.fatal).red());
        }
        if self.errors > 0 {
            println!("{} {}", PREFIX.red().bold(), format!("Errors: {}", self.errors).red());
        }
        if self.warnings > 0 {
            println!(
                "{} {}",
                PREFIX.yellow().bold(),
                format!("Warnings: {}", self.warnings).yellow()
            );
        }
        if self.is_clean() {
            println!("{} {}", PREFIX.green().bold(), "No errors found".green());
            Ok(())
        } else {
            Err(CliError::Validation {
                fatal: self.fatal,
                errors: self.errors,
                warnings: self.warnings,
            })
        }
    }
}

/// `file[line,col]->Entry(id)->locale` style location string.
pub fn location(file: &str, position: Option<(u32, u32)>, trail: &[String]) -> String {
    let mut out = file.to_owned();
    if let Some((line, col)) = position {
        out.push_str(&format!("[{line},{col}]"));
    }
    for part in trail {
        out.push_str("->");
        out.push_str(part);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_joins_trail_segments() {
        assert_eq!(
            location(
                "kill_messages.xml",
                Some((3, 7)),
                &["Entry(melee)".to_owned(), "de-DE".to_owned()]
            ),
            "kill_messages.xml[3,7]->Entry(melee)->de-DE"
        );
        assert_eq!(location("index.json", None, &[]), "index.json");
    }
}

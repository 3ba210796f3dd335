//! Builds a [`Catalog`] from the manifest's source files.
//!
//! Files load in manifest order and duplicates resolve first-wins, so the
//! result is deterministic regardless of how the inputs were produced. A file
//! that fails to parse is dropped whole; the other files still load and the
//! failure is reported alongside the partial catalog.

use std::fmt;
use std::path::Path;

use thiserror::Error;
use tracing::{debug, warn};
use unic_langid::LanguageIdentifier;

use crate::catalog::{Catalog, Entry, EntryId, Translation};
use crate::error::ParseError;
use crate::locale::FALLBACK_LOCALE;
use crate::xml::{self, Element};

const ENTRY_TAG: &str = "Entry";
const STRING_TAG: &str = "String";
const ID_ATTR: &str = "Id";
const LANG_ATTR: &str = "xml:lang";

/// A source file that contributed nothing to the catalog.
#[derive(Debug, Error)]
#[error("{file}: {kind}")]
pub struct FileError {
    pub file: String,
    pub kind: FileErrorKind,
}

#[derive(Debug, Error)]
pub enum FileErrorKind {
    #[error("{0}")]
    Parse(#[from] ParseError),
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

/// A tolerated irregularity: the loader applied its first-wins policy or
/// skipped a record, and carried on. Never fatal, but worth surfacing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    DuplicateId {
        file: String,
        id: EntryId,
        line: u32,
        col: u32,
    },
    DuplicateLocale {
        file: String,
        id: EntryId,
        locale: LanguageIdentifier,
        line: u32,
        col: u32,
    },
    UnknownTag {
        file: String,
        tag: String,
        line: u32,
        col: u32,
    },
    MissingId {
        file: String,
        line: u32,
        col: u32,
    },
    MissingLocale {
        file: String,
        id: EntryId,
        line: u32,
        col: u32,
    },
    InvalidLocale {
        file: String,
        id: EntryId,
        value: String,
        line: u32,
        col: u32,
    },
}

impl Diagnostic {
    pub fn file(&self) -> &str {
        match self {
            Diagnostic::DuplicateId { file, .. }
            | Diagnostic::DuplicateLocale { file, .. }
            | Diagnostic::UnknownTag { file, .. }
            | Diagnostic::MissingId { file, .. }
            | Diagnostic::MissingLocale { file, .. }
            | Diagnostic::InvalidLocale { file, .. } => file,
        }
    }

    /// 1-based position of the offending element.
    pub fn position(&self) -> (u32, u32) {
        match self {
            Diagnostic::DuplicateId { line, col, .. }
            | Diagnostic::DuplicateLocale { line, col, .. }
            | Diagnostic::UnknownTag { line, col, .. }
            | Diagnostic::MissingId { line, col, .. }
            | Diagnostic::MissingLocale { line, col, .. }
            | Diagnostic::InvalidLocale { line, col, .. } => (*line, *col),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::DuplicateId { id, .. } => {
                write!(f, "duplicate entry id '{id}', keeping the first occurrence")
            }
            Diagnostic::DuplicateLocale { id, locale, .. } => {
                write!(
                    f,
                    "duplicate '{locale}' translation for entry '{id}', keeping the first"
                )
            }
            Diagnostic::UnknownTag { tag, .. } => {
                write!(f, "unknown tag '{tag}', expected '{ENTRY_TAG}' or '{STRING_TAG}'")
            }
            Diagnostic::MissingId { .. } => {
                write!(f, "entry without an '{ID_ATTR}' attribute")
            }
            Diagnostic::MissingLocale { id, .. } => {
                write!(f, "string under entry '{id}' without an '{LANG_ATTR}' attribute")
            }
            Diagnostic::InvalidLocale { id, value, .. } => {
                write!(f, "invalid locale tag '{value}' under entry '{id}'")
            }
        }
    }
}

/// Everything a load produces: the (possibly partial) catalog, the files
/// that failed wholesale, and the tolerated irregularities.
#[derive(Debug)]
pub struct LoadOutcome {
    pub catalog: Catalog,
    pub errors: Vec<FileError>,
    pub diagnostics: Vec<Diagnostic>,
}

impl LoadOutcome {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Catalog loader with a configurable fallback locale.
#[derive(Debug, Clone)]
pub struct Loader {
    fallback: LanguageIdentifier,
}

impl Default for Loader {
    fn default() -> Self {
        Loader {
            fallback: FALLBACK_LOCALE,
        }
    }
}

impl Loader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fallback(mut self, fallback: LanguageIdentifier) -> Self {
        self.fallback = fallback;
        self
    }

    /// Loads from already-read `(name, content)` pairs, in the order given.
    /// Pure: no I/O, no side effects beyond tracing.
    pub fn load_sources<'a, I>(&self, sources: I) -> LoadOutcome
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut outcome = self.empty_outcome();
        for (name, content) in sources {
            self.load_one(&mut outcome, name, content);
        }
        outcome
    }

    /// Reads the manifest's files from `root` and loads them in manifest
    /// order. An unreadable file becomes a [`FileError`], not an abort.
    pub fn load_dir(&self, manifest: &crate::manifest::Manifest, root: &Path) -> LoadOutcome {
        let mut outcome = self.empty_outcome();
        for name in manifest.files() {
            match std::fs::read_to_string(root.join(name)) {
                Ok(content) => self.load_one(&mut outcome, name, &content),
                Err(err) => {
                    warn!(file = %name, error = %err, "source file is unreadable");
                    outcome.errors.push(FileError {
                        file: name.clone(),
                        kind: err.into(),
                    });
                }
            }
        }
        outcome
    }

    fn empty_outcome(&self) -> LoadOutcome {
        LoadOutcome {
            catalog: Catalog::new(self.fallback.clone()),
            errors: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    fn load_one(&self, outcome: &mut LoadOutcome, name: &str, content: &str) {
        match xml::parse_document(content) {
            Ok(root) => {
                merge_file(outcome, name, &root);
                debug!(file = %name, entries = outcome.catalog.len(), "loaded source file");
            }
            Err(err) => {
                warn!(file = %name, error = %err, "source file failed to parse, dropping it");
                outcome.errors.push(FileError {
                    file: name.to_owned(),
                    kind: err.into(),
                });
            }
        }
    }
}

/// Folds one parsed file into the catalog under first-wins rules.
fn merge_file(outcome: &mut LoadOutcome, file: &str, root: &Element) {
    for node in &root.children {
        if node.name != ENTRY_TAG {
            outcome.diagnostics.push(Diagnostic::UnknownTag {
                file: file.to_owned(),
                tag: node.name.clone(),
                line: node.line,
                col: node.col,
            });
            continue;
        }
        let Some(id) = node.attr(ID_ATTR) else {
            outcome.diagnostics.push(Diagnostic::MissingId {
                file: file.to_owned(),
                line: node.line,
                col: node.col,
            });
            continue;
        };
        let id = EntryId::from(id);
        if outcome.catalog.contains_id(id.as_str()) {
            warn!(file = %file, id = %id, "duplicate entry id ignored");
            outcome.diagnostics.push(Diagnostic::DuplicateId {
                file: file.to_owned(),
                id,
                line: node.line,
                col: node.col,
            });
            continue;
        }

        let mut entry = Entry::new(id.clone(), file);
        for string in &node.children {
            if string.name != STRING_TAG {
                outcome.diagnostics.push(Diagnostic::UnknownTag {
                    file: file.to_owned(),
                    tag: string.name.clone(),
                    line: string.line,
                    col: string.col,
                });
                continue;
            }
            let Some(tag) = string.attr(LANG_ATTR) else {
                outcome.diagnostics.push(Diagnostic::MissingLocale {
                    file: file.to_owned(),
                    id: id.clone(),
                    line: string.line,
                    col: string.col,
                });
                continue;
            };
            let Ok(locale) = tag.parse::<LanguageIdentifier>() else {
                outcome.diagnostics.push(Diagnostic::InvalidLocale {
                    file: file.to_owned(),
                    id: id.clone(),
                    value: tag.to_owned(),
                    line: string.line,
                    col: string.col,
                });
                continue;
            };
            let translation = Translation::new(locale.clone(), string.text.clone());
            if !entry.insert_translation(translation) {
                warn!(file = %file, id = %id, locale = %locale, "duplicate translation ignored");
                outcome.diagnostics.push(Diagnostic::DuplicateLocale {
                    file: file.to_owned(),
                    id: id.clone(),
                    locale,
                    line: string.line,
                    col: string.col,
                });
            }
        }
        outcome.catalog.insert_entry(entry);
    }
}

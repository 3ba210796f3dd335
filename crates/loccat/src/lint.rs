//! Non-fatal consistency checks over a loaded catalog.
//!
//! The loader never enforces these; they exist for the validation pass the
//! translation team runs before shipping. Placeholder-set consistency is
//! judged against the catalog's fallback locale, which is where new strings
//! originate.

use std::collections::BTreeSet;
use std::fmt;

use unic_langid::LanguageIdentifier;

use crate::catalog::{Catalog, EntryId};
use crate::render::placeholder_indices;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lint {
    /// A translation's `{k}` index set differs from the fallback locale's.
    /// Reordering is fine; using different indices is not.
    PlaceholderMismatch {
        id: EntryId,
        locale: LanguageIdentifier,
        missing: Vec<usize>,
        extra: Vec<usize>,
    },
    /// A translation with no visible text at all.
    EmptyTranslation {
        id: EntryId,
        locale: LanguageIdentifier,
    },
}

impl Lint {
    pub fn id(&self) -> &EntryId {
        match self {
            Lint::PlaceholderMismatch { id, .. } | Lint::EmptyTranslation { id, .. } => id,
        }
    }

    pub fn locale(&self) -> &LanguageIdentifier {
        match self {
            Lint::PlaceholderMismatch { locale, .. } | Lint::EmptyTranslation { locale, .. } => {
                locale
            }
        }
    }
}

impl fmt::Display for Lint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lint::PlaceholderMismatch {
                missing, extra, ..
            } => {
                write!(f, "placeholder mismatch:")?;
                if !missing.is_empty() {
                    write!(f, " missing {}", format_indices(missing))?;
                }
                if !extra.is_empty() {
                    if !missing.is_empty() {
                        write!(f, ",")?;
                    }
                    write!(f, " unexpected {}", format_indices(extra))?;
                }
                Ok(())
            }
            Lint::EmptyTranslation { .. } => write!(f, "empty translation"),
        }
    }
}

fn format_indices(indices: &[usize]) -> String {
    let parts: Vec<String> = indices.iter().map(|i| format!("{{{i}}}")).collect();
    parts.join(", ")
}

/// Runs every per-translation check over the whole catalog.
pub fn check_catalog(catalog: &Catalog) -> Vec<Lint> {
    let mut lints = Vec::new();
    for entry in catalog.entries() {
        let reference: Option<BTreeSet<usize>> = entry
            .translation(catalog.fallback())
            .map(|t| placeholder_indices(t.text()));
        for translation in entry.translations() {
            if translation.text().trim().is_empty() {
                lints.push(Lint::EmptyTranslation {
                    id: entry.id().clone(),
                    locale: translation.locale().clone(),
                });
                continue;
            }
            if translation.locale() == catalog.fallback() {
                continue;
            }
            if let Some(want) = &reference {
                let got = placeholder_indices(translation.text());
                if got != *want {
                    lints.push(Lint::PlaceholderMismatch {
                        id: entry.id().clone(),
                        locale: translation.locale().clone(),
                        missing: want.difference(&got).copied().collect(),
                        extra: got.difference(want).copied().collect(),
                    });
                }
            }
        }
    }
    lints
}

/// How completely a catalog covers one locale.
#[derive(Debug, Clone)]
pub struct Coverage {
    pub locale: LanguageIdentifier,
    pub total: usize,
    pub missing: Vec<EntryId>,
}

impl Coverage {
    pub fn translated(&self) -> usize {
        self.total - self.missing.len()
    }

    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            100
        } else {
            (self.translated() * 100 / self.total) as u32
        }
    }
}

/// Which entries lack a translation for `locale`, in catalog order.
pub fn coverage(catalog: &Catalog, locale: &LanguageIdentifier) -> Coverage {
    let missing = catalog
        .entries()
        .filter(|entry| !entry.has_locale(locale))
        .map(|entry| entry.id().clone())
        .collect();
    Coverage {
        locale: locale.clone(),
        total: catalog.len(),
        missing,
    }
}

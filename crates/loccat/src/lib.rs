#![doc = include_str!("../README.md")]

pub mod catalog;
pub mod error;
pub mod lint;
pub mod loader;
pub mod locale;
pub mod manifest;
pub mod render;
pub mod xml;

pub use catalog::{Catalog, Entry, EntryId, Translation};
pub use error::{ManifestError, ParseError, ParseErrorKind, RenderError};
pub use lint::{Coverage, Lint, check_catalog, coverage};
pub use loader::{Diagnostic, FileError, FileErrorKind, LoadOutcome, Loader};
pub use locale::{FALLBACK_LOCALE, SUPPORTED_LOCALES, is_supported};
pub use manifest::{DEFAULT_MANIFEST_NAME, Manifest};
pub use render::{placeholder_indices, render_entry, substitute};

pub use unic_langid::{LanguageIdentifier, langid};

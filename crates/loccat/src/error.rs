use std::path::PathBuf;
use thiserror::Error;
use unic_langid::LanguageIdentifier;

use crate::catalog::EntryId;

/// A well-formedness violation in a single source file.
///
/// Positions are 1-based. Any `ParseError` invalidates the whole file: none
/// of its entries make it into the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{line}:{col}: {kind}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub line: u32,
    pub col: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// A reserved character (`<`, `>` or `&`) appeared in text content
    /// without its escape code.
    #[error("unescaped reserved character {0:?} in text content")]
    UnescapedReservedChar(char),

    #[error("unknown entity '&{0};'")]
    UnknownEntity(String),

    #[error("invalid character reference '&#{0};'")]
    InvalidCharRef(String),

    #[error("unexpected end of file")]
    UnexpectedEof,

    #[error("expected {expected}, found {found:?}")]
    Unexpected {
        expected: &'static str,
        found: char,
    },

    #[error("closing tag '</{found}>' does not match '<{expected}>'")]
    MismatchedClosingTag { expected: String, found: String },

    #[error("document has no root element")]
    MissingRoot,

    #[error("content after the root element")]
    TrailingContent,
}

/// Failure to read or parse the index manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("manifest file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read manifest: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse manifest: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Failure to produce a rendered message.
///
/// Rendering is atomic: on any of these the caller gets no partial text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("no entry with id '{0}'")]
    UnknownEntry(EntryId),

    #[error(
        "entry '{id}' has no translation for '{locale}' and none for the fallback '{fallback}'"
    )]
    MissingTranslation {
        id: EntryId,
        locale: LanguageIdentifier,
        fallback: LanguageIdentifier,
    },

    #[error("placeholder {{{index}}} has no matching argument ({supplied} supplied)")]
    PlaceholderIndexOutOfRange { index: usize, supplied: usize },
}

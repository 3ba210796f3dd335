//! Placeholder substitution and locale fallback.
//!
//! Translations carry positional placeholders: `{0}`, `{1}`, ... A doubled
//! marker (`{{` or `}}`) is a single literal brace, not a substitution site.
//! Everything else, including game markup such as `~r~`, passes through
//! untouched; presentation is a downstream concern.

use std::collections::BTreeSet;
use std::fmt;

use unic_langid::LanguageIdentifier;

use crate::catalog::Entry;
use crate::error::RenderError;

/// Renders `entry` for `locale`, falling back to `fallback` when the exact
/// locale is absent. Fails without producing partial text.
pub fn render_entry(
    entry: &Entry,
    locale: &LanguageIdentifier,
    fallback: &LanguageIdentifier,
    args: &[&dyn fmt::Display],
) -> Result<String, RenderError> {
    let translation = entry
        .translation(locale)
        .or_else(|| entry.translation(fallback))
        .ok_or_else(|| RenderError::MissingTranslation {
            id: entry.id().clone(),
            locale: locale.clone(),
            fallback: fallback.clone(),
        })?;
    substitute(translation.text(), args)
}

/// Substitutes `{k}` with `args[k]` and resolves doubled markers.
///
/// Brace sequences that are not a complete `{digits}` placeholder are opaque
/// text and are emitted verbatim.
pub fn substitute(text: &str, args: &[&dyn fmt::Display]) -> Result<String, RenderError> {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                out.push('{');
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                out.push('}');
            }
            '{' => {
                let mut digits = String::new();
                while let Some(d) = chars.next_if(char::is_ascii_digit) {
                    digits.push(d);
                }
                match (digits.parse::<usize>(), chars.peek()) {
                    (Ok(index), Some('}')) => {
                        chars.next();
                        match args.get(index) {
                            Some(arg) => out.push_str(&arg.to_string()),
                            None => {
                                return Err(RenderError::PlaceholderIndexOutOfRange {
                                    index,
                                    supplied: args.len(),
                                });
                            }
                        }
                    }
                    _ => {
                        out.push('{');
                        out.push_str(&digits);
                    }
                }
            }
            _ => out.push(c),
        }
    }
    Ok(out)
}

/// The set of placeholder indices a text uses. Doubled markers are resolved
/// first, so `{{0}}` contributes nothing.
pub fn placeholder_indices(text: &str) -> BTreeSet<usize> {
    let mut indices = BTreeSet::new();
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
            }
            '{' => {
                let mut digits = String::new();
                while let Some(d) = chars.next_if(char::is_ascii_digit) {
                    digits.push(d);
                }
                if let (Ok(index), Some('}')) = (digits.parse::<usize>(), chars.peek()) {
                    chars.next();
                    indices.insert(index);
                }
            }
            _ => {}
        }
    }
    indices
}

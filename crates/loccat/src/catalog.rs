//! The deduplicated, immutable message catalog and its building blocks.

use std::borrow::Borrow;
use std::fmt;

use indexmap::IndexMap;
use unic_langid::LanguageIdentifier;

use crate::error::RenderError;
use crate::render;

/// Opaque message identifier.
///
/// Source files mix numeric-looking and free-form ids; both are kept verbatim
/// as strings so that `"007"` and `"7"` never collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(String);

impl EntryId {
    pub fn new(id: impl Into<String>) -> Self {
        EntryId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntryId {
    fn from(id: &str) -> Self {
        EntryId(id.to_owned())
    }
}

impl From<String> for EntryId {
    fn from(id: String) -> Self {
        EntryId(id)
    }
}

impl Borrow<str> for EntryId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// One locale's rendering of an entry, text kept verbatim. Placeholders and
/// downstream markup codes are not interpreted here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    locale: LanguageIdentifier,
    text: String,
}

impl Translation {
    pub fn new(locale: LanguageIdentifier, text: impl Into<String>) -> Self {
        Translation {
            locale,
            text: text.into(),
        }
    }

    pub fn locale(&self) -> &LanguageIdentifier {
        &self.locale
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// A localizable message: one id, at most one translation per locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    id: EntryId,
    source_file: String,
    translations: IndexMap<LanguageIdentifier, Translation>,
}

impl Entry {
    pub(crate) fn new(id: EntryId, source_file: impl Into<String>) -> Self {
        Entry {
            id,
            source_file: source_file.into(),
            translations: IndexMap::new(),
        }
    }

    /// First-wins insert. Returns `false` when the locale was already taken
    /// and the translation was dropped.
    pub(crate) fn insert_translation(&mut self, translation: Translation) -> bool {
        if self.translations.contains_key(&translation.locale) {
            return false;
        }
        self.translations
            .insert(translation.locale.clone(), translation);
        true
    }

    pub fn id(&self) -> &EntryId {
        &self.id
    }

    /// Name of the manifest file this entry was first declared in.
    pub fn source_file(&self) -> &str {
        &self.source_file
    }

    pub fn translation(&self, locale: &LanguageIdentifier) -> Option<&Translation> {
        self.translations.get(locale)
    }

    pub fn has_locale(&self, locale: &LanguageIdentifier) -> bool {
        self.translations.contains_key(locale)
    }

    /// Translations in declaration order.
    pub fn translations(&self) -> impl Iterator<Item = &Translation> {
        self.translations.values()
    }

    pub fn locales(&self) -> impl Iterator<Item = &LanguageIdentifier> {
        self.translations.keys()
    }
}

/// The full set of messages assembled from the manifest's source files.
///
/// Immutable once loaded; reloading builds a fresh catalog. Entries keep the
/// order in which they were first seen, which is what makes the first-wins
/// duplicate policy deterministic.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: IndexMap<EntryId, Entry>,
    fallback: LanguageIdentifier,
}

impl Catalog {
    pub(crate) fn new(fallback: LanguageIdentifier) -> Self {
        Catalog {
            entries: IndexMap::new(),
            fallback,
        }
    }

    pub(crate) fn insert_entry(&mut self, entry: Entry) {
        self.entries.insert(entry.id().clone(), entry);
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&Entry> {
        self.entries.get(id)
    }

    /// Entries in first-seen order.
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Locale used when an entry lacks the requested one.
    pub fn fallback(&self) -> &LanguageIdentifier {
        &self.fallback
    }

    /// Renders the entry `id` for `locale`, substituting `{k}` placeholders
    /// with `args[k]`. Falls back to the catalog's fallback locale when the
    /// requested one is absent.
    pub fn render(
        &self,
        id: &str,
        locale: &LanguageIdentifier,
        args: &[&dyn fmt::Display],
    ) -> Result<String, RenderError> {
        let entry = self
            .get(id)
            .ok_or_else(|| RenderError::UnknownEntry(EntryId::from(id)))?;
        render::render_entry(entry, locale, &self.fallback, args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use unic_langid::langid;

    #[test]
    fn entry_keeps_first_translation_per_locale() {
        let mut entry = Entry::new(EntryId::from("greet"), "test.xml");
        assert!(entry.insert_translation(Translation::new(langid!("en-US"), "first")));
        assert!(!entry.insert_translation(Translation::new(langid!("en-US"), "second")));
        assert_eq!(entry.translation(&langid!("en-US")).unwrap().text(), "first");
    }

    #[test]
    fn catalog_lookup_works_by_str() {
        let mut catalog = Catalog::new(langid!("en-US"));
        catalog.insert_entry(Entry::new(EntryId::from("42"), "test.xml"));
        assert!(catalog.contains_id("42"));
        assert!(!catalog.contains_id("7"));
        assert_eq!(catalog.get("42").unwrap().id().as_str(), "42");
    }
}

//! Locale tags and the roster of locales the product ships.

use unic_langid::{LanguageIdentifier, langid};

/// Locale used when an entry has no translation for the requested one.
pub const FALLBACK_LOCALE: LanguageIdentifier = langid!("en-US");

/// Locales the translation team maintains. The validator warns when a
/// coverage report is requested for a tag outside this roster; the loader
/// itself accepts any well-formed tag.
pub const SUPPORTED_LOCALES: [&str; 23] = [
    "en-US", "de-DE", "fr-FR", "nl-NL", "it-IT", "es-ES", "pt-BR", "pl-PL", "tr-TR", "ar-001",
    "zh-Hans", "zh-Hant", "hi-Latn", "vi-VN", "th-TH", "id-ID", "cs-CZ", "da-DK", "sv-SE", "ru-RU",
    "lv-LV", "et-EE", "no-NO",
];

/// Whether `locale` is part of the maintained roster.
pub fn is_supported(locale: &LanguageIdentifier) -> bool {
    let tag = locale.to_string();
    SUPPORTED_LOCALES.iter().any(|s| *s == tag)
}

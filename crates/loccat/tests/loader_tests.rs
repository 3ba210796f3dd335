//! Loading, first-wins deduplication and per-file error isolation.

use loccat::{Diagnostic, FileErrorKind, Loader, Manifest, ParseErrorKind, langid};

const KILL_MESSAGES: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<KillMessages>
    <Entry Id="pistol">
        <String xml:lang="en-US">{0} shot {1}</String>
        <String xml:lang="de-DE">{0} erschoss {1}</String>
    </Entry>
    <Entry Id="melee">
        <String xml:lang="en-US">{0} beat {1} down</String>
    </Entry>
</KillMessages>
"#;

#[test]
fn loads_entries_and_translations() {
    let outcome = Loader::new().load_sources([("kill_messages.xml", KILL_MESSAGES)]);
    assert!(!outcome.has_errors());
    assert!(outcome.diagnostics.is_empty());
    assert_eq!(outcome.catalog.len(), 2);

    let entry = outcome.catalog.get("pistol").unwrap();
    assert_eq!(
        entry.translation(&langid!("de-DE")).unwrap().text(),
        "{0} erschoss {1}"
    );
}

#[test]
fn duplicate_id_keeps_first_entry_and_its_translations() {
    let source = r#"<M>
        <Entry Id="melee">
            <String xml:lang="en-US">first</String>
            <String xml:lang="fr-FR">premier</String>
        </Entry>
        <Entry Id="melee">
            <String xml:lang="en-US">second</String>
            <String xml:lang="de-DE">zweiter</String>
        </Entry>
    </M>"#;
    let outcome = Loader::new().load_sources([("m.xml", source)]);
    assert_eq!(outcome.catalog.len(), 1);

    let entry = outcome.catalog.get("melee").unwrap();
    assert_eq!(entry.translation(&langid!("en-US")).unwrap().text(), "first");
    // The loser's translations are discarded entirely, not merged.
    assert!(entry.translation(&langid!("de-DE")).is_none());

    assert_eq!(outcome.diagnostics.len(), 1);
    assert!(matches!(
        &outcome.diagnostics[0],
        Diagnostic::DuplicateId { id, .. } if id.as_str() == "melee"
    ));
}

#[test]
fn duplicate_locale_keeps_first_translation() {
    let source = r#"<M>
        <Entry Id="a">
            <String xml:lang="en-US">kept</String>
            <String xml:lang="en-US">dropped</String>
        </Entry>
    </M>"#;
    let outcome = Loader::new().load_sources([("m.xml", source)]);
    let entry = outcome.catalog.get("a").unwrap();
    assert_eq!(entry.translation(&langid!("en-US")).unwrap().text(), "kept");
    assert!(matches!(
        &outcome.diagnostics[0],
        Diagnostic::DuplicateLocale { locale, .. } if *locale == langid!("en-US")
    ));
}

#[test]
fn manifest_order_decides_winners_across_files() {
    let first = r#"<M><Entry Id="shared"><String xml:lang="en-US">from first</String></Entry></M>"#;
    let second = r#"<M><Entry Id="shared"><String xml:lang="en-US">from second</String></Entry></M>"#;
    let outcome = Loader::new().load_sources([("first.xml", first), ("second.xml", second)]);
    assert_eq!(
        outcome
            .catalog
            .render("shared", &langid!("en-US"), &[])
            .unwrap(),
        "from first"
    );
    assert_eq!(outcome.diagnostics[0].file(), "second.xml");
}

#[test]
fn malformed_file_is_dropped_but_siblings_load() {
    let bad = r#"<M><Entry Id="broken"><String xml:lang="en-US">fish & chips</String></Entry></M>"#;
    let outcome = Loader::new().load_sources([("bad.xml", bad), ("good.xml", KILL_MESSAGES)]);

    // Nothing from the malformed file, everything from the valid one.
    assert!(!outcome.catalog.contains_id("broken"));
    assert!(outcome.catalog.contains_id("pistol"));

    assert_eq!(outcome.errors.len(), 1);
    assert_eq!(outcome.errors[0].file, "bad.xml");
    assert!(matches!(
        &outcome.errors[0].kind,
        FileErrorKind::Parse(err) if err.kind == ParseErrorKind::UnescapedReservedChar('&')
    ));
}

#[test]
fn skipped_records_produce_diagnostics_not_errors() {
    let source = r#"<M>
        <Comment>not an entry</Comment>
        <Entry>
            <String xml:lang="en-US">no id</String>
        </Entry>
        <Entry Id="ok">
            <String>no lang</String>
            <String xml:lang="not a tag!">bad lang</String>
            <String xml:lang="en-US">fine</String>
        </Entry>
    </M>"#;
    let outcome = Loader::new().load_sources([("m.xml", source)]);
    assert!(!outcome.has_errors());
    assert_eq!(outcome.catalog.len(), 1);
    assert!(outcome.catalog.contains_id("ok"));

    let kinds: Vec<_> = outcome
        .diagnostics
        .iter()
        .map(|d| match d {
            Diagnostic::UnknownTag { tag, .. } => format!("unknown:{tag}"),
            Diagnostic::MissingId { .. } => "missing-id".to_owned(),
            Diagnostic::MissingLocale { .. } => "missing-locale".to_owned(),
            Diagnostic::InvalidLocale { value, .. } => format!("invalid-locale:{value}"),
            other => panic!("unexpected diagnostic {other:?}"),
        })
        .collect();
    assert_eq!(
        kinds,
        [
            "unknown:Comment",
            "missing-id",
            "missing-locale",
            "invalid-locale:not a tag!",
        ]
    );
}

#[test]
fn load_dir_follows_manifest_and_reports_unreadable_files() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("kill_messages.xml"), KILL_MESSAGES).unwrap();
    std::fs::write(
        dir.path().join("index.json"),
        r#"["kill_messages.xml", "missing.xml"]"#,
    )
    .unwrap();

    let manifest = Manifest::from_path(&dir.path().join("index.json")).unwrap();
    let outcome = Loader::new().load_dir(&manifest, dir.path());

    assert_eq!(outcome.catalog.len(), 2);
    assert_eq!(outcome.errors.len(), 1);
    assert_eq!(outcome.errors[0].file, "missing.xml");
    assert!(matches!(outcome.errors[0].kind, FileErrorKind::Io(_)));
}

#[test]
fn catalog_is_rebuilt_from_scratch_per_load() {
    let loader = Loader::new();
    let first = loader.load_sources([("m.xml", KILL_MESSAGES)]);
    let second =
        loader.load_sources([("m.xml", r#"<M><Entry Id="only"><String xml:lang="en-US">x</String></Entry></M>"#)]);
    assert_eq!(first.catalog.len(), 2);
    assert_eq!(second.catalog.len(), 1);
    assert!(!second.catalog.contains_id("pistol"));
}

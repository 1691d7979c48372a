//! Integration tests for the registry public API.

use cairn::handlers::{summarize_doc, HandlerTable};
use cairn::profile::ProfileKind;
use cairn::registry::{ExportStepRegistry, ImportStepRegistry};
use cairn::CairnError;

#[test]
fn registration_ordering_and_completeness_work_together() {
    let mut registry = ImportStepRegistry::new();
    registry
        .register_step("one", "1", "app.steps.one", &["two", "three"], None, None)
        .unwrap();
    registry
        .register_step("two", "2", "app.steps.two", &["four"], None, None)
        .unwrap();

    // Half the graph is missing
    let missing = registry.missing_dependencies();
    assert_eq!(missing.len(), 2);
    assert!(missing.contains(&("one".into(), "three".into())));
    assert!(missing.contains(&("two".into(), "four".into())));

    registry
        .register_step("three", "3", "app.steps.three", &["four"], None, None)
        .unwrap();
    registry
        .register_step("four", "4", "app.steps.four", &[], None, None)
        .unwrap();
    assert!(registry.missing_dependencies().is_empty());

    let order = registry.topological_order().unwrap();
    let position = |id: &str| order.iter().position(|s| s == id).unwrap();
    assert!(position("four") < position("two"));
    assert!(position("four") < position("three"));
    assert!(position("two") < position("one"));
    assert!(position("three") < position("one"));
}

#[test]
fn documentation_derived_defaults_flow_into_the_registry() {
    let mut handlers: HandlerTable<fn()> = HandlerTable::new();
    handlers.register("app.steps.docstring", || ());

    let doc = "This is the first line.\n\nThis is the second line.";
    let (title, description) = summarize_doc(doc);

    let mut registry = ImportStepRegistry::new();
    registry
        .register_step(
            "docstring",
            "1",
            "app.steps.docstring",
            &[],
            Some(&title),
            Some(&description),
        )
        .unwrap();

    let info = registry.get_step_metadata("docstring").unwrap();
    assert_eq!(info.title, "This is the first line.");
    assert_eq!(info.description, "This is the second line.");

    // The registry only holds the token; the table resolves it
    assert!(handlers.resolve(registry.get_step("docstring").unwrap()).is_some());
}

#[test]
fn import_profile_round_trips_through_the_document_form() {
    let mut registry = ImportStepRegistry::new();
    registry
        .register_step(
            "one",
            "1",
            "app.steps.one",
            &["two"],
            Some("One Step"),
            Some("One small step"),
        )
        .unwrap();
    registry
        .register_step(
            "two",
            "2",
            "app.steps.two",
            &["three"],
            Some("Two Steps"),
            Some("Texas two step"),
        )
        .unwrap();
    registry
        .register_step(
            "three",
            "3",
            "app.steps.three",
            &[],
            Some("Three Steps"),
            Some("Gimme three steps"),
        )
        .unwrap();

    let xml = registry.generate_xml().unwrap();
    assert_eq!(ProfileKind::detect(&xml).unwrap(), ProfileKind::Import);

    let mut reloaded = ImportStepRegistry::new();
    reloaded.parse_xml(&xml).unwrap();

    assert_eq!(reloaded.list_steps(), registry.list_steps());
    for id in registry.list_steps() {
        assert_eq!(
            reloaded.get_step_metadata(&id),
            registry.get_step_metadata(&id)
        );
    }
    assert_eq!(
        reloaded.topological_order().unwrap(),
        registry.topological_order().unwrap()
    );

    // Serializing the reloaded registry reproduces the document
    assert_eq!(reloaded.generate_xml().unwrap(), xml);
}

#[test]
fn export_registry_is_strict_about_collisions() {
    let mut registry = ExportStepRegistry::new();
    registry
        .register_step("one", "app.steps.one", Some("One Step"), None)
        .unwrap();

    let err = registry
        .register_step("one", "app.steps.other", Some("Other"), Some("text"))
        .unwrap_err();
    assert!(matches!(err, CairnError::DuplicateStep { .. }));

    let xml = registry.generate_xml();
    assert_eq!(ProfileKind::detect(&xml).unwrap(), ProfileKind::Export);

    let mut reloaded = ExportStepRegistry::new();
    reloaded.parse_xml(&xml).unwrap();
    assert_eq!(reloaded.get_step("one"), Some("app.steps.one"));
    assert_eq!(reloaded.get_step_metadata("one").unwrap().title, "One Step");
}

#[test]
fn import_documents_load_from_labeled_byte_encodings() {
    let xml = "<?xml version=\"1.0\"?>\n<import-steps>\n \
               <import-step id=\"one\" version=\"1\" handler=\"app.steps.one\" \
               title=\"Premi\u{e8}re \u{e9}tape\" />\n</import-steps>\n";
    let latin1: Vec<u8> = xml.chars().map(|c| c as u32 as u8).collect();

    let mut registry = ImportStepRegistry::new();
    registry.parse_xml_bytes(&latin1, Some("latin1")).unwrap();

    assert_eq!(
        registry.get_step_metadata("one").unwrap().title,
        "Premi\u{e8}re \u{e9}tape"
    );

    // UTF-8 input needs no label
    let mut utf8_registry = ImportStepRegistry::new();
    utf8_registry.parse_xml_bytes(xml.as_bytes(), None).unwrap();
    assert_eq!(
        utf8_registry.get_step_metadata("one").unwrap().title,
        "Premi\u{e8}re \u{e9}tape"
    );
}

use super::*;

#[test]
fn update_opens_and_replaces_text() {
    let registry = BufferRegistry::new();
    let doc = DocumentId::file("/w/a.rs");

    registry.update(&doc, "one\ntwo");
    assert_eq!(registry.get(&doc).unwrap().lines, vec!["one", "two"]);

    registry.update(&doc, "three");
    assert_eq!(registry.get(&doc).unwrap().lines, vec!["three"]);
}

#[test]
fn clones_share_the_same_table() {
    let registry = BufferRegistry::new();
    let handle = registry.clone();
    let doc = DocumentId::untitled("Untitled-1");

    handle.update(&doc, "// TODO: x");

    assert!(registry.is_open(&doc));
    assert!(registry.close(&doc).is_some());
    assert!(!handle.is_open(&doc));
}

#[test]
fn all_is_sorted_by_document() {
    let registry = BufferRegistry::new();
    registry.update(&DocumentId::file("/w/b.rs"), "");
    registry.update(&DocumentId::file("/w/a.rs"), "");

    let ids: Vec<DocumentId> = registry.all().into_iter().map(|b| b.id).collect();

    assert_eq!(ids, vec![DocumentId::file("/w/a.rs"), DocumentId::file("/w/b.rs")]);
}

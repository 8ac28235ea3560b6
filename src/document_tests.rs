use std::path::{Path, PathBuf};

use super::*;

#[test]
fn file_document_exposes_path() {
    let id = DocumentId::file("/work/src/main.rs");
    assert!(id.is_file());
    assert_eq!(id.as_path(), Some(Path::new("/work/src/main.rs")));
}

#[test]
fn untitled_document_has_no_path() {
    let id = DocumentId::untitled("Untitled-1");
    assert!(!id.is_file());
    assert_eq!(id.as_path(), None);
    assert_eq!(id.to_string(), "untitled:Untitled-1");
}

#[test]
fn document_from_path_buf() {
    let id: DocumentId = PathBuf::from("a/b.rs").into();
    assert_eq!(id, DocumentId::File(PathBuf::from("a/b.rs")));
}

#[test]
fn buffer_from_text_splits_crlf_and_lf() {
    let buffer = OpenBuffer::from_text(DocumentId::untitled("x"), "one\r\ntwo\nthree");
    assert_eq!(buffer.lines, vec!["one", "two", "three"]);
}

#[test]
fn buffer_from_text_keeps_trailing_empty_line() {
    let buffer = OpenBuffer::from_text(DocumentId::untitled("x"), "one\n");
    assert_eq!(buffer.lines, vec!["one", ""]);
}

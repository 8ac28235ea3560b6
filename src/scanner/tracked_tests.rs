use std::path::{Path, PathBuf};

use super::*;

fn scope_of(paths: &[&str]) -> TrackedScope {
    let mut scope = TrackedScope::new();
    for path in paths {
        scope.insert(PathBuf::from(path));
    }
    scope
}

#[test]
fn deleting_directory_removes_descendants_only() {
    let mut scope = scope_of(&["d/a.ts", "d/b.ts", "other.ts"]);

    let removed = scope.remove_under(Path::new("d"));

    assert_eq!(removed, vec![PathBuf::from("d/a.ts"), PathBuf::from("d/b.ts")]);
    assert_eq!(scope.iter().collect::<Vec<_>>(), vec![Path::new("other.ts")]);
}

#[test]
fn deleting_directory_ignores_same_prefix_sibling() {
    let mut scope = scope_of(&["/w/foo/a.rs", "/w/foo2/b.rs", "/w/foo.rs"]);

    scope.remove_under(Path::new("/w/foo"));

    assert!(!scope.contains(Path::new("/w/foo/a.rs")));
    assert!(scope.contains(Path::new("/w/foo2/b.rs")));
    assert!(scope.contains(Path::new("/w/foo.rs")));
}

#[test]
fn deleting_file_removes_exactly_that_file() {
    let mut scope = scope_of(&["/w/a.rs", "/w/a.rs.bak"]);

    let removed = scope.remove_under(Path::new("/w/a.rs"));

    assert_eq!(removed, vec![PathBuf::from("/w/a.rs")]);
    assert!(scope.contains(Path::new("/w/a.rs.bak")));
}

#[test]
fn deleting_untracked_path_is_a_no_op() {
    let mut scope = scope_of(&["/w/a.rs"]);

    assert!(scope.remove_under(Path::new("/w/zzz")).is_empty());
    assert_eq!(scope.len(), 1);
}

#[test]
fn clear_empties_the_scope() {
    let mut scope = scope_of(&["a", "b"]);
    assert_eq!(scope.len(), 2);

    scope.clear();
    assert!(scope.is_empty());
}

#[test]
fn insert_reports_new_entries() {
    let mut scope = TrackedScope::new();
    assert!(scope.insert(PathBuf::from("a")));
    assert!(!scope.insert(PathBuf::from("a")));
}

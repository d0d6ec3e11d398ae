//! Integration tests for manifest and directory source discovery.

use std::fs;

use chomfy_ingest::{SourceEntry, load_manifest, scan_directory};
use tempfile::TempDir;

fn touch(dir: &TempDir, name: &str) {
    let path = dir.path().join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent");
    }
    fs::write(&path, "line\n").expect("write file");
}

fn names(dir: &TempDir, files: &[std::path::PathBuf]) -> Vec<String> {
    files
        .iter()
        .map(|p| {
            p.strip_prefix(dir.path())
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect()
}

#[test]
fn scan_sorts_and_filters_by_glob() {
    let dir = TempDir::new().unwrap();
    for name in ["c.txt", "a.txt", "b.csv", "B.txt"] {
        touch(&dir, name);
    }
    fs::create_dir(dir.path().join("d.txt")).unwrap();

    let files = scan_directory(dir.path(), "*.txt").unwrap();
    assert_eq!(names(&dir, &files), vec!["B.txt", "a.txt", "c.txt"]);
}

#[test]
fn scan_empty_pattern_defaults_to_txt() {
    let dir = TempDir::new().unwrap();
    touch(&dir, "a.txt");
    touch(&dir, "b.md");

    let files = scan_directory(dir.path(), "").unwrap();
    assert_eq!(names(&dir, &files), vec!["a.txt"]);
}

#[test]
fn scan_star_does_not_descend() {
    let dir = TempDir::new().unwrap();
    touch(&dir, "top.txt");
    touch(&dir, "nested/inner.txt");

    let flat = scan_directory(dir.path(), "*.txt").unwrap();
    assert_eq!(names(&dir, &flat), vec!["top.txt"]);

    let one_level = scan_directory(dir.path(), "*/*.txt").unwrap();
    assert_eq!(names(&dir, &one_level), vec!["nested/inner.txt"]);

    let recursive = scan_directory(dir.path(), "**/*.txt").unwrap();
    assert_eq!(
        names(&dir, &recursive),
        vec!["nested/inner.txt", "top.txt"]
    );
}

#[test]
fn scan_orders_by_whole_path_string() {
    let dir = TempDir::new().unwrap();
    touch(&dir, "a/x.txt");
    touch(&dir, "a-b/x.txt");

    let files = scan_directory(dir.path(), "**/*.txt").unwrap();
    assert_eq!(names(&dir, &files), vec!["a-b/x.txt", "a/x.txt"]);
}

#[test]
fn scan_skips_hidden_files() {
    let dir = TempDir::new().unwrap();
    touch(&dir, ".draft.txt");
    touch(&dir, "final.txt");

    let files = scan_directory(dir.path(), "*.txt").unwrap();
    assert_eq!(names(&dir, &files), vec!["final.txt"]);

    let hidden = scan_directory(dir.path(), ".*.txt").unwrap();
    assert_eq!(names(&dir, &hidden), vec![".draft.txt"]);
}

#[test]
fn manifest_entries_keep_column_syntax() {
    let dir = TempDir::new().unwrap();
    let manifest = dir.path().join("sources.txt");
    fs::write(
        &manifest,
        "# subjects\nsubjects.txt\n\nstyles.csv::style\n   \n",
    )
    .unwrap();

    let entries = load_manifest(&manifest).unwrap();
    assert_eq!(entries, vec!["subjects.txt", "styles.csv::style"]);

    let parsed: Vec<SourceEntry> = entries
        .iter()
        .map(|entry| SourceEntry::parse(entry, "name"))
        .collect();
    assert_eq!(parsed[0].column.as_deref(), Some("name"));
    assert_eq!(parsed[1].column.as_deref(), Some("style"));
}

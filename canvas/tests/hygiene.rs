//! Hygiene — enforces coding standards at test time.
//!
//! Scans the canvas crate's production sources for antipatterns. None of
//! these patterns are allowed; fix the offender rather than weakening the
//! scan.

use std::fs;
use std::path::Path;

struct SourceFile {
    path: String,
    content: String,
}

fn source_files() -> Vec<SourceFile> {
    let mut files = Vec::new();
    collect_rs_files(Path::new("src"), &mut files);
    files
}

fn collect_rs_files(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_rs_files(&path, out);
            continue;
        }
        let path_str = path.to_string_lossy().to_string();
        if !path_str.ends_with(".rs") || path_str.ends_with("_test.rs") {
            continue;
        }
        if let Ok(content) = fs::read_to_string(&path) {
            out.push(SourceFile { path: path_str, content });
        }
    }
}

fn count_occurrences(needle: &str) -> Vec<(String, usize)> {
    source_files()
        .into_iter()
        .filter_map(|f| {
            let count = f.content.matches(needle).count();
            (count > 0).then_some((f.path, count))
        })
        .collect()
}

fn assert_absent(needle: &str, label: &str) {
    let offenders = count_occurrences(needle);
    assert!(
        offenders.is_empty(),
        "found {label} in production code: {offenders:?}"
    );
}

#[test]
fn no_unwrap_in_production_code() {
    assert_absent(".unwrap()", "`.unwrap()`");
}

#[test]
fn no_expect_in_production_code() {
    assert_absent(".expect(", "`.expect(`");
}

#[test]
fn no_panic_in_production_code() {
    assert_absent("panic!(", "`panic!`");
}

#[test]
fn no_todo_or_unimplemented() {
    assert_absent("todo!(", "`todo!`");
    assert_absent("unimplemented!(", "`unimplemented!`");
}

#[test]
fn no_silently_discarded_results() {
    assert_absent("let _ =", "silently discarded results");
}

#[test]
fn no_dead_code_allows() {
    assert_absent("#[allow(dead_code)]", "`#[allow(dead_code)]`");
}

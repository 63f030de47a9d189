//! Reserved words and primitive type names are spelled once, in `rotate_core::lang`.
//!
//! The lexer and parser compare ids (`KeywordId`, `PrimitiveId`), never text. This test fails when a source file
//! outside the registries compares against a reserved spelling (`== "while"`) or matches on one (`"int" =>`).

use std::fs;
use std::path::{Path, PathBuf};

use rotate_core::lang::{keywords, types};

fn reserved_spellings() -> Vec<&'static str> {
    let mut spellings: Vec<&'static str> = keywords::KEYWORDS
        .iter()
        .map(|k| k.canonical)
        .chain(types::PRIMITIVES.iter().map(|p| p.canonical))
        .collect();
    spellings.sort_unstable();
    spellings.dedup();
    spellings
}

/// Every `.rs` file under `dir` that may not spell vocabulary by hand.
fn checked_sources(root: &Path, dir: &Path) -> Vec<PathBuf> {
    let mut pending = vec![dir.to_path_buf()];
    let mut files = Vec::new();
    while let Some(dir) = pending.pop() {
        let Ok(entries) = fs::read_dir(&dir) else { continue };
        for path in entries.flatten().map(|e| e.path()) {
            if path.is_dir() {
                pending.push(path);
            } else if path.extension().is_some_and(|ext| ext == "rs") && !is_exempt(root, &path) {
                files.push(path);
            }
        }
    }
    files.sort();
    files
}

fn is_exempt(root: &Path, path: &Path) -> bool {
    let rel = path.strip_prefix(root).unwrap_or(path).to_string_lossy().replace('\\', "/");
    rel.starts_with("crates/rotate_core/src/lang/") || rel.contains("/tests/") || rel.ends_with("/tests.rs")
}

fn compares_spelling(line: &str, spellings: &[&str]) -> bool {
    if line.trim_start().starts_with("//") {
        return false;
    }
    spellings
        .iter()
        .any(|s| line.contains(&format!("== \"{s}\"")) || line.contains(&format!("\"{s}\" =>")))
}

#[test]
fn reserved_words_are_not_compared_as_strings() {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let spellings = reserved_spellings();

    let mut offenders = Vec::new();
    for dir in ["src", "crates"] {
        for path in checked_sources(&root, &root.join(dir)) {
            let Ok(contents) = fs::read_to_string(&path) else { continue };
            for (idx, line) in contents.lines().enumerate() {
                if compares_spelling(line, &spellings) {
                    let rel = path.strip_prefix(&root).unwrap_or(&path).display().to_string();
                    offenders.push(format!("{rel}:{}: {}", idx + 1, line.trim()));
                }
            }
        }
    }

    assert!(
        offenders.is_empty(),
        "compare `KeywordId` / `PrimitiveId` instead of spellings:\n{}",
        offenders.join("\n")
    );
}

#[test]
fn spelling_check_ignores_comments_and_other_strings() {
    let spellings = reserved_spellings();
    assert!(compares_spelling(r#"if word == "while" {"#, &spellings));
    assert!(compares_spelling(r#"    "int" => Some(1),"#, &spellings));
    assert!(!compares_spelling(r#"// if word == "while""#, &spellings));
    assert!(!compares_spelling(r#"if word == "output.org" {"#, &spellings));
}

//! Layering guardrails for the workspace crates.
//!
//! `rotate_core` is pure vocabulary and has no dependencies. `rotate_syntax` may use `rotate_core` and the ambient
//! error/logging crates, but never the CLI layer (`clap`, `tracing-subscriber`) or the root `rotate` crate.

fn dependency_names(manifest: &str) -> Vec<String> {
    let mut in_dependencies = false;
    let mut names = Vec::new();

    for raw_line in manifest.lines() {
        let line = raw_line.trim();
        // Track when we enter/exit the `[dependencies]` table.
        if line.starts_with('[') {
            if line == "[dependencies]" {
                in_dependencies = true;
                continue;
            }
            // Any new section after `[dependencies]` ends the scan window.
            if in_dependencies {
                break;
            }
        }

        if !in_dependencies || line.is_empty() || line.starts_with('#') {
            continue;
        }

        // Strip inline comments for robustness.
        let line_no_comment = line.split('#').next().unwrap_or("").trim();
        if let Some((name, _)) = line_no_comment.split_once('=') {
            names.push(name.trim().to_string());
        }
    }
    names
}

#[test]
fn core_has_no_dependencies() {
    let manifest = include_str!("../crates/rotate_core/Cargo.toml");
    assert!(
        dependency_names(manifest).is_empty(),
        "`rotate_core` must stay dependency-free"
    );
}

#[test]
fn syntax_does_not_depend_on_cli_layer() {
    let manifest = include_str!("../crates/rotate_syntax/Cargo.toml");
    for name in dependency_names(manifest) {
        assert!(
            !matches!(name.as_str(), "rotate" | "clap" | "tracing-subscriber"),
            "`{name}` must not appear in rotate_syntax [dependencies]"
        );
    }
}

#[test]
fn dependency_scan_reads_only_the_dependencies_table() {
    let manifest = "[package]\nname = \"x\"\n\n[dependencies]\na = \"1\" # why\nb = { path = \"b\" }\n\n[dev-dependencies]\nc = \"1\"\n";
    assert_eq!(dependency_names(manifest), vec!["a", "b"]);
}

/// `cli/mod.rs` denies `unwrap`/`expect` for the whole CLI tree, so test modules below it must opt back in.
#[test]
fn cli_test_modules_opt_out_of_the_unwrap_lint() {
    let sources = [
        ("src/cli/mod.rs", include_str!("../src/cli/mod.rs")),
        ("src/cli/compile.rs", include_str!("../src/cli/compile.rs")),
        ("src/cli/dump.rs", include_str!("../src/cli/dump.rs")),
        ("src/cli/loader.rs", include_str!("../src/cli/loader.rs")),
    ];
    assert!(sources[0].1.contains("#![deny(clippy::unwrap_used)]"));

    for (path, source) in sources {
        if source.contains("mod tests {") {
            assert!(
                source.contains("#[cfg(test)]\n#[allow(clippy::unwrap_used)]\nmod tests {"),
                "{path}: test module is missing #[allow(clippy::unwrap_used)]"
            );
        }
    }
}

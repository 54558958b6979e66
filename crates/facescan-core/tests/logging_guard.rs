use std::fs;
use std::path::{Path, PathBuf};

fn collect_rs_files(dir: &Path, out: &mut Vec<PathBuf>) {
    if let Ok(entries) = fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                collect_rs_files(&path, out);
            } else if path.extension().and_then(|s| s.to_str()) == Some("rs") {
                out.push(path);
            }
        }
    }
}

#[test]
fn test_library_sources_log_through_tracing() {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    let repo_root = manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("repo root");

    let crates_dir = repo_root.join("crates");

    let patterns = [
        ("println!", "Use tracing::info!/debug! instead of println!"),
        ("eprintln!", "Use tracing::warn!/error! instead of eprintln!"),
        ("dbg!", "Remove dbg! before committing"),
        ("std::process::exit", "Library code must not terminate the host process"),
    ];

    let mut files = Vec::new();
    if let Ok(entries) = fs::read_dir(&crates_dir) {
        for entry in entries.flatten() {
            collect_rs_files(&entry.path().join("src"), &mut files);
        }
    }
    assert!(!files.is_empty(), "no crate sources found under {crates_dir:?}");

    let mut violations = Vec::new();
    for file in files {
        let rel = file.strip_prefix(repo_root).unwrap_or(&file);
        let rel_str = rel.to_string_lossy();

        let Ok(contents) = fs::read_to_string(&file) else {
            continue;
        };

        for (pattern, guidance) in patterns {
            if contents.contains(pattern) {
                violations.push(format!("{rel_str}: {pattern} ({guidance})"));
            }
        }
    }

    assert!(
        violations.is_empty(),
        "library sources bypass structured logging:\n{}",
        violations.join("\n")
    );
}

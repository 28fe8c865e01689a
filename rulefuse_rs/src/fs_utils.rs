use std::io;
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::types::FormatVariant;

/// Directories never worth descending into.
const SKIP_DIRS: &[&str] = &[".git", "node_modules", "target"];

#[derive(Debug, Clone, Default)]
pub struct DiscoveryOptions {
    /// Paths (absolute or relative to the root) to leave out
    pub ignore_paths: Vec<PathBuf>,
    /// Pick up `README.md` files as rules too
    pub include_readme: bool,
}

pub fn normalise_ignore_patterns(patterns: &[PathBuf], root: &Path) -> Vec<PathBuf> {
    patterns
        .iter()
        .map(|candidate| {
            let full = if candidate.is_absolute() {
                candidate.clone()
            } else {
                root.join(candidate)
            };
            full.canonicalize().unwrap_or(full)
        })
        .collect()
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| SKIP_DIRS.contains(&name))
}

fn is_readme(path: &Path) -> bool {
    path.file_stem()
        .and_then(|s| s.to_str())
        .is_some_and(|s| s.eq_ignore_ascii_case("readme"))
}

/// Walk `root` and return every rule file with its variant, sorted by name
/// within each directory.
pub fn discover_rule_files(
    root: &Path,
    options: &DiscoveryOptions,
) -> io::Result<Vec<(PathBuf, FormatVariant)>> {
    if !root.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("rules directory not found: {}", root.display()),
        ));
    }
    let canonical_root = root.canonicalize()?;
    let ignored = normalise_ignore_patterns(&options.ignore_paths, &canonical_root);

    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            if is_skipped_dir(entry) {
                return false;
            }
            if ignored.is_empty() {
                return true;
            }
            let full = entry
                .path()
                .canonicalize()
                .unwrap_or_else(|_| entry.path().to_path_buf());
            !ignored.iter().any(|ignore| full.starts_with(ignore))
        });

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry.map_err(io::Error::other)?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let Some(format) = FormatVariant::from_path(path) else {
            continue;
        };
        if !options.include_readme && is_readme(path) {
            tracing::debug!(file = %path.display(), "skipping README");
            continue;
        }
        files.push((path.to_path_buf(), format));
    }

    tracing::debug!(count = files.len(), "rule files discovered");
    Ok(files)
}

/// Path relative to `root`, with `/` separators, for reports and prompts.
pub fn display_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

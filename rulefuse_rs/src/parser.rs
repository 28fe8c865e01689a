//! Rule file parsing: `---` delimited `key: value` header plus body.
//!
//! ```text
//! ---
//! description: Formatting conventions
//! globs: src/**/*.ts
//! alwaysApply: false
//! ---
//!
//! Body text...
//! ```

use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};

use crate::fs_utils::{DiscoveryOptions, discover_rule_files, display_path};
use crate::types::{FormatVariant, Metadata, RuleRecord};

const MARKER: &str = "---";

/// Non-fatal problem found while parsing one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseWarning {
    /// File does not open with a `---` line
    MissingMetadata,
    /// Opening `---` found but no closing one
    UnterminatedMetadata,
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseWarning::MissingMetadata => write!(f, "no metadata block"),
            ParseWarning::UnterminatedMetadata => {
                write!(f, "metadata block is not closed with '{MARKER}'")
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct ParsedRule {
    pub record: RuleRecord,
    pub warning: Option<ParseWarning>,
}

/// Split `content` into metadata and body.
///
/// Files without a complete header keep their whole trimmed text as body
/// and get empty metadata.
pub fn split_metadata(content: &str) -> (Metadata, String, Option<ParseWarning>) {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut lines = content.lines().skip_while(|l| l.trim().is_empty());

    match lines.next() {
        Some(first) if first.trim_end() == MARKER => {}
        _ => {
            return (
                Metadata::new(),
                content.trim().to_string(),
                Some(ParseWarning::MissingMetadata),
            );
        }
    }

    let mut metadata = Metadata::new();
    let mut closed = false;
    for line in lines.by_ref() {
        if line.trim_end() == MARKER {
            closed = true;
            break;
        }
        if let Some((key, value)) = parse_meta_line(line) {
            metadata.insert(key, value);
        }
    }

    if !closed {
        return (
            Metadata::new(),
            content.trim().to_string(),
            Some(ParseWarning::UnterminatedMetadata),
        );
    }

    let body = lines.collect::<Vec<_>>().join("\n");
    (metadata, body.trim().to_string(), None)
}

fn parse_meta_line(line: &str) -> Option<(String, String)> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }
    let (key, value) = trimmed.split_once(':')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key.to_string(), unquote(value.trim()).to_string()))
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// Parse one file's text. The variant comes from the file extension.
pub fn parse_rule(source_path: &str, format: FormatVariant, content: &str) -> ParsedRule {
    let (metadata, body, warning) = split_metadata(content);
    ParsedRule {
        record: RuleRecord::new(source_path, metadata, body, format),
        warning,
    }
}

/// Discover, read and parse every rule file below `root`.
///
/// Parse warnings are logged and the record is kept. Files that are not
/// valid UTF-8 are skipped with a warning.
pub fn load_rules(root: &Path, options: &DiscoveryOptions) -> Result<Vec<RuleRecord>> {
    let files = discover_rule_files(root, options)
        .with_context(|| format!("Failed to scan {}", root.display()))?;

    let mut records = Vec::with_capacity(files.len());
    for (path, format) in files {
        let shown = display_path(root, &path);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::InvalidData => {
                tracing::warn!(file = %shown, "skipping non UTF-8 rule file");
                continue;
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read {}", path.display()));
            }
        };

        let parsed = parse_rule(&shown, format, &content);
        if let Some(warning) = &parsed.warning {
            tracing::warn!(file = %shown, "{warning}; using empty metadata");
        }
        records.push(parsed.record);
    }

    tracing::info!(count = records.len(), root = %root.display(), "rules loaded");
    Ok(records)
}

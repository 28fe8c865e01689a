//! Writes combined rules to disk.
//!
//! Layout of the output directory:
//!
//! ```text
//! combined-rules/
//!   analysis.md
//!   formatting.mdc
//!   testing.mdc
//! ```
//!
//! Metadata returned by the model is written as-is; nothing is validated.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::combiner::{CombinedRules, GeneratedRule};
use crate::error::{Result, RulefuseError};
use crate::types::{FormatVariant, Metadata};

pub const ANALYSIS_FILE: &str = "analysis.md";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenOutput {
    pub analysis: PathBuf,
    pub rules: Vec<PathBuf>,
}

/// Output variant for a format tag; anything but `mdc` becomes `.md`.
pub fn variant_for_tag(tag: &str) -> FormatVariant {
    if tag.trim().trim_start_matches('.').eq_ignore_ascii_case("mdc") {
        FormatVariant::Mdc
    } else {
        FormatVariant::Md
    }
}

/// File stem for a rule name: lowercase ASCII alphanumerics, `-` and `_`,
/// other runs collapsed to a single `-`.
pub fn sanitize_name(name: &str, index: usize) -> String {
    let mut stem = String::with_capacity(name.len());
    for ch in name.trim().chars() {
        let ch = ch.to_ascii_lowercase();
        if ch.is_ascii_alphanumeric() || ch == '_' || ch == '-' {
            stem.push(ch);
        } else if !stem.ends_with('-') {
            stem.push('-');
        }
    }
    let stem = stem.trim_matches('-').to_string();
    if stem.is_empty() {
        format!("rule-{}", index + 1)
    } else {
        stem
    }
}

/// `---` header, blank line, body, trailing newline.
pub fn render_rule(metadata: &Metadata, body: &str) -> String {
    let mut out = String::from("---\n");
    for (key, value) in metadata {
        out.push_str(key);
        out.push_str(": ");
        out.push_str(value);
        out.push('\n');
    }
    out.push_str("---\n\n");
    out.push_str(body.trim_end());
    out.push('\n');
    out
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|e| RulefuseError::io(path, e))?;
    tracing::debug!(file = %path.display(), bytes = content.len(), "wrote");
    Ok(())
}

fn unique_stem(rule: &GeneratedRule, index: usize, taken: &mut HashSet<String>) -> String {
    let base = sanitize_name(&rule.name, index);
    let mut stem = base.clone();
    let mut n = 2;
    while !taken.insert(stem.clone()) {
        stem = format!("{base}-{n}");
        n += 1;
    }
    stem
}

/// Write the analysis file plus one file per rule into `out_dir`.
pub fn write_combined(combined: &CombinedRules, out_dir: &Path) -> Result<WrittenOutput> {
    fs::create_dir_all(out_dir).map_err(|e| RulefuseError::io(out_dir, e))?;

    let analysis = out_dir.join(ANALYSIS_FILE);
    let mut analysis_text = combined.analysis.trim_end().to_string();
    analysis_text.push('\n');
    write_file(&analysis, &analysis_text)?;

    let ext = variant_for_tag(&combined.format).extension();
    let mut taken = HashSet::new();
    // Keep rules from overwriting the analysis file.
    taken.insert(ANALYSIS_FILE.trim_end_matches(".md").to_string());

    let mut rules = Vec::with_capacity(combined.rules.len());
    for (index, rule) in combined.rules.iter().enumerate() {
        let stem = unique_stem(rule, index, &mut taken);
        let path = out_dir.join(format!("{stem}.{ext}"));
        write_file(&path, &render_rule(&rule.metadata, &rule.body))?;
        rules.push(path);
    }

    tracing::info!(dir = %out_dir.display(), rules = rules.len(), "combined rules written");
    Ok(WrittenOutput { analysis, rules })
}

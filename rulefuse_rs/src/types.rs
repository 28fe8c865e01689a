//! Core data types shared by the parser, analyzer and report layers.

use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Parsed `key: value` header of a rule file.
pub type Metadata = BTreeMap<String, String>;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

/// Which of the two sibling rule conventions a file follows.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum FormatVariant {
    /// Cursor-style `.mdc` rule
    Mdc,
    /// Windsurf-style `.md` rule
    Md,
}

impl FormatVariant {
    /// Map a path to its variant by extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "mdc" => Some(Self::Mdc),
            "md" => Some(Self::Md),
            _ => None,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Mdc => "mdc",
            Self::Md => "md",
        }
    }
}

impl std::fmt::Display for FormatVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// One parsed rule file. Immutable once built by the parser.
#[derive(Clone, Debug, PartialEq)]
pub struct RuleRecord {
    /// Path as discovered (relative to the scan root when possible)
    pub source_path: String,
    pub metadata: Metadata,
    pub body: String,
    pub format: FormatVariant,
}

impl RuleRecord {
    pub fn new(
        source_path: impl Into<String>,
        metadata: Metadata,
        body: impl Into<String>,
        format: FormatVariant,
    ) -> Self {
        Self {
            source_path: source_path.into(),
            metadata,
            body: body.into(),
            format,
        }
    }

    /// Metadata value for `key`, treating empty strings as absent.
    pub fn meta(&self, key: &str) -> Option<&str> {
        self.metadata
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Raw metadata value for `key`, empty strings included.
    pub fn raw_meta(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateReason {
    SameDescription,
    SimilarContent,
}

/// A pair of records that look redundant.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DuplicateCandidate {
    pub file_a: String,
    pub file_b: String,
    pub reason: DuplicateReason,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Jaccard score in [0, 1]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similarity: Option<f64>,
    /// Score as a percentage rounded to one decimal
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similarity_percent: Option<f64>,
}

/// Two rules targeting the same glob with different triggers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ConflictCandidate {
    pub file_a: String,
    pub file_b: String,
    pub glob: String,
    pub trigger_a: String,
    pub trigger_b: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FormatCounts {
    pub mdc: usize,
    pub md: usize,
}

impl FormatCounts {
    pub fn total(&self) -> usize {
        self.mdc + self.md
    }
}

/// Result of a local analysis pass. Built once, never mutated.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub total: usize,
    pub by_format: FormatCounts,
    /// Trigger value -> count, in order of first occurrence
    #[serde(serialize_with = "serialize_trigger_counts")]
    pub by_trigger: Vec<(String, usize)>,
    pub duplicates: Vec<DuplicateCandidate>,
    pub conflicts: Vec<ConflictCandidate>,
}

fn serialize_trigger_counts<S>(counts: &[(String, usize)], serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    use serde::ser::SerializeSeq;

    #[derive(Serialize)]
    struct Entry<'a> {
        trigger: &'a str,
        count: usize,
    }

    let mut seq = serializer.serialize_seq(Some(counts.len()))?;
    for (trigger, count) in counts {
        seq.serialize_element(&Entry {
            trigger,
            count: *count,
        })?;
    }
    seq.end()
}

impl AnalysisReport {
    pub fn has_findings(&self) -> bool {
        !self.duplicates.is_empty() || !self.conflicts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variant_from_extension_is_case_insensitive() {
        assert_eq!(
            FormatVariant::from_path(Path::new("a/b/style.MDC")),
            Some(FormatVariant::Mdc)
        );
        assert_eq!(
            FormatVariant::from_path(Path::new("rules/x.md")),
            Some(FormatVariant::Md)
        );
        assert_eq!(FormatVariant::from_path(Path::new("rules/x.txt")), None);
        assert_eq!(FormatVariant::from_path(Path::new("Makefile")), None);
    }

    #[test]
    fn meta_treats_empty_as_absent() {
        let mut metadata = Metadata::new();
        metadata.insert("description".into(), String::new());
        metadata.insert("globs".into(), "*.rs".into());
        let record = RuleRecord::new("a.mdc", metadata, "body", FormatVariant::Mdc);
        assert_eq!(record.meta("description"), None);
        assert_eq!(record.raw_meta("description"), Some(""));
        assert_eq!(record.meta("globs"), Some("*.rs"));
    }
}

//! Turning the model's reply into [`CombinedRules`].
//!
//! Models wrap JSON in prose or code fences often enough that a strict
//! parse is not sufficient. Extraction is tried in order: whole text, first
//! fenced block, outermost brace span.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{Result, RulefuseError};
use crate::types::Metadata;

/// Structured result of one combine run.
#[derive(Debug, Clone, PartialEq)]
pub struct CombinedRules {
    /// Free-text (Markdown) analysis from the model
    pub analysis: String,
    /// Suggested output format tag, `mdc` or `md`
    pub format: String,
    pub rules: Vec<GeneratedRule>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedRule {
    pub name: String,
    pub metadata: Metadata,
    pub body: String,
}

#[derive(Deserialize)]
struct RawCombined {
    #[serde(default)]
    analysis: String,
    #[serde(default)]
    format: String,
    rules: Vec<RawRule>,
}

#[derive(Deserialize)]
struct RawRule {
    #[serde(default)]
    name: String,
    #[serde(default)]
    metadata: serde_json::Map<String, Value>,
    #[serde(default)]
    body: String,
}

fn stringify(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        Value::Array(items) => items
            .into_iter()
            .map(stringify)
            .collect::<Vec<_>>()
            .join(","),
        other => other.to_string(),
    }
}

impl From<RawCombined> for CombinedRules {
    fn from(raw: RawCombined) -> Self {
        let rules = raw
            .rules
            .into_iter()
            .map(|rule| GeneratedRule {
                name: rule.name,
                metadata: rule
                    .metadata
                    .into_iter()
                    .map(|(k, v)| (k, stringify(v)))
                    .collect(),
                body: rule.body,
            })
            .collect();
        CombinedRules {
            analysis: raw.analysis,
            format: raw.format,
            rules,
        }
    }
}

fn fenced_block(text: &str) -> Option<&str> {
    let start = text.find("```")?;
    let after_fence = &text[start + 3..];
    // Skip the info string (`json`, `JSON`, nothing...)
    let body_start = after_fence.find('\n')? + 1;
    let body = &after_fence[body_start..];
    let end = body.find("```")?;
    Some(&body[..end])
}

fn brace_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// Parse the model's reply into the combined-rules structure.
pub fn parse_combined(text: &str) -> Result<CombinedRules> {
    let candidates = [Some(text.trim()), fenced_block(text), brace_span(text)];

    let mut last_error = None;
    for candidate in candidates.into_iter().flatten() {
        match serde_json::from_str::<RawCombined>(candidate.trim()) {
            Ok(raw) => return Ok(raw.into()),
            Err(e) => last_error = Some(e),
        }
    }

    Err(RulefuseError::ResponseFormat(match last_error {
        Some(e) => format!("no JSON object with a `rules` array found ({e})"),
        None => "empty response".to_string(),
    }))
}

use std::fmt::Write as _;

use crate::types::RuleRecord;

const INSTRUCTIONS: &str = "\
You are consolidating AI coding-assistant rule files. Two sibling formats exist:
- `.mdc` (Cursor): metadata keys `description`, `globs`, `alwaysApply`.
- `.md` (Windsurf): metadata keys `trigger` (always_on | manual | model_decision | glob), `description`, `globs`.

Merge the rules below into the smallest set that keeps every distinct instruction.
Remove duplicates, resolve conflicting triggers for the same globs, and keep each
rule focused on one topic.

Respond with a single JSON object and nothing else:
{
  \"analysis\": \"<markdown summary of what was merged, dropped or resolved>\",
  \"format\": \"mdc\" or \"md\",
  \"rules\": [
    { \"name\": \"<short-kebab-name>\", \"metadata\": { \"<key>\": \"<value>\" }, \"body\": \"<rule text>\" }
  ]
}";

/// Build the single prompt sent to the remote model.
pub fn build_prompt(records: &[RuleRecord]) -> String {
    let mut prompt = String::from(INSTRUCTIONS);
    let _ = write!(prompt, "\n\nThere are {} input rules.\n", records.len());

    for (idx, record) in records.iter().enumerate() {
        let _ = write!(
            prompt,
            "\n=== Rule {} ({}, format: {}) ===\n",
            idx + 1,
            record.source_path,
            record.format
        );
        if record.metadata.is_empty() {
            prompt.push_str("Metadata: (none)\n");
        } else {
            prompt.push_str("Metadata:\n");
            for (key, value) in &record.metadata {
                let _ = writeln!(prompt, "  {key}: {value}");
            }
        }
        let _ = writeln!(prompt, "Content:\n{}", record.body);
    }

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FormatVariant, Metadata};

    #[test]
    fn prompt_contains_every_rule() {
        let mut meta = Metadata::new();
        meta.insert("description".into(), "Formatting".into());
        meta.insert("globs".into(), "*.ts".into());
        let records = vec![
            RuleRecord::new(".cursor/rules/fmt.mdc", meta, "Use prettier.", FormatVariant::Mdc),
            RuleRecord::new("style.md", Metadata::new(), "Tabs.", FormatVariant::Md),
        ];

        let prompt = build_prompt(&records);
        assert!(prompt.contains("There are 2 input rules."));
        assert!(prompt.contains("=== Rule 1 (.cursor/rules/fmt.mdc, format: mdc) ==="));
        assert!(prompt.contains("  description: Formatting\n  globs: *.ts\n"));
        assert!(prompt.contains("Content:\nUse prettier."));
        assert!(prompt.contains("=== Rule 2 (style.md, format: md) ===\nMetadata: (none)"));
        assert!(prompt.contains("\"rules\""));
    }
}

//! Remote combination of rule sets.
//!
//! One prompt, one request, one response. No retry and no partial results:
//! any failure here ends the run before the writer is reached.

pub mod client;
pub mod prompt;
pub mod response;

use std::time::Instant;

use crate::config::RulefuseConfig;
use crate::error::Result;
use crate::progress::{Spinner, format_duration};
use crate::types::RuleRecord;

pub use client::RemoteClient;
pub use prompt::build_prompt;
pub use response::{CombinedRules, GeneratedRule, parse_combined};

/// Ask the configured model to merge `records`.
///
/// The credential is checked before anything else, so a missing key never
/// reaches the network.
pub async fn combine(records: &[RuleRecord], config: &RulefuseConfig) -> Result<CombinedRules> {
    config.require_api_key()?;
    let client = RemoteClient::new(&config.api)?;
    combine_with(&client, records).await
}

pub(crate) async fn combine_with(
    client: &RemoteClient,
    records: &[RuleRecord],
) -> Result<CombinedRules> {
    let prompt = build_prompt(records);

    let spinner = Spinner::new(&format!(
        "Combining {} rules with {}...",
        records.len(),
        client.model()
    ));
    let started = Instant::now();

    let reply = match client.complete(&prompt).await {
        Ok(reply) => reply,
        Err(e) => {
            spinner.finish_error("Remote call failed");
            return Err(e);
        }
    };
    let combined = match parse_combined(&reply) {
        Ok(combined) => combined,
        Err(e) => {
            spinner.finish_error("Could not read the model response");
            tracing::debug!(reply = %reply, "unparsable model reply");
            return Err(e);
        }
    };

    spinner.finish_success(&format!(
        "Model returned {} rules in {}",
        combined.rules.len(),
        format_duration(started.elapsed())
    ));
    Ok(combined)
}

#[cfg(test)]
mod tests {
    use super::client::test_support::{chat_body, local_client, serve_once};
    use super::*;
    use crate::error::RulefuseError;
    use crate::types::{FormatVariant, Metadata};

    fn records() -> Vec<RuleRecord> {
        let mut meta = Metadata::new();
        meta.insert("description".into(), "Code formatting".into());
        vec![
            RuleRecord::new(".cursor/rules/fmt.mdc", meta, "Use prettier", FormatVariant::Mdc),
            RuleRecord::new(
                ".windsurf/rules/fmt.md",
                Metadata::new(),
                "Use prettier everywhere",
                FormatVariant::Md,
            ),
        ]
    }

    #[tokio::test]
    async fn fenced_reply_becomes_combined_rules() {
        let reply = "Here you go:\n```json\n{\"analysis\": \"Two formatting rules merged.\", \
                     \"format\": \"mdc\", \"rules\": [{\"name\": \"formatting\", \
                     \"metadata\": {\"alwaysApply\": true}, \"body\": \"Use prettier.\"}]}\n```";
        let (endpoint, server) = serve_once("200 OK", chat_body(reply)).await;

        let combined = combine_with(&local_client(endpoint), &records())
            .await
            .expect("combine");
        assert_eq!(combined.analysis, "Two formatting rules merged.");
        assert_eq!(combined.format, "mdc");
        assert_eq!(combined.rules.len(), 1);
        assert_eq!(combined.rules[0].name, "formatting");
        assert_eq!(
            combined.rules[0].metadata.get("alwaysApply").map(String::as_str),
            Some("true")
        );

        let request = server.await.expect("server");
        assert!(request.contains(".cursor/rules/fmt.mdc"));
        assert!(request.contains(".windsurf/rules/fmt.md"));
    }

    #[tokio::test]
    async fn prose_reply_is_format_error() {
        let (endpoint, server) = serve_once("200 OK", chat_body("I cannot merge these.")).await;
        let err = combine_with(&local_client(endpoint), &records())
            .await
            .expect_err("no JSON");
        assert!(matches!(err, RulefuseError::ResponseFormat(_)));
        server.await.expect("server");
    }

    #[tokio::test]
    async fn missing_key_fails_before_network() {
        let mut config = RulefuseConfig::default();
        // Unroutable endpoint: reaching it would hang or fail differently.
        config.api.endpoint = "http://192.0.2.1:9/v1/chat/completions".into();
        let err = combine(&[], &config).await.expect_err("no key");
        assert!(matches!(err, RulefuseError::Configuration(_)));
    }
}

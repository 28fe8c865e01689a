//! Top-level run loop: load rules, then either analyze locally or combine
//! remotely and write the result.

use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::analyzer::analyze;
use crate::cli::args::Cli;
use crate::colors::Painter;
use crate::combiner::{build_prompt, combine};
use crate::config::RulefuseConfig;
use crate::fs_utils::{DiscoveryOptions, display_path};
use crate::parser::load_rules;
use crate::progress::{self, format_count};
use crate::report::{render_json, render_markdown, render_text};
use crate::types::RuleRecord;
use crate::writer::write_combined;

/// Install the stderr tracing subscriber. `RUST_LOG` overrides `level`.
pub fn init_tracing(level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// Build the run configuration: file, then environment, then CLI flags.
pub fn resolve_config(cli: &Cli) -> Result<RulefuseConfig> {
    let mut config = match &cli.config {
        Some(path) => RulefuseConfig::load_explicit(path)?,
        None => RulefuseConfig::load(&cli.root),
    };
    config.apply_env();

    if let Some(model) = &cli.model {
        config.api.model = model.clone();
    }
    if let Some(endpoint) = &cli.endpoint {
        config.api.endpoint = endpoint.clone();
    }
    if let Some(output) = &cli.output {
        config.output.dir = output.clone();
    }
    tracing::debug!(?config, "configuration resolved");
    Ok(config)
}

fn absolute(cwd: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

fn discovery_options(cli: &Cli, config: &RulefuseConfig) -> Result<DiscoveryOptions> {
    let cwd = std::env::current_dir().context("Cannot determine current directory")?;

    let mut ignore_paths: Vec<PathBuf> = cli.ignore.iter().map(|p| absolute(&cwd, p)).collect();
    // Generated rules from an earlier run must not feed back into this one,
    // unless the output directory encloses the scan root itself.
    let output_dir = absolute(&cwd, &config.output.dir);
    if !absolute(&cwd, &cli.root).starts_with(&output_dir) {
        ignore_paths.push(output_dir);
    }

    Ok(DiscoveryOptions {
        ignore_paths,
        include_readme: cli.include_readme,
    })
}

fn run_dry(cli: &Cli, records: &[RuleRecord]) -> Result<()> {
    let report = analyze(records);

    if cli.json {
        println!("{}", render_json(&report)?);
    } else {
        print!("{}", render_text(&report, &Painter::new(cli.color.into())));
    }

    if let Some(path) = &cli.report {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        std::fs::write(path, render_markdown(&report))
            .with_context(|| format!("Failed to write report {}", path.display()))?;
        if !cli.json {
            progress::success(&format!("Report saved to {}", path.display()));
        }
    }
    Ok(())
}

async fn run_combine(records: &[RuleRecord], config: &RulefuseConfig) -> Result<()> {
    let combined = combine(records, config).await?;
    let written = write_combined(&combined, &config.output.dir)?;

    let out_dir = &config.output.dir;
    progress::success(&format!(
        "Wrote {} and {} to {}",
        display_path(out_dir, &written.analysis),
        format_count(written.rules.len(), "rule file", "rule files"),
        out_dir.display()
    ));
    for path in &written.rules {
        println!("  {}", display_path(out_dir, path));
    }
    Ok(())
}

/// Run one invocation. Errors bubble up to `main`, which sets the exit code.
pub async fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(&cli)?;
    let options = discovery_options(&cli, &config)?;
    let records = load_rules(&cli.root, &options)?;

    if records.is_empty() {
        progress::info(&format!(
            "No .mdc or .md rule files found under {}",
            cli.root.display()
        ));
        // A dry run still renders the (empty) report.
        if !cli.dry_run {
            return Ok(());
        }
    }

    if cli.print_prompt {
        print!("{}", build_prompt(&records));
        return Ok(());
    }

    if cli.dry_run {
        return run_dry(&cli, &records);
    }

    run_combine(&records, &config).await
}

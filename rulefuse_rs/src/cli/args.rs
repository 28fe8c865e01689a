use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::types::ColorMode;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorArg {
    Auto,
    Always,
    Never,
}

impl From<ColorArg> for ColorMode {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => ColorMode::Auto,
            ColorArg::Always => ColorMode::Always,
            ColorArg::Never => ColorMode::Never,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "rulefuse")]
#[command(version)]
#[command(
    about = "Find duplicate and conflicting AI editor rules (.mdc / .md) and merge them with an LLM",
    long_about = None,
    after_help = "Examples:\n  \
        rulefuse --dry-run                 Analyze rules under the current directory\n  \
        rulefuse .cursor/rules --dry-run --json\n  \
        rulefuse --print-prompt | less     Inspect what would be sent\n  \
        RULEFUSE_API_KEY=sk-... rulefuse -o merged-rules"
)]
pub struct Cli {
    /// Directory to scan for rule files
    #[arg(default_value = ".")]
    pub root: PathBuf,

    /// Analyze locally only: no API key needed, no rule files written
    #[arg(long, short = 'n')]
    pub dry_run: bool,

    /// Print the dry-run report as JSON
    #[arg(long, requires = "dry_run")]
    pub json: bool,

    /// Also save the dry-run report as Markdown to this file
    #[arg(long, value_name = "FILE", requires = "dry_run")]
    pub report: Option<PathBuf>,

    /// Print the prompt that would be sent and exit
    #[arg(long, conflicts_with = "dry_run")]
    pub print_prompt: bool,

    /// Output directory for combined rules
    #[arg(long, short = 'o', value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Config file (TOML); default is <ROOT>/.rulefuse/config.toml
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Model identifier sent to the API
    #[arg(long)]
    pub model: Option<String>,

    /// Chat-completions endpoint URL
    #[arg(long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Ignore a path (repeatable)
    #[arg(long = "ignore", short = 'I', value_name = "PATH")]
    pub ignore: Vec<PathBuf>,

    /// Treat README.md files as rules
    #[arg(long)]
    pub include_readme: bool,

    /// When to color the report
    #[arg(long, value_enum, default_value_t = ColorArg::Auto)]
    pub color: ColorArg,

    /// Log level (trace, debug, info, warn, error); RUST_LOG wins when set
    #[arg(long, default_value = "warn")]
    pub log_level: String,

    /// Shorthand for --log-level debug
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl Cli {
    pub fn effective_log_level(&self) -> &str {
        if self.verbose {
            "debug"
        } else {
            &self.log_level
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["rulefuse"]).expect("parse");
        assert_eq!(cli.root, PathBuf::from("."));
        assert!(!cli.dry_run);
        assert_eq!(cli.color, ColorArg::Auto);
        assert_eq!(cli.effective_log_level(), "warn");
    }

    #[test]
    fn dry_run_flags() {
        let cli = Cli::try_parse_from([
            "rulefuse",
            "rules",
            "--dry-run",
            "--json",
            "-I",
            "old",
            "-I",
            "tmp",
            "-v",
        ])
        .expect("parse");
        assert_eq!(cli.root, PathBuf::from("rules"));
        assert!(cli.dry_run && cli.json);
        assert_eq!(cli.ignore, vec![PathBuf::from("old"), PathBuf::from("tmp")]);
        assert_eq!(cli.effective_log_level(), "debug");
    }

    #[test]
    fn json_requires_dry_run() {
        assert!(Cli::try_parse_from(["rulefuse", "--json"]).is_err());
        assert!(Cli::try_parse_from(["rulefuse", "--print-prompt", "--dry-run"]).is_err());
    }
}

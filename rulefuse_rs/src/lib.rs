//! # rulefuse
//!
//! Audit and merge AI editor rule files. Two sibling formats are read:
//! Cursor-style `.mdc` and Windsurf-style `.md`, both with a `---` delimited
//! `key: value` header followed by free text.
//!
//! Two modes:
//!
//! - **Dry run** - purely local analysis: counts per format and trigger,
//!   duplicate candidates (same description, or >80% word overlap) and
//!   conflict candidates (same globs, different trigger).
//! - **Combine** - one request to an OpenAI-compatible chat endpoint asking
//!   for a merged rule set, written to an output directory.
//!
//! ## Library usage
//!
//! ```rust,no_run
//! use rulefuse::{analyzer, fs_utils::DiscoveryOptions, parser};
//! use std::path::Path;
//!
//! let records = parser::load_rules(Path::new("."), &DiscoveryOptions::default()).unwrap();
//! let report = analyzer::analyze(&records);
//! println!("{} duplicates, {} conflicts", report.duplicates.len(), report.conflicts.len());
//! ```

/// Local duplicate / conflict analysis. Pure and configuration-free.
pub mod analyzer;

pub mod cli;

/// Terminal colors for the text report.
pub mod colors;

/// Prompt building, the chat-completions client and response extraction.
pub mod combiner;

/// Layered configuration (file, environment, flags).
pub mod config;

pub mod error;

/// Rule file discovery.
pub mod fs_utils;

/// `---` header parsing and rule loading.
pub mod parser;

pub mod progress;

/// Text, JSON and Markdown renderings of an analysis report.
pub mod report;

/// Word-set Jaccard similarity.
pub mod similarity;

pub mod types;

/// Persisting combined rules.
pub mod writer;

pub use analyzer::analyze;
pub use error::RulefuseError;
pub use types::{
    AnalysisReport, ConflictCandidate, DuplicateCandidate, DuplicateReason, FormatVariant,
    RuleRecord,
};

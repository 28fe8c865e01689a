//! Fatal error kinds for a combine run.
//!
//! Parse problems are not here: they are warnings and never abort a run
//! (see [`crate::parser::ParseWarning`]). The local analyzer has no error
//! type at all.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum RulefuseError {
    /// Missing credential or unusable config; raised before any network call
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Transport failure or non-success HTTP status
    #[error("remote call failed: {0}")]
    RemoteCall(String),

    /// Response could not be turned into the combined-rules structure
    #[error("unexpected response format: {0}")]
    ResponseFormat(String),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl RulefuseError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        RulefuseError::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<reqwest::Error> for RulefuseError {
    fn from(e: reqwest::Error) -> Self {
        RulefuseError::RemoteCall(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RulefuseError>;

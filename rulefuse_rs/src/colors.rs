//! Terminal color helpers for the text report.

use std::io::IsTerminal;

use console::Style;

use crate::types::ColorMode;

/// Determines if colors should be used based on ColorMode and terminal detection.
pub fn is_enabled(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => std::io::stdout().is_terminal(),
    }
}

/// Colorizer that can be passed around to format functions.
#[derive(Clone, Copy)]
pub struct Painter {
    enabled: bool,
}

impl Painter {
    pub fn new(mode: ColorMode) -> Self {
        Self {
            enabled: is_enabled(mode),
        }
    }

    pub fn plain() -> Self {
        Self { enabled: false }
    }

    /// Conflicts - RED
    pub fn error(&self, s: &str) -> String {
        self.wrap(s, Style::new().red())
    }

    /// Duplicates - YELLOW
    pub fn warn(&self, s: &str) -> String {
        self.wrap(s, Style::new().yellow())
    }

    pub fn ok(&self, s: &str) -> String {
        self.wrap(s, Style::new().green())
    }

    /// File paths - CYAN
    pub fn path(&self, s: &str) -> String {
        self.wrap(s, Style::new().cyan())
    }

    pub fn header(&self, s: &str) -> String {
        self.wrap(s, Style::new().bold())
    }

    pub fn dim(&self, s: &str) -> String {
        self.wrap(s, Style::new().dim())
    }

    pub fn number(&self, n: impl std::fmt::Display) -> String {
        self.wrap(&n.to_string(), Style::new().cyan().bright())
    }

    fn wrap(&self, s: &str, styled: Style) -> String {
        if self.enabled {
            styled.force_styling(true).apply_to(s).to_string()
        } else {
            s.to_string()
        }
    }
}

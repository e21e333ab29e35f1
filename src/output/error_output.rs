//! Colored error and warning blocks on stderr.
//!
//! Format: `✖ {type}: {message}` / `  × {detail}` / `  help: {suggestion}`

use std::io::{IsTerminal, Write};

use super::{ColorMode, ansi};
use crate::error::RepoGuardError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Severity {
    Error,
    Warning,
}

/// Error output formatter with color support.
pub struct ErrorOutput {
    use_colors: bool,
}

impl ErrorOutput {
    #[must_use]
    pub fn new(mode: ColorMode) -> Self {
        let use_colors = match mode {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => Self::stderr_supports_color(),
        };
        Self { use_colors }
    }

    /// Auto-detects color support on stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self::new(ColorMode::Auto)
    }

    /// Creates an error output formatter with explicit color control.
    #[must_use]
    pub const fn with_colors(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn stderr_supports_color() -> bool {
        // https://no-color.org: presence of the variable disables color
        std::env::var_os("NO_COLOR").is_none() && std::io::stderr().is_terminal()
    }

    /// Print a crate error with its category, cause and hint.
    pub fn print(&self, err: &RepoGuardError) {
        let mut stderr = std::io::stderr().lock();
        self.write(&mut stderr, err);
    }

    pub fn print_warning(&self, message: &str) {
        let mut stderr = std::io::stderr().lock();
        self.write_warning(&mut stderr, message, None, None);
    }

    pub fn write<W: Write>(&self, w: &mut W, err: &RepoGuardError) {
        self.write_error(
            w,
            err.error_type(),
            &err.message(),
            err.detail().as_deref(),
            err.suggestion(),
        );
    }

    pub fn write_error<W: Write>(
        &self,
        w: &mut W,
        error_type: &str,
        message: &str,
        detail: Option<&str>,
        suggestion: Option<&str>,
    ) {
        self.write_block(w, Severity::Error, error_type, message, detail, suggestion);
    }

    pub fn write_warning<W: Write>(
        &self,
        w: &mut W,
        message: &str,
        detail: Option<&str>,
        suggestion: Option<&str>,
    ) {
        self.write_block(w, Severity::Warning, "Warning", message, detail, suggestion);
    }

    fn write_block<W: Write>(
        &self,
        w: &mut W,
        severity: Severity,
        label: &str,
        message: &str,
        detail: Option<&str>,
        suggestion: Option<&str>,
    ) {
        // Write failures on stderr are ignored; there is nowhere left to report them.
        let (icon, color) = match severity {
            Severity::Error => ("✖", ansi::RED),
            Severity::Warning => ("⚠", ansi::YELLOW),
        };
        if self.use_colors {
            let _ = writeln!(w, "{}{color}{icon} {label}:{} {message}", ansi::BOLD, ansi::RESET);
        } else {
            let _ = writeln!(w, "{icon} {label}: {message}");
        }

        if let Some(d) = detail {
            if self.use_colors {
                let _ = writeln!(w, "  {}× {d}{}", ansi::DIM, ansi::RESET);
            } else {
                let _ = writeln!(w, "  × {d}");
            }
        }

        if let Some(s) = suggestion {
            if self.use_colors {
                let _ = writeln!(w, "  {}help:{} {s}", ansi::CYAN, ansi::RESET);
            } else {
                let _ = writeln!(w, "  help: {s}");
            }
        }
    }
}

impl Default for ErrorOutput {
    fn default() -> Self {
        Self::stderr()
    }
}

#[cfg(test)]
#[path = "error_output_tests.rs"]
mod tests;

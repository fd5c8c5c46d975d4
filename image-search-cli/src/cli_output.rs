// ABOUTME: Centralized CLI output utilities for consistent user-facing messages
// ABOUTME: Delivers controller notices to stderr as errors, warnings or success lines

use image_search_sdk::{Notice, NoticeKind, Notifier};
use owo_colors::OwoColorize;
use std::io::IsTerminal;

/// Centralized CLI output utilities for consistent formatting
pub struct CliOutput {
    use_color: bool,
}

impl CliOutput {
    /// Create new CLI output utility with TTY detection
    pub fn new() -> Self {
        Self {
            use_color: std::io::stderr().is_terminal(),
        }
    }

    /// Create CLI output utility with explicit color setting
    pub fn with_color(use_color: bool) -> Self {
        Self { use_color }
    }

    pub fn use_color(&self) -> bool {
        self.use_color
    }

    pub fn error(&self, message: &str) {
        eprintln!("{}", self.line("error:", message, Tone::Error));
    }

    pub fn warning(&self, message: &str) {
        eprintln!("{}", self.line("warning:", message, Tone::Warning));
    }

    pub fn info(&self, message: &str) {
        eprintln!("{}", self.line("info:", message, Tone::Info));
    }

    pub fn success(&self, message: &str) {
        eprintln!("{}", self.line("success:", message, Tone::Success));
    }

    /// Show a follow-up hint under an error or warning
    pub fn hint(&self, message: &str) {
        if self.use_color {
            eprintln!("  {}", message.dimmed());
        } else {
            eprintln!("  {}", message);
        }
    }

    fn line(&self, label: &str, message: &str, tone: Tone) -> String {
        if !self.use_color {
            return format!("{} {}", label, message);
        }
        let label = match tone {
            Tone::Error => label.red().bold().to_string(),
            Tone::Warning => label.yellow().bold().to_string(),
            Tone::Info => label.blue().bold().to_string(),
            Tone::Success => label.green().bold().to_string(),
        };
        format!("{} {}", label, message)
    }
}

#[derive(Clone, Copy)]
enum Tone {
    Error,
    Warning,
    Info,
    Success,
}

impl Default for CliOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for CliOutput {
    fn notify(&self, notice: &Notice) {
        match notice.kind {
            NoticeKind::Success => self.success(&notice.message),
            NoticeKind::Validation => self.warning(&notice.message),
            NoticeKind::Failure => self.error(&notice.message),
        }
    }
}

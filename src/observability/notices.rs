//! Operator-facing notices.
//!
//! Warnings and terminal errors meant for the person running the miner are
//! printed on stdout verbatim, separate from the diagnostic log stream. Every
//! notice is also kept in order so callers can inspect what was emitted.

use std::io::Write;

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Warning,
    Error,
}

/// A single emitted notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// Ordered sink of notices.
#[derive(Debug, Default)]
pub struct Notices {
    entries: Vec<Notice>,
    echo: bool,
}

impl Notices {
    /// Sink that prints each notice to stdout as it is emitted.
    pub fn stdout() -> Self {
        Self {
            entries: Vec::new(),
            echo: true,
        }
    }

    /// Sink that only records notices.
    pub fn captured() -> Self {
        Self::default()
    }

    /// Emit a notice.
    pub fn emit(&mut self, level: NoticeLevel, message: impl Into<String>) {
        let message = message.into();
        if self.echo {
            let mut out = std::io::stdout().lock();
            // Nothing sensible to do if stdout is gone.
            let _ = writeln!(out, "{}", message);
            let _ = out.flush();
        }
        self.entries.push(Notice { level, message });
    }

    /// Emit a warning notice.
    pub fn warn(&mut self, message: impl Into<String>) {
        self.emit(NoticeLevel::Warning, message);
    }

    /// Emit an error notice.
    pub fn error(&mut self, message: impl Into<String>) {
        self.emit(NoticeLevel::Error, message);
    }

    /// All notices in emission order.
    pub fn entries(&self) -> &[Notice] {
        &self.entries
    }

    /// Messages of warning notices, in order.
    pub fn warnings(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|n| n.level == NoticeLevel::Warning)
            .map(|n| n.message.as_str())
    }
}

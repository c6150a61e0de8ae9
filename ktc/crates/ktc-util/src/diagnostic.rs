//! Structured diagnostics.
//!
//! This grammar has no error-recovery mode, so a [`Handler`] never
//! accumulates more than the single diagnostic a failed parse produces;
//! the builder exists so that diagnostic, and the messages the lexer and
//! parser test suites assert against, are built the same fluent way as
//! every other diagnostic in this lineage.

use std::fmt;

use crate::Position;

/// Diagnostic severity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Level {
    Error,
    Warning,
    Note,
    Help,
}

impl Level {
    pub fn is_error(self) -> bool {
        matches!(self, Level::Error)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Level::Error => "error",
            Level::Warning => "warning",
            Level::Note => "note",
            Level::Help => "help",
        };
        f.write_str(s)
    }
}

/// A single diagnostic: a severity, a message, the position it is anchored
/// to, and an optional help note.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub level: Level,
    pub message: String,
    pub position: Position,
    pub help: Option<String>,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} at {}", self.level, self.message, self.position)?;
        if let Some(help) = &self.help {
            write!(f, "\nhelp: {help}")?;
        }
        Ok(())
    }
}

/// Fluent construction of a [`Diagnostic`].
pub struct DiagnosticBuilder {
    level: Level,
    message: String,
    position: Position,
    help: Option<String>,
}

impl DiagnosticBuilder {
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            position: Position::START,
            help: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Level::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Level::Warning, message)
    }

    pub fn position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn build(self) -> Diagnostic {
        Diagnostic {
            level: self.level,
            message: self.message,
            position: self.position,
            help: self.help,
        }
    }

    /// Builds the diagnostic and files it with `handler`.
    pub fn emit(self, handler: &mut Handler) {
        handler.emit(self.build());
    }
}

/// Collects diagnostics filed during lexing or parsing.
///
/// Because this grammar aborts on the first failure, a handler in normal
/// use holds at most one diagnostic; it still supports accumulation so a
/// caller that wants to gather warnings (e.g. from a permissive query
/// routine) can do so.
#[derive(Debug, Default)]
pub struct Handler {
    diagnostics: Vec<Diagnostic>,
}

impl Handler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn error(&mut self, message: impl Into<String>, position: Position) {
        self.emit(DiagnosticBuilder::error(message).position(position).build());
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.level.is_error())
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn take(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_produces_message_with_position() {
        let diag = DiagnosticBuilder::error("unexpected token")
            .position(Position::new(3, 5))
            .build();
        assert_eq!(diag.level, Level::Error);
        assert!(diag.to_string().contains("line 3 column 5"));
    }

    #[test]
    fn handler_tracks_errors() {
        let mut handler = Handler::new();
        assert!(!handler.has_errors());
        handler.error("bad", Position::START);
        assert!(handler.has_errors());
        assert_eq!(handler.diagnostics().len(), 1);
    }
}

//! Shared infrastructure for the `ktc` Kotlin lexer and parser: source
//! positions, the error taxonomy, and structured diagnostics. Everything
//! here is phase-agnostic; `ktc-lex` and `ktc-par` both depend on it and
//! neither depends on the other's internals.

mod diagnostic;
mod error;
mod position;

pub use diagnostic::{Diagnostic, DiagnosticBuilder, Handler, Level};
pub use error::{Error, LexError, LexErrorKind, LexResult, ParseError, ParseResult};
pub use position::{LineIndex, Position};

pub use rustc_hash::{FxHashMap, FxHashSet};

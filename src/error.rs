//! Diagnostic error types for brickgraph.
//!
//! Each subsystem defines its own error type with miette `#[diagnostic]`
//! derives, providing error codes and help text, and a transparent top-level
//! enum preserves the full diagnostic chain through to the caller.

use miette::Diagnostic;
use thiserror::Error;

use crate::algebra::SetKind;

/// Top-level error type for the brickgraph engine.
#[derive(Debug, Error, Diagnostic)]
pub enum BrickError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Index(#[from] IndexError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Algebra(#[from] AlgebraError),
}

// ---------------------------------------------------------------------------
// Source errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum SourceError {
    #[error("triple source unavailable: {source_id}: {message}")]
    #[diagnostic(
        code(brick::source::unavailable),
        help(
            "The ontology could not be opened or parsed. Check that the \
             Turtle file exists, is readable, and is valid Turtle. This \
             error is fatal and is never retried internally."
        )
    )]
    Unavailable { source_id: String, message: String },
}

// ---------------------------------------------------------------------------
// Index errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum IndexError {
    #[error("unknown {registry}: \"{name}\"")]
    #[diagnostic(
        code(brick::index::unknown_type),
        help(
            "The name is not in the configured registry. See \
             `vocab::SUBSYSTEM_TYPES` and `vocab::FUNCTION_TAGS` for the \
             recognized subsystem types and functionality tags."
        )
    )]
    UnknownType {
        name: String,
        registry: &'static str,
    },
}

// ---------------------------------------------------------------------------
// Algebra errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum AlgebraError {
    #[error("{op}: incompatible operand kinds {left} and {right}")]
    #[diagnostic(
        code(brick::algebra::kind_mismatch),
        help(
            "`union` needs two operands of the same kind, `restrict` exactly \
             one SYSTEM and one FUNCTION operand, and `join` two SYSTEM \
             operands."
        )
    )]
    KindMismatch {
        op: &'static str,
        left: SetKind,
        right: SetKind,
    },
}

/// Convenience alias for functions returning brickgraph results.
pub type BrickResult<T> = std::result::Result<T, BrickError>;

//! Error types for parsing and running a schedule.
//!
//! This module defines the two layers of failure the crate can report:
//! 1. **`ParseError`:** malformed input — a bad header or a bad instruction
//!    line — each carrying enough context for an actionable diagnostic.
//! 2. **`SimError`:** the top-level error the CLI matches on, composing
//!    `ParseError` with I/O failures from reading the input or writing the
//!    output file.

use thiserror::Error;

/// A problem with the contents of the input file.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The input file had no header line at all.
    #[error("input file is empty, expected a header line \"P,W\"")]
    MissingHeader,

    /// The header line could not be split into exactly two integers.
    #[error("invalid header line {line:?}, expected \"P,W\"")]
    InvalidHeader {
        /// The offending line, verbatim.
        line: String,
    },

    /// The header's physical register count is below the architectural
    /// register count, leaving no room for the initial mapping.
    #[error("header specifies {got} physical registers, need at least {minimum}")]
    InsufficientPhysRegs {
        /// The value the header supplied.
        got: u32,
        /// The minimum the scheduler requires.
        minimum: u32,
    },

    /// An instruction line did not have exactly four comma-separated fields.
    #[error("{line_no}: invalid instruction line {text:?}, expected \"K,a,b,c\"")]
    InvalidInstructionLine {
        /// 1-indexed line number within the file.
        line_no: usize,
        /// The offending line, verbatim.
        text: String,
    },

    /// An instruction line named a kind other than `R`, `I`, `L`, or `S`.
    #[error("{line_no}: unknown instruction kind {kind:?}, expected one of R, I, L, S")]
    UnknownKind {
        /// 1-indexed line number within the file.
        line_no: usize,
        /// The offending kind character(s).
        kind: String,
    },

    /// One of an instruction's three operand fields was not a valid integer.
    #[error("{line_no}: invalid operand field {text:?}")]
    InvalidOperand {
        /// 1-indexed line number within the file.
        line_no: usize,
        /// The offending field text.
        text: String,
    },
}

/// Top-level error returned by [`crate::sim::run`].
#[derive(Debug, Error)]
pub enum SimError {
    /// The input file's contents were malformed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Reading the input file or writing the output file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

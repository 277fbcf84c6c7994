//! Errors that abort an assembly run.
//!
//! Every variant carries the 1-based source line it was detected on.
use thiserror::Error;

#[derive(Error, Clone, PartialEq, Eq, Debug)]
pub enum AsmError {
    #[error("label `{label}` has multiple definitions (line {line})")]
    DuplicateLabel { label: String, line: usize },

    #[error("unknown operation `{mnemonic}` in line {line}")]
    UnknownOperation { mnemonic: String, line: usize },

    #[error("missing operand/s in {mnemonic}, line {line}: expected {expected}, found {found}")]
    MissingOperand {
        mnemonic: String,
        expected: usize,
        found: usize,
        line: usize,
    },

    #[error("`{token}` is not a valid decimal literal (line {line})")]
    InvalidLiteral { token: String, line: usize },

    #[error("{field} value {value} does not fit in {width} bits (line {line})")]
    FieldOverflow {
        field: char,
        value: u64,
        width: usize,
        line: usize,
    },
}

impl AsmError {
    /// The source line the error refers to.
    pub fn line(&self) -> usize {
        use AsmError::*;
        match self {
            DuplicateLabel { line, .. }
            | UnknownOperation { line, .. }
            | MissingOperand { line, .. }
            | InvalidLiteral { line, .. }
            | FieldOverflow { line, .. } => *line,
        }
    }
}

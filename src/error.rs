//! Errors raised while running a script.
//!
//! Every variant is fatal: the execution loop stops at the first one, releases
//! the chain and hands the error back to the caller. The `Display` output of
//! each variant is the exact diagnostic line written to stderr.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Result alias used throughout the interpreter.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading or executing a script.
#[derive(Debug, Error)]
pub enum Error {
    /// Node storage could not be grown.
    #[error("Error: malloc failed")]
    Allocation,

    /// `push` without an operand, or with an operand that is not an integer.
    #[error("L{line}: usage: push integer")]
    InvalidOperand { line: usize },

    /// The opcode needs more nodes than the chain holds.
    #[error("L{line}: {}", underflow_message(.opcode, *.needed))]
    StackUnderflow {
        line: usize,
        opcode: &'static str,
        needed: usize,
    },

    /// `div` or `mod` with a zero head value.
    #[error("L{line}: division by zero")]
    DivisionByZero { line: usize },

    /// `pchar` on a value that is not an ASCII code.
    #[error("L{line}: can't pchar, value out of range")]
    InvalidCharacterCode { line: usize, value: i32 },

    /// The first token of the line names no handler.
    #[error("L{line}: unknown instruction {opcode}")]
    UnknownOpcode { line: usize, opcode: String },

    /// The script file could not be opened.
    #[error("Error: Can't open file {}", .path.display())]
    OpenFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Reading the script or writing program output failed.
    #[error("Error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Script line the error was raised on, if it came from an instruction.
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::InvalidOperand { line }
            | Error::StackUnderflow { line, .. }
            | Error::DivisionByZero { line }
            | Error::InvalidCharacterCode { line, .. }
            | Error::UnknownOpcode { line, .. } => Some(*line),
            Error::Allocation | Error::OpenFile { .. } | Error::Io(_) => None,
        }
    }

    /// Process exit status for this error.
    pub fn exit_code(&self) -> i32 {
        1
    }
}

fn underflow_message(opcode: &str, needed: usize) -> String {
    match (opcode, needed) {
        ("pop", _) => "can't pop an empty stack".to_string(),
        (_, 0 | 1) => format!("can't {}, stack empty", opcode),
        _ => format!("can't {}, stack too short", opcode),
    }
}

//! monty is an interpreter for a small stack/queue bytecode language.
//!
//! # Example
//!
//! ```text
//! # build 'Hi' and print it
//! push 33
//! push 0
//! push 105
//! push 72
//! pstr
//!
//! push 10
//! push 3
//! sub
//! pint
//! ```
//!
//! # Instructions
//!
//! | Instruction | Usage          | Brief   |
//! |-------------|----------------|---------|
//! | push        | push _integer_ | Push `integer` at the head. |
//! | pall        | pall           | Print every value, head first, one per line. |
//! | pint        | pint           | Print the head value. |
//! | pop         | pop            | Remove the head (stack mode) or the tail (queue mode). |
//! | swap        | swap           | Swap the two values at the head. |
//! | add         | add            | Pop two values and push `a + b`, where `b` was the head. |
//! | sub         | sub            | Pop two values and push `a - b`. |
//! | mul         | mul            | Pop two values and push `a * b`. |
//! | div         | div            | Pop two values and push `a / b`. Fails when `b` is `0`. |
//! | mod         | mod            | Pop two values and push `a % b`. Fails when `b` is `0`. |
//! | pchar       | pchar          | Print the head value as an ASCII character. |
//! | pstr        | pstr           | Print values as characters until `0`, a non-ASCII value or the end. |
//! | rotl        | rotl           | Move the head to the tail. |
//! | rotr        | rotr           | Move the tail to the head. |
//! | stack       | stack          | Pop from the head from now on (default). |
//! | queue       | queue          | Pop from the tail from now on. |
//! | nop         | nop            | Do nothing. |
//!
//! # Important notes
//!
//! - One instruction per line. Blank lines are ignored.
//! - A line whose first token starts with `#` is a comment.
//! - Opcodes are case-sensitive. Tokens after the operand are ignored.
//! - The first error stops the script. Errors are reported as
//!   `L<line>: <message>`.
//!
//! ```
//! use monty::{Config, Interpreter};
//!
//! let mut vm = Interpreter::new(Config::default());
//! let mut out = Vec::new();
//! let code = vm.run_str("push 1\npush 2\nadd\npint\n", &mut out).unwrap();
//!
//! assert_eq!(code, 0);
//! assert_eq!(out, b"3\n");
//! ```

pub mod chain;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod lexer;
pub mod ops;
pub mod token;
pub mod vm;


pub use chain::{Chain, Mode};
pub use config::Config;
pub use dispatch::DispatchTable;
pub use error::{Error, Result};
pub use ops::{Context, Flow, Handler};
pub use vm::Interpreter;

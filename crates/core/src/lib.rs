//! matcalc-core: line interpreter for a fixed-size matrix calculator.
//!
//! Turns raw input lines into validated invocations over six named matrix
//! slots, rejecting malformed lines with exactly one diagnostic.
//!
//! # Public API
//!
//! - [`Session`] -- the read/echo/validate/dispatch loop
//! - [`parse_line()`] -- validate a single line into an [`Invocation`]
//! - [`dispatch()`] -- execute an invocation against a [`SlotRegistry`]
//! - [`Command`] -- the command registry
//! - [`Diagnostic`], [`LineError`], [`ExecError`] -- per-line, fatal and
//!   execution errors
//! - [`OperationProvider`] -- seam for the matrix kernels

pub mod command;
pub mod dispatch;
pub mod error;
pub mod lexer;
pub mod ops;
pub mod parser;
pub mod session;
pub mod slots;
pub mod source;

// ── Convenience re-exports ───────────────────────────────────────────

pub use command::{Command, CommandDescriptor};
pub use dispatch::{dispatch, Flow};
pub use error::{Diagnostic, ExecError, LineError, Severity};
pub use ops::{Operation, OperationProvider, StandardOps};
pub use parser::{parse_line, Invocation, Parsed};
pub use session::{OutputFormat, Session, SessionConfig, SessionEnd};
pub use slots::{Matrix, SlotId, SlotRegistry, ELEMENT_COUNT, MATRIX_SIZE};
pub use source::{LineSource, ReaderSource, MAX_LINE_SIZE};

use serde::Serialize;

use crate::command::Command;

/// How a diagnostic affects the line that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The line is abandoned; nothing is executed.
    Error,
    /// The command still runs with the data actually read.
    Warning,
}

/// The single diagnostic reported for a rejected or degraded line.
///
/// Messages match the calculator's transcript format exactly; the
/// `Error:`/`Warning:` prefix is added by the session when printing.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Diagnostic {
    #[error("unknown command \"{0}\"")]
    UnknownCommand(String),

    #[error("invalid comma after command, skipping line")]
    CommaAfterCommand,

    #[error("extraneous text at end of command")]
    ExtraneousText,

    #[error("missing comma")]
    MissingComma,

    #[error("too few arguments")]
    TooFewArguments,

    #[error("multiple consecutive commas")]
    ConsecutiveCommas,

    #[error("illegal char \"{0}\" following matrix name")]
    IllegalCharAfterMatrix(char),

    #[error("unknown matrix \"{0}\"")]
    UnknownMatrix(String),

    #[error("matrix name should only contain upper case letters and underscores")]
    InvalidMatrixName,

    #[error("illegal char '{0}'")]
    IllegalChar(char),

    #[error("illegal char '{0}' following scalar")]
    IllegalCharAfterScalar(char),

    #[error("matrix elements should be comma separated, only {read} elements were read")]
    ElementsNotSeparated { read: usize },

    #[error("illegal char '{ch}', only {read} elements read")]
    IllegalCharInElements { ch: char, read: usize },

    #[error("too few elements, only {read} elements read")]
    TooFewElements { read: usize },

    #[error("multiple consecutive commas, only {read} elements read")]
    ElementsConsecutiveCommas { read: usize },
}

impl Diagnostic {
    /// Whether the line is rejected or still executed.
    pub fn severity(&self) -> Severity {
        match self {
            Diagnostic::TooFewElements { .. } | Diagnostic::ElementsConsecutiveCommas { .. } => {
                Severity::Warning
            }
            _ => Severity::Error,
        }
    }

    /// True for a degraded accept.
    pub fn is_warning(&self) -> bool {
        self.severity() == Severity::Warning
    }

    /// Stable machine-readable identifier for the diagnostic kind.
    pub fn code(&self) -> &'static str {
        match self {
            Diagnostic::UnknownCommand(_) => "unknown_command",
            Diagnostic::CommaAfterCommand => "comma_after_command",
            Diagnostic::ExtraneousText => "extraneous_text",
            Diagnostic::MissingComma => "missing_comma",
            Diagnostic::TooFewArguments => "too_few_arguments",
            Diagnostic::ConsecutiveCommas => "consecutive_commas",
            Diagnostic::IllegalCharAfterMatrix(_) => "illegal_char_after_matrix",
            Diagnostic::UnknownMatrix(_) => "unknown_matrix",
            Diagnostic::InvalidMatrixName => "invalid_matrix_name",
            Diagnostic::IllegalChar(_) => "illegal_char",
            Diagnostic::IllegalCharAfterScalar(_) => "illegal_char_after_scalar",
            Diagnostic::ElementsNotSeparated { .. } => "elements_not_separated",
            Diagnostic::IllegalCharInElements { .. } => "illegal_char_in_elements",
            Diagnostic::TooFewElements { .. } => "too_few_elements",
            Diagnostic::ElementsConsecutiveCommas { .. } => "elements_consecutive_commas",
        }
    }

    /// Transcript line, e.g. `Error: missing comma`.
    pub fn render(&self) -> String {
        match self.severity() {
            Severity::Error => format!("Error: {}", self),
            Severity::Warning => format!("Warning: {}", self),
        }
    }

    /// Serialize to a single JSON object. All fields are always present.
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "code":     self.code(),
            "message":  self.to_string(),
            "severity": self.severity(),
        })
    }
}

/// A failure of the line source. Every variant ends the session.
#[derive(Debug, thiserror::Error)]
pub enum LineError {
    /// The line filled the buffer without reaching a terminator.
    #[error("line should be up to {limit} chars, terminating...")]
    TooLong { limit: usize },

    /// Input ended before a line terminator.
    #[error("End of File character detected, terminating...")]
    EndOfInput,

    /// The underlying reader failed.
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

impl LineError {
    /// Stable machine-readable identifier for the failure.
    pub fn code(&self) -> &'static str {
        match self {
            LineError::TooLong { .. } => "line_too_long",
            LineError::EndOfInput => "end_of_input",
            LineError::Io(_) => "io",
        }
    }

    /// Serialize to a single JSON object shaped like a [`Diagnostic`].
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "code":     self.code(),
            "message":  self.to_string(),
            "severity": Severity::Error,
        })
    }
}

/// A failure while executing an accepted line.
#[derive(Debug, thiserror::Error)]
pub enum ExecError {
    /// The invocation lacks a slot its command needs. `parse_line` never
    /// produces such an invocation.
    #[error("{command} invocation is missing its {role} matrix")]
    MissingOperand {
        command: Command,
        role: &'static str,
    },

    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

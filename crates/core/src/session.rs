//! Interpreter loop: prompt, read, echo, validate, dispatch.
//!
//! One line is fully processed before the next is read. Every line is
//! echoed before any diagnostic or result output for it, and each line
//! produces at most one diagnostic.

use std::io::{self, Write};

use crate::dispatch::{dispatch, Flow};
use crate::error::{Diagnostic, ExecError, LineError};
use crate::ops::{OperationProvider, StandardOps};
use crate::parser::parse_line;
use crate::slots::SlotRegistry;
use crate::source::LineSource;

/// Printed before every line is read.
pub const PROMPT: &str = ">>> ";

/// Welcome text printed once at startup unless disabled.
pub const BANNER: &str = "\
This is the simple matrix calculator program.
Please enter your input line by line, each line
must be terminated with a line break. the marker
\">>>\", marks a new line where you can enter your
next input. Each line must start with a command followed
by any number of spaces or tabs, then by the desired parameters
separated by commas (and any number of spaces or tabs).
When you're done, please terminate the program by calling
the \"stop\" command.";

/// How diagnostics are written to the transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// `Error: ...` / `Warning: ...` lines.
    #[default]
    Text,
    /// One JSON object per diagnostic.
    Json,
}

/// Presentation settings for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Print the welcome banner before the first prompt.
    pub banner: bool,
    /// Diagnostic rendering.
    pub format: OutputFormat,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            banner: true,
            format: OutputFormat::Text,
        }
    }
}

/// Why a session ended.
#[derive(Debug)]
pub enum SessionEnd {
    /// The `stop` command was accepted.
    Stopped,
    /// The line source failed; the message has already been printed.
    Fatal(LineError),
}

/// Interpreter state: the slot registry, the operation provider and the
/// output settings. Lives for one run over a line source.
pub struct Session<P = StandardOps> {
    slots: SlotRegistry,
    provider: P,
    config: SessionConfig,
}

impl Session<StandardOps> {
    /// A session using the standard matrix kernels.
    pub fn new(config: SessionConfig) -> Self {
        Session::with_provider(StandardOps, config)
    }
}

impl<P: OperationProvider> Session<P> {
    /// A session computing through `provider`.
    pub fn with_provider(provider: P, config: SessionConfig) -> Self {
        Session {
            slots: SlotRegistry::new(),
            provider,
            config,
        }
    }

    /// Current slot contents.
    pub fn slots(&self) -> &SlotRegistry {
        &self.slots
    }

    /// Run until `stop` or a fatal line-source failure.
    pub fn run(
        &mut self,
        source: &mut dyn LineSource,
        out: &mut dyn Write,
    ) -> Result<SessionEnd, ExecError> {
        if self.config.banner {
            writeln!(out, "{}", BANNER)?;
        }

        loop {
            write!(out, "{}", PROMPT)?;
            out.flush()?;

            let line = match source.next_line() {
                Ok(line) => line,
                Err(failure) => {
                    echo(&failure.partial, out)?;
                    self.report_fatal(&failure.error, out)?;
                    tracing::warn!(error = %failure.error, "input aborted");
                    return Ok(SessionEnd::Fatal(failure.error));
                }
            };

            echo(&line.bytes, out)?;
            if self.process_line(&line.text(), out)? == Flow::Halt {
                out.flush()?;
                return Ok(SessionEnd::Stopped);
            }
        }
    }

    /// Validate and, if accepted, execute one line (without echoing it).
    pub fn process_line(&mut self, line: &str, out: &mut dyn Write) -> Result<Flow, ExecError> {
        let parsed = match parse_line(line, &self.slots) {
            Ok(Some(parsed)) => parsed,
            Ok(None) => return Ok(Flow::Continue),
            Err(diagnostic) => {
                tracing::debug!(code = diagnostic.code(), "line rejected");
                self.report(&diagnostic, out)?;
                return Ok(Flow::Continue);
            }
        };

        if let Some(warning) = &parsed.warning {
            tracing::debug!(code = warning.code(), "line accepted with warning");
            self.report(warning, out)?;
        }
        dispatch(&parsed.invocation, &mut self.slots, &self.provider, out)
    }

    fn report(&self, diagnostic: &Diagnostic, out: &mut dyn Write) -> io::Result<()> {
        match self.config.format {
            OutputFormat::Text => writeln!(out, "{}", diagnostic.render()),
            OutputFormat::Json => writeln!(out, "{}", diagnostic.to_json_value()),
        }
    }

    fn report_fatal(&self, error: &LineError, out: &mut dyn Write) -> io::Result<()> {
        match self.config.format {
            OutputFormat::Text => writeln!(out, "Error: {}", error),
            OutputFormat::Json => writeln!(out, "{}", error.to_json_value()),
        }
    }
}

/// Write a line exactly as it was read, followed by a terminator.
fn echo(bytes: &[u8], out: &mut dyn Write) -> io::Result<()> {
    out.write_all(bytes)?;
    out.write_all(b"\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slots::{Matrix, MATRIX_SIZE};
    use crate::source::{ReaderSource, MAX_LINE_SIZE};

    fn quiet() -> SessionConfig {
        SessionConfig {
            banner: false,
            format: OutputFormat::Text,
        }
    }

    fn transcript(session: &mut Session, input: &str) -> (SessionEnd, String) {
        let mut source = ReaderSource::new(input.as_bytes());
        let mut out = Vec::new();
        let end = session.run(&mut source, &mut out).unwrap();
        (end, String::from_utf8(out).unwrap())
    }

    #[test]
    fn echoes_each_line_before_its_diagnostic() {
        let mut session = Session::new(quiet());
        let (end, out) = transcript(&mut session, "foo MAT_A\nstop\n");
        assert!(matches!(end, SessionEnd::Stopped));
        assert_eq!(
            out,
            ">>> foo MAT_A\nError: unknown command \"foo\"\n>>> stop\n"
        );
    }

    #[test]
    fn stop_ends_the_session_and_later_lines_are_unread() {
        let mut session = Session::new(quiet());
        let (end, out) = transcript(&mut session, "stop\nprint_mat MAT_A\n");
        assert!(matches!(end, SessionEnd::Stopped));
        assert!(!out.contains("print_mat"));
    }

    #[test]
    fn add_mat_scenario() {
        let mut session = Session::new(quiet());
        let input = "read_mat MAT_A, 1,2,3,4,5,6,7,8,9,10,11,12,13,14,15,16\n\
                     read_mat MAT_B, 1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1\n\
                     add_mat MAT_A, MAT_B, MAT_C\n\
                     stop\n";
        let (_, out) = transcript(&mut session, input);
        assert!(!out.contains("Error"), "{}", out);
        let c = session.slots().lookup("MAT_C").unwrap();
        let expected = Matrix::from_fn(|i, j| (i * MATRIX_SIZE + j + 2) as f64);
        assert_eq!(*session.slots().get(c), expected);
    }

    #[test]
    fn rejected_line_leaves_slots_untouched() {
        let mut session = Session::new(quiet());
        let input = "read_mat MAT_A, 5, 5\nadd_mat MAT_A,, MAT_C\nstop\n";
        let (_, out) = transcript(&mut session, input);
        assert!(out.contains("Error: multiple consecutive commas\n"));
        let c = session.slots().lookup("MAT_C").unwrap();
        assert_eq!(*session.slots().get(c), Matrix::zeros());
    }

    #[test]
    fn element_list_error_prevents_execution() {
        let mut session = Session::new(quiet());
        let (_, out) = transcript(&mut session, "read_mat MAT_A, 1 2\nstop\n");
        assert!(out.contains(
            "Error: matrix elements should be comma separated, only 1 elements were read"
        ));
        let a = session.slots().lookup("MAT_A").unwrap();
        assert_eq!(*session.slots().get(a), Matrix::zeros());
    }

    #[test]
    fn short_read_warns_then_executes() {
        let mut session = Session::new(quiet());
        let (_, out) = transcript(
            &mut session,
            "read_mat MAT_A, 1,2,3\nprint_mat MAT_A\nstop\n",
        );
        let warning = out
            .find("Warning: too few elements, only 3 elements read")
            .unwrap();
        let printed = out.find("1.00     \t2.00     \t3.00     \t0.00").unwrap();
        assert!(warning < printed);
    }

    #[test]
    fn blank_line_is_echoed_and_ignored() {
        let mut session = Session::new(quiet());
        let (_, out) = transcript(&mut session, "\n   \nstop\n");
        assert_eq!(out, ">>> \n>>>    \n>>> stop\n");
    }

    #[test]
    fn echo_keeps_invalid_utf8_bytes() {
        let mut session = Session::new(quiet());
        let mut source = ReaderSource::new(&b"foo\xff\nstop\n"[..]);
        let mut out = Vec::new();
        session.run(&mut source, &mut out).unwrap();
        assert!(out.starts_with(b">>> foo\xff\n"));
        assert!(out.ends_with(b">>> stop\n"));
    }

    #[test]
    fn end_of_input_mid_line_is_fatal() {
        let mut session = Session::new(quiet());
        let (end, out) = transcript(&mut session, "print_mat MAT_A");
        assert!(matches!(end, SessionEnd::Fatal(LineError::EndOfInput)));
        assert_eq!(
            out,
            ">>> print_mat MAT_A\nError: End of File character detected, terminating...\n"
        );
    }

    #[test]
    fn overlong_line_is_fatal_and_stops_processing() {
        let mut session = Session::new(quiet());
        let input = format!("{}\nprint_mat MAT_A\n", "x".repeat(MAX_LINE_SIZE - 1));
        let (end, out) = transcript(&mut session, &input);
        assert!(matches!(end, SessionEnd::Fatal(LineError::TooLong { .. })));
        assert!(out.ends_with("Error: line should be up to 2048 chars, terminating...\n"));
        assert!(!out.contains("print_mat"));
    }

    #[test]
    fn banner_is_printed_first() {
        let mut session = Session::new(SessionConfig::default());
        let (_, out) = transcript(&mut session, "stop\n");
        assert!(out.starts_with("This is the simple matrix calculator program."));
        assert!(out.ends_with("the \"stop\" command.\n>>> stop\n"));
    }

    #[test]
    fn json_format_emits_one_object_per_diagnostic() {
        let mut session = Session::new(SessionConfig {
            banner: false,
            format: OutputFormat::Json,
        });
        let (_, out) = transcript(&mut session, "print_mat MAT_G\nstop\n");
        let line = out.lines().nth(1).unwrap();
        let value: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(value["code"], "unknown_matrix");
        assert_eq!(value["message"], "unknown matrix \"MAT_G\"");
    }
}

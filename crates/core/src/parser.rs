//! Parameter validator: turns one input line into a validated [`Invocation`].
//!
//! Parameters are consumed in the order fixed by the command's descriptor:
//! first input matrix, second input matrix, scalar, output matrix, element
//! list. The first parameter that fails stops the line and is classified
//! into exactly one [`Diagnostic`]; nothing is built for a rejected line.

use crate::command::Command;
use crate::error::Diagnostic;
use crate::lexer::{is_matrix_char, Cursor, TERMINATOR};
use crate::slots::{SlotId, SlotRegistry, ELEMENT_COUNT};

/// A fully validated command, ready for dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub command: Command,
    pub input_a: Option<SlotId>,
    pub input_b: Option<SlotId>,
    pub output: Option<SlotId>,
    pub scalar: Option<f64>,
    /// Elements read for `read_mat`, at most `ELEMENT_COUNT` of them.
    pub elements: Option<Vec<f64>>,
}

impl Invocation {
    fn new(command: Command) -> Self {
        Invocation {
            command,
            input_a: None,
            input_b: None,
            output: None,
            scalar: None,
            elements: None,
        }
    }
}

/// An accepted line. `warning` is set for a degraded accept.
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed {
    pub invocation: Invocation,
    pub warning: Option<Diagnostic>,
}

/// Validate one line against the command registry and `slots`.
///
/// Returns `Ok(None)` for a line with no command word.
pub fn parse_line(line: &str, slots: &SlotRegistry) -> Result<Option<Parsed>, Diagnostic> {
    let mut cursor = Cursor::new(line);
    let word = cursor.read_word();
    if word.is_empty() {
        return Ok(None);
    }

    let command = Command::lookup(&word).ok_or(Diagnostic::UnknownCommand(word))?;
    tracing::trace!(%command, "command selected");

    if cursor.peek() == ',' {
        return Err(Diagnostic::CommaAfterCommand);
    }

    Parser::new(cursor, slots, command).parse().map(Some)
}

struct Parser<'a> {
    cursor: Cursor,
    slots: &'a SlotRegistry,
    command: Command,
    /// Parameters still to be read, including the current one.
    remaining: u8,
}

impl<'a> Parser<'a> {
    fn new(cursor: Cursor, slots: &'a SlotRegistry, command: Command) -> Self {
        Parser {
            cursor,
            slots,
            command,
            remaining: command.descriptor().parameter_count,
        }
    }

    fn parse(mut self) -> Result<Parsed, Diagnostic> {
        let desc = self.command.descriptor();
        let mut invocation = Invocation::new(self.command);
        let mut warning = None;

        if desc.matrix_inputs >= 1 {
            invocation.input_a = Some(self.matrix_param()?);
        }
        if desc.matrix_inputs == 2 {
            invocation.input_b = Some(self.matrix_param()?);
        }
        if desc.takes_scalar {
            invocation.scalar = Some(self.scalar_param()?);
        }
        if desc.has_output {
            invocation.output = Some(self.matrix_param()?);
        }
        if desc.reads_elements {
            let (elements, shortfall) = self.element_list()?;
            invocation.elements = Some(elements);
            warning = shortfall;
        }
        if desc.parameter_count == 0 && self.cursor.peek() != TERMINATOR {
            return Err(Diagnostic::ExtraneousText);
        }

        Ok(Parsed {
            invocation,
            warning,
        })
    }

    fn take_param(&mut self) -> bool {
        let last = self.remaining == 1;
        self.remaining = self.remaining.saturating_sub(1);
        last
    }

    fn consume_comma(&mut self) {
        self.cursor.advance();
        self.cursor.skip_whites();
    }

    fn matrix_param(&mut self) -> Result<SlotId, Diagnostic> {
        let last = self.take_param();
        let (name, next) = self.cursor.read_identifier();
        let slot = self.slots.lookup(&name);
        let c = self.cursor.peek();

        match slot {
            Some(id) if last && c == TERMINATOR => Ok(id),
            Some(id) if !last && c == ',' => {
                self.consume_comma();
                Ok(id)
            }
            _ => Err(matrix_failure(&name, slot.is_some(), last, next, c)),
        }
    }

    fn scalar_param(&mut self) -> Result<f64, Diagnostic> {
        self.take_param();
        let first = self.cursor.peek();
        let number = self.cursor.read_number();
        if number.digits == 0 {
            let next = self.cursor.peek();
            return Err(scalar_failure(0, first, next));
        }

        let c = self.cursor.peek();
        if c == ',' {
            self.consume_comma();
            return Ok(number.value);
        }
        Err(scalar_failure(number.digits, c, c))
    }

    fn element_list(&mut self) -> Result<(Vec<f64>, Option<Diagnostic>), Diagnostic> {
        self.take_param();
        let mut elements = Vec::with_capacity(ELEMENT_COUNT);
        let mut prefix = self.cursor.peek();
        let mut digits = 0;

        while elements.len() < ELEMENT_COUNT {
            let number = self.cursor.read_number();
            digits = number.digits;
            if digits == 0 {
                break;
            }
            elements.push(number.value);
            if self.cursor.peek() != ',' {
                break;
            }
            self.cursor.advance();
            prefix = self.cursor.peek();
        }

        if elements.len() == ELEMENT_COUNT {
            return Ok((elements, None));
        }

        let c = self.cursor.peek();
        let diagnostic = element_shortfall(prefix, digits, c, elements.len());
        if diagnostic.is_warning() {
            Ok((elements, Some(diagnostic)))
        } else {
            Err(diagnostic)
        }
    }
}

/// Classify a rejected matrix parameter. First matching rule wins.
///
/// `next` is the character that ended the identifier; `c` is the first
/// non-blank character after it.
fn matrix_failure(name: &str, known: bool, last: bool, next: char, c: char) -> Diagnostic {
    if last && c != TERMINATOR && known {
        Diagnostic::ExtraneousText
    } else if !last && is_matrix_char(c) && known {
        Diagnostic::MissingComma
    } else if c == TERMINATOR && (name.is_empty() || (!last && known)) {
        Diagnostic::TooFewArguments
    } else if name.is_empty() && c == ',' {
        Diagnostic::ConsecutiveCommas
    } else if !is_matrix_char(c) && known {
        Diagnostic::IllegalCharAfterMatrix(c)
    } else if !known && matches!(next, TERMINATOR | ' ' | '\t' | ',') {
        Diagnostic::UnknownMatrix(name.to_owned())
    } else {
        Diagnostic::InvalidMatrixName
    }
}

/// Classify a rejected scalar. `c` is the first character of the scalar
/// when no digits were read, otherwise the character following it; `next`
/// is the first non-blank character after the number.
fn scalar_failure(digits: usize, c: char, next: char) -> Diagnostic {
    if digits == 0 && (c == '.' || c == '-') {
        Diagnostic::IllegalChar(c)
    } else if digits == 0 && next == ',' {
        Diagnostic::ConsecutiveCommas
    } else if next == TERMINATOR {
        // The scalar is never the last parameter, so a line ending here is
        // always short.
        Diagnostic::TooFewArguments
    } else if digits > 0 {
        Diagnostic::IllegalCharAfterScalar(c)
    } else {
        Diagnostic::IllegalChar(c)
    }
}

/// Classify an element list that stopped before `ELEMENT_COUNT` values.
fn element_shortfall(prefix: char, digits: usize, c: char, read: usize) -> Diagnostic {
    if digits == 0 && (prefix == '.' || prefix == '-') {
        Diagnostic::IllegalCharInElements { ch: prefix, read }
    } else if c.is_ascii_digit() || c == '.' || c == '-' {
        Diagnostic::ElementsNotSeparated { read }
    } else if c == TERMINATOR {
        Diagnostic::TooFewElements { read }
    } else if c == ',' {
        Diagnostic::ElementsConsecutiveCommas { read }
    } else {
        Diagnostic::IllegalCharInElements { ch: c, read }
    }
}

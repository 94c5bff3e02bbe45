//! Character-level tokenizer over a single buffered input line.
//!
//! The cursor never runs past the end of the line: once the content is
//! exhausted every read yields [`TERMINATOR`], so the validator can treat the
//! end of the line as an ordinary lookahead character.

/// Character reported at (and after) the end of a line.
pub const TERMINATOR: char = '\n';

/// True for characters that may appear in a matrix name.
pub fn is_matrix_char(c: char) -> bool {
    c.is_ascii_uppercase() || c == '_'
}

fn is_white(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// Result of [`Cursor::read_number`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Number {
    pub value: f64,
    /// Digits consumed on both sides of the decimal point. Zero means the
    /// input was a bare `-`, a bare `.`, or not a number at all.
    pub digits: usize,
}

/// Read position within one line.
#[derive(Debug, Clone)]
pub struct Cursor {
    chars: Vec<char>,
    pos: usize,
}

impl Cursor {
    /// Build a cursor over one line. A trailing terminator, if present, is
    /// dropped; the cursor synthesizes it at the end.
    pub fn new(line: &str) -> Self {
        let line = line.strip_suffix(TERMINATOR).unwrap_or(line);
        Cursor {
            chars: line.chars().collect(),
            pos: 0,
        }
    }

    /// The character under the cursor, without skipping whitespace.
    pub fn current(&self) -> char {
        self.chars.get(self.pos).copied().unwrap_or(TERMINATOR)
    }

    /// Step over the current character. A no-op at the end of the line.
    pub fn advance(&mut self) {
        if self.pos < self.chars.len() {
            self.pos += 1;
        }
    }

    /// True once every character of the line has been consumed.
    pub fn at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    /// Advance past spaces and tabs; return the first other character.
    pub fn skip_whites(&mut self) -> char {
        while is_white(self.current()) {
            self.advance();
        }
        self.current()
    }

    /// Skip whitespace and return the next character without consuming it.
    pub fn peek(&mut self) -> char {
        self.skip_whites()
    }

    /// Consume a whitespace-delimited word (used for the command name).
    pub fn read_word(&mut self) -> String {
        self.skip_whites();
        // Whitespace only, so `stop,` reads as one unknown command word.
        let mut word = String::new();
        while !self.at_end() && !is_white(self.current()) {
            word.push(self.current());
            self.advance();
        }
        word
    }

    /// Consume consecutive upper-case letters and underscores.
    ///
    /// Returns the name read and the first character that did not match,
    /// which is left unconsumed.
    pub fn read_identifier(&mut self) -> (String, char) {
        let mut name = String::new();
        while is_matrix_char(self.current()) {
            name.push(self.current());
            self.advance();
        }
        (name, self.current())
    }

    /// Consume an optional `-`, digits, and an optional `.` followed by
    /// digits.
    pub fn read_number(&mut self) -> Number {
        let mut sign = 1.0;
        if self.current() == '-' {
            sign = -1.0;
            self.advance();
        }

        let mut value = 0.0_f64;
        let mut digits = 0;
        while let Some(d) = self.current().to_digit(10) {
            value = value * 10.0 + f64::from(d);
            digits += 1;
            self.advance();
        }

        let mut scale = 1.0_f64;
        if self.current() == '.' {
            self.advance();
            while let Some(d) = self.current().to_digit(10) {
                value = value * 10.0 + f64::from(d);
                scale *= 10.0;
                digits += 1;
                self.advance();
            }
        }

        Number {
            value: sign * value / scale,
            digits,
        }
    }
}

//! Recursive-descent JSON parser: text → [`Value`] tree.
//!
//! The parser walks a byte cursor over the input and never reads past the
//! buffer. Container recursion is capped at [`MAX_NESTING_DEPTH`] levels so
//! hostile input is rejected instead of overflowing the stack. Every
//! failure reports the byte offset where parsing stopped.

use thiserror::Error;

use crate::value::{Number, Value};

/// Container nesting levels accepted before parsing is rejected.
pub const MAX_NESTING_DEPTH: usize = 1000;

/// Longest accepted numeric run.
pub const MAX_NUMBER_LEN: usize = 64;

/// A parse failure, carrying the byte offset where it was detected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unexpected token at byte {0}")]
    Invalid(usize),
    #[error("unterminated string starting near byte {0}")]
    UnterminatedString(usize),
    #[error("invalid escape sequence at byte {0}")]
    InvalidEscape(usize),
    #[error("unpaired UTF-16 surrogate escape at byte {0}")]
    UnpairedSurrogate(usize),
    #[error("malformed number at byte {0}")]
    InvalidNumber(usize),
    #[error("nesting deeper than {MAX_NESTING_DEPTH} levels at byte {0}")]
    TooDeep(usize),
    #[error("trailing data after value at byte {0}")]
    TrailingData(usize),
    #[error("invalid UTF-8 at byte {0}")]
    InvalidUtf8(usize),
}

impl ParseError {
    /// Byte offset into the input where parsing failed.
    pub fn position(&self) -> usize {
        match self {
            ParseError::Invalid(x)
            | ParseError::UnterminatedString(x)
            | ParseError::InvalidEscape(x)
            | ParseError::UnpairedSurrogate(x)
            | ParseError::InvalidNumber(x)
            | ParseError::TooDeep(x)
            | ParseError::TrailingData(x)
            | ParseError::InvalidUtf8(x) => *x,
        }
    }
}

/// Cursor-based parser over a borrowed input buffer.
pub struct Parser<'a> {
    data: &'a [u8],
    x: usize,
}

impl<'a> Parser<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            data: text.as_bytes(),
            x: 0,
        }
    }

    /// Parses a complete document: one value, optionally surrounded by
    /// whitespace, with nothing after it.
    ///
    /// # Example
    ///
    /// ```
    /// use jsondoc_core::{Parser, Value};
    ///
    /// let v = Parser::parse("[1, true]").unwrap();
    /// assert_eq!(v, Value::Array(vec![Value::int(1), Value::Bool(true)]));
    ///
    /// let err = Parser::parse("{\"a\": }").unwrap_err();
    /// assert_eq!(err.position(), 6);
    /// ```
    pub fn parse(text: &str) -> Result<Value, ParseError> {
        let mut parser = Parser::new(text);
        parser.skip_whitespace();
        let value = parser.read_any(0)?;
        parser.skip_whitespace();
        if parser.x < parser.data.len() {
            return Err(ParseError::TrailingData(parser.x));
        }
        Ok(value)
    }

    fn peek(&self) -> Option<u8> {
        self.data.get(self.x).copied()
    }

    fn skip_whitespace(&mut self) {
        while let Some(b' ' | b'\t' | b'\n' | b'\r') = self.peek() {
            self.x += 1;
        }
    }

    fn read_any(&mut self, depth: usize) -> Result<Value, ParseError> {
        let ch = self.peek().ok_or(ParseError::Invalid(self.x))?;
        match ch {
            b'n' => self.read_null(),
            b't' => self.read_true(),
            b'f' => self.read_false(),
            b'"' => Ok(Value::String(self.read_str()?)),
            b'[' => self.read_arr(depth),
            b'{' => self.read_obj(depth),
            b'-' | b'0'..=b'9' => self.read_num(),
            _ => Err(ParseError::Invalid(self.x)),
        }
    }

    fn read_literal(&mut self, literal: &[u8]) -> Result<(), ParseError> {
        let end = self.x + literal.len();
        if end > self.data.len() || &self.data[self.x..end] != literal {
            return Err(ParseError::Invalid(self.x));
        }
        self.x = end;
        Ok(())
    }

    fn read_null(&mut self) -> Result<Value, ParseError> {
        self.read_literal(b"null")?;
        Ok(Value::Null)
    }

    fn read_true(&mut self) -> Result<Value, ParseError> {
        self.read_literal(b"true")?;
        Ok(Value::Bool(true))
    }

    fn read_false(&mut self) -> Result<Value, ParseError> {
        self.read_literal(b"false")?;
        Ok(Value::Bool(false))
    }

    fn read_num(&mut self) -> Result<Value, ParseError> {
        let start = self.x;
        let data = self.data;
        let len = data.len();
        let mut x = self.x;

        if x < len && data[x] == b'-' {
            x += 1;
        }
        while x < len && data[x].is_ascii_digit() {
            x += 1;
        }
        let mut is_float = false;
        if x < len && data[x] == b'.' {
            is_float = true;
            x += 1;
            while x < len && data[x].is_ascii_digit() {
                x += 1;
            }
        }
        if x < len && (data[x] == b'e' || data[x] == b'E') {
            is_float = true;
            x += 1;
            if x < len && (data[x] == b'+' || data[x] == b'-') {
                x += 1;
            }
            while x < len && data[x].is_ascii_digit() {
                x += 1;
            }
        }
        if x - start > MAX_NUMBER_LEN {
            return Err(ParseError::InvalidNumber(start));
        }
        self.x = x;

        let s = std::str::from_utf8(&data[start..x]).map_err(|_| ParseError::InvalidUtf8(start))?;
        if !is_float {
            if let Ok(i) = s.parse::<i64>() {
                return Ok(Value::Number(Number::Int(i)));
            }
        }
        let f: f64 = s.parse().map_err(|_| ParseError::InvalidNumber(start))?;
        Ok(Value::Number(Number::Float(f)))
    }

    fn read_str(&mut self) -> Result<String, ParseError> {
        let open = self.x;
        if self.peek() != Some(b'"') {
            return Err(ParseError::Invalid(self.x));
        }
        self.x += 1;

        let mut out = String::new();
        let mut run_start = self.x;
        loop {
            let Some(ch) = self.peek() else {
                return Err(ParseError::UnterminatedString(open));
            };
            match ch {
                b'"' => {
                    self.flush_run(run_start, &mut out)?;
                    self.x += 1;
                    return Ok(out);
                }
                b'\\' => {
                    self.flush_run(run_start, &mut out)?;
                    self.x += 1;
                    self.read_escape(&mut out)?;
                    run_start = self.x;
                }
                b if b < 0x20 => return Err(ParseError::Invalid(self.x)),
                _ => self.x += 1,
            }
        }
    }

    /// Appends the raw bytes `run_start..x` to `out`. Run boundaries are
    /// always ASCII delimiters, so the slice is whole-character.
    fn flush_run(&self, run_start: usize, out: &mut String) -> Result<(), ParseError> {
        if run_start == self.x {
            return Ok(());
        }
        let run = std::str::from_utf8(&self.data[run_start..self.x])
            .map_err(|_| ParseError::InvalidUtf8(run_start))?;
        out.push_str(run);
        Ok(())
    }

    fn read_escape(&mut self, out: &mut String) -> Result<(), ParseError> {
        let escape_pos = self.x - 1;
        let Some(ch) = self.peek() else {
            return Err(ParseError::UnterminatedString(escape_pos));
        };
        self.x += 1;
        let decoded = match ch {
            b'"' => '"',
            b'\\' => '\\',
            b'/' => '/',
            b'b' => '\u{0008}',
            b'f' => '\u{000C}',
            b'n' => '\n',
            b'r' => '\r',
            b't' => '\t',
            b'u' => return self.read_unicode_escape(escape_pos, out),
            _ => return Err(ParseError::InvalidEscape(escape_pos)),
        };
        out.push(decoded);
        Ok(())
    }

    fn read_unicode_escape(&mut self, escape_pos: usize, out: &mut String) -> Result<(), ParseError> {
        let high = self.read_hex4(escape_pos)?;
        // Surrogate pair handling: a high surrogate must be followed by a
        // low one; a lone low surrogate is malformed.
        let code = match high {
            0xD800..=0xDBFF => {
                if self.peek() != Some(b'\\') || self.data.get(self.x + 1) != Some(&b'u') {
                    return Err(ParseError::UnpairedSurrogate(escape_pos));
                }
                self.x += 2;
                let low = self.read_hex4(escape_pos)?;
                if !(0xDC00..=0xDFFF).contains(&low) {
                    return Err(ParseError::UnpairedSurrogate(escape_pos));
                }
                0x10000 + ((u32::from(high) - 0xD800) << 10) + (u32::from(low) - 0xDC00)
            }
            0xDC00..=0xDFFF => return Err(ParseError::UnpairedSurrogate(escape_pos)),
            _ => u32::from(high),
        };
        let decoded = char::from_u32(code).ok_or(ParseError::InvalidEscape(escape_pos))?;
        out.push(decoded);
        Ok(())
    }

    fn read_hex4(&mut self, escape_pos: usize) -> Result<u16, ParseError> {
        let end = self.x + 4;
        if end > self.data.len() {
            return Err(ParseError::InvalidEscape(escape_pos));
        }
        let hex = std::str::from_utf8(&self.data[self.x..end])
            .map_err(|_| ParseError::InvalidEscape(escape_pos))?;
        let code = u16::from_str_radix(hex, 16).map_err(|_| ParseError::InvalidEscape(escape_pos))?;
        self.x = end;
        Ok(code)
    }

    fn read_arr(&mut self, depth: usize) -> Result<Value, ParseError> {
        if depth >= MAX_NESTING_DEPTH {
            return Err(ParseError::TooDeep(self.x));
        }
        self.x += 1; // consume '['
        let mut items = Vec::new();
        self.skip_whitespace();
        if self.peek() == Some(b']') {
            self.x += 1;
            return Ok(Value::Array(items));
        }
        loop {
            self.skip_whitespace();
            items.push(self.read_any(depth + 1)?);
            self.skip_whitespace();
            match self.peek() {
                Some(b',') => self.x += 1,
                Some(b']') => {
                    self.x += 1;
                    return Ok(Value::Array(items));
                }
                _ => return Err(ParseError::Invalid(self.x)),
            }
        }
    }

    fn read_obj(&mut self, depth: usize) -> Result<Value, ParseError> {
        if depth >= MAX_NESTING_DEPTH {
            return Err(ParseError::TooDeep(self.x));
        }
        self.x += 1; // consume '{'
        let mut entries = Vec::new();
        self.skip_whitespace();
        if self.peek() == Some(b'}') {
            self.x += 1;
            return Ok(Value::Object(entries));
        }
        loop {
            self.skip_whitespace();
            if self.peek() != Some(b'"') {
                return Err(ParseError::Invalid(self.x));
            }
            let key = self.read_str()?;
            self.skip_whitespace();
            if self.peek() != Some(b':') {
                return Err(ParseError::Invalid(self.x));
            }
            self.x += 1;
            self.skip_whitespace();
            let value = self.read_any(depth + 1)?;
            entries.push((key, value));
            self.skip_whitespace();
            match self.peek() {
                Some(b',') => self.x += 1,
                Some(b'}') => {
                    self.x += 1;
                    return Ok(Value::Object(entries));
                }
                _ => return Err(ParseError::Invalid(self.x)),
            }
        }
    }
}

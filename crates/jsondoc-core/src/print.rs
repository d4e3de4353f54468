//! Printer and serialized-length predictor: tree → text, tree → byte count.
//!
//! Both operations are the same recursive visitor, parameterized by an
//! output [`Sink`]: [`print`] drives a `String` sink, [`predict_length`] a
//! counting sink. Because every byte flows through the identical code path,
//! the predicted length equals the printed length for any tree and either
//! layout — the rules cannot drift apart.
//!
//! Layout rules:
//! - compact: no whitespace at all;
//! - pretty: each child of a container is preceded by a newline and one tab
//!   per nesting level, the closing bracket by a newline and the parent's
//!   indent; object keys are followed by `": "`. Empty containers print as
//!   `{}` / `[]` in both layouts.

use crate::value::{Number, Value};

/// Byte receiver shared by the printer and the length predictor.
trait Sink {
    fn put_str(&mut self, s: &str);
    fn put_char(&mut self, c: char);
    fn put_indent(&mut self, depth: usize);
}

impl Sink for String {
    fn put_str(&mut self, s: &str) {
        self.push_str(s);
    }

    fn put_char(&mut self, c: char) {
        self.push(c);
    }

    fn put_indent(&mut self, depth: usize) {
        for _ in 0..depth {
            self.push('\t');
        }
    }
}

/// Counts bytes without materializing them.
#[derive(Default)]
struct Counter {
    len: usize,
}

impl Sink for Counter {
    fn put_str(&mut self, s: &str) {
        self.len += s.len();
    }

    fn put_char(&mut self, c: char) {
        self.len += c.len_utf8();
    }

    fn put_indent(&mut self, depth: usize) {
        self.len += depth;
    }
}

/// Serializes a tree to JSON text.
///
/// # Example
///
/// ```
/// use jsondoc_core::{print, Value};
///
/// let v = Value::Object(vec![("a".to_string(), Value::int(1))]);
/// assert_eq!(print(&v, false), r#"{"a":1}"#);
/// assert_eq!(print(&v, true), "{\n\t\"a\": 1\n}");
/// ```
pub fn print(value: &Value, pretty: bool) -> String {
    let mut out = String::new();
    write_value(value, pretty, 0, &mut out);
    out
}

/// Exact byte count [`print`] would produce, without producing it.
///
/// # Example
///
/// ```
/// use jsondoc_core::{predict_length, print, Value};
///
/// let v = Value::Array(vec![Value::Bool(true), Value::Null]);
/// assert_eq!(predict_length(&v, false), print(&v, false).len());
/// ```
pub fn predict_length(value: &Value, pretty: bool) -> usize {
    let mut counter = Counter::default();
    write_value(value, pretty, 0, &mut counter);
    counter.len
}

/// A string quoted and escaped exactly as the printer would emit it.
pub fn quote_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    write_string(s, &mut out);
    out
}

fn write_value<S: Sink>(value: &Value, pretty: bool, depth: usize, out: &mut S) {
    match value {
        Value::Null => out.put_str("null"),
        Value::Bool(true) => out.put_str("true"),
        Value::Bool(false) => out.put_str("false"),
        Value::Number(n) => out.put_str(&format_number(*n)),
        Value::String(s) => write_string(s, out),
        Value::Raw(text) => out.put_str(text),
        Value::Array(items) => write_array(items, pretty, depth, out),
        Value::Object(entries) => write_object(entries, pretty, depth, out),
        Value::Shared(rc) => write_value(rc, pretty, depth, out),
    }
}

fn write_array<S: Sink>(items: &[Value], pretty: bool, depth: usize, out: &mut S) {
    out.put_char('[');
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.put_char(',');
        }
        if pretty {
            out.put_char('\n');
            out.put_indent(depth + 1);
        }
        write_value(item, pretty, depth + 1, out);
    }
    if pretty && !items.is_empty() {
        out.put_char('\n');
        out.put_indent(depth);
    }
    out.put_char(']');
}

fn write_object<S: Sink>(entries: &[(String, Value)], pretty: bool, depth: usize, out: &mut S) {
    out.put_char('{');
    for (i, (key, val)) in entries.iter().enumerate() {
        if i > 0 {
            out.put_char(',');
        }
        if pretty {
            out.put_char('\n');
            out.put_indent(depth + 1);
        }
        write_string(key, out);
        out.put_char(':');
        if pretty {
            out.put_char(' ');
        }
        write_value(val, pretty, depth + 1, out);
    }
    if pretty && !entries.is_empty() {
        out.put_char('\n');
        out.put_indent(depth);
    }
    out.put_char('}');
}

fn write_string<S: Sink>(s: &str, out: &mut S) {
    out.put_char('"');
    let bytes = s.as_bytes();
    let mut run_start = 0;
    for (i, &b) in bytes.iter().enumerate() {
        let escape: Option<&str> = match b {
            b'"' => Some("\\\""),
            b'\\' => Some("\\\\"),
            0x08 => Some("\\b"),
            0x0C => Some("\\f"),
            b'\n' => Some("\\n"),
            b'\r' => Some("\\r"),
            b'\t' => Some("\\t"),
            _ => None,
        };
        if let Some(esc) = escape {
            flush_plain(s, run_start, i, out);
            out.put_str(esc);
            run_start = i + 1;
        } else if b < 0x20 {
            flush_plain(s, run_start, i, out);
            // Remaining control characters cost six bytes: \u00XX.
            out.put_str("\\u00");
            out.put_char(hex_digit(b >> 4));
            out.put_char(hex_digit(b & 0x0F));
            run_start = i + 1;
        }
    }
    flush_plain(s, run_start, bytes.len(), out);
    out.put_char('"');
}

// Escape triggers are all ASCII, so run boundaries sit on character
// boundaries and the slice below cannot split a code point.
fn flush_plain<S: Sink>(s: &str, start: usize, end: usize, out: &mut S) {
    if start < end {
        out.put_str(&s[start..end]);
    }
}

fn hex_digit(nibble: u8) -> char {
    char::from_digit(u32::from(nibble), 16).unwrap_or('0')
}

/// Formats a number with the shortest decimal representation that parses
/// back to the same value. Integral doubles below 1e15 print without a
/// fractional part; non-finite doubles print as `null`.
pub fn format_number(n: Number) -> String {
    match n {
        Number::Int(i) => i.to_string(),
        Number::Float(f) => format_float(f),
    }
}

fn format_float(f: f64) -> String {
    if !f.is_finite() {
        return "null".to_string();
    }
    if f.fract() == 0.0 && f.abs() < 1e15 {
        return format!("{}", f as i64);
    }
    // Display expands floats fully; exponent form keeps extreme magnitudes
    // within the parser's numeric-run cap.
    if f.abs() >= 1e15 || f.abs() < 1e-5 {
        return format!("{f:e}");
    }
    format!("{f}")
}

//! Extracted data holder: a node pulled out of a document, carrying its
//! own copy, its compact serialization, and the discovered kind, so it
//! stays valid after the source document changes or goes away.

use jsondoc_core::{print, Number, Value};

/// Discovered kind of an extracted node.
///
/// `Float` means the double survives a round trip through `f32`; anything
/// wider is `Double`. Raw passthrough literals report as `String`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DataKind {
    /// No node: the path did not resolve.
    #[default]
    Undefined,
    Object,
    Array,
    String,
    Int,
    Float,
    Double,
    Bool,
    Null,
}

/// A self-contained copy of one document node.
///
/// # Example
///
/// ```
/// use jsondoc::{DataKind, JsonDocument};
///
/// let mut doc = JsonDocument::new();
/// doc.set("/t", 23.4_f32).unwrap();
/// let data = doc.get("/t");
/// doc.clear();
/// assert_eq!(data.kind(), DataKind::Float);
/// assert_eq!(data.to_float(), 23.4);
/// ```
#[derive(Debug, Clone, Default)]
pub struct JsonData {
    value: Value,
    raw: String,
    kind: DataKind,
}

impl JsonData {
    /// Deep-copies a node into a holder; aliases are flattened.
    pub fn extract(node: &Value) -> JsonData {
        let value = node.deep_copy();
        let raw = print(&value, false);
        let kind = discover_kind(&value);
        JsonData { value, raw, kind }
    }

    pub fn kind(&self) -> DataKind {
        self.kind
    }

    /// True when the source path did not resolve.
    pub fn is_undefined(&self) -> bool {
        self.kind == DataKind::Undefined
    }

    /// The node's compact serialization at extraction time.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn type_name(&self) -> &'static str {
        match self.kind {
            DataKind::Undefined => "undefined",
            DataKind::Object => "object",
            DataKind::Array => "array",
            DataKind::String => "string",
            DataKind::Int => "int",
            DataKind::Float => "float",
            DataKind::Double => "double",
            DataKind::Bool => "bool",
            DataKind::Null => "null",
        }
    }

    /// String view: the content for strings and raw literals, the compact
    /// serialization for everything else.
    pub fn as_str(&self) -> &str {
        match &self.value {
            Value::String(s) | Value::Raw(s) => s,
            _ => &self.raw,
        }
    }

    /// Boolean coercion: numbers are true when nonzero, strings when they
    /// read `true`.
    pub fn to_bool(&self) -> bool {
        match &self.value {
            Value::Bool(b) => *b,
            Value::Number(n) => n.as_f64() != 0.0,
            Value::String(s) | Value::Raw(s) => s == "true",
            _ => false,
        }
    }

    /// `i64` coercion, saturating; strings parse as integers, then as
    /// doubles truncated toward zero.
    pub fn to_i64(&self) -> i64 {
        match &self.value {
            Value::Bool(b) => i64::from(*b),
            Value::Number(n) => n.as_i64(),
            Value::String(s) | Value::Raw(s) => parse_i64(s),
            _ => 0,
        }
    }

    /// `i32` coercion, saturating.
    pub fn to_int(&self) -> i32 {
        self.to_i64().clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
    }

    /// `f64` coercion; strings parse, everything non-numeric is zero.
    pub fn to_double(&self) -> f64 {
        match &self.value {
            Value::Bool(b) => f64::from(u8::from(*b)),
            Value::Number(n) => n.as_f64(),
            Value::String(s) | Value::Raw(s) => s.trim().parse().unwrap_or(0.0),
            _ => 0.0,
        }
    }

    /// `f32` coercion, narrowing [`JsonData::to_double`].
    pub fn to_float(&self) -> f32 {
        self.to_double() as f32
    }
}

fn discover_kind(value: &Value) -> DataKind {
    match value {
        Value::Null => DataKind::Null,
        Value::Bool(_) => DataKind::Bool,
        Value::Number(Number::Int(_)) => DataKind::Int,
        Value::Number(Number::Float(f)) => {
            if f64::from(*f as f32) == *f {
                DataKind::Float
            } else {
                DataKind::Double
            }
        }
        Value::String(_) | Value::Raw(_) => DataKind::String,
        Value::Array(_) => DataKind::Array,
        Value::Object(_) => DataKind::Object,
        Value::Shared(rc) => discover_kind(rc),
    }
}

fn parse_i64(s: &str) -> i64 {
    let trimmed = s.trim();
    if let Ok(i) = trimmed.parse::<i64>() {
        return i;
    }
    match trimmed.parse::<f64>() {
        Ok(f) => Number::Float(f).as_i64(),
        Err(_) => 0,
    }
}

//! The JSON value tree.
//!
//! [`Value`] is a closed tagged union: every consumer (parser, printer,
//! length predictor, path resolver) matches on it exhaustively, so a new
//! kind cannot be half-supported.
//!
//! Children of containers are owned, insertion-ordered `Vec`s. Objects
//! tolerate duplicate keys; lookups match the first occurrence.
//!
//! [`Value::Shared`] is an alias node: it borrows another tree through an
//! `Rc` without owning it. Dropping a document that contains shared nodes
//! never frees the shared structure, and mutating through a shared node
//! copies on write, leaving other aliases untouched.

use std::rc::Rc;

/// A JSON number, keeping the exact integer view when the source had one.
#[derive(Debug, Clone, Copy)]
pub enum Number {
    /// An integral number that fits `i64`.
    Int(i64),
    /// Any other finite or non-finite double.
    Float(f64),
}

impl Number {
    /// The value widened to `f64`.
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Int(i) => *i as f64,
            Number::Float(f) => *f,
        }
    }

    /// The value as `i64`, saturating and truncating toward zero.
    pub fn as_i64(&self) -> i64 {
        match self {
            Number::Int(i) => *i,
            Number::Float(f) if f.is_nan() => 0,
            Number::Float(f) if *f >= i64::MAX as f64 => i64::MAX,
            Number::Float(f) if *f <= i64::MIN as f64 => i64::MIN,
            Number::Float(f) => *f as i64,
        }
    }

    /// True when the number carries an exact integer view.
    pub fn is_int(&self) -> bool {
        matches!(self, Number::Int(_))
    }
}

// Numeric promotion: 1 == 1.0.
impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => a == b,
            (a, b) => a.as_f64() == b.as_f64(),
        }
    }
}

/// Discriminant of a [`Value`], with alias nodes resolved away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Null,
    Bool,
    Number,
    String,
    Raw,
    Array,
    Object,
}

/// One node of a JSON document tree.
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    /// A verbatim passthrough literal; printed exactly as stored.
    Raw(String),
    Array(Vec<Value>),
    Object(Vec<(String, Value)>),
    /// An alias into another tree. Never owns the shared structure.
    Shared(Rc<Value>),
}

impl Value {
    /// Integer number constructor.
    pub fn int(i: i64) -> Value {
        Value::Number(Number::Int(i))
    }

    /// Floating-point number constructor.
    pub fn float(f: f64) -> Value {
        Value::Number(Number::Float(f))
    }

    /// Verbatim raw literal constructor.
    pub fn raw(text: impl Into<String>) -> Value {
        Value::Raw(text.into())
    }

    /// Alias node constructor.
    pub fn shared(subtree: Rc<Value>) -> Value {
        Value::Shared(subtree)
    }

    /// Follows alias links to the underlying node.
    pub fn resolve(&self) -> &Value {
        let mut current = self;
        while let Value::Shared(rc) = current {
            current = rc;
        }
        current
    }

    /// Discriminant with alias nodes resolved.
    pub fn kind(&self) -> ValueKind {
        match self.resolve() {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Number(_) => ValueKind::Number,
            Value::String(_) => ValueKind::String,
            Value::Raw(_) => ValueKind::Raw,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
            Value::Shared(_) => unreachable!("resolve() never returns an alias"),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self.resolve(), Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self.resolve() {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<Number> {
        match self.resolve() {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self.resolve() {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self.resolve() {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&[(String, Value)]> {
        match self.resolve() {
            Value::Object(entries) => Some(entries),
            _ => None,
        }
    }

    /// First member with the given key, if this is an object.
    pub fn member(&self, key: &str) -> Option<&Value> {
        self.as_object()?
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Replaces an alias node with an owned copy of the aliased value, so
    /// the caller can mutate without touching other aliases. Aliases nested
    /// deeper stay shared until a mutation reaches them.
    pub fn make_owned(&mut self) {
        while let Value::Shared(rc) = self {
            *self = (**rc).clone();
        }
    }

    /// A fully independent copy: recurses through containers and flattens
    /// every alias node into owned structure.
    ///
    /// # Example
    ///
    /// ```
    /// use std::rc::Rc;
    /// use jsondoc_core::Value;
    ///
    /// let shared = Rc::new(Value::int(7));
    /// let tree = Value::Array(vec![Value::shared(shared)]);
    /// let copy = tree.deep_copy();
    /// assert!(matches!(copy, Value::Array(ref items) if !matches!(items[0], Value::Shared(_))));
    /// assert_eq!(copy, tree);
    /// ```
    pub fn deep_copy(&self) -> Value {
        match self.resolve() {
            Value::Null => Value::Null,
            Value::Bool(b) => Value::Bool(*b),
            Value::Number(n) => Value::Number(*n),
            Value::String(s) => Value::String(s.clone()),
            Value::Raw(s) => Value::Raw(s.clone()),
            Value::Array(items) => Value::Array(items.iter().map(Value::deep_copy).collect()),
            Value::Object(entries) => Value::Object(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), v.deep_copy()))
                    .collect(),
            ),
            Value::Shared(_) => unreachable!("resolve() never returns an alias"),
        }
    }
}

/// Semantic equality: aliases are resolved, numbers compare with promotion
/// (`1 == 1.0`), object members compare by key regardless of order.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self.resolve(), other.resolve()) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Raw(a), Value::Raw(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x == y)
            }
            (Value::Object(a), Value::Object(b)) => {
                if a.len() != b.len() {
                    return false;
                }
                a.iter().all(|(key, val)| {
                    b.iter()
                        .find(|(k, _)| k == key)
                        .is_some_and(|(_, other_val)| val == other_val)
                })
            }
            _ => false,
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Null
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Value {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Value {
        Value::int(i64::from(i))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Value {
        Value::int(i)
    }
}

impl From<u32> for Value {
    fn from(u: u32) -> Value {
        Value::int(i64::from(u))
    }
}

impl From<f32> for Value {
    fn from(f: f32) -> Value {
        Value::float(f64::from(f))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Value {
        Value::float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Value {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Value {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Value {
        Value::Array(items)
    }
}

impl From<Vec<(String, Value)>> for Value {
    fn from(entries: Vec<(String, Value)>) -> Value {
        Value::Object(entries)
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Value {
        Value::Number(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_resolves_aliases() {
        let shared = Rc::new(Value::Array(vec![Value::int(1)]));
        let alias = Value::shared(shared);
        assert_eq!(alias.kind(), ValueKind::Array);
        assert_eq!(alias.as_array().map(<[Value]>::len), Some(1));
    }

    #[test]
    fn test_number_promotion_equality() {
        assert_eq!(Value::int(2), Value::float(2.0));
        assert_ne!(Value::int(2), Value::float(2.5));
        assert_eq!(Value::float(0.5), Value::float(0.5));
    }

    #[test]
    fn test_object_equality_ignores_member_order() {
        let a = Value::Object(vec![
            ("x".to_string(), Value::int(1)),
            ("y".to_string(), Value::int(2)),
        ]);
        let b = Value::Object(vec![
            ("y".to_string(), Value::int(2)),
            ("x".to_string(), Value::int(1)),
        ]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_object_equality_checks_values() {
        let a = Value::Object(vec![("x".to_string(), Value::int(1))]);
        let b = Value::Object(vec![("x".to_string(), Value::int(2))]);
        assert_ne!(a, b);
    }

    #[test]
    fn test_deep_copy_strips_sharing() {
        let shared = Rc::new(Value::Object(vec![(
            "k".to_string(),
            Value::String("v".to_string()),
        )]));
        let tree = Value::Array(vec![Value::shared(Rc::clone(&shared)), Value::Null]);
        let copy = tree.deep_copy();
        assert_eq!(copy, tree);
        let Value::Array(items) = &copy else {
            panic!("expected array");
        };
        assert!(matches!(items[0], Value::Object(_)));
        // The original alias still points at the shared allocation.
        assert_eq!(Rc::strong_count(&shared), 2);
    }

    #[test]
    fn test_make_owned_leaves_other_aliases_intact() {
        let shared = Rc::new(Value::int(5));
        let mut a = Value::shared(Rc::clone(&shared));
        let b = Value::shared(Rc::clone(&shared));
        a.make_owned();
        a = Value::int(9);
        assert_eq!(a, Value::int(9));
        assert_eq!(b, Value::int(5));
    }

    #[test]
    fn test_member_lookup_first_occurrence() {
        let obj = Value::Object(vec![
            ("dup".to_string(), Value::int(1)),
            ("dup".to_string(), Value::int(2)),
        ]);
        assert_eq!(obj.member("dup"), Some(&Value::int(1)));
        assert_eq!(obj.member("missing"), None);
    }

    #[test]
    fn test_number_saturating_i64() {
        assert_eq!(Number::Float(1e300).as_i64(), i64::MAX);
        assert_eq!(Number::Float(-1e300).as_i64(), i64::MIN);
        assert_eq!(Number::Float(f64::NAN).as_i64(), 0);
        assert_eq!(Number::Float(3.9).as_i64(), 3);
    }
}

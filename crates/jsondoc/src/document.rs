//! The document façade: a tree plus everything needed to load, edit and
//! serialize it through paths.
//!
//! [`Document`] is generic over its root flavor. [`JsonDocument`] roots at
//! an object and rejects paths whose first segment is an array selector;
//! [`ArrayDocument`] is the mirror image. One code path serves both.

use std::marker::PhantomData;
use std::rc::Rc;

use jsondoc_core::{predict_length, print, Parser, Value};
use jsondoc_path::{get_value, parse_path, remove_value, set_value, Segment};
use thiserror::Error;

use crate::data::JsonData;
use crate::iter::DocumentIterator;

/// Root flavor of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootHint {
    Object,
    Array,
}

mod sealed {
    pub trait Sealed {}
}

/// Marker selecting a document's root container flavor.
pub trait RootKind: sealed::Sealed {
    const HINT: RootHint;
}

/// Object-rooted flavor marker.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectRoot;

/// Array-rooted flavor marker.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArrayRoot;

impl sealed::Sealed for ObjectRoot {}
impl sealed::Sealed for ArrayRoot {}

impl RootKind for ObjectRoot {
    const HINT: RootHint = RootHint::Object;
}

impl RootKind for ArrayRoot {
    const HINT: RootHint = RootHint::Array;
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DocumentError {
    /// The first path segment addresses the wrong root flavor: an array
    /// selector against an object document, or a key against an array
    /// document. The document is left untouched.
    #[error("path addresses the wrong root kind")]
    RootKindMismatch,
}

/// A mutable JSON document addressed through `/`-delimited paths.
///
/// The root materializes lazily: a fresh document holds nothing and prints
/// as an empty container of its flavor until the first write.
///
/// # Example
///
/// ```
/// use jsondoc::JsonDocument;
///
/// let mut doc = JsonDocument::new();
/// doc.set("/sensors/[0]/name", "probe-a").unwrap();
/// doc.set("/sensors/[0]/ok", true).unwrap();
/// assert_eq!(doc.to_text(false), r#"{"sensors":[{"name":"probe-a","ok":true}]}"#);
/// assert_eq!(doc.predicted_length(false), doc.to_text(false).len());
/// ```
#[derive(Debug)]
pub struct Document<R: RootKind = ObjectRoot> {
    root: Option<Value>,
    error_pos: Option<usize>,
    _flavor: PhantomData<R>,
}

/// An object-rooted document.
pub type JsonDocument = Document<ObjectRoot>;

/// An array-rooted document.
pub type ArrayDocument = Document<ArrayRoot>;

impl<R: RootKind> Document<R> {
    pub fn new() -> Self {
        Document {
            root: None,
            error_pos: None,
            _flavor: PhantomData,
        }
    }

    /// A document loaded from text; see [`Document::load`].
    pub fn from_text(text: &str) -> Self {
        let mut doc = Self::new();
        doc.load(text);
        doc
    }

    fn empty_root() -> Value {
        match R::HINT {
            RootHint::Object => Value::Object(Vec::new()),
            RootHint::Array => Value::Array(Vec::new()),
        }
    }

    fn root_mut(&mut self) -> &mut Value {
        self.root.get_or_insert_with(Self::empty_root)
    }

    fn check_root(&self, segments: &[Segment]) -> Result<(), DocumentError> {
        match (segments.first(), R::HINT) {
            (Some(Segment::Index(_)), RootHint::Object)
            | (Some(Segment::Key(_)), RootHint::Array) => Err(DocumentError::RootKindMismatch),
            _ => Ok(()),
        }
    }

    /// Replaces the contents with parsed text. Returns whether the load
    /// succeeded; on a parse failure the document is left empty and the
    /// failure's byte offset is kept for [`Document::error_position`].
    ///
    /// Text that is not a JSON container and does not parse as a JSON
    /// scalar is tolerated as a verbatim raw literal, so a plain sensor
    /// reading like `ts-1724188800` loads and prints back unchanged.
    pub fn load(&mut self, text: &str) -> bool {
        self.root = None;
        self.error_pos = None;
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return true;
        }
        match Parser::parse(trimmed) {
            Ok(value) => {
                self.root = Some(value);
                true
            }
            Err(err) if trimmed.starts_with('{') || trimmed.starts_with('[') => {
                self.error_pos = Some(err.position());
                false
            }
            Err(_) => {
                self.root = Some(Value::raw(trimmed));
                true
            }
        }
    }

    /// Writes a value at a path, creating intermediate structure as the
    /// path implies. An empty path replaces the whole root.
    pub fn set(&mut self, path: &str, value: impl Into<Value>) -> Result<(), DocumentError> {
        let segments = parse_path(path);
        self.check_root(&segments)?;
        set_value(self.root_mut(), &segments, value.into());
        Ok(())
    }

    /// Writes an alias to a shared subtree at a path. The document borrows
    /// the subtree; dropping the document never frees it, and writing
    /// through the alias later copies instead of mutating it.
    pub fn set_shared(&mut self, path: &str, subtree: Rc<Value>) -> Result<(), DocumentError> {
        let segments = parse_path(path);
        self.check_root(&segments)?;
        set_value(self.root_mut(), &segments, Value::shared(subtree));
        Ok(())
    }

    /// An independent extracted copy of the node a path addresses, or a
    /// default (undefined) holder when the path does not resolve.
    pub fn get(&self, path: &str) -> JsonData {
        self.value_at(path).map(JsonData::extract).unwrap_or_default()
    }

    /// Borrows the node a path addresses. An empty path borrows the root.
    pub fn value_at(&self, path: &str) -> Option<&Value> {
        let segments = parse_path(path);
        self.check_root(&segments).ok()?;
        get_value(self.root.as_ref()?, &segments)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.value_at(path).is_some()
    }

    /// Removes the node a path addresses; `Ok(false)` when the path does
    /// not resolve. Emptied objects unlink from object parents; arrays
    /// keep their place and their emptied children.
    pub fn remove(&mut self, path: &str) -> Result<bool, DocumentError> {
        let segments = parse_path(path);
        self.check_root(&segments)?;
        match self.root.as_mut() {
            Some(root) => Ok(remove_value(root, &segments)),
            None => Ok(false),
        }
    }

    pub fn clear(&mut self) {
        self.root = None;
        self.error_pos = None;
    }

    /// A fully independent copy; shared subtrees are flattened into owned
    /// structure.
    pub fn duplicate(&self) -> Self {
        Document {
            root: self.root.as_ref().map(Value::deep_copy),
            error_pos: self.error_pos,
            _flavor: PhantomData,
        }
    }

    /// Serializes the document; an unmaterialized root prints as an empty
    /// container of the document's flavor.
    pub fn to_text(&self, pretty: bool) -> String {
        match &self.root {
            Some(root) => print(root, pretty),
            None => print(&Self::empty_root(), pretty),
        }
    }

    /// Exact byte count [`Document::to_text`] would produce.
    pub fn predicted_length(&self, pretty: bool) -> usize {
        match &self.root {
            Some(root) => predict_length(root, pretty),
            None => predict_length(&Self::empty_root(), pretty),
        }
    }

    /// Byte offset of the last load failure, cleared by the next
    /// successful load or [`Document::clear`].
    pub fn error_position(&self) -> Option<usize> {
        self.error_pos
    }

    /// An owned snapshot of the root, ready to be aliased into other
    /// documents with [`Document::set_shared`].
    pub fn to_shared(&self) -> Rc<Value> {
        Rc::new(self.root.as_ref().map_or_else(Self::empty_root, Value::deep_copy))
    }

    pub fn root(&self) -> Option<&Value> {
        self.root.as_ref()
    }

    /// Flattens the document into `(kind, depth, key, value)` items whose
    /// spans index a compact serialization snapshot.
    pub fn iterate(&self) -> DocumentIterator {
        match &self.root {
            Some(root) => DocumentIterator::new(root),
            None => DocumentIterator::new(&Self::empty_root()),
        }
    }
}

impl<R: RootKind> Default for Document<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl Document<ObjectRoot> {
    /// Appends a member to the root object without looking for an existing
    /// key, so repeated keys accumulate. No effect when the root is not an
    /// object.
    pub fn add(&mut self, key: &str, value: impl Into<Value>) {
        let root = self.root_mut();
        root.make_owned();
        if let Value::Object(entries) = root {
            entries.push((key.to_string(), value.into()));
        }
    }
}

impl Document<ArrayRoot> {
    /// Appends an element to the root array. No effect when the root is
    /// not an array.
    pub fn push(&mut self, value: impl Into<Value>) {
        let root = self.root_mut();
        root.make_owned();
        if let Value::Array(items) = root {
            items.push(value.into());
        }
    }

    /// Number of root elements.
    pub fn len(&self) -> usize {
        self.root
            .as_ref()
            .and_then(Value::as_array)
            .map_or(0, <[Value]>::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

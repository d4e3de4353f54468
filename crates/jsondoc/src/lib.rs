//! jsondoc - path-addressable JSON documents.
//!
//! A mutable JSON document edited through `/`-delimited paths with `[n]`
//! array selectors: writes create the structure a path implies, reads pull
//! out self-contained data holders, serialization comes in compact and
//! pretty layouts with an exact length predictor, and a flattening
//! iterator reports every node as byte spans into a snapshot.
//!
//! # Example
//!
//! ```
//! use jsondoc::JsonDocument;
//!
//! let mut doc = JsonDocument::from_text(r#"{"device":"probe-a"}"#);
//! doc.set("/readings/[0]/t", 23.5).unwrap();
//! assert_eq!(doc.get("/readings/[0]/t").to_double(), 23.5);
//! assert_eq!(doc.predicted_length(false), doc.to_text(false).len());
//! ```

pub mod data;
pub mod document;
pub mod iter;

// Re-exports for convenience
pub use data::{DataKind, JsonData};
pub use document::{
    ArrayDocument, ArrayRoot, Document, DocumentError, JsonDocument, ObjectRoot, RootHint, RootKind,
};
pub use iter::{DocumentIterator, IterItem, Span};

pub use jsondoc_core::{
    minify, predict_length, print, quote_string, Number, ParseError, Parser, Value, ValueKind,
};
pub use jsondoc_path::{format_path, parse_path, ResolveStatus, Segment};

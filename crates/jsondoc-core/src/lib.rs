//! jsondoc-core - Value tree, parser, printer and length predictor.
//!
//! The foundation of the jsondoc engine: a mutable JSON [`Value`] tree with
//! reference-aliasing, a strict recursive-descent [`Parser`] with byte-offset
//! errors, a printer with compact and pretty layouts, and an exact
//! serialized-length predictor that agrees with the printer byte for byte.

pub mod minify;
pub mod parser;
pub mod print;
pub mod value;

// Re-exports for convenience
pub use minify::minify;
pub use parser::{ParseError, Parser, MAX_NESTING_DEPTH, MAX_NUMBER_LEN};
pub use print::{format_number, predict_length, print, quote_string};
pub use value::{Number, Value, ValueKind};

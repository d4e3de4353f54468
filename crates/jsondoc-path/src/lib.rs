//! jsondoc-path - `/`-delimited path addressing over jsondoc trees.
//!
//! Paths name nodes by object keys and `[n]` array selectors. Reads report
//! exactly where and why a walk stopped; writes create the structure the
//! path implies; removals unlink emptied objects but never emptied arrays.
//!
//! # Example
//!
//! ```
//! use jsondoc_core::{print, Parser, Value};
//! use jsondoc_path::{get_value, parse_path, remove_value, set_value};
//!
//! let mut tree = Parser::parse(r#"{"a":1}"#).unwrap();
//! set_value(&mut tree, &parse_path("/b/[1]"), Value::Bool(true));
//! assert_eq!(print(&tree, false), r#"{"a":1,"b":[null,true]}"#);
//! assert_eq!(get_value(&tree, &parse_path("/b/[1]")), Some(&Value::Bool(true)));
//! assert!(remove_value(&mut tree, &parse_path("/a")));
//! ```

pub mod mutate;
pub mod parse;
pub mod resolve;
pub mod types;

// Re-exports for convenience
pub use mutate::{remove_value, set_value};
pub use parse::{format_path, parse_path};
pub use resolve::{get_value, resolve};
pub use types::{Resolution, ResolveStatus, Segment};

use jsondoc_core::Value;

use crate::resolve::get_value;
use crate::types::Segment;

/// Writes a value at a path, creating whatever structure the path implies.
///
/// Missing object members are created, arrays are padded with nulls up to
/// the addressed index, and a node whose kind does not match a segment is
/// replaced by a fresh container of the right kind. An empty path replaces
/// the root outright. Alias nodes along the path are copied before being
/// written through, so other aliases of the same subtree are unaffected.
///
/// # Example
///
/// ```
/// use jsondoc_core::{print, Value};
/// use jsondoc_path::{parse_path, set_value};
///
/// let mut root = Value::Object(vec![]);
/// set_value(&mut root, &parse_path("/a/[2]/b"), Value::int(7));
/// assert_eq!(print(&root, false), r#"{"a":[null,null,{"b":7}]}"#);
/// ```
pub fn set_value(node: &mut Value, segments: &[Segment], value: Value) {
    let Some((first, rest)) = segments.split_first() else {
        *node = value;
        return;
    };
    node.make_owned();
    match first {
        Segment::Key(key) => {
            if !matches!(node, Value::Object(_)) {
                *node = Value::Object(Vec::new());
            }
            if let Value::Object(entries) = node {
                let pos = match entries.iter().position(|(k, _)| k == key) {
                    Some(pos) => pos,
                    None => {
                        entries.push((key.clone(), Value::Null));
                        entries.len() - 1
                    }
                };
                set_value(&mut entries[pos].1, rest, value);
            }
        }
        Segment::Index(i) => {
            if !matches!(node, Value::Array(_)) {
                *node = Value::Array(Vec::new());
            }
            if let Value::Array(items) = node {
                while items.len() <= *i {
                    items.push(Value::Null);
                }
                set_value(&mut items[*i], rest, value);
            }
        }
    }
}

/// Removes the node a path addresses. Returns `false`, leaving the tree
/// untouched, when the path does not resolve or is empty (the root is
/// never removed).
///
/// Removal unlinks emptied objects: when the removed node's parent object
/// becomes empty, it is removed from *its* parent in turn, as long as that
/// parent is also an object. Arrays stop the cascade, keep their emptied
/// children, and are themselves kept when emptied.
pub fn remove_value(root: &mut Value, segments: &[Segment]) -> bool {
    if segments.is_empty() || get_value(root, segments).is_none() {
        return false;
    }
    remove_found(root, segments);
    true
}

// Returns true when `node` is an object left empty by the removal, which
// makes it a pruning candidate for an object parent.
fn remove_found(node: &mut Value, segments: &[Segment]) -> bool {
    node.make_owned();
    match segments {
        [] => false,
        [last] => {
            match (&mut *node, last) {
                (Value::Object(entries), Segment::Key(key)) => {
                    if let Some(pos) = entries.iter().position(|(k, _)| k == key) {
                        entries.remove(pos);
                    }
                }
                (Value::Array(items), Segment::Index(i)) => {
                    if *i < items.len() {
                        items.remove(*i);
                    }
                }
                _ => {}
            }
            is_empty_object(node)
        }
        [first, rest @ ..] => {
            match (&mut *node, first) {
                (Value::Object(entries), Segment::Key(key)) => {
                    if let Some(pos) = entries.iter().position(|(k, _)| k == key) {
                        if remove_found(&mut entries[pos].1, rest) {
                            entries.remove(pos);
                        }
                    }
                }
                (Value::Array(items), Segment::Index(i)) => {
                    if let Some(child) = items.get_mut(*i) {
                        remove_found(child, rest);
                    }
                }
                _ => {}
            }
            is_empty_object(node)
        }
    }
}

fn is_empty_object(node: &Value) -> bool {
    matches!(node, Value::Object(entries) if entries.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_path;
    use jsondoc_core::{print, Parser};
    use std::rc::Rc;

    fn parse(text: &str) -> Value {
        Parser::parse(text).unwrap()
    }

    #[test]
    fn test_set_existing_member() {
        let mut root = parse(r#"{"a":1}"#);
        set_value(&mut root, &parse_path("/a"), Value::int(2));
        assert_eq!(print(&root, false), r#"{"a":2}"#);
    }

    #[test]
    fn test_set_auto_vivifies_objects() {
        let mut root = Value::Object(vec![]);
        set_value(&mut root, &parse_path("/a/b/c"), Value::Bool(true));
        assert_eq!(print(&root, false), r#"{"a":{"b":{"c":true}}}"#);
    }

    #[test]
    fn test_set_pads_arrays_with_null() {
        let mut root = Value::Object(vec![]);
        set_value(&mut root, &parse_path("/a/[3]"), Value::int(5));
        assert_eq!(print(&root, false), r#"{"a":[null,null,null,5]}"#);
    }

    #[test]
    fn test_set_promotes_mismatched_containers() {
        // A scalar in the way of a key segment becomes an object.
        let mut root = parse(r#"{"a":1}"#);
        set_value(&mut root, &parse_path("/a/b"), Value::int(2));
        assert_eq!(print(&root, false), r#"{"a":{"b":2}}"#);

        // An object in the way of an index segment becomes an array.
        let mut root = parse(r#"{"a":{"x":1}}"#);
        set_value(&mut root, &parse_path("/a/[1]"), Value::int(2));
        assert_eq!(print(&root, false), r#"{"a":[null,2]}"#);

        // An array in the way of a key segment becomes an object.
        let mut root = parse(r#"{"a":[1,2]}"#);
        set_value(&mut root, &parse_path("/a/b"), Value::int(3));
        assert_eq!(print(&root, false), r#"{"a":{"b":3}}"#);
    }

    #[test]
    fn test_set_empty_path_replaces_root() {
        let mut root = parse(r#"{"a":1}"#);
        set_value(&mut root, &[], Value::Array(vec![Value::Null]));
        assert_eq!(print(&root, false), "[null]");
    }

    #[test]
    fn test_set_through_alias_copies_on_write() {
        let shared = Rc::new(parse(r#"{"k":1}"#));
        let mut root = Value::Object(vec![("alias".to_string(), Value::shared(Rc::clone(&shared)))]);
        set_value(&mut root, &parse_path("/alias/k"), Value::int(9));
        assert_eq!(print(&root, false), r#"{"alias":{"k":9}}"#);
        // The shared tree is untouched.
        assert_eq!(print(&shared, false), r#"{"k":1}"#);
    }

    #[test]
    fn test_remove_member_and_element() {
        let mut root = parse(r#"{"a":1,"b":[10,20,30]}"#);
        assert!(remove_value(&mut root, &parse_path("/b/[1]")));
        assert_eq!(print(&root, false), r#"{"a":1,"b":[10,30]}"#);
        assert!(remove_value(&mut root, &parse_path("/a")));
        assert_eq!(print(&root, false), r#"{"b":[10,30]}"#);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut root = parse(r#"{"a":1}"#);
        assert!(!remove_value(&mut root, &parse_path("/missing")));
        assert!(!remove_value(&mut root, &parse_path("/a/deeper")));
        assert!(!remove_value(&mut root, &[]));
        assert_eq!(print(&root, false), r#"{"a":1}"#);
    }

    #[test]
    fn test_remove_prunes_emptied_objects() {
        let mut root = parse(r#"{"a":{"b":{"c":1}},"keep":2}"#);
        assert!(remove_value(&mut root, &parse_path("/a/b/c")));
        // The emptied chain unlinks up to, but not including, the root.
        assert_eq!(print(&root, false), r#"{"keep":2}"#);
    }

    #[test]
    fn test_remove_pruning_stops_at_arrays() {
        // An object emptied inside an array stays in place.
        let mut root = parse(r#"{"a":[{"b":1},2]}"#);
        assert!(remove_value(&mut root, &parse_path("/a/[0]/b")));
        assert_eq!(print(&root, false), r#"{"a":[{},2]}"#);

        // An array emptied by removal also stays in place.
        let mut root = parse(r#"{"a":[1]}"#);
        assert!(remove_value(&mut root, &parse_path("/a/[0]")));
        assert_eq!(print(&root, false), r#"{"a":[]}"#);
    }

    #[test]
    fn test_remove_never_prunes_root() {
        let mut root = parse(r#"{"only":1}"#);
        assert!(remove_value(&mut root, &parse_path("/only")));
        assert_eq!(print(&root, false), "{}");
    }

    #[test]
    fn test_remove_first_duplicate_key() {
        let mut root = Value::Object(vec![
            ("dup".to_string(), Value::int(1)),
            ("dup".to_string(), Value::int(2)),
        ]);
        assert!(remove_value(&mut root, &parse_path("/dup")));
        assert_eq!(print(&root, false), r#"{"dup":2}"#);
    }
}

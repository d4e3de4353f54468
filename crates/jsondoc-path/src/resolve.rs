use jsondoc_core::Value;

use crate::types::{Resolution, ResolveStatus, Segment};

/// Walks a path against a tree, reporting how far it got and why it
/// stopped. Alias nodes are looked through at every step.
pub fn resolve(root: &Value, segments: &[Segment]) -> Resolution {
    let mut current = root;
    for (idx, segment) in segments.iter().enumerate() {
        let stopped = |status| Resolution {
            status,
            stop_segment: idx,
        };
        current = match (current.resolve(), segment) {
            (obj @ Value::Object(_), Segment::Key(key)) => match obj.member(key) {
                Some(child) => child,
                None => return stopped(ResolveStatus::NotFound),
            },
            (Value::Array(items), Segment::Index(i)) => match items.get(*i) {
                Some(child) => child,
                None => return stopped(ResolveStatus::IndexOutOfRange),
            },
            _ => return stopped(ResolveStatus::TypeMismatch),
        };
    }
    Resolution {
        status: ResolveStatus::Found,
        stop_segment: segments.len(),
    }
}

/// The node a path addresses, or `None` when any step fails. An empty path
/// addresses the root.
///
/// # Example
///
/// ```
/// use jsondoc_core::{Parser, Value};
/// use jsondoc_path::{get_value, parse_path};
///
/// let tree = Parser::parse(r#"{"a":{"b":[10,20]}}"#).unwrap();
/// let hit = get_value(&tree, &parse_path("/a/b/[1]"));
/// assert_eq!(hit, Some(&Value::int(20)));
/// assert_eq!(get_value(&tree, &parse_path("/a/missing")), None);
/// ```
pub fn get_value<'a>(root: &'a Value, segments: &[Segment]) -> Option<&'a Value> {
    let mut current = root;
    for segment in segments {
        current = match (current.resolve(), segment) {
            (obj @ Value::Object(_), Segment::Key(key)) => obj.member(key)?,
            (Value::Array(items), Segment::Index(i)) => items.get(*i)?,
            _ => return None,
        };
    }
    Some(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_path;
    use jsondoc_core::Parser;
    use std::rc::Rc;

    fn tree() -> Value {
        Parser::parse(r#"{"a":1,"b":[true,{"c":"x"}]}"#).unwrap()
    }

    #[test]
    fn test_found() {
        let t = tree();
        assert_eq!(get_value(&t, &parse_path("/a")), Some(&Value::int(1)));
        assert_eq!(
            get_value(&t, &parse_path("/b/[1]/c")),
            Some(&Value::from("x"))
        );
        let r = resolve(&t, &parse_path("/b/[0]"));
        assert_eq!(r.status, ResolveStatus::Found);
        assert_eq!(r.stop_segment, 2);
    }

    #[test]
    fn test_empty_path_is_root() {
        let t = tree();
        assert_eq!(get_value(&t, &[]), Some(&t));
        assert!(resolve(&t, &[]).is_found());
    }

    #[test]
    fn test_not_found_and_stop_segment() {
        let t = tree();
        let r = resolve(&t, &parse_path("/b/[1]/missing/deeper"));
        assert_eq!(r.status, ResolveStatus::NotFound);
        assert_eq!(r.stop_segment, 2);
        assert_eq!(get_value(&t, &parse_path("/missing")), None);
    }

    #[test]
    fn test_type_mismatch() {
        let t = tree();
        // Index into an object, key into an array, anything into a leaf.
        assert_eq!(
            resolve(&t, &parse_path("/[0]")).status,
            ResolveStatus::TypeMismatch
        );
        assert_eq!(
            resolve(&t, &parse_path("/b/key")).status,
            ResolveStatus::TypeMismatch
        );
        assert_eq!(
            resolve(&t, &parse_path("/a/deeper")).status,
            ResolveStatus::TypeMismatch
        );
    }

    #[test]
    fn test_index_out_of_range() {
        let t = tree();
        let r = resolve(&t, &parse_path("/b/[5]"));
        assert_eq!(r.status, ResolveStatus::IndexOutOfRange);
        assert_eq!(r.stop_segment, 1);
    }

    #[test]
    fn test_resolves_through_aliases() {
        let shared = Rc::new(tree());
        let root = Value::Object(vec![("alias".to_string(), Value::shared(shared))]);
        assert_eq!(
            get_value(&root, &parse_path("/alias/b/[1]/c")),
            Some(&Value::from("x"))
        );
    }
}

//! Flattening iterator: every child of every container in document order,
//! as byte-offset spans into one compact serialization snapshot.
//!
//! Spans are located by printing each key and child with the same printer
//! that produced the snapshot and searching forward from a monotonic
//! cursor, so a span always slices to exactly the text the printer emitted
//! for that node, duplicate keys and repeated values included.

use jsondoc_core::{print, quote_string, Value, ValueKind};

/// A byte range into the iterator's snapshot text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub offset: usize,
    pub len: usize,
}

/// One child of one container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IterItem {
    /// Kind of the child value, aliases resolved.
    pub kind: ValueKind,
    /// Nesting depth; children of the root sit at depth 0.
    pub depth: usize,
    /// Key span without the surrounding quotes; `None` for array elements.
    pub key: Option<Span>,
    /// Span of the child's whole serialization, brackets included.
    pub value: Span,
}

/// Document-order walk over a snapshot taken at construction time.
///
/// # Example
///
/// ```
/// use jsondoc::JsonDocument;
///
/// let mut doc = JsonDocument::new();
/// doc.set("/a/[0]", true).unwrap();
/// let mut iter = doc.iterate();
/// let a = iter.next().unwrap();
/// assert_eq!(iter.key_str(&a), Some("a"));
/// assert_eq!(iter.value_str(&a), "[true]");
/// let elem = iter.next().unwrap();
/// assert_eq!(elem.depth, 1);
/// assert_eq!(iter.value_str(&elem), "true");
/// ```
#[derive(Debug)]
pub struct DocumentIterator {
    text: String,
    items: Vec<IterItem>,
    next: usize,
}

impl DocumentIterator {
    pub fn new(root: &Value) -> DocumentIterator {
        let text = print(root, false);
        let mut items = Vec::new();
        let mut cursor = 0;
        walk(root, 0, &mut cursor, &text, &mut items);
        DocumentIterator {
            text,
            items,
            next: 0,
        }
    }

    /// The snapshot all spans index into.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[IterItem] {
        &self.items
    }

    /// The item's key text, quotes excluded.
    pub fn key_str(&self, item: &IterItem) -> Option<&str> {
        item.key.map(|span| slice(&self.text, span))
    }

    /// The item's full value text.
    pub fn value_str(&self, item: &IterItem) -> &str {
        slice(&self.text, item.value)
    }
}

impl Iterator for DocumentIterator {
    type Item = IterItem;

    fn next(&mut self) -> Option<IterItem> {
        let item = self.items.get(self.next).copied()?;
        self.next += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.items.len() - self.next;
        (remaining, Some(remaining))
    }
}

fn slice(text: &str, span: Span) -> &str {
    text.get(span.offset..span.offset + span.len).unwrap_or("")
}

fn walk(node: &Value, depth: usize, cursor: &mut usize, text: &str, items: &mut Vec<IterItem>) {
    match node.resolve() {
        Value::Object(entries) => {
            for (key, child) in entries {
                let needle = quote_string(key);
                let Some(offset) = find_from(text, *cursor, &needle) else {
                    return;
                };
                *cursor = offset + needle.len();
                let key_span = Span {
                    offset: offset + 1,
                    len: needle.len() - 2,
                };
                emit(child, depth, Some(key_span), cursor, text, items);
            }
        }
        Value::Array(elements) => {
            for child in elements {
                emit(child, depth, None, cursor, text, items);
            }
        }
        _ => {}
    }
}

fn emit(
    child: &Value,
    depth: usize,
    key: Option<Span>,
    cursor: &mut usize,
    text: &str,
    items: &mut Vec<IterItem>,
) {
    let needle = print(child, false);
    let Some(offset) = find_from(text, *cursor, &needle) else {
        return;
    };
    items.push(IterItem {
        kind: child.kind(),
        depth,
        key,
        value: Span {
            offset,
            len: needle.len(),
        },
    });
    if matches!(child.kind(), ValueKind::Object | ValueKind::Array) {
        // Step inside the opening bracket so grandchildren match their
        // own occurrences, then skip the whole container afterwards.
        *cursor = offset + 1;
        walk(child, depth + 1, cursor, text, items);
    }
    *cursor = offset + needle.len();
}

fn find_from(text: &str, from: usize, needle: &str) -> Option<usize> {
    text.get(from..)?.find(needle).map(|i| i + from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsondoc_core::Parser;

    fn iter_of(text: &str) -> DocumentIterator {
        DocumentIterator::new(&Parser::parse(text).unwrap())
    }

    #[test]
    fn test_flat_object() {
        let mut it = iter_of(r#"{"a":1,"b":"x"}"#);
        let a = it.next().unwrap();
        assert_eq!((a.kind, a.depth), (ValueKind::Number, 0));
        assert_eq!(it.key_str(&a), Some("a"));
        assert_eq!(it.value_str(&a), "1");
        let b = it.next().unwrap();
        assert_eq!(it.key_str(&b), Some("b"));
        assert_eq!(it.value_str(&b), "\"x\"");
        assert!(it.next().is_none());
    }

    #[test]
    fn test_nested_depths_and_container_spans() {
        let it = iter_of(r#"{"a":1,"b":[true,null]}"#);
        let items = it.items().to_vec();
        assert_eq!(items.len(), 4);
        assert_eq!(items[1].kind, ValueKind::Array);
        assert_eq!(it.value_str(&items[1]), "[true,null]");
        assert_eq!(items[2].depth, 1);
        assert_eq!(items[2].key, None);
        assert_eq!(it.value_str(&items[2]), "true");
        assert_eq!(it.value_str(&items[3]), "null");
    }

    #[test]
    fn test_spans_index_snapshot_exactly() {
        let it = iter_of(r#"{"outer":{"inner":[1,[2]],"s":"[1,[2]]"}}"#);
        for item in it.items() {
            let text = it.value_str(item);
            // Every value span re-parses to the node it covers, except raw
            // key spans which are plain text.
            if matches!(item.kind, ValueKind::Object | ValueKind::Array) {
                assert!(Parser::parse(text).is_ok(), "span {text:?}");
            }
        }
    }

    #[test]
    fn test_duplicate_keys_and_values_get_distinct_spans() {
        let it = iter_of(r#"{"k":1,"k":1}"#);
        let items = it.items();
        assert_eq!(items.len(), 2);
        assert_ne!(items[0].value.offset, items[1].value.offset);
        assert_ne!(items[0].key, items[1].key);
    }

    #[test]
    fn test_repeated_subtree_spans_advance() {
        let it = iter_of(r#"[[1,2],[1,2]]"#);
        let items = it.items();
        // Two containers and their four elements.
        assert_eq!(items.len(), 6);
        assert_eq!(it.value_str(&items[0]), "[1,2]");
        assert_eq!(it.value_str(&items[3]), "[1,2]");
        assert!(items[3].value.offset > items[0].value.offset);
    }

    #[test]
    fn test_empty_containers_yield_nothing() {
        assert!(iter_of("{}").next().is_none());
        assert!(iter_of("[]").next().is_none());
    }

    #[test]
    fn test_scalar_root_yields_nothing() {
        assert!(iter_of("42").next().is_none());
    }
}

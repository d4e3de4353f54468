use crate::types::Segment;

/// Parses a `/`-delimited path into segments.
///
/// Segments are trimmed of surrounding whitespace and blank segments are
/// dropped, so `"a/b"`, `"/a/b"`, `"/a//b/"` and `" a / b "` all address
/// the same node. A token of the form `[n]` where `n` is a decimal index
/// becomes an array selector; anything else is an object key, taken
/// verbatim after trimming.
///
/// # Example
///
/// ```
/// use jsondoc_path::{parse_path, Segment};
///
/// assert_eq!(
///     parse_path("/a/[3]/b"),
///     vec![
///         Segment::Key("a".to_string()),
///         Segment::Index(3),
///         Segment::Key("b".to_string()),
///     ]
/// );
/// assert_eq!(parse_path(""), Vec::<Segment>::new());
/// ```
pub fn parse_path(path: &str) -> Vec<Segment> {
    path.split('/')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(parse_segment)
        .collect()
}

fn parse_segment(token: &str) -> Segment {
    if let Some(inner) = token.strip_prefix('[').and_then(|t| t.strip_suffix(']')) {
        if !inner.is_empty() && inner.bytes().all(|b| b.is_ascii_digit()) {
            // Digit runs too long for usize stay object keys.
            if let Ok(index) = inner.parse::<usize>() {
                return Segment::Index(index);
            }
        }
    }
    Segment::Key(token.to_string())
}

/// Formats segments back into a canonical `/`-prefixed path.
pub fn format_path(segments: &[Segment]) -> String {
    let mut out = String::new();
    for segment in segments {
        out.push('/');
        out.push_str(&segment.to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_segments_dropped() {
        assert_eq!(parse_path("//a///b//"), parse_path("a/b"));
        assert_eq!(parse_path("/"), Vec::<Segment>::new());
        assert_eq!(parse_path("   "), Vec::<Segment>::new());
    }

    #[test]
    fn test_segments_trimmed() {
        assert_eq!(parse_path(" a / [2] "), parse_path("a/[2]"));
    }

    #[test]
    fn test_index_selector_grammar() {
        assert_eq!(parse_path("[0]"), vec![Segment::Index(0)]);
        assert_eq!(parse_path("[10]"), vec![Segment::Index(10)]);
        // Not a pure decimal run: stays a key.
        assert_eq!(parse_path("[x]"), vec![Segment::Key("[x]".to_string())]);
        assert_eq!(parse_path("[-1]"), vec![Segment::Key("[-1]".to_string())]);
        assert_eq!(parse_path("[]"), vec![Segment::Key("[]".to_string())]);
        assert_eq!(parse_path("[1.5]"), vec![Segment::Key("[1.5]".to_string())]);
    }

    #[test]
    fn test_oversized_index_falls_back_to_key() {
        let token = "[99999999999999999999999999]";
        assert_eq!(parse_path(token), vec![Segment::Key(token.to_string())]);
    }

    #[test]
    fn test_format_round_trip() {
        let segments = parse_path("/a/[3]/b");
        assert_eq!(format_path(&segments), "/a/[3]/b");
        assert_eq!(parse_path(&format_path(&segments)), segments);
    }
}

//! Minification pre-pass: strips whitespace and comments without parsing.
//!
//! Useful for feeding relaxed, hand-edited input (config files with
//! comments) to the strict parser. String literals pass through untouched,
//! escapes included, so the pass never changes what the parser sees inside
//! them.

/// Removes insignificant whitespace, `//` line comments and `/* */` block
/// comments. Operates on raw text; no validation is performed, and an
/// unterminated string or comment simply runs to the end of input.
///
/// # Example
///
/// ```
/// use jsondoc_core::minify;
///
/// let relaxed = "{\n  \"a\": 1, // count\n  \"b\": [/* pad */ 2]\n}";
/// assert_eq!(minify(relaxed), r#"{"a":1,"b":[2]}"#);
/// ```
pub fn minify(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b' ' | b'\t' | b'\r' | b'\n' => i += 1,
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                i += 2;
                while i < bytes.len() && bytes[i] != b'\n' {
                    i += 1;
                }
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                i += 2;
                while i < bytes.len() {
                    if bytes[i] == b'*' && bytes.get(i + 1) == Some(&b'/') {
                        i += 2;
                        break;
                    }
                    i += 1;
                }
            }
            b'"' => {
                let start = i;
                i += 1;
                while i < bytes.len() {
                    match bytes[i] {
                        b'\\' => i = (i + 2).min(bytes.len()),
                        b'"' => {
                            i += 1;
                            break;
                        }
                        _ => i += 1,
                    }
                }
                // Slice ends are quote or escape boundaries, both ASCII.
                out.push_str(&text[start..i]);
            }
            _ => {
                // The current byte is kept even when it is a lone '/'.
                let start = i;
                i += 1;
                while i < bytes.len()
                    && !matches!(bytes[i], b' ' | b'\t' | b'\r' | b'\n' | b'/' | b'"')
                {
                    i += 1;
                }
                out.push_str(&text[start..i]);
            }
        }
    }
    out
}

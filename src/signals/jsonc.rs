//! Tolerant JSON parsing for manifests and tsconfig files.
//!
//! Real-world `tsconfig.json` and `package.json` files carry comments and
//! trailing commas. Malformed input yields `None`; extraction proceeds with
//! partial data.

/// Parse JSON after stripping comments and trailing commas.
#[must_use]
pub fn parse_lenient(text: &str) -> Option<serde_json::Value> {
    let stripped = strip_jsonc(text);
    serde_json::from_str(&stripped).ok()
}

/// Removes `//` and `/* */` comments (outside strings) and trailing commas.
#[must_use]
pub fn strip_jsonc(text: &str) -> String {
    let bytes = text.strip_prefix('\u{feff}').unwrap_or(text).as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    let mut in_string = false;

    while i < bytes.len() {
        let b = bytes[i];
        if in_string {
            out.push(b);
            if b == b'\\' && i + 1 < bytes.len() {
                out.push(bytes[i + 1]);
                i += 2;
                continue;
            }
            if b == b'"' {
                in_string = false;
            }
            i += 1;
            continue;
        }
        match b {
            b'"' => {
                in_string = true;
                out.push(b);
                i += 1;
            }
            b'/' if i + 1 < bytes.len() && bytes[i + 1] == b'/' => {
                while i < bytes.len() && bytes[i] != b'\n' {
                    i += 1;
                }
            }
            b'/' if i + 1 < bytes.len() && bytes[i + 1] == b'*' => {
                i += 2;
                while i + 1 < bytes.len() && !(bytes[i] == b'*' && bytes[i + 1] == b'/') {
                    i += 1;
                }
                i = (i + 2).min(bytes.len());
            }
            b',' => {
                // Trailing comma: drop when the next significant byte closes
                // an object or array.
                let mut j = i + 1;
                while j < bytes.len() && bytes[j].is_ascii_whitespace() {
                    j += 1;
                }
                if j < bytes.len() && (bytes[j] == b'}' || bytes[j] == b']') {
                    i += 1;
                } else {
                    out.push(b);
                    i += 1;
                }
            }
            _ => {
                out.push(b);
                i += 1;
            }
        }
    }

    String::from_utf8_lossy(&out).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_json_passes_through() {
        let value = parse_lenient(r#"{"a": 1, "b": [true]}"#).unwrap();
        assert_eq!(value["a"], 1);
    }

    #[test]
    fn test_line_comments_stripped() {
        let value = parse_lenient("{\n  // comment\n  \"a\": 1\n}").unwrap();
        assert_eq!(value["a"], 1);
    }

    #[test]
    fn test_block_comments_stripped() {
        let value = parse_lenient(r#"{ /* c */ "a": 1 }"#).unwrap();
        assert_eq!(value["a"], 1);
    }

    #[test]
    fn test_trailing_commas_removed() {
        let value = parse_lenient("{\"a\": [1, 2,],}").unwrap();
        assert_eq!(value["a"][1], 2);
    }

    #[test]
    fn test_slashes_inside_strings_kept() {
        let value = parse_lenient(r#"{"url": "https://example.com//x"}"#).unwrap();
        assert_eq!(value["url"], "https://example.com//x");
    }

    #[test]
    fn test_escaped_quote_inside_string() {
        let value = parse_lenient(r#"{"a": "say \"hi\" // not a comment"}"#).unwrap();
        assert_eq!(value["a"], "say \"hi\" // not a comment");
    }

    #[test]
    fn test_malformed_input_yields_none() {
        assert!(parse_lenient("{not json").is_none());
    }

    #[test]
    fn test_bom_stripped() {
        let value = parse_lenient("\u{feff}{\"a\": 1}").unwrap();
        assert_eq!(value["a"], 1);
    }
}

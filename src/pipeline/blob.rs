use crate::error::{PipelineError, Result, ANCHOR};

/// Locate the embedded JSON blob inside a saved page's text.
///
/// The blob is a single `{...}` or `[...]` value assigned to the anchor
/// variable somewhere inside a `<script>` tag, surrounded by arbitrary other
/// script content. Returns the balanced slice containing exactly that value.
pub fn locate_blob(html: &str) -> Result<&str> {
    let anchor_at = html.find(ANCHOR).ok_or(PipelineError::BlobNotFound)?;
    let after = &html[anchor_at + ANCHOR.len()..];

    // Skip "= " between the anchor and the value.
    let rest = after.trim_start();
    let rest = rest
        .strip_prefix('=')
        .ok_or_else(|| PipelineError::BlobMalformed("no assignment after anchor".into()))?
        .trim_start();

    let open = rest.bytes().next();
    if !matches!(open, Some(b'{') | Some(b'[')) {
        return Err(PipelineError::BlobMalformed(
            "anchor is not followed by an object or array".into(),
        ));
    }

    let end = balanced_end(rest).ok_or_else(|| {
        PipelineError::BlobMalformed("braces never balance before end of input".into())
    })?;
    Ok(&rest[..end])
}

/// Byte offset one past the point where brace/bracket depth returns to zero,
/// ignoring braces inside JSON string literals. `None` if depth never closes.
fn balanced_end(s: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, b) in s.bytes().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'{' | b'[' => depth += 1,
            b'}' | b']' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
    }
    None
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blob_between_other_scripts() {
        let html = r#"<script>var x = 1;</script>
<script>window.__INITIAL_STATE__ = {"a": {"b": [1, 2]}};window.other = 5;</script>"#;
        assert_eq!(locate_blob(html).unwrap(), r#"{"a": {"b": [1, 2]}}"#);
    }

    #[test]
    fn braces_inside_strings_ignored() {
        let html = r#"window.__INITIAL_STATE__ = {"name": "odd } text { here", "n": 1};"#;
        let blob = locate_blob(html).unwrap();
        assert_eq!(blob, r#"{"name": "odd } text { here", "n": 1}"#);
        serde_json::from_str::<serde_json::Value>(blob).unwrap();
    }

    #[test]
    fn escaped_quote_inside_string() {
        let html = r#"window.__INITIAL_STATE__ = {"q": "she said \"hi\" {"};"#;
        let blob = locate_blob(html).unwrap();
        serde_json::from_str::<serde_json::Value>(blob).unwrap();
    }

    #[test]
    fn array_blob() {
        let html = r#"window.__INITIAL_STATE__ = [{"a": 1}, {"b": 2}];"#;
        assert_eq!(locate_blob(html).unwrap(), r#"[{"a": 1}, {"b": 2}]"#);
    }

    #[test]
    fn missing_anchor() {
        let err = locate_blob("<html><body>nothing here</body></html>").unwrap_err();
        assert!(matches!(err, PipelineError::BlobNotFound));
    }

    #[test]
    fn unbalanced_braces() {
        let html = r#"window.__INITIAL_STATE__ = {"a": {"b": 1}"#;
        let err = locate_blob(html).unwrap_err();
        assert!(matches!(err, PipelineError::BlobMalformed(_)));
    }

    #[test]
    fn anchor_without_value() {
        let html = "window.__INITIAL_STATE__ = somethingElse;";
        let err = locate_blob(html).unwrap_err();
        assert!(matches!(err, PipelineError::BlobMalformed(_)));
    }

    #[test]
    fn balanced_slice_is_balanced() {
        let html = r#"prefix window.__INITIAL_STATE__ = {"a": [[{}], {"b": "}"}]}; suffix"#;
        let blob = locate_blob(html).unwrap();
        assert_eq!(balanced_end(blob), Some(blob.len()));
    }
}

//! Locating the JSON answer inside free-form model output.

/// Return the first balanced `{...}` object in `text`.
///
/// Depth is tracked per brace, and braces inside JSON string literals
/// (including escaped quotes) are ignored. A `{` that never closes, such as a
/// stray brace in prose, is skipped and the scan restarts at the next `{`.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let mut from = 0;

    while let Some(pos) = text[from..].find('{') {
        let start = from + pos;
        if let Some(len) = balanced_len(&text[start..]) {
            return Some(&text[start..start + len]);
        }
        from = start + 1;
    }

    None
}

/// Byte length of the object opening at the start of `text`, if it closes.
fn balanced_len(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(offset + ch.len_utf8());
                }
            }
            _ => {}
        }
    }

    None
}

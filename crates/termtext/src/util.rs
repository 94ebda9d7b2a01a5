//! Utility functions for JSON bodies and color conversion.

/// Converts an RGB triplet to the nearest ANSI 256-color palette index.
///
/// # Example
///
/// ```rust
/// use termtext::rgb_to_ansi256;
///
/// // Pure red maps to ANSI 196
/// assert_eq!(rgb_to_ansi256((255, 0, 0)), 196);
///
/// // Pure green maps to ANSI 46
/// assert_eq!(rgb_to_ansi256((0, 255, 0)), 46);
/// ```
pub fn rgb_to_ansi256((r, g, b): (u8, u8, u8)) -> u8 {
    if r == g && g == b {
        if r < 8 {
            16
        } else if r > 248 {
            231
        } else {
            232 + ((r as u16 - 8) * 24 / 247) as u8
        }
    } else {
        let red = (r as u16 * 5 / 255) as u8;
        let green = (g as u16 * 5 / 255) as u8;
        let blue = (b as u16 * 5 / 255) as u8;
        16 + 36 * red + 6 * green + blue
    }
}

/// Re-indents a JSON document with two-space indentation.
///
/// Only whitespace outside strings changes: number text, key order and
/// duplicate keys come through exactly as sent. Empty objects and arrays stay
/// on one line. The document is validated first, so anything that is not a
/// single JSON value is an error.
///
/// # Example
///
/// ```rust
/// use termtext::indent_json;
///
/// assert_eq!(indent_json(br#"{"a":1}"#).unwrap(), "{\n  \"a\": 1\n}");
/// assert_eq!(indent_json(br#"[1e3, 1.10]"#).unwrap(), "[\n  1e3,\n  1.10\n]");
/// assert!(indent_json(b"not json").is_err());
/// ```
pub fn indent_json(body: &[u8]) -> Result<String, serde_json::Error> {
    serde_json::from_slice::<serde::de::IgnoredAny>(body)?;
    Ok(String::from_utf8_lossy(&reindent(body)).into_owned())
}

fn reindent(src: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(src.len() * 2);
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    // Set after `{` or `[` until the first member decides whether it is empty.
    let mut open = false;

    for &b in src {
        if in_string {
            out.push(b);
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }
        if matches!(b, b' ' | b'\t' | b'\n' | b'\r') {
            continue;
        }
        if open && b != b'}' && b != b']' {
            open = false;
            depth += 1;
            newline(&mut out, depth);
        }
        match b {
            b'"' => {
                in_string = true;
                out.push(b);
            }
            b'{' | b'[' => {
                out.push(b);
                open = true;
            }
            b'}' | b']' => {
                if open {
                    open = false;
                } else {
                    depth = depth.saturating_sub(1);
                    newline(&mut out, depth);
                }
                out.push(b);
            }
            b',' => {
                out.push(b);
                newline(&mut out, depth);
            }
            b':' => out.extend_from_slice(b": "),
            _ => out.push(b),
        }
    }
    out
}

fn newline(out: &mut Vec<u8>, depth: usize) {
    out.push(b'\n');
    out.resize(out.len() + depth * 2, b' ');
}

/// Formats a list of strings the way header values are shown: `[a b]`.
pub(crate) fn bracket_list(values: &[String]) -> String {
    format!("[{}]", values.join(" "))
}

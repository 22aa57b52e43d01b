//! Filesystem-safe character replacement and raw length truncation.

/// Replaces every character that is not alphanumeric, `.`, `-` or `_` with `_`.
///
/// One-for-one: runs of unsafe characters are not collapsed, so the output has
/// exactly as many characters as the input.
pub fn replace_unsafe_chars(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Keeps at most `max_chars` characters of `name`.
///
/// Counts Unicode scalar values, not bytes or grapheme clusters, and ignores any
/// semantic boundary (extension, combining marks).
pub fn truncate_chars(name: &str, max_chars: usize) -> &str {
    match name.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &name[..byte_idx],
        None => name,
    }
}

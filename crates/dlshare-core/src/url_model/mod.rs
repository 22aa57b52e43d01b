//! URL modeling and file name derivation.
//!
//! Derives the download file name from the whole URL string: unsafe characters
//! become `_`, then the name is cut to a character budget.

mod path;
mod sanitize;

pub use path::prepare_temporary_file;
pub use sanitize::{replace_unsafe_chars, truncate_chars};

/// Default maximum length of a derived file name, in characters.
pub const DEFAULT_MAX_NAME_CHARS: usize = 80;

/// Derives the file name for `url`: every unsafe character replaced by `_`,
/// then truncated to `max_chars` characters. Same URL, same name.
///
/// # Examples
///
/// - `file_name_for_url("https://example.com/cat.png", 80)` → `"https___example.com_cat.png"`
pub fn file_name_for_url(url: &str, max_chars: usize) -> String {
    let safe = replace_unsafe_chars(url);
    truncate_chars(&safe, max_chars).to_string()
}

//! Parameter checks run before any request leaves the client.

use crate::error::Error;

/// Longest file name the service accepts.
pub const MAX_FILE_NAME_LEN: usize = 255;

/// Whitespace as the service counts it: no-break spaces are not blank,
/// the ASCII separator controls U+001C..U+001F are.
fn is_blank_char(c: char) -> bool {
    match c {
        '\u{1C}'..='\u{1F}' => true,
        '\u{85}' | '\u{A0}' | '\u{2007}' | '\u{202F}' => false,
        c => c.is_whitespace(),
    }
}

fn is_blank(value: &str) -> bool {
    value.chars().all(is_blank_char)
}

pub(crate) fn require_non_blank(value: &str, name: &str) -> Result<(), Error> {
    if is_blank(value) {
        return Err(Error::InvalidArgument(format!(
            "{name} must not be null or blank"
        )));
    }
    Ok(())
}

/// An id that ends up as a URL path segment. `.` and `..` would be resolved
/// away and hit another endpoint.
pub(crate) fn require_path_id(value: &str, name: &str) -> Result<(), Error> {
    require_non_blank(value, name)?;
    if value == "." || value == ".." {
        return Err(Error::InvalidArgument(format!(
            "{name} must not be a relative path segment"
        )));
    }
    Ok(())
}

/// Length is counted in characters, not bytes.
pub(crate) fn require_max_length(
    value: Option<&str>,
    max_len: usize,
    name: &str,
) -> Result<(), Error> {
    match value {
        Some(v) if v.chars().count() > max_len => Err(Error::InvalidArgument(format!(
            "{name} must not exceed {max_len} characters"
        ))),
        _ => Ok(()),
    }
}

pub(crate) fn require_non_empty_ids<S: AsRef<str>>(ids: &[S], name: &str) -> Result<(), Error> {
    if ids.is_empty() {
        return Err(Error::InvalidArgument(format!(
            "{name} must not be null or empty"
        )));
    }
    for (i, id) in ids.iter().enumerate() {
        if is_blank(id.as_ref()) {
            return Err(Error::InvalidArgument(format!(
                "{name}[{i}] must not be null or blank"
            )));
        }
    }
    Ok(())
}

//! Category name sanitizing
//!
//! The sanitized name, not the caller's string, selects the output file, so
//! distinct raw names may share a file (`"a/b"` and `"a b"` both map to `a_b`).

/// Longest sanitized category name, in characters
pub const MAX_CATEGORY_LEN: usize = 100;

/// Name used for an empty category
pub const DEFAULT_CATEGORY: &str = "default";

/// Map a caller-supplied category onto a filesystem-safe token
///
/// Characters outside `[A-Za-z0-9_-]` become `_`, the result is cut to
/// [`MAX_CATEGORY_LEN`], and an empty string becomes `"default"`.
///
/// ```
/// use channel_logger::router::sanitize_category;
///
/// assert_eq!(sanitize_category("package/with/slashes"), "package_with_slashes");
/// assert_eq!(sanitize_category(""), "default");
/// ```
#[must_use]
pub fn sanitize_category(raw: &str) -> String {
    if raw.is_empty() {
        return DEFAULT_CATEGORY.to_string();
    }

    raw.chars()
        .take(MAX_CATEGORY_LEN)
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

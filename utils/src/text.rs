//! Provides helper methods to work with displayed text.

use std::borrow::Cow;

/// The marker appended to truncated text.
pub const ELLIPSIS: char = '\u{2026}';

/// Truncates a string to at most `len` characters (in terms of [`char`], not [`u8`]).
/// If a truncation happens, the last kept character is replaced by an ellipsis.
///
/// Borrowed input is only copied if it needs to be truncated.
///
/// # Panics
///
/// Panics if `len` is zero.
///
/// # Examples
///
/// ```
/// # use std::borrow::Cow;
/// # use utils::text::truncate;
/// let long = truncate("hello world", 11);
/// let short = truncate("hello world", 6);
/// assert!(matches!(long, Cow::Borrowed("hello world")));
/// assert_eq!(short, "hello…");
/// ```
pub fn truncate<'a>(text: impl Into<Cow<'a, str>>, len: usize) -> Cow<'a, str> {
    assert!(len >= 1, "cannot truncate to less than 1 character");

    let mut text = text.into();
    if let Some(end_at) = find_truncate_at(&text, len) {
        let owned = text.to_mut();
        owned.truncate(end_at);
        owned.push(ELLIPSIS);
    }

    text
}

/// Finds the byte index to cut at so that the ellipsis still fits within `len` characters.
/// Returns [`None`] if the text is short enough already.
fn find_truncate_at(text: &str, len: usize) -> Option<usize> {
    if text.len() <= len {
        return None;
    }

    let mut indices = text.char_indices();
    let (end_at, _) = indices.nth(len - 1)?;
    indices.next().and(Some(end_at))
}

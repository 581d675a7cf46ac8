/// Returned for a missing or empty title.
pub const UNTITLED: &str = "untitled";

/// Builds a lowercase, hyphen-separated slug.
///
/// Anything outside `[a-z0-9]`, whitespace and `-` is dropped after
/// lowercasing, so accented letters disappear instead of being
/// transliterated. Runs of whitespace and hyphens become a single hyphen and
/// hyphens at either end are stripped. A non-empty title made only of
/// symbols yields an empty slug; only `None` or `""` yield [`UNTITLED`].
pub fn slugify(text: Option<&str>) -> String {
    let text = match text {
        Some(text) if !text.is_empty() => text,
        _ => return UNTITLED.to_string(),
    };

    let mut slug = String::with_capacity(text.len());
    let mut pending_separator = false;

    for c in text.to_lowercase().chars() {
        if is_separator(c) {
            pending_separator = true;
        } else if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(c);
        }
    }

    slug
}

// Whitespace as matched by `\s` in JavaScript-style regexes, plus the hyphen.
// U+0085 is White_Space in Unicode but not in that class.
fn is_separator(c: char) -> bool {
    c == '-' || c == '\u{feff}' || (c.is_whitespace() && c != '\u{0085}')
}

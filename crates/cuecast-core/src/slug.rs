//! Normalizes free-form strings (tool names, operations, hints) into the
//! lowercase, hyphenated tokens used to build [`crate::LogicalPath`]s.

/// Lowercases `raw`, replaces whitespace and underscores with hyphens,
/// drops any character outside `[a-z0-9-]`, collapses repeated hyphens,
/// and trims leading/trailing hyphens.
pub fn slugify(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut last_was_hyphen = false;

    for ch in raw.trim().chars() {
        let mapped = if ch.is_ascii_alphanumeric() {
            Some(ch.to_ascii_lowercase())
        } else if ch.is_whitespace() || ch == '_' || ch == '-' {
            Some('-')
        } else {
            None
        };

        match mapped {
            Some('-') if last_was_hyphen => {}
            Some('-') => {
                out.push('-');
                last_was_hyphen = true;
            }
            Some(c) => {
                out.push(c);
                last_was_hyphen = false;
            }
            None => {}
        }
    }

    out.trim_matches('-').to_string()
}

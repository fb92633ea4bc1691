//! Markup whitespace collapsing
//!
//! Squeezes indentation and line breaks out of a markup shell while leaving
//! text content alone.

/// Collapse inter-tag whitespace in a markup string.
///
/// Joins all lines with their leading/trailing whitespace trimmed, then
/// removes any whitespace run that sits directly between a `>` and a `<`.
/// Whitespace inside text content (not bounded by tags on both sides) is
/// preserved.
pub fn collapse(markup: &str) -> String {
    let joined: String = markup
        .lines()
        .map(str::trim)
        .collect::<Vec<_>>()
        .concat();

    let mut out = String::with_capacity(joined.len());
    let mut chars = joined.chars().peekable();
    while let Some(c) = chars.next() {
        if c.is_whitespace() && out.ends_with('>') {
            let mut run = String::new();
            run.push(c);
            while let Some(&next) = chars.peek() {
                if next.is_whitespace() {
                    run.push(next);
                    chars.next();
                } else {
                    break;
                }
            }
            if chars.peek() != Some(&'<') {
                out.push_str(&run);
            }
        } else {
            out.push(c);
        }
    }
    out
}

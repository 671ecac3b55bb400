/// Canonical comparison key for a display name.
///
/// Lowercases, drops every whitespace character and every `.`, then removes
/// parenthesized groups such as `(Guest)`. A group runs from a `(` to the
/// nearest `)` after it; a `(` with no closing partner is kept as-is.
///
/// The key is only ever compared for equality and must never be shown.
pub fn normalize_name(name: &str) -> String {
    let compact: String = name
        .to_lowercase()
        .chars()
        .filter(|c| !is_name_whitespace(*c) && *c != '.')
        .collect();
    strip_parenthesized(&compact)
}

/// Whether two names refer to the same person after normalization.
pub fn names_match(a: &str, b: &str) -> bool {
    normalize_name(a) == normalize_name(b)
}

/// The whitespace set browsers use for `trim()` and `\s`: Unicode White_Space
/// minus NEXT LINE (U+0085), plus the zero-width no-break space (U+FEFF).
pub(crate) fn is_name_whitespace(c: char) -> bool {
    (c.is_whitespace() && c != '\u{85}') || c == '\u{feff}'
}

fn strip_parenthesized(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(open) = rest.find('(') {
        out.push_str(&rest[..open]);
        let after_open = &rest[open + 1..];
        match after_open.find(')') {
            Some(close) => rest = &after_open[close + 1..],
            None => {
                out.push_str(&rest[open..]);
                return out;
            }
        }
    }
    out.push_str(rest);
    out
}

const REGEX_META: &[char] = &['\\', '.', '?', '*', '+', '{', '}', '(', ')', '[', ']'];

const SHELL_META: &[char] = &[
    ' ', '\t', '\n', '\'', '"', '`', '$', '\\', '!', '&', '|', ';', '<', '>', '(', ')', '{', '}',
    '[', ']', '*', '?', '~', '#',
];

/// Escapes `s` so that it matches itself literally inside a regular
/// expression. Not idempotent: escape exactly once per raw value.
pub fn escape_regex(s: &str) -> String {
    escape_with(s, REGEX_META)
}

/// Escapes `s` for verbatim inclusion in a rendered shell command line.
/// Not idempotent, same caveat as [`escape_regex`].
pub fn escape_shell(s: &str) -> String {
    escape_with(s, SHELL_META)
}

fn escape_with(s: &str, table: &[char]) -> String {
    // Single pass, so a backslash in the input is escaped before any
    // backslash this function adds.
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if table.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

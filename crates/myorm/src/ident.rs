//! Backtick-delimited SQL identifiers.
//!
//! Table and column names are always delimited; embedded backticks are
//! escaped by doubling, so a name can never break out of its delimiters.

/// Render an identifier as delimited SQL.
pub fn quote(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 2);
    write_quoted(name, &mut out);
    out
}

pub(crate) fn write_quoted(name: &str, out: &mut String) {
    out.push('`');
    for ch in name.chars() {
        if ch == '`' {
            out.push_str("``");
        } else {
            out.push(ch);
        }
    }
    out.push('`');
}

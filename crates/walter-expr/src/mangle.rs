//! Mangling for storage backends that forbid `/` in attribute names.
//!
//! Alembic attribute names cannot contain `/`, so expressions are written
//! with `\` in place of `/` and converted back on read. Because that round
//! trip eats regex escapes, [`convert_regex`] rewrites the short character
//! classes into explicit bracket classes before an expression is stored.

/// Replace every `/` with `\` for storage in an attribute name.
pub fn mangle(path: &str) -> String {
    path.replace('/', "\\")
}

/// Replace every `\` with `/`, undoing [`mangle`].
pub fn demangle(text: &str) -> String {
    text.replace('\\', "/")
}

/// Rewrite backslash character classes into bracket classes.
///
/// `\d`, `\D`, `\w`, and `\W` would be destroyed by the slash/backslash
/// round trip, so they are expanded to `[0-9]`, `[^0-9]`, `[a-zA-Z0-9_]`,
/// and `[^a-zA-Z0-9_]`.
pub fn convert_regex(expression: &str) -> String {
    expression
        .replace("\\d", "[0-9]")
        .replace("\\D", "[^0-9]")
        .replace("\\w", "[a-zA-Z0-9_]")
        .replace("\\W", "[^a-zA-Z0-9_]")
}

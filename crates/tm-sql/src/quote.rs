//! SQL identifier quoting utilities
//!
//! Tidemark builds a handful of statements itself (the bookkeeping table
//! holding the version marker). Table and column names come from
//! configuration, so they are validated and quoted before use.

/// Quote a SQL identifier to prevent injection.
///
/// Wraps the identifier in double quotes and escapes any embedded double quotes
/// by doubling them, following the SQL standard.
///
/// # Examples
/// ```
/// use tm_sql::quote_ident;
/// assert_eq!(quote_ident("tm_version"), r#""tm_version""#);
/// assert_eq!(quote_ident(r#"my"table"#), r#""my""table""#);
/// ```
pub fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// Check that `ident` is a plain SQL identifier: a letter or underscore
/// followed by letters, digits or underscores.
pub fn is_valid_identifier(ident: &str) -> bool {
    let mut chars = ident.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

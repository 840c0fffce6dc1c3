//! String utility functions for common string operations.

/// Whether a Go identifier is exported.
///
/// A name is public exactly when its first character is an uppercase
/// letter. This is purely lexical.
///
/// # Example
///
/// ```
/// use gosig::string_utils::is_exported;
///
/// assert!(is_exported("Reader"));
/// assert!(!is_exported("reader"));
/// assert!(!is_exported("_Reader"));
/// ```
pub fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}

//! Small string helpers.

/// Convert lowerCamelCase to UPPER_SNAKE_CASE.
///
/// # Examples
/// ```
/// use typefacade::utils::lower_camel_to_upper_snake;
/// assert_eq!(lower_camel_to_upper_snake("int"), "INT");
/// assert_eq!(lower_camel_to_upper_snake("fooBarBaz"), "FOO_BAR_BAZ");
/// ```
pub fn lower_camel_to_upper_snake(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    for (i, c) in s.chars().enumerate() {
        if c.is_ascii_uppercase() && i > 0 && !result.ends_with('_') {
            result.push('_');
        }
        result.push(c.to_ascii_uppercase());
    }
    result
}

//! General string helpers shared across crates.
//!
//! Vue lets a component be referenced as `user-card` in a template while it
//! is registered as `UserCard` in script, and props follow the same
//! camelCase/kebab-case duality. These helpers convert between the forms.

use compact_str::CompactString;

/// Convert kebab-case, snake_case, or camelCase to PascalCase.
///
/// ```
/// use vize_carton::to_pascal_case;
///
/// assert_eq!(to_pascal_case("my-component"), "MyComponent");
/// assert_eq!(to_pascal_case("myComponent"), "MyComponent");
/// assert_eq!(to_pascal_case("MyComponent"), "MyComponent");
/// ```
pub fn to_pascal_case(s: &str) -> CompactString {
    let mut result = CompactString::with_capacity(s.len());
    let mut capitalize_next = true;

    for c in s.chars() {
        if c == '-' || c == '_' {
            capitalize_next = true;
        } else if capitalize_next {
            result.push(c.to_ascii_uppercase());
            capitalize_next = false;
        } else {
            result.push(c);
        }
    }

    result
}

/// Convert kebab-case to camelCase.
pub fn camelize(s: &str) -> CompactString {
    let mut result = CompactString::with_capacity(s.len());
    let mut upper_next = false;

    for c in s.chars() {
        if c == '-' {
            upper_next = true;
        } else if upper_next {
            result.push(c.to_ascii_uppercase());
            upper_next = false;
        } else {
            result.push(c);
        }
    }

    result
}

/// Convert camelCase or PascalCase to kebab-case.
///
/// ```
/// use vize_carton::hyphenate;
///
/// assert_eq!(hyphenate("UserCard"), "user-card");
/// assert_eq!(hyphenate("modelValue"), "model-value");
/// ```
pub fn hyphenate(s: &str) -> CompactString {
    let mut result = CompactString::with_capacity(s.len() + 4);

    for (i, c) in s.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 {
                result.push('-');
            }
            result.push(c.to_ascii_lowercase());
        } else {
            result.push(c);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_pascal_case() {
        assert_eq!(to_pascal_case("el-button"), "ElButton");
        assert_eq!(to_pascal_case("base_input"), "BaseInput");
        assert_eq!(to_pascal_case(""), "");
    }

    #[test]
    fn test_camelize() {
        assert_eq!(camelize("on-click"), "onClick");
        assert_eq!(camelize("value"), "value");
    }

    #[test]
    fn test_hyphenate_round_trip() {
        assert_eq!(hyphenate("ElButton"), "el-button");
        assert_eq!(to_pascal_case(&hyphenate("ElButton")), "ElButton");
    }
}

//! Composable field validation.
//!
//! Each validator is a pure function from a (pre-trimmed) field value to an
//! optional [`Violation`]. Handlers collect violations from the validators
//! relevant to a request and reject before touching storage.

use serde::Serialize;

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub field: &'static str,
    pub message: String,
}

impl Violation {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Username: 3–50 characters, letters/digits/hyphen/underscore only.
pub fn username(value: &str) -> Option<Violation> {
    // Character counts, not byte lengths: "ñññ" is three characters.
    let length = value.chars().count();
    if length < 3 || length > 50 {
        return Some(Violation::new("username", "Username must be 3-50 characters"));
    }
    if !value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Some(Violation::new(
            "username",
            "Username can only contain letters, numbers, hyphens and underscores",
        ));
    }
    None
}

/// Email: minimal structural check (one `@`, non-empty local part, a dot in
/// the domain). Uniqueness is a storage concern, not a shape concern.
pub fn email(value: &str) -> Option<Violation> {
    let valid = match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !value.contains(char::is_whitespace)
        }
        None => false,
    };

    if valid {
        None
    } else {
        Some(Violation::new("email", "Please provide a valid email"))
    }
}

/// Password: minimum length only. The hash, not the password, is stored.
pub fn password(value: &str, min_length: usize) -> Option<Violation> {
    if value.chars().count() < min_length {
        return Some(Violation::new(
            "password",
            format!("Password must be at least {min_length} characters"),
        ));
    }
    None
}

/// Password presence (login path: no minimum-length hint is given).
pub fn password_present(value: &str) -> Option<Violation> {
    if value.is_empty() {
        return Some(Violation::new("password", "Password is required"));
    }
    None
}

/// Post title: required, at most 200 characters, no markup-breaking `<`/`>`.
pub fn post_title(value: &str) -> Option<Violation> {
    if value.is_empty() {
        return Some(Violation::new("title", "Title is required"));
    }
    if value.chars().count() > 200 {
        return Some(Violation::new("title", "Title max length is 200 characters"));
    }
    if value.contains(['<', '>']) {
        return Some(Violation::new("title", "Title contains invalid characters"));
    }
    None
}

/// Post content: required, at most 10000 characters.
pub fn post_content(value: &str) -> Option<Violation> {
    if value.is_empty() {
        return Some(Violation::new("content", "Content is required"));
    }
    if value.chars().count() > 10_000 {
        return Some(Violation::new(
            "content",
            "Content max length is 10000 characters",
        ));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_rules() {
        assert!(username("alice").is_none());
        assert!(username("a-l_1ce").is_none());
        assert!(username("ab").is_some());
        assert!(username(&"x".repeat(51)).is_some());
        assert!(username("al ice").is_some());
        assert!(username("al!ce").is_some());
    }

    #[test]
    fn email_rules() {
        assert!(email("alice@example.com").is_none());
        assert!(email("a.b+c@sub.example.org").is_none());
        assert!(email("not-an-email").is_some());
        assert!(email("@example.com").is_some());
        assert!(email("alice@").is_some());
        assert!(email("alice@nodot").is_some());
        assert!(email("alice@.com").is_some());
        assert!(email("al ice@example.com").is_some());
    }

    #[test]
    fn password_rules() {
        assert!(password("123456", 6).is_none());
        assert!(password("12345", 6).is_some());
        assert!(password_present("x").is_none());
        assert!(password_present("").is_some());
    }

    #[test]
    fn title_rules() {
        assert!(post_title("Hello world").is_none());
        assert!(post_title("").is_some());
        assert!(post_title(&"t".repeat(201)).is_some());
        assert_eq!(
            post_title("<script>").unwrap().message,
            "Title contains invalid characters"
        );
    }

    #[test]
    fn content_rules() {
        assert!(post_content("body").is_none());
        assert!(post_content("").is_some());
        assert!(post_content(&"c".repeat(10_001)).is_some());
    }

    #[test]
    fn lengths_are_counted_in_characters_not_bytes() {
        // Three characters, six bytes.
        assert!(password("ñññ", 6).is_some());
        assert!(password("ñññ123", 6).is_none());

        // A ten-character multibyte username clears the length rule and is
        // reported against the charset rule instead.
        assert_eq!(
            username(&"ñ".repeat(10)).unwrap().message,
            "Username can only contain letters, numbers, hyphens and underscores"
        );
    }

    #[test]
    fn violations_carry_field_names() {
        let v = username("!").unwrap();
        assert_eq!(v.field, "username");
    }
}

use regex::Regex;
use std::sync::OnceLock;

use crate::error::ValidationErrors;

/// Records `"<label> is required."` when `value` is blank.
pub(crate) fn require(errors: &mut ValidationErrors, field: &'static str, label: &str, value: &str) {
    if value.trim().is_empty() {
        errors.push(field, format!("{label} is required."));
    }
}

/// Like [`require`], and additionally rejects anything that is not an absolute http(s) URL.
pub(crate) fn require_url(
    errors: &mut ValidationErrors,
    field: &'static str,
    label: &str,
    value: &str,
) {
    if value.trim().is_empty() {
        errors.push(field, format!("{label} is required."));
    } else if !is_http_url(value) {
        errors.push(field, format!("{label} must be a valid URL."));
    }
}

pub(crate) fn is_http_url(value: &str) -> bool {
    match url::Url::parse(value.trim()) {
        Ok(u) => matches!(u.scheme(), "http" | "https") && u.host_str().is_some(),
        Err(_) => false,
    }
}

fn email_pattern() -> Option<&'static Regex> {
    static EMAIL: OnceLock<Option<Regex>> = OnceLock::new();
    EMAIL
        .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok())
        .as_ref()
}

pub(crate) fn is_email(value: &str) -> bool {
    email_pattern().is_some_and(|re| re.is_match(value))
}

/// Length in characters, not bytes.
pub(crate) fn char_len(value: &str) -> usize {
    value.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_email() {
        assert!(is_email("a@b.com"));
        assert!(is_email("reader.one@quirkitopia.space"));
        assert!(!is_email("a@b"));
        assert!(!is_email("a b@c.com"));
        assert!(!is_email("@b.com"));
        assert!(!is_email(""));
    }

    #[test]
    fn test_is_http_url() {
        assert!(is_http_url("https://www.goodreads.com/book/show/1"));
        assert!(is_http_url("http://example.com"));
        assert!(!is_http_url("ftp://example.com/file"));
        assert!(!is_http_url("www.example.com"));
        assert!(!is_http_url("javascript:alert(1)"));
    }

    #[test]
    fn test_require_treats_whitespace_as_missing() {
        let mut errors = ValidationErrors::new();
        require(&mut errors, "title", "Title", "   ");
        assert_eq!(errors.get("title"), Some("Title is required."));
    }

    #[test]
    fn test_require_url_messages() {
        let mut errors = ValidationErrors::new();
        require_url(&mut errors, "link", "Link", "");
        require_url(&mut errors, "channelUrl", "Channel URL", "not a url");
        assert_eq!(errors.get("link"), Some("Link is required."));
        assert_eq!(errors.get("channelUrl"), Some("Channel URL must be a valid URL."));
    }

    #[test]
    fn test_char_len_counts_characters() {
        assert_eq!(char_len("Zoë"), 3);
        assert_eq!(char_len("思想"), 2);
    }
}

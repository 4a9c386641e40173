// Input checks shared by project drafts and change requests

use std::sync::LazyLock;

use regex::Regex;

use crate::error::ValidationError;

static SOURCE_URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^https?://").expect("valid regex"));

/// Trims a title and rejects it when nothing is left.
pub fn validate_title(title: &str) -> Result<String, ValidationError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    Ok(trimmed.to_string())
}

/// Returns true when `url` starts with `http://` or `https://`, ignoring case.
pub fn is_source_url(url: &str) -> bool {
    SOURCE_URL_RE.is_match(url)
}

/// Checks a single source link before it is added to a project.
pub fn validate_source_url(url: &str) -> Result<(), ValidationError> {
    if is_source_url(url) {
        Ok(())
    } else {
        Err(ValidationError::InvalidSourceUrl(url.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_is_trimmed() {
        assert_eq!(validate_title("  Verizon Store ").unwrap(), "Verizon Store");
    }

    #[test]
    fn test_blank_titles_rejected() {
        assert_eq!(validate_title(""), Err(ValidationError::EmptyTitle));
        assert_eq!(validate_title("   \t\n"), Err(ValidationError::EmptyTitle));
    }

    #[test]
    fn test_source_url_prefixes() {
        assert!(is_source_url("http://example.com"));
        assert!(is_source_url("https://example.com/a?b=c"));
        assert!(is_source_url("HTTPS://EXAMPLE.COM"));
        assert!(is_source_url("Http://mixed.case"));
    }

    #[test]
    fn test_source_url_rejections() {
        assert!(!is_source_url("ftp://example.com"));
        assert!(!is_source_url("example.com"));
        assert!(!is_source_url("https:/missing-slash"));
        assert!(!is_source_url(" https://leading-space"));
        assert!(!is_source_url(""));
    }

    #[test]
    fn test_validate_source_url_error_carries_input() {
        let err = validate_source_url("www.example.com").unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidSourceUrl("www.example.com".to_string())
        );
        assert!(err.to_string().contains("include http:// or https://"));
    }
}

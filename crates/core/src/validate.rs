/// Input validation for the public intake forms and admin uploads.
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Name, email, and message are required")]
    ContactFieldsRequired,
    #[error("Email is required")]
    EmailRequired,
    #[error("Please provide a valid email address")]
    InvalidEmail,
    #[error("You have already subscribed to the checklist")]
    AlreadySubscribed,
    #[error("Title, description, and category are required")]
    ResourceFieldsRequired,
    #[error("Category must be either \"patients\" or \"clinicians\"")]
    InvalidCategory(String),
    #[error("No {0} file uploaded")]
    MissingFile(&'static str),
    #[error("Only {0} files are allowed")]
    WrongFileType(&'static str),
    #[error("File exceeds the {limit_mb} MB limit")]
    FileTooLarge { limit_mb: usize },
    #[error("Invalid {0} ID")]
    InvalidId(&'static str),
    #[error("content field is not valid JSON: {0}")]
    MalformedContent(String),
}

/// Trim a form value, treating blank input as absent.
pub fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Shape check equivalent to `local@domain.tld` with no whitespace and a
/// single `@`.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// Trim and lowercase an email, rejecting blank or malformed input.
pub fn normalize_email(raw: Option<&str>) -> Result<String, ValidationError> {
    let email = non_blank(raw).ok_or(ValidationError::EmailRequired)?;
    let email = email.to_lowercase();
    if !is_valid_email(&email) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("first.last@sub.example.org"));
        assert!(is_valid_email("a@b.c."));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("@b.com"));
        assert!(!is_valid_email("a@.com"));
        assert!(!is_valid_email("a@@b.com"));
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email("plainaddress"));
    }

    #[test]
    fn normalize_trims_and_lowercases() {
        assert_eq!(
            normalize_email(Some("  Reader@Example.COM ")).unwrap(),
            "reader@example.com"
        );
    }

    #[test]
    fn normalize_rejects_blank_and_malformed() {
        assert_eq!(normalize_email(None), Err(ValidationError::EmailRequired));
        assert_eq!(normalize_email(Some("   ")), Err(ValidationError::EmailRequired));
        assert_eq!(
            normalize_email(Some("not-an-email")),
            Err(ValidationError::InvalidEmail)
        );
    }

    #[test]
    fn non_blank_filters_whitespace() {
        assert_eq!(non_blank(Some("  x ")), Some("x".to_string()));
        assert_eq!(non_blank(Some("   ")), None);
        assert_eq!(non_blank(None), None);
    }
}

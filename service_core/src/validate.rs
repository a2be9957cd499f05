use crate::errors::AppError;

/// Syntactic email check: one `@`, non-empty local part, dotted domain
/// with non-empty labels, no whitespace. Nothing deeper.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || !domain.contains('.') {
        return false;
    }
    domain.split('.').all(|label| !label.is_empty())
}

pub fn require_valid_email(email: &str) -> Result<(), AppError> {
    if is_valid_email(email) {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "'{email}' is not a valid email address"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_addresses() {
        assert!(is_valid_email("ada@example.com"));
        assert!(is_valid_email("bo.smith+tag@mail.example.co.uk"));
    }

    #[test]
    fn rejects_missing_at_sign() {
        assert!(!is_valid_email("ada.example.com"));
    }

    #[test]
    fn rejects_empty_local_part() {
        assert!(!is_valid_email("@example.com"));
    }

    #[test]
    fn rejects_undotted_domain() {
        assert!(!is_valid_email("ada@localhost"));
    }

    #[test]
    fn rejects_empty_domain_labels() {
        assert!(!is_valid_email("ada@example..com"));
        assert!(!is_valid_email("ada@.example.com"));
        assert!(!is_valid_email("ada@example.com."));
    }

    #[test]
    fn rejects_whitespace() {
        assert!(!is_valid_email("ada smith@example.com"));
    }

    #[test]
    fn require_valid_email_surfaces_validation_error() {
        let err = require_valid_email("not-an-email").unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}

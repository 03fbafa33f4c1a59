//! Contact form model

use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ContactRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 2000))]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_request_validation() {
        let ok = ContactRequest {
            name: "Priya".to_string(),
            email: "priya@example.com".to_string(),
            message: "Do you take beginners?".to_string(),
        };
        assert!(ok.validate().is_ok());

        let bad_email = ContactRequest {
            email: "not-an-email".to_string(),
            ..ok.clone()
        };
        let errors = bad_email.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }
}

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Body of `POST /subscribe`.
#[derive(Debug, Deserialize, Validate)]
pub struct Subscriber {
    #[serde(default)]
    #[validate(custom(function = "validate_address"))]
    pub email: String,
}

/// Outcome keys understood by the landing page's translation tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MessageKey {
    EmailInvalid,
    EmailExists,
    EmailSuccess,
    EmailError,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscribeResponse {
    pub message_key: MessageKey,
}

fn validate_address(email: &str) -> Result<(), ValidationError> {
    if is_valid_address(email) {
        Ok(())
    } else {
        Err(ValidationError::new("email_shape"))
    }
}

/// Loose `local@domain.tld` shape check: somewhere in the input a run of
/// non-whitespace characters holds an `@` with at least one character before
/// it, followed by a `.` that has at least one character on each side.
pub fn is_valid_address(email: &str) -> bool {
    email.split_whitespace().any(|token| {
        let Some(at) = token.char_indices().skip(1).find(|&(_, c)| c == '@').map(|(i, _)| i) else {
            return false;
        };
        // `+2` skips the '@' and the one character required before the dot.
        token
            .char_indices()
            .filter(|&(i, c)| c == '.' && i >= at + 2)
            .any(|(i, _)| i + 1 < token.len())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ordinary_addresses() {
        for ok in ["a@b.com", "jean.dupont@gouv.fr", "x@y.z", "A@b.com", "a@@b.c"] {
            assert!(is_valid_address(ok), "{ok} should be accepted");
        }
    }

    #[test]
    fn rejects_malformed_addresses() {
        for bad in [
            "",
            "   ",
            "bad-email",
            "no-at.example.com",
            "@b.com",
            "a@.com",
            "a@b.",
            "a@bcom",
            "a @b.com",
            "a@ b.com",
        ] {
            assert!(!is_valid_address(bad), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn match_may_sit_inside_surrounding_text() {
        assert!(is_valid_address("contact: a@b.com please"));
    }

    #[test]
    fn validator_rejects_missing_email() {
        let sub: Subscriber = serde_json::from_str("{}").unwrap();
        assert!(sub.validate().is_err());
    }

    #[test]
    fn message_key_serializes_camel_case() {
        let body = SubscribeResponse {
            message_key: MessageKey::EmailExists,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({ "messageKey": "emailExists" })
        );
    }
}

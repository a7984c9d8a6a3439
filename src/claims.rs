use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{HandshakeError, HandshakeResult};

/// Protocol version stamped into every outbound token.
pub const PROTOCOL_VERSION: &str = "1.0.0";

/// Claims the issuing forum is required to send in the request token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundClaims {
    /// Opaque value the issuer expects echoed back in the response token.
    pub nonce: String,
    /// URL the final redirect must target; checked against the whitelist.
    pub redirect: String,
    /// Protocol version announced by the issuer; informational.
    pub version: Option<String>,
}

impl TryFrom<&Value> for InboundClaims {
    type Error = HandshakeError;

    fn try_from(claims: &Value) -> HandshakeResult<Self> {
        let redirect = required_claim(claims, "redirect").ok_or(HandshakeError::InvalidRedirect)?;
        let nonce = required_claim(claims, "nonce").ok_or(HandshakeError::InvalidNonce)?;
        let version = claims
            .get("version")
            .and_then(Value::as_str)
            .map(str::to_owned);

        Ok(Self {
            nonce,
            redirect,
            version,
        })
    }
}

// Blank strings count as missing, matching the issuing platform's contract.
fn required_claim(claims: &Value, key: &str) -> Option<String> {
    claims
        .get(key)
        .and_then(Value::as_str)
        .filter(|value| !value.trim().is_empty())
        .map(str::to_owned)
}

/// Profile of the authenticated user, supplied by the injected provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserData {
    /// Required identifier of the user on the relying application.
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}

impl UserData {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            email: None,
            photo: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_photo(mut self, photo: impl Into<String>) -> Self {
        self.photo = Some(photo.into());
        self
    }
}

/// Payload of the response token: the echoed nonce plus the user profile.
///
/// The signer injects `version`, `iat` and `exp` on top of these fields.
#[derive(Debug, Clone, Serialize)]
pub struct AuthClaims {
    pub nonce: String,
    #[serde(flatten)]
    pub user: UserData,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extracts_required_and_informational_claims() {
        let claims = json!({
            "nonce": "n1",
            "redirect": "http://www.testsite.com/cb",
            "version": "1.0.0",
            "exp": 1_700_000_000,
        });
        let inbound = InboundClaims::try_from(&claims).expect("claims");
        assert_eq!(inbound.nonce, "n1");
        assert_eq!(inbound.redirect, "http://www.testsite.com/cb");
        assert_eq!(inbound.version.as_deref(), Some("1.0.0"));
    }

    #[test]
    fn missing_redirect_is_reported_before_missing_nonce() {
        let claims = json!({ "exp": 1_700_000_000 });
        let err = InboundClaims::try_from(&claims).expect_err("should fail");
        assert!(matches!(err, HandshakeError::InvalidRedirect));
    }

    #[test]
    fn blank_nonce_counts_as_missing() {
        let claims = json!({
            "nonce": "   ",
            "redirect": "http://www.testsite.com/cb",
        });
        let err = InboundClaims::try_from(&claims).expect_err("should fail");
        assert!(matches!(err, HandshakeError::InvalidNonce));
    }

    #[test]
    fn user_data_serialization_omits_unset_fields() {
        let value = serde_json::to_value(UserData::new("42").with_email("user@example.com"))
            .expect("serialize");
        assert_eq!(value, json!({ "id": "42", "email": "user@example.com" }));
    }

    #[test]
    fn auth_claims_flatten_user_fields() {
        let value = serde_json::to_value(AuthClaims {
            nonce: "n1".to_string(),
            user: UserData::new("42").with_name("User"),
        })
        .expect("serialize");
        assert_eq!(value, json!({ "nonce": "n1", "id": "42", "name": "User" }));
    }
}

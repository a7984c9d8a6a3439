use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{Duration, Utc};
use jsonwebtoken::{crypto, Algorithm, EncodingKey};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::claims::PROTOCOL_VERSION;
use crate::error::{HandshakeError, HandshakeResult};

/// Produces response tokens signed with the shared secret.
///
/// The JOSE header is assembled by hand rather than through
/// [`jsonwebtoken::Header`] because the protocol requires the relying
/// application's id in the header as the authorized party (`azp`), which the
/// standard header type cannot carry.
#[derive(Clone)]
pub struct TokenSigner {
    client_id: String,
    encoding_key: EncodingKey,
    algorithm: Algorithm,
    ttl: Duration,
}

impl std::fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSigner")
            .field("client_id", &self.client_id)
            .field("encoding_key", &"<redacted>")
            .field("algorithm", &self.algorithm)
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl TokenSigner {
    pub fn new(client_id: impl Into<String>, secret: &str, algorithm: Algorithm, ttl: Duration) -> Self {
        Self {
            client_id: client_id.into(),
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            algorithm,
            ttl,
        }
    }

    /// Signs `claim` into a compact token.
    ///
    /// `claim` must serialize to a JSON object. The payload is the claim
    /// merged over `{version: PROTOCOL_VERSION}`, stamped with `iat` and
    /// `exp` derived from the configured lifetime.
    pub fn sign_claims<T: Serialize>(&self, claim: &T) -> HandshakeResult<String> {
        let claim = serde_json::to_value(claim).map_err(|err| HandshakeError::Signing(err.to_string()))?;
        let Value::Object(claim) = claim else {
            return Err(HandshakeError::Signing(
                "claims must serialize to a JSON object".to_string(),
            ));
        };

        let mut payload = Map::new();
        payload.insert(
            "version".to_string(),
            Value::String(PROTOCOL_VERSION.to_string()),
        );
        for (key, value) in claim {
            payload.insert(key, value);
        }

        let now = Utc::now();
        payload.insert("iat".to_string(), Value::from(now.timestamp()));
        payload.insert("exp".to_string(), Value::from((now + self.ttl).timestamp()));

        let header = serde_json::json!({
            "typ": "JWT",
            "alg": self.algorithm,
            "azp": &self.client_id,
        });

        let encoded_header = encode_segment(&header)?;
        let encoded_payload = encode_segment(&Value::Object(payload))?;
        let message = format!("{encoded_header}.{encoded_payload}");

        let signature = crypto::sign(message.as_bytes(), &self.encoding_key, self.algorithm)
            .map_err(|err| HandshakeError::Signing(err.to_string()))?;

        Ok(format!("{message}.{signature}"))
    }
}

fn encode_segment(value: &Value) -> HandshakeResult<String> {
    let json = serde_json::to_vec(value).map_err(|err| HandshakeError::Signing(err.to_string()))?;
    Ok(URL_SAFE_NO_PAD.encode(json))
}

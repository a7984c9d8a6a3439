use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde_json::Value;
use tracing::debug;

use crate::error::{HandshakeError, HandshakeResult};

/// Validates inbound tokens against the shared secret.
#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    leeway_seconds: u32,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("decoding_key", &"<redacted>")
            .field("algorithm", &self.algorithm)
            .field("leeway_seconds", &self.leeway_seconds)
            .finish()
    }
}

impl TokenVerifier {
    pub fn new(secret: &str, algorithm: Algorithm, leeway_seconds: u32) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            algorithm,
            leeway_seconds,
        }
    }

    /// Checks signature and expiry, returning the raw claim mapping.
    pub fn decode_claims(&self, token: &str) -> HandshakeResult<Value> {
        let mut validation = Validation::new(self.algorithm);
        validation.set_required_spec_claims(&["exp"]);
        validation.leeway = u64::from(self.leeway_seconds);
        validation.validate_aud = false;

        let token_data = decode::<Value>(token, &self.decoding_key, &validation)
            .map_err(HandshakeError::from_verification)?;

        debug!("verified inbound token");
        Ok(token_data.claims)
    }
}

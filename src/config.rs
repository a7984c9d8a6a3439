use chrono::Duration;
use jsonwebtoken::Algorithm;

/// Runtime configuration for the SSO handshake.
///
/// Immutable once the handshake is built; share the handshake itself across
/// concurrent logins instead of mutating this.
#[derive(Debug, Clone)]
pub struct HandshakeConfig {
    /// Identifier of this relying application; embedded in the outbound
    /// token header as the authorized party (`azp`).
    pub client_id: String,
    /// Shared symmetric key used to verify inbound and sign outbound tokens.
    pub secret: String,
    /// Signing algorithm for both directions.
    pub algorithm: Algorithm,
    /// Lifetime of outbound tokens.
    pub timeout: Duration,
    /// URL glob patterns a redirect target must match.
    pub whitelist: Vec<String>,
    /// Allowable clock skew in seconds when validating `exp`.
    pub leeway_seconds: u32,
}

impl HandshakeConfig {
    /// Construct config with protocol defaults: HS256, 20 minute lifetime,
    /// strict expiry.
    pub fn new(
        client_id: impl Into<String>,
        secret: impl Into<String>,
        whitelist: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            secret: secret.into(),
            algorithm: Algorithm::HS256,
            timeout: Duration::minutes(20),
            whitelist: whitelist.into_iter().map(Into::into).collect(),
            leeway_seconds: 0,
        }
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Adjust the allowed leeway.
    pub fn with_leeway(mut self, seconds: u32) -> Self {
        self.leeway_seconds = seconds;
        self
    }
}

use serde::Serialize;
use serde_json::Value;

use crate::claims::{AuthClaims, InboundClaims};
use crate::config::HandshakeConfig;
use crate::error::{HandshakeError, HandshakeResult};
use crate::provider::UserDataProvider;
use crate::signer::TokenSigner;
use crate::verifier::TokenVerifier;
use crate::whitelist::RedirectWhitelist;

/// The SSO handshake between this relying application and the forum.
///
/// Immutable after construction and cheap to clone; one instance serves
/// arbitrarily many concurrent logins.
#[derive(Clone, Debug)]
pub struct SsoHandshake {
    config: HandshakeConfig,
    whitelist: RedirectWhitelist,
    signer: TokenSigner,
    verifier: TokenVerifier,
}

impl SsoHandshake {
    pub fn new(config: HandshakeConfig) -> HandshakeResult<Self> {
        if config.client_id.trim().is_empty() {
            return Err(HandshakeError::Config("client id cannot be empty".to_string()));
        }
        if config.secret.trim().is_empty() {
            return Err(HandshakeError::Config("secret cannot be empty".to_string()));
        }

        let whitelist = RedirectWhitelist::compile(&config.whitelist)?;
        let signer = TokenSigner::new(
            config.client_id.as_str(),
            &config.secret,
            config.algorithm,
            config.timeout,
        );
        let verifier = TokenVerifier::new(&config.secret, config.algorithm, config.leeway_seconds);

        Ok(Self {
            config,
            whitelist,
            signer,
            verifier,
        })
    }

    pub fn config(&self) -> &HandshakeConfig {
        &self.config
    }

    pub fn whitelist(&self) -> &RedirectWhitelist {
        &self.whitelist
    }

    /// Signs `claim` into a response token carrying the protocol version and
    /// the configured lifetime.
    pub async fn create_auth_jwt<T: Serialize>(&self, claim: &T) -> HandshakeResult<String> {
        self.signer.sign_claims(claim)
    }

    /// Validates signature and expiry of `token`, returning the decoded
    /// claim mapping.
    pub async fn verify(&self, token: &str) -> HandshakeResult<Value> {
        self.verifier.decode_claims(token)
    }

    /// Runs the full handshake for one login request.
    ///
    /// The first failure aborts; nothing is retried. On success the returned
    /// URL is `<redirect>?jwt=<token>`. The token is appended without URL
    /// encoding, which is safe while token segments stay base64url.
    pub async fn login_route<P>(&self, token: &str, provider: &P) -> HandshakeResult<String>
    where
        P: UserDataProvider + ?Sized,
    {
        let claims = self.verify(token).await?;
        let inbound = InboundClaims::try_from(&claims)?;

        if !self.whitelist.is_match(&inbound.redirect) {
            return Err(HandshakeError::NotWhitelisted(inbound.redirect));
        }

        let user = provider
            .user_data()
            .await
            .ok_or(HandshakeError::InvalidUserData)?;
        if user.id.trim().is_empty() {
            return Err(HandshakeError::MissingUserId);
        }

        let outbound = AuthClaims {
            nonce: inbound.nonce,
            user,
        };
        let response_token = self.create_auth_jwt(&outbound).await?;

        Ok(format!("{}?jwt={}", inbound.redirect, response_token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_rejects_empty_client_id() {
        let config = HandshakeConfig::new("", "secret", ["http://www.testsite.com/*"]);
        let err = SsoHandshake::new(config).expect_err("should fail");
        assert!(matches!(err, HandshakeError::Config(_)));
    }

    #[test]
    fn construction_rejects_blank_secret() {
        let config = HandshakeConfig::new("testVC", "   ", ["http://www.testsite.com/*"]);
        let err = SsoHandshake::new(config).expect_err("should fail");
        assert!(matches!(err, HandshakeError::Config(_)));
    }

    #[test]
    fn construction_compiles_whitelist() {
        let config = HandshakeConfig::new(
            "testVC",
            "secret",
            ["http://www.testsite.com/*", "http://other.site/cb"],
        );
        let handshake = SsoHandshake::new(config).expect("handshake");
        assert_eq!(handshake.whitelist().len(), 2);
        assert!(handshake.whitelist().is_match("http://www.testsite.com/cb"));
    }
}

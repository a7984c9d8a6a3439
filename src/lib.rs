pub mod claims;
pub mod config;
pub mod error;
pub mod handshake;
pub mod provider;
pub mod signer;
pub mod verifier;
pub mod whitelist;

pub use claims::{AuthClaims, InboundClaims, UserData, PROTOCOL_VERSION};
pub use config::HandshakeConfig;
pub use error::{HandshakeError, HandshakeResult};
pub use handshake::SsoHandshake;
pub use provider::{PlaceholderUserData, ProviderFn, UserDataProvider};
pub use signer::TokenSigner;
pub use verifier::TokenVerifier;
pub use whitelist::RedirectWhitelist;

use thiserror::Error;

pub type HandshakeResult<T> = Result<T, HandshakeError>;

#[derive(Debug, Error)]
pub enum HandshakeError {
    #[error("invalid handshake configuration: {0}")]
    Config(String),
    #[error("token cannot be parsed: {0}")]
    MalformedToken(String),
    #[error("token signature does not validate")]
    Signature,
    #[error("token has expired")]
    TokenExpired,
    #[error("token is missing required claim 'redirect'")]
    InvalidRedirect,
    #[error("token is missing required claim 'nonce'")]
    InvalidNonce,
    #[error("redirect target '{0}' is not whitelisted")]
    NotWhitelisted(String),
    #[error("user data provider returned no usable profile")]
    InvalidUserData,
    #[error("user data is missing required property 'id'")]
    MissingUserId,
    #[error("failed to sign token: {0}")]
    Signing(String),
}

impl HandshakeError {
    /// Maps failures from the JWT primitive onto the verification taxonomy.
    pub(crate) fn from_verification(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match err.kind() {
            ErrorKind::ExpiredSignature => Self::TokenExpired,
            ErrorKind::InvalidSignature => Self::Signature,
            _ => Self::MalformedToken(err.to_string()),
        }
    }
}

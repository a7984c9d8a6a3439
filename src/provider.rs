use std::future::Future;

use async_trait::async_trait;
use tracing::warn;

use crate::claims::UserData;

/// Capability that fetches the authenticated user's profile.
///
/// Injected into [`crate::SsoHandshake::login_route`] per call; the core
/// never adapts the result beyond the required-id check. Return `None` when
/// no usable profile exists (including provider-internal failures).
#[async_trait]
pub trait UserDataProvider: Send + Sync {
    async fn user_data(&self) -> Option<UserData>;
}

/// Adapts an async closure into a [`UserDataProvider`].
pub struct ProviderFn<F>(pub F);

#[async_trait]
impl<F, Fut> UserDataProvider for ProviderFn<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Option<UserData>> + Send,
{
    async fn user_data(&self) -> Option<UserData> {
        (self.0)().await
    }
}

/// Stand-in for handshakes that have not wired a real data source yet.
///
/// Returns an empty profile, which the handshake rejects for its missing id.
pub struct PlaceholderUserData;

#[async_trait]
impl UserDataProvider for PlaceholderUserData {
    async fn user_data(&self) -> Option<UserData> {
        warn!("no user data provider configured; supply one to complete the handshake");
        Some(UserData::new(""))
    }
}

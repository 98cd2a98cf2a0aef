//! Identity collaborator
//!
//! Sign-in and token issuance live outside this crate. The SDK only needs to
//! know whether someone is signed in, who they are, and a bearer token to
//! attach to each request.

use crate::error::{Result, SdkError};
use async_trait::async_trait;

/// Source of the signed-in user's identity and bearer credential
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    fn is_authenticated(&self) -> bool;

    /// Service-side user id, `None` while signed out
    fn user_id(&self) -> Option<String>;

    /// Full name for alert messages, if the provider knows it
    fn display_name(&self) -> Option<String> {
        None
    }

    /// Fetch a fresh bearer token; called once per request
    async fn credential(&self) -> Result<String>;
}

/// A user id paired with a bearer token, ready to put on a request
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user_id: String,
    pub token: String,
}

impl Credentials {
    pub fn new(user_id: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            token: token.into(),
        }
    }

    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }

    /// Resolve credentials from a provider, failing fast when signed out
    pub async fn from_provider(provider: &dyn IdentityProvider) -> Result<Self> {
        if !provider.is_authenticated() {
            return Err(SdkError::NotSignedIn);
        }
        let user_id = provider.user_id().ok_or(SdkError::NotSignedIn)?;
        let token = provider.credential().await?;
        Ok(Self { user_id, token })
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("user_id", &self.user_id)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Identity with a fixed token, for the CLI and tests
#[derive(Debug, Clone, Default)]
pub struct StaticIdentity {
    user_id: Option<String>,
    token: Option<String>,
    display_name: Option<String>,
}

impl StaticIdentity {
    pub fn signed_in(user_id: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            token: Some(token.into()),
            display_name: None,
        }
    }

    pub fn signed_out() -> Self {
        Self::default()
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentity {
    fn is_authenticated(&self) -> bool {
        self.user_id.is_some() && self.token.is_some()
    }

    fn user_id(&self) -> Option<String> {
        self.user_id.clone()
    }

    fn display_name(&self) -> Option<String> {
        self.display_name.clone()
    }

    async fn credential(&self) -> Result<String> {
        self.token.clone().ok_or(SdkError::NotSignedIn)
    }
}

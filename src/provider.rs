//! Credential provider
use futures::future::BoxFuture;
use std::env;

use crate::Credentials;

pub type CredentialFuture = BoxFuture<'static, Credentials>;

/// define Credential retriever.
pub trait Provider: Send + Sync {
    fn fetch(&self) -> CredentialFuture;
}

#[derive(Debug, Clone)]
pub struct StaticProvider(Credentials);

impl StaticProvider {
    pub fn new<T: Into<String>>(secret_id: T, secret_key: T, session_token: Option<String>) -> Self {
        Self(Credentials::new(secret_id, secret_key, session_token))
    }

    /// load Credentials from COS environment variables.
    /// - `COS_SECRETID`
    /// - `COS_SECRETKEY`
    /// - `COS_SESSIONTOKEN` *optional*, for temporary keys.
    pub fn from_env() -> Option<Self> {
        match (
            env::var("COS_SECRETID"),
            env::var("COS_SECRETKEY"),
            env::var("COS_SESSIONTOKEN"),
        ) {
            (Ok(id), Ok(key), token) if !id.is_empty() && !key.is_empty() => {
                Some(Self::new(id, key, token.ok().filter(|t| !t.is_empty())))
            }
            _ => None,
        }
    }
}

impl Provider for StaticProvider {
    fn fetch(&self) -> CredentialFuture {
        let cred = self.0.clone();
        Box::pin(async move { cred })
    }
}

#[cfg(test)]
mod tests {
    use super::{Provider, StaticProvider};

    #[tokio::test]
    async fn test_static_provider() {
        let provider = StaticProvider::new("COS_SECRETID", "COS_SECRETKEY", Some("token".into()));
        let cred = provider.fetch().await;
        assert_eq!(cred.secret_id(), "COS_SECRETID");
        assert_eq!(cred.secret_key(), "COS_SECRETKEY");
        assert_eq!(cred.session_token(), Some("token"));
    }
}

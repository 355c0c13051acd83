//! In-memory credential storage.

use calliope_error::{CalliopeResult, StorageError, StorageErrorKind};
use calliope_interface::{Caller, CredentialStore, ProviderTokens};
use std::collections::HashMap;
use std::sync::RwLock;

const ANONYMOUS_KEY: &str = "anonymous";

/// Process-local credential store.
///
/// Tokens are keyed by user id, with a single shared slot for anonymous
/// callers. Suitable for tests and single-user deployments.
#[derive(Debug, Default)]
pub struct InMemoryCredentials {
    tokens: RwLock<HashMap<String, ProviderTokens>>,
}

impl InMemoryCredentials {
    /// Create an empty credential store.
    pub fn new() -> Self {
        Self::default()
    }

    fn key_for(caller: &Caller) -> &str {
        caller.user_id().unwrap_or(ANONYMOUS_KEY)
    }
}

#[async_trait::async_trait]
impl CredentialStore for InMemoryCredentials {
    async fn tokens_for(&self, caller: &Caller) -> CalliopeResult<Option<ProviderTokens>> {
        let tokens = self.tokens.read().map_err(|_| {
            StorageError::new(StorageErrorKind::Unavailable("lock poisoned".to_string()))
        })?;
        Ok(tokens.get(Self::key_for(caller)).cloned())
    }

    async fn store(&self, caller: &Caller, new_tokens: ProviderTokens) -> CalliopeResult<()> {
        let mut tokens = self.tokens.write().map_err(|_| {
            StorageError::new(StorageErrorKind::Unavailable("lock poisoned".to_string()))
        })?;
        tokens.insert(Self::key_for(caller).to_string(), new_tokens);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stores_per_user_tokens() {
        let store = InMemoryCredentials::new();
        let alice = Caller::User("alice".to_string());
        let tokens = ProviderTokens {
            access_token: "abc".to_string(),
            refresh_token: None,
        };

        store.store(&alice, tokens.clone()).await.unwrap();
        assert_eq!(store.tokens_for(&alice).await.unwrap(), Some(tokens));
        assert_eq!(store.tokens_for(&Caller::Anonymous).await.unwrap(), None);
    }
}

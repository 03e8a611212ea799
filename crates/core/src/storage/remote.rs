use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::portfolio::Portfolio;

/// Explicit session state, passed to the persistence port at call time.
/// The engine itself never consults ambient login state.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    user_id: Option<String>,
}

impl SessionContext {
    /// Not signed in — remote persistence is skipped entirely.
    pub fn guest() -> Self {
        Self { user_id: None }
    }

    pub fn signed_in(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user_id.is_some()
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }
}

/// Remote, asynchronous persistence keyed by user.
///
/// `load_for_user` returning `Ok(None)` strictly means "this user has no
/// saved document". A transport failure must be `Err` — treating it as
/// absence would make sign-in upload an empty set over real cloud data.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    async fn load_for_user(&self, user_id: &str) -> Result<Option<Portfolio>, CoreError>;

    async fn save_for_user(&self, user_id: &str, portfolio: &Portfolio) -> Result<(), CoreError>;
}

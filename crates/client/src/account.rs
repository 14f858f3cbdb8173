use std::sync::Arc;

use chrono::Utc;

use bazaar_core::{DomainError, UserId};
use bazaar_infra::ProfileStore;
use bazaar_shopping::Profile;

use crate::error::ClientResult;

/// Profile page: display name and role.
pub struct ProfileClient {
    store: Arc<dyn ProfileStore>,
}

impl ProfileClient {
    pub fn new(store: Arc<dyn ProfileStore>) -> Self {
        Self { store }
    }

    pub async fn fetch(&self, user_id: UserId) -> ClientResult<Option<Profile>> {
        Ok(self.store.fetch_profile(user_id).await?)
    }

    pub async fn rename(&self, user_id: UserId, name: &str) -> ClientResult<Profile> {
        let mut profile = self
            .store
            .fetch_profile(user_id)
            .await?
            .ok_or_else(DomainError::not_found)?;
        profile.rename(name, Utc::now())?;
        let saved = self.store.update_profile(profile).await?;
        tracing::info!(%user_id, "profile renamed");
        Ok(saved)
    }
}

impl core::fmt::Debug for ProfileClient {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ProfileClient").finish_non_exhaustive()
    }
}

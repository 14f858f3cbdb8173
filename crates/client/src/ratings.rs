use std::sync::Arc;

use chrono::Utc;

use bazaar_core::ProductId;
use bazaar_infra::RatingStore;
use bazaar_shopping::{Rating, RatingStats, RatingWithAuthor, Stars};

use crate::error::ClientResult;
use crate::session::Principal;

/// Product ratings and the signed-in shopper's own rating.
pub struct RatingsClient {
    store: Arc<dyn RatingStore>,
}

impl RatingsClient {
    pub fn new(store: Arc<dyn RatingStore>) -> Self {
        Self { store }
    }

    /// Reviews for a product, newest first.
    pub async fn ratings(&self, product_id: ProductId) -> ClientResult<Vec<RatingWithAuthor>> {
        Ok(self.store.list_ratings(product_id).await?)
    }

    /// Average and count. Backend failures read as "no ratings yet".
    pub async fn stats(&self, product_id: ProductId) -> RatingStats {
        match self.store.rating_stars(product_id).await {
            Ok(stars) => RatingStats::from_stars(stars),
            Err(err) => {
                tracing::warn!(%product_id, error = %err, "rating stats unavailable");
                RatingStats::empty()
            }
        }
    }

    pub async fn user_rating(
        &self,
        principal: &Principal,
        product_id: ProductId,
    ) -> ClientResult<Option<Rating>> {
        Ok(self.store.find_rating(principal.user_id, product_id).await?)
    }

    /// Rate a product, replacing the shopper's earlier rating if there is one.
    pub async fn submit(
        &self,
        principal: &Principal,
        product_id: ProductId,
        stars: u8,
        review: Option<&str>,
    ) -> ClientResult<Rating> {
        let user_id = principal.require_shopper()?;
        let stars = Stars::new(stars)?;
        let now = Utc::now();

        let saved = match self.store.find_rating(user_id, product_id).await? {
            Some(mut existing) => {
                existing.revise(stars, review, now);
                self.store.update_rating(existing).await?
            }
            None => {
                self.store
                    .insert_rating(Rating::new(user_id, product_id, stars, review, now))
                    .await?
            }
        };
        tracing::info!(%product_id, stars = saved.rating.get(), "rating saved");
        Ok(saved)
    }
}

impl core::fmt::Debug for RatingsClient {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RatingsClient").finish_non_exhaustive()
    }
}

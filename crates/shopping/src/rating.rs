//! Product ratings and their aggregate statistics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use bazaar_core::{DomainError, DomainResult, Entity, ProductId, RatingId, UserId};

/// Star rating, 1 through 5.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Stars(u8);

impl Stars {
    pub fn new(value: u8) -> DomainResult<Self> {
        if !(1..=5).contains(&value) {
            return Err(DomainError::validation("Rating must be between 1 and 5"));
        }
        Ok(Self(value))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Stars {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Stars> for u8 {
    fn from(value: Stars) -> Self {
        value.0
    }
}

/// A `product_ratings` row. One per (user, product); re-rating updates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    pub id: RatingId,
    pub user_id: UserId,
    pub product_id: ProductId,
    pub rating: Stars,
    pub review_text: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Rating {
    pub fn new(
        user_id: UserId,
        product_id: ProductId,
        rating: Stars,
        review: Option<&str>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: RatingId::new(),
            user_id,
            product_id,
            rating,
            review_text: normalize_review(review),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn revise(&mut self, rating: Stars, review: Option<&str>, now: DateTime<Utc>) {
        self.rating = rating;
        self.review_text = normalize_review(review);
        self.updated_at = now;
    }
}

impl Entity for Rating {
    type Id = RatingId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Rating plus the reviewer's display name, as shown under a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingWithAuthor {
    #[serde(flatten)]
    pub rating: Rating,
    pub author_name: String,
}

/// Blank reviews are stored as `None`.
pub fn normalize_review(review: Option<&str>) -> Option<String> {
    review
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(str::to_string)
}

/// Average and count of a product's ratings.
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RatingStats {
    /// Mean star value rounded to one decimal place; 0 when unrated.
    pub average_rating: f64,
    pub total_ratings: usize,
}

impl RatingStats {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_stars<I>(stars: I) -> Self
    where
        I: IntoIterator<Item = Stars>,
    {
        let (sum, count) = stars
            .into_iter()
            .fold((0u64, 0usize), |(sum, count), s| (sum + u64::from(s.get()), count + 1));
        if count == 0 {
            return Self::empty();
        }
        let average = sum as f64 / count as f64;
        Self {
            average_rating: (average * 10.0).round() / 10.0,
            total_ratings: count,
        }
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use bazaar_core::{DomainError, DomainResult, Entity, ProductId, UserId};

use crate::price::Price;

/// A product row as listed by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub brand_id: UserId,
    pub name: String,
    pub description: String,
    pub price: Price,
    pub category: Option<String>,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Materialize a validated draft into a row stamped at `now`.
    pub fn from_draft(id: ProductId, brand_id: UserId, draft: ProductDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            brand_id,
            name: draft.name,
            description: draft.description,
            price: draft.price,
            category: draft.category,
            image_url: draft.image_url,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a validated patch, bumping `updated_at`.
    pub fn apply_patch(&mut self, patch: ProductPatch, now: DateTime<Utc>) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(image_url) = patch.image_url {
            self.image_url = image_url;
        }
        self.updated_at = now;
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Fields a brand submits when listing a new product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: Price,
    pub category: Option<String>,
    pub image_url: String,
}

impl ProductDraft {
    pub fn validate(&self) -> DomainResult<()> {
        require(&self.name, "Name")?;
        require(&self.description, "Description")?;
        require(&self.image_url, "Image")?;
        if let Some(category) = &self.category {
            require(category, "Category")?;
        }
        Ok(())
    }
}

/// Partial update for an existing product. `None` leaves a field unchanged;
/// `category: Some(None)` clears the category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Price>,
    pub category: Option<Option<String>>,
    pub image_url: Option<String>,
}

impl ProductPatch {
    pub fn validate(&self) -> DomainResult<()> {
        if let Some(name) = &self.name {
            require(name, "Name")?;
        }
        if let Some(description) = &self.description {
            require(description, "Description")?;
        }
        if let Some(image_url) = &self.image_url {
            require(image_url, "Image")?;
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.category.is_none()
            && self.image_url.is_none()
    }
}

fn require(value: &str, field: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(format!("{field} is required")));
    }
    Ok(())
}

//! Listing filter.

use serde::{Deserialize, Serialize};

use bazaar_core::ValueObject;

/// Category buttons offered by the marketplace, in display order.
pub const CATEGORIES: [&str; 7] = [
    "All",
    "Apparel",
    "Footwear",
    "Accessories",
    "Bags",
    "Jewelry",
    "Other",
];

const ALL: &str = "All";

/// Category constraint narrowing the product listing.
///
/// `All` means "no constraint"; any other value matches the product's
/// `category` column exactly. Compared by value, so the listing cache can ask
/// "were these items loaded for this filter?".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CatalogFilter {
    #[default]
    All,
    Category(String),
}

impl CatalogFilter {
    /// Build a filter from a category label; `"All"` maps to [`CatalogFilter::All`].
    pub fn category(label: impl Into<String>) -> Self {
        let label = label.into();
        if label == ALL {
            Self::All
        } else {
            Self::Category(label)
        }
    }

    /// Category the gateway should constrain on, if any.
    pub fn constraint(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Category(c) => Some(c.as_str()),
        }
    }

    pub fn label(&self) -> &str {
        self.constraint().unwrap_or(ALL)
    }
}

impl ValueObject for CatalogFilter {}

impl From<String> for CatalogFilter {
    fn from(value: String) -> Self {
        Self::category(value)
    }
}

impl From<&str> for CatalogFilter {
    fn from(value: &str) -> Self {
        Self::category(value)
    }
}

impl From<CatalogFilter> for String {
    fn from(value: CatalogFilter) -> Self {
        value.label().to_string()
    }
}

impl core::fmt::Display for CatalogFilter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

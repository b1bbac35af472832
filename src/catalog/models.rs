//! Product Catalog Domain Models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fixed set of merchandise categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Apparel,
    Accessories,
    Tech,
    Books,
    Stickers,
}

/// A sellable product as served by the catalog collaborator.
///
/// Products are read-only from the shop's perspective: the cart captures a
/// clone at the moment of addition, so later catalog changes never alter
/// items already in a cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,

    /// Unit price. Rounding to minor units happens only at display or
    /// submission, never on the stored value.
    pub price: f64,

    /// Pre-discount price, shown struck through when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,

    pub image: String,
    pub category: Category,
    pub in_stock: bool,
    pub rating: f64,
    pub review_count: u32,
    pub featured: bool,
    pub active: bool,
    pub display_order: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Category selection for the catalog listing: everything, or one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryFilter {
    #[default]
    All,
    Apparel,
    Accessories,
    Tech,
    Books,
    Stickers,
}

impl CategoryFilter {
    /// The category this filter selects, or `None` for `All`.
    pub fn category(self) -> Option<Category> {
        match self {
            CategoryFilter::All => None,
            CategoryFilter::Apparel => Some(Category::Apparel),
            CategoryFilter::Accessories => Some(Category::Accessories),
            CategoryFilter::Tech => Some(Category::Tech),
            CategoryFilter::Books => Some(Category::Books),
            CategoryFilter::Stickers => Some(Category::Stickers),
        }
    }
}

/// Ordering applied to the catalog listing. Every mode sorts stably so that
/// repeated renders of the same list are deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortMode {
    /// Featured items before non-featured, input order otherwise.
    #[default]
    Featured,
    PriceAsc,
    PriceDesc,
    RatingDesc,
}

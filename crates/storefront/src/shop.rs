//! Shop listing: local category filter, title search and price sort.
//!
//! The shop fetches one large catalog page and narrows it in memory, so
//! changing a filter never costs another request.

use serde::{Deserialize, Serialize};

use crate::catalog::Product;

/// Category value meaning "no category filter".
pub const ALL_CATEGORIES: &str = "All";

/// Sort order for shop listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShopSort {
    /// Catalog order.
    #[default]
    #[serde(rename = "default")]
    Default,
    #[serde(rename = "low-high")]
    PriceLowHigh,
    #[serde(rename = "high-low")]
    PriceHighLow,
}

impl ShopSort {
    /// Parse from URL parameter value. Unknown values keep catalog order.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "low-high" | "price-ascending" => Self::PriceLowHigh,
            "high-low" | "price-descending" => Self::PriceHighLow,
            _ => Self::Default,
        }
    }

    /// Convert to URL parameter value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::PriceLowHigh => "low-high",
            Self::PriceHighLow => "high-low",
        }
    }
}

/// Active shop filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShopFilters {
    /// Exact category to keep; `None` or [`ALL_CATEGORIES`] keeps everything.
    pub category: Option<String>,
    /// Case-insensitive substring to look for in product titles.
    pub search: Option<String>,
    pub sort: ShopSort,
}

impl ShopFilters {
    /// Narrow and order `products`.
    ///
    /// Sorting is stable, so equal prices keep their catalog order.
    #[must_use]
    pub fn apply(&self, products: &[Product]) -> Vec<Product> {
        let category = self
            .category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty() && *c != ALL_CATEGORIES);
        let needle = self
            .search
            .as_deref()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty());

        let mut result: Vec<Product> = products
            .iter()
            .filter(|p| category.is_none_or(|c| p.category == c))
            .filter(|p| {
                needle
                    .as_deref()
                    .is_none_or(|n| p.title.to_lowercase().contains(n))
            })
            .cloned()
            .collect();

        match self.sort {
            ShopSort::Default => {}
            ShopSort::PriceLowHigh => result.sort_by(|a, b| a.price.cmp(&b.price)),
            ShopSort::PriceHighLow => result.sort_by(|a, b| b.price.cmp(&a.price)),
        }

        result
    }
}

/// Category choices for the filter menu: [`ALL_CATEGORIES`] first, then
/// each category in the order it first appears.
#[must_use]
pub fn category_options(products: &[Product]) -> Vec<String> {
    let mut options = vec![ALL_CATEGORIES.to_string()];
    for product in products {
        if !options.iter().any(|c| *c == product.category) {
            options.push(product.category.clone());
        }
    }
    options
}

//! Domain types for the product catalog API.
//!
//! Field names follow the JSON the catalog returns; anything optional on a
//! listing (description, images, brand, stock) is defaulted so one `Product`
//! type serves list, detail and search responses.

use cartwheel_core::{CartProduct, Price, ProductId};
use serde::{Deserialize, Serialize};

// =============================================================================
// Product Types
// =============================================================================

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    pub category: String,
    pub thumbnail: String,
    /// Average review score, 0-5.
    #[serde(default)]
    pub rating: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
}

impl Product {
    /// The fields the cart needs when this product is added.
    #[must_use]
    pub fn to_cart_product(&self) -> CartProduct {
        CartProduct {
            id: self.id,
            title: self.title.clone(),
            price: self.price,
            thumbnail: self.thumbnail.clone(),
        }
    }
}

/// One page of products with the catalog's paging counters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductPage {
    pub products: Vec<Product>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub skip: u64,
    #[serde(default)]
    pub limit: u64,
}

// =============================================================================
// Category Types
// =============================================================================

/// A product category as listed by `/products/categories`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub url: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const PAGE: &str = r#"{
        "products": [
            {
                "id": 1,
                "title": "Essence Mascara Lash Princess",
                "description": "Popular mascara.",
                "category": "beauty",
                "price": 9.99,
                "rating": 4.94,
                "stock": 5,
                "brand": "Essence",
                "images": ["https://cdn.dummyjson.com/1.webp"],
                "thumbnail": "https://cdn.dummyjson.com/thumbnail.webp",
                "tags": ["beauty", "mascara"]
            },
            {
                "id": 2,
                "title": "Eyeshadow Palette with Mirror",
                "category": "beauty",
                "price": 19.99,
                "thumbnail": "https://cdn.dummyjson.com/2.webp"
            }
        ],
        "total": 194,
        "skip": 0,
        "limit": 2
    }"#;

    #[test]
    fn test_parse_product_page() {
        let page: ProductPage = serde_json::from_str(PAGE).unwrap();
        assert_eq!(page.total, 194);
        assert_eq!(page.products.len(), 2);

        let mascara = &page.products[0];
        assert_eq!(mascara.brand.as_deref(), Some("Essence"));
        assert_eq!(mascara.stock, Some(5));

        let palette = &page.products[1];
        assert!(palette.description.is_none());
        assert!(palette.images.is_empty());
        assert!(palette.rating.abs() < f64::EPSILON);
    }

    #[test]
    fn test_to_cart_product() {
        let page: ProductPage = serde_json::from_str(PAGE).unwrap();
        let payload = page.products[0].to_cart_product();
        assert_eq!(payload.id, ProductId::new(1));
        assert_eq!(payload.title, "Essence Mascara Lash Princess");
        assert_eq!(payload.price, Price::from_cents(999).unwrap());
        assert_eq!(payload.thumbnail, "https://cdn.dummyjson.com/thumbnail.webp");
    }

    #[test]
    fn test_parse_categories() {
        let json = r#"[
            {"slug": "beauty", "name": "Beauty", "url": "https://dummyjson.com/products/category/beauty"},
            {"slug": "home-decoration", "name": "Home Decoration"}
        ]"#;
        let categories: Vec<Category> = serde_json::from_str(json).unwrap();
        assert_eq!(categories[1].slug, "home-decoration");
        assert!(categories[1].url.is_empty());
    }
}

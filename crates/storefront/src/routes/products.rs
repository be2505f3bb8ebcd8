//! Catalog route handlers: listing, detail, categories, search and shop.

use axum::{Json, extract::State};
use cartwheel_core::ProductId;
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

use crate::catalog::{Category, FEATURED_LIMIT, Product, ProductPage, SHOP_PAGE_LIMIT};
use crate::error::Result;
use crate::extract::{AppPath, AppQuery};
use crate::shop::{ShopFilters, ShopSort, category_options};
use crate::state::AppState;

/// Page size used when `/products` is called without `limit`.
const DEFAULT_PAGE_LIMIT: u32 = 30;

/// Pagination query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct PaginationQuery {
    pub limit: Option<u32>,
    pub skip: Option<u32>,
}

/// Navbar search query.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// Shop filter query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct ShopQuery {
    pub category: Option<String>,
    pub q: Option<String>,
    pub sort: Option<String>,
}

/// Shop listing with the menu choices it was filtered from.
#[derive(Debug, Serialize)]
pub struct ShopView {
    pub products: Vec<Product>,
    pub categories: Vec<String>,
    pub sort: ShopSort,
}

/// Catalog passthrough.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<PaginationQuery>,
) -> Result<Json<ProductPage>> {
    let page = state
        .catalog()
        .list_products(
            query.limit.unwrap_or(DEFAULT_PAGE_LIMIT),
            query.skip.unwrap_or(0),
        )
        .await?;
    Ok(Json(page))
}

/// Product detail.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    AppPath(id): AppPath<ProductId>,
) -> Result<Json<Product>> {
    Ok(Json(state.catalog().product(id).await?))
}

/// Category list.
#[instrument(skip(state))]
pub async fn categories(State(state): State<AppState>) -> Result<Json<Vec<Category>>> {
    Ok(Json(state.catalog().categories().await?))
}

/// Products in one category.
#[instrument(skip(state))]
pub async fn category(
    State(state): State<AppState>,
    AppPath(slug): AppPath<String>,
) -> Result<Json<ProductPage>> {
    Ok(Json(state.catalog().products_by_category(&slug).await?))
}

/// Home page picks: the first page of the catalog. Failures degrade to
/// an empty list.
#[instrument(skip(state))]
pub async fn featured(State(state): State<AppState>) -> Json<Vec<Product>> {
    let products = match state.catalog().list_products(FEATURED_LIMIT, 0).await {
        Ok(page) => page.products,
        Err(e) => {
            warn!(error = %e, "Failed to load featured products");
            Vec::new()
        }
    };
    Json(products)
}

/// Navbar suggestions. Catalog failures degrade to no suggestions.
#[instrument(skip(state))]
pub async fn suggest(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<SearchQuery>,
) -> Json<Vec<Product>> {
    let products = state
        .catalog()
        .suggest(&query.q)
        .await
        .unwrap_or_else(|e| {
            warn!(error = %e, "Search failed, returning no suggestions");
            Vec::new()
        });
    Json(products)
}

/// Shop listing: one large catalog page narrowed locally.
///
/// A catalog failure renders an empty shop rather than an error page.
#[instrument(skip(state))]
pub async fn shop(State(state): State<AppState>, AppQuery(query): AppQuery<ShopQuery>) -> Json<ShopView> {
    let all = match state.catalog().list_products(SHOP_PAGE_LIMIT, 0).await {
        Ok(page) => page.products,
        Err(e) => {
            warn!(error = %e, "Failed to load shop products");
            Vec::new()
        }
    };

    let filters = ShopFilters {
        category: query.category,
        search: query.q,
        sort: query.sort.as_deref().map(ShopSort::parse).unwrap_or_default(),
    };

    Json(ShopView {
        products: filters.apply(&all),
        categories: category_options(&all),
        sort: filters.sort,
    })
}

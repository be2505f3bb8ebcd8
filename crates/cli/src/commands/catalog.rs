//! Catalog browsing: products, categories, search and the shop listing.

use cartwheel_core::ProductId;
use cartwheel_storefront::catalog::{CatalogClient, CatalogError, Product, SHOP_PAGE_LIMIT};
use cartwheel_storefront::shop::{ShopFilters, category_options};

fn print_product(product: &Product) {
    tracing::info!(
        "#{:<5} {} ({}) {} [{:.1}/5]",
        product.id.as_i64(),
        product.title,
        product.category,
        product.price,
        product.rating
    );
}

/// # Errors
///
/// Returns an error if the catalog request fails.
pub async fn list(catalog: &CatalogClient, limit: u32, skip: u32) -> Result<(), CatalogError> {
    let page = catalog.list_products(limit, skip).await?;
    for product in &page.products {
        print_product(product);
    }
    tracing::info!(
        "Showing {} of {} (skip {})",
        page.products.len(),
        page.total,
        page.skip
    );
    Ok(())
}

/// # Errors
///
/// Returns an error if the product does not exist or the request fails.
pub async fn show(catalog: &CatalogClient, id: ProductId) -> Result<Product, CatalogError> {
    let product = catalog.product(id).await?;
    print_product(&product);
    if let Some(brand) = &product.brand {
        tracing::info!("Brand: {brand}");
    }
    if let Some(stock) = product.stock {
        tracing::info!("In stock: {stock}");
    }
    if let Some(description) = &product.description {
        tracing::info!("{description}");
    }
    Ok(product)
}

/// # Errors
///
/// Returns an error if the catalog request fails.
pub async fn search(catalog: &CatalogClient, query: &str) -> Result<(), CatalogError> {
    let products = catalog.suggest(query).await?;
    if products.is_empty() {
        tracing::info!("No products match {query:?}");
    }
    for product in &products {
        print_product(product);
    }
    Ok(())
}

/// # Errors
///
/// Returns an error if the catalog request fails.
pub async fn categories(catalog: &CatalogClient) -> Result<(), CatalogError> {
    for category in catalog.categories().await? {
        tracing::info!("{:<24} {}", category.slug, category.name);
    }
    Ok(())
}

/// Fetch one large page and filter it locally.
///
/// # Errors
///
/// Returns an error if the catalog request fails.
pub async fn shop(catalog: &CatalogClient, filters: &ShopFilters) -> Result<(), CatalogError> {
    let all = catalog.list_products(SHOP_PAGE_LIMIT, 0).await?.products;
    let products = filters.apply(&all);

    tracing::info!("Categories: {}", category_options(&all).join(", "));
    for product in &products {
        print_product(product);
    }
    tracing::info!(
        "{} of {} products (sort: {})",
        products.len(),
        all.len(),
        filters.sort.as_str()
    );
    Ok(())
}

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use backoffice_core::{AggregateRoot, DomainResult};
use backoffice_pricing::{ImageResolver, Product, Tier};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub price: Decimal,
    /// Raw stored image value: a URL or a JSON array of URLs.
    pub image: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PriceQuery {
    pub quantity: u32,
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub id: String,
    pub store_id: String,
    pub name: String,
    pub price: Decimal,
    pub display_image: String,
    pub tiers: Vec<Tier>,
    pub version: u64,
}

#[derive(Debug, Serialize)]
pub struct PriceResponse {
    pub quantity: u32,
    pub unit_price: Decimal,
    pub total: Decimal,
}

pub fn product_to_response(product: &Product, images: &ImageResolver) -> ProductResponse {
    ProductResponse {
        id: product.id().to_string(),
        store_id: product.store_id().to_string(),
        name: product.name().to_string(),
        price: product.base_price(),
        display_image: product.display_image(images),
        tiers: product.tiers_for_display(),
        version: product.version(),
    }
}

pub fn price_for(product: &Product, quantity: u32) -> DomainResult<PriceResponse> {
    Ok(PriceResponse {
        quantity,
        unit_price: product.unit_price(quantity),
        total: product.line_total(quantity)?,
    })
}

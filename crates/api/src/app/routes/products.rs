use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use backoffice_core::ProductId;
use backoffice_pricing::RawTierInput;

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::StoreContext;

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_product).get(list_products))
        .route("/:id", get(get_product))
        .route("/:id/tiers", post(add_tier).get(list_tiers))
        .route("/:id/price", get(quote_price))
}

fn parse_product_id(id: &str) -> Result<ProductId, axum::response::Response> {
    id.parse()
        .map_err(|_| errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid product id"))
}

pub async fn create_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(store): Extension<StoreContext>,
    Json(body): Json<dto::CreateProductRequest>,
) -> axum::response::Response {
    match services.create_product(store.store_id(), body) {
        Ok(product) => (
            StatusCode::CREATED,
            Json(dto::product_to_response(&product, services.images())),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(store): Extension<StoreContext>,
) -> axum::response::Response {
    let items = services
        .list_products(store.store_id())
        .iter()
        .map(|p| dto::product_to_response(p, services.images()))
        .collect::<Vec<_>>();
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

pub async fn get_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(store): Extension<StoreContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let product_id = match parse_product_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.get_product(store.store_id(), &product_id) {
        Some(p) => (StatusCode::OK, Json(dto::product_to_response(&p, services.images()))).into_response(),
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "product not found"),
    }
}

pub async fn list_tiers(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(store): Extension<StoreContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let product_id = match parse_product_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.get_product(store.store_id(), &product_id) {
        Some(p) => (StatusCode::OK, Json(serde_json::json!({ "items": p.tiers_for_display() }))).into_response(),
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "product not found"),
    }
}

pub async fn add_tier(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(store): Extension<StoreContext>,
    Path(id): Path<String>,
    Json(body): Json<RawTierInput>,
) -> axum::response::Response {
    let product_id = match parse_product_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.add_tier(store.store_id(), product_id, body) {
        Ok(tier) => (StatusCode::CREATED, Json(tier)).into_response(),
        Err(e) => errors::product_error_to_response(e),
    }
}

pub async fn quote_price(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(store): Extension<StoreContext>,
    Path(id): Path<String>,
    Query(query): Query<dto::PriceQuery>,
) -> axum::response::Response {
    let product_id = match parse_product_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.get_product(store.store_id(), &product_id) {
        Some(p) => match dto::price_for(&p, query.quantity) {
            Ok(quote) => (StatusCode::OK, Json(quote)).into_response(),
            Err(e) => errors::domain_error_to_response(e),
        },
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "product not found"),
    }
}

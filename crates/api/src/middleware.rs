use axum::{
    extract::Request,
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};

use backoffice_core::StoreId;

use crate::app::errors::json_error;
use crate::context::StoreContext;

/// Header carrying the store a request operates on.
pub const STORE_HEADER: &str = "x-store-id";

pub async fn store_context_middleware(mut req: Request, next: Next) -> Result<Response, Response> {
    let store_id = extract_store(req.headers())
        .ok_or_else(|| json_error(StatusCode::BAD_REQUEST, "missing_store", "X-Store-Id header must carry a valid store id"))?;

    req.extensions_mut().insert(StoreContext::new(store_id));

    Ok(next.run(req).await)
}

fn extract_store(headers: &HeaderMap) -> Option<StoreId> {
    headers.get(STORE_HEADER)?.to_str().ok()?.parse().ok()
}

//! Local stand-in for the DNS management API.
//!
//! Every method is a `GET /api/<method>/` with `AUTH_TOKEN` and the method's
//! arguments in the query string. Replies follow the upstream envelope:
//! `{"meta":{"success":1,"code":200},"data":...}` on success and
//! `{"meta":{"success":0,"code":..,"error":".."}}` otherwise.

pub mod geo;
pub mod params;
pub mod store;

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

use crate::params::Params;
use crate::store::Store;

#[derive(Clone)]
pub struct AppState {
    token: Arc<str>,
    store: Arc<RwLock<Store>>,
}

pub fn app(token: &str) -> Router {
    let state = AppState {
        token: Arc::from(token),
        store: Arc::new(RwLock::new(Store::new())),
    };
    Router::new()
        .route("/api/{method}/", get(dispatch))
        .route("/api/{method}", get(dispatch))
        .with_state(state)
}

pub async fn run(listener: TcpListener, token: &str) -> Result<(), std::io::Error> {
    axum::serve(listener, app(token)).await
}

/// A random token in the upstream `XXXXXXXX-XXXX-...` shape.
pub fn generate_token() -> String {
    Uuid::new_v4().to_string().to_uppercase()
}

async fn dispatch(
    State(state): State<AppState>,
    Path(method): Path<String>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> (StatusCode, Json<Value>) {
    let params = Params::new(pairs);
    if params.get("AUTH_TOKEN") != Some(&*state.token) {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({ "meta": { "success": 0, "code": 403, "error": "Invalid AUTH_TOKEN" } })),
        );
    }

    let mut store = state.store.write().await;
    match store.handle(&method, &params) {
        Some(Ok(data)) => (
            StatusCode::OK,
            Json(json!({ "meta": { "success": 1, "code": 200 }, "data": data })),
        ),
        Some(Err(failure)) => (StatusCode::OK, Json(failure.to_json())),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "meta": { "success": 0, "code": 404, "error": format!("Unknown method '{method}'") } })),
        ),
    }
}

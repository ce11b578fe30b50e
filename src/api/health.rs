use axum::response::Json;
use serde_json::{Value, json};

use crate::server::CALLBACK_PATH;

pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "sporldeck-login-callback",
        "callback": CALLBACK_PATH,
        "version": env!("CARGO_PKG_VERSION")
    }))
}

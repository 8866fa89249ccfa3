//! Token-gated probe endpoint.
//! Used by: server.

use axum::Json;
use serde_json::{json, Value};

use crate::auth::AuthUser;

pub async fn protected(auth: AuthUser) -> Json<Value> {
    Json(json!({
        "message": "This is secure data!",
        "user_id": auth.0.uid,
    }))
}

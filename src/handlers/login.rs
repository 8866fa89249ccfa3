//! Login endpoint issuing session tokens.
//! Used by: server.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::password::verify_password;
use crate::state::AppState;
use crate::token::claims::Claims;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
}

/// Unknown email and wrong password answer identically.
fn denied() -> LoginResponse {
    LoginResponse {
        message: "Login failed".into(),
        authenticated: false,
        access_token: None,
        token_type: None,
    }
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let user = match state.users.find_by_email(&req.email)? {
        Some(user) => user,
        None => {
            state.metrics.record_login_failure();
            tracing::info!(email = %req.email, "login failed: unknown email");
            return Ok(Json(denied()));
        }
    };

    if !verify_password(&req.password, &user.password) {
        state.metrics.record_login_failure();
        tracing::info!(email = %req.email, "login failed: password mismatch");
        return Ok(Json(denied()));
    }

    let claims = Claims::new(user.email.clone(), user.id, state.config.session_ttl_secs);
    let token = state.codec.encode(&claims)?;
    state.metrics.record_issue();
    tracing::info!(user = user.id, "login succeeded");

    Ok(Json(LoginResponse {
        message: "Login successful".into(),
        authenticated: true,
        access_token: Some(token),
        token_type: Some("bearer".into()),
    }))
}

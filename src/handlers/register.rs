//! User registration endpoint with input validation.
//! Used by: server.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::password::hash_password;
use crate::state::AppState;
use crate::store::sqlite::UserData;
use crate::token::claims::Claims;

#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct CreateUserResponse {
    pub message: String,
    pub access_token: String,
    pub token_type: String,
}

fn validate_request(req: &CreateUserRequest) -> Result<()> {
    if req.name.is_empty() || req.name.len() > 255 {
        return Err(Error::Validation("name must be 1-255 characters".into()));
    }
    if req.email.len() > 255 || !req.email.contains('@') {
        return Err(Error::Validation("email must be a valid address".into()));
    }
    if req.password.len() < 8 {
        return Err(Error::Validation(
            "password must be at least 8 characters".into(),
        ));
    }
    Ok(())
}

pub async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> Result<Json<CreateUserResponse>> {
    validate_request(&req)?;
    let hashed = hash_password(&req.password)?;
    let user = state.users.insert(UserData {
        name: req.name,
        phone: req.phone,
        email: req.email,
        password: hashed,
    })?;

    let claims = Claims::new(user.email.clone(), user.id, state.config.grant_ttl_secs);
    let token = state.codec.encode(&claims)?;
    state.metrics.record_user_created();
    state.metrics.record_issue();
    tracing::info!(user = user.id, "user created");

    Ok(Json(CreateUserResponse {
        message: "User created successfully".into(),
        access_token: token,
        token_type: "bearer".into(),
    }))
}

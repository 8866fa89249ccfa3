//! Bearer-token authentication gate.
//! Used by: handlers.

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};

use crate::error::{Error, Result};
use crate::state::AppState;
use crate::token::claims::Claims;

/// Extractor that decodes the Authorization bearer token and yields its
/// claims. Handlers that take an `AuthUser` reject unauthenticated requests
/// before their body runs.
pub struct AuthUser(pub Claims);

#[axum::async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self> {
        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(Error::MissingToken)?;
        let token = header_value
            .strip_prefix("Bearer ")
            .ok_or(Error::MissingToken)?;

        match state.codec.decode(token) {
            Ok(claims) => Ok(AuthUser(claims)),
            Err(e) => {
                state.metrics.record_reject();
                tracing::debug!(error = %e, "bearer token rejected");
                Err(e)
            }
        }
    }
}

impl AuthUser {
    /// Subject must own the addressed resource; a valid token for someone
    /// else's id is forbidden, not unauthenticated.
    pub fn require_owner(&self, id: i64) -> Result<()> {
        if self.0.uid != id {
            return Err(Error::Forbidden);
        }
        Ok(())
    }
}

//! User CRUD endpoints guarded by token ownership.
//! Used by: server.

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::auth::AuthUser;
use crate::error::{Error, Result};
use crate::password::hash_password;
use crate::state::AppState;
use crate::store::sqlite::{UserData, UserRecord};

/// Public view of a user row. The password hash never leaves the store
/// through this type.
#[derive(Serialize)]
pub struct UserOut {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub email: String,
}

impl From<UserRecord> for UserOut {
    fn from(user: UserRecord) -> Self {
        Self {
            id: user.id,
            name: user.name,
            phone: user.phone,
            email: user.email,
        }
    }
}

#[derive(Serialize)]
pub struct UserList {
    pub users: Vec<UserOut>,
}

pub async fn read_all(_auth: AuthUser, State(state): State<AppState>) -> Result<Json<UserList>> {
    let users = state.users.list()?.into_iter().map(UserOut::from).collect();
    Ok(Json(UserList { users }))
}

pub async fn read_profile(
    auth: AuthUser,
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<UserOut>> {
    auth.require_owner(id)?;
    let user = state
        .users
        .find_by_id(id)?
        .ok_or(Error::UserNotFound(id))?;
    Ok(Json(user.into()))
}

#[derive(Deserialize)]
pub struct UpdateUserRequest {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub password: String,
}

pub async fn update_user(
    auth: AuthUser,
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<Value>> {
    auth.require_owner(id)?;
    let hashed = hash_password(&req.password)?;
    state.users.update(
        id,
        UserData {
            name: req.name,
            phone: req.phone,
            email: req.email,
            password: hashed,
        },
    )?;
    tracing::info!(user = id, "user updated");
    Ok(Json(json!({ "message": "User updated successfully" })))
}

pub async fn delete_user(
    auth: AuthUser,
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<Value>> {
    auth.require_owner(id)?;
    state.users.delete(id)?;
    state.metrics.record_user_deleted();
    tracing::info!(user = id, "user deleted");
    Ok(Json(json!({ "message": "User deleted successfully" })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::build_test_state;
    use crate::token::claims::Claims;

    fn seed(state: &AppState, name: &str, email: &str) -> Result<UserRecord> {
        state.users.insert(UserData {
            name: name.into(),
            phone: "555-0100".into(),
            email: email.into(),
            password: "$2b$12$fake-hash".into(),
        })
    }

    fn auth_for(user: &UserRecord) -> AuthUser {
        AuthUser(Claims::new(user.email.clone(), user.id, 300))
    }

    #[tokio::test]
    async fn read_all_omits_password_hashes() -> Result<()> {
        let state = build_test_state()?;
        let ada = seed(&state, "Ada", "ada@example.com")?;
        seed(&state, "Grace", "grace@example.com")?;
        let Json(list) = read_all(auth_for(&ada), State(state.clone())).await?;
        assert_eq!(list.users.len(), 2);
        let body = serde_json::to_string(&list).unwrap();
        assert!(!body.contains("fake-hash"));
        assert!(!body.contains("password"));
        Ok(())
    }

    #[tokio::test]
    async fn profile_returns_own_row() -> Result<()> {
        let state = build_test_state()?;
        let ada = seed(&state, "Ada", "ada@example.com")?;
        let Json(profile) =
            read_profile(auth_for(&ada), Path(ada.id), State(state.clone())).await?;
        assert_eq!(profile.id, ada.id);
        assert_eq!(profile.email, "ada@example.com");
        Ok(())
    }

    #[tokio::test]
    async fn profile_of_another_subject_forbidden() -> Result<()> {
        let state = build_test_state()?;
        let ada = seed(&state, "Ada", "ada@example.com")?;
        let grace = seed(&state, "Grace", "grace@example.com")?;
        let result = read_profile(auth_for(&grace), Path(ada.id), State(state.clone())).await;
        assert!(matches!(result, Err(Error::Forbidden)));
        Ok(())
    }

    #[tokio::test]
    async fn profile_of_deleted_row_not_found() -> Result<()> {
        let state = build_test_state()?;
        let ada = seed(&state, "Ada", "ada@example.com")?;
        state.users.delete(ada.id)?;
        let result = read_profile(auth_for(&ada), Path(ada.id), State(state.clone())).await;
        assert!(matches!(result, Err(Error::UserNotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn update_rehashes_password() -> Result<()> {
        let state = build_test_state()?;
        let ada = seed(&state, "Ada", "ada@example.com")?;
        update_user(
            auth_for(&ada),
            Path(ada.id),
            State(state.clone()),
            Json(UpdateUserRequest {
                name: "Ada Lovelace".into(),
                phone: "555-0199".into(),
                email: "ada@example.com".into(),
                password: "new password".into(),
            }),
        )
        .await?;
        let stored = state.users.find_by_id(ada.id)?.expect("row");
        assert_eq!(stored.name, "Ada Lovelace");
        assert_ne!(stored.password, "new password");
        assert!(crate::password::verify_password("new password", &stored.password));
        Ok(())
    }

    #[tokio::test]
    async fn update_for_another_subject_forbidden() -> Result<()> {
        let state = build_test_state()?;
        let ada = seed(&state, "Ada", "ada@example.com")?;
        let grace = seed(&state, "Grace", "grace@example.com")?;
        let result = update_user(
            auth_for(&grace),
            Path(ada.id),
            State(state.clone()),
            Json(UpdateUserRequest {
                name: "Hijacked".into(),
                phone: "555-0000".into(),
                email: "hijack@example.com".into(),
                password: "new password".into(),
            }),
        )
        .await;
        assert!(matches!(result, Err(Error::Forbidden)));
        assert_eq!(state.users.find_by_id(ada.id)?.expect("row").name, "Ada");
        Ok(())
    }

    #[tokio::test]
    async fn delete_removes_own_row_only() -> Result<()> {
        let state = build_test_state()?;
        let ada = seed(&state, "Ada", "ada@example.com")?;
        let grace = seed(&state, "Grace", "grace@example.com")?;

        let result = delete_user(auth_for(&grace), Path(ada.id), State(state.clone())).await;
        assert!(matches!(result, Err(Error::Forbidden)));

        delete_user(auth_for(&ada), Path(ada.id), State(state.clone())).await?;
        assert!(state.users.find_by_id(ada.id)?.is_none());
        assert!(state.users.find_by_id(grace.id)?.is_some());
        assert_eq!(state.metrics.snapshot().users_deleted, 1);
        Ok(())
    }
}

//! Registration and login handlers
//!
//! Thin wrappers over [`UserStore`](crate::store::UserStore). No session or
//! token is issued; a successful login returns only a success message.

use axum::{extract::State, http::StatusCode, Json};
use tracing::{info, warn};
use ytsum_common::api::{CredentialsRequest, StatusResponse};

use crate::api::extract::JsonBody;
use crate::error::ApiResult;
use crate::store::AuthError;
use crate::AppState;

/// POST /api/register
///
/// 201 on success, 400 on missing fields, 409 if the username is taken.
pub async fn register(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CredentialsRequest>,
) -> ApiResult<(StatusCode, Json<StatusResponse>)> {
    let username = req.username.unwrap_or_default();
    let password = req.password.unwrap_or_default();

    state.users.register(&username, &password).await?;

    info!(username = %username, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(StatusResponse::success("User registered")),
    ))
}

/// POST /api/login
///
/// 200 on success, 400 on missing fields, 404 unknown user, 401 wrong
/// password.
pub async fn login(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CredentialsRequest>,
) -> ApiResult<Json<StatusResponse>> {
    let username = req.username.unwrap_or_default();
    let password = req.password.unwrap_or_default();

    match state.users.login(&username, &password).await {
        Ok(()) => {
            info!(username = %username, "Login successful");
            Ok(Json(StatusResponse::success("Login successful")))
        }
        Err(err @ (AuthError::NotFound | AuthError::WrongPassword)) => {
            warn!(username = %username, "Login rejected: {}", err);
            Err(err.into())
        }
        Err(err) => Err(err.into()),
    }
}

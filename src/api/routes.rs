//! API route handlers

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde::Serialize;

use super::server::{sign_in, SharedState};
use crate::auth::{Credentials, Identity};
use crate::error::Error;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        tracing::error!("Request failed: {}", self);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<()>::err(self.to_string())),
        )
            .into_response()
    }
}

// Health check

pub async fn health() -> impl IntoResponse {
    Json(ApiResponse::ok("healthy"))
}

// Session routes

pub async fn get_session(State(state): State<SharedState>) -> Json<ApiResponse<Option<Identity>>> {
    let state = state.read().await;
    Json(ApiResponse::ok(state.session.current_identity().cloned()))
}

pub async fn create_session(
    State(state): State<SharedState>,
    Json(credentials): Json<Credentials>,
) -> Result<Response, Error> {
    if !credentials.is_complete() {
        return Ok((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ApiResponse::<()>::err("email and password are required")),
        )
            .into_response());
    }

    if !sign_in(&state, &credentials).await? {
        return Ok((
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::<()>::err("invalid credentials")),
        )
            .into_response());
    }

    let identity = state.read().await.session.current_identity().cloned();
    Ok((StatusCode::OK, Json(ApiResponse::ok(identity))).into_response())
}

pub async fn delete_session(State(state): State<SharedState>) -> Result<Response, Error> {
    state.write().await.session.logout()?;
    Ok((StatusCode::OK, Json(ApiResponse::ok("logged out"))).into_response())
}

/// Sign-out button in the page header
pub async fn logout(State(state): State<SharedState>) -> Result<Redirect, Error> {
    state.write().await.session.logout()?;
    Ok(Redirect::to("/login"))
}

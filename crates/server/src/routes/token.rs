use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::{identity, AppState};
use crate::errors::ApiError;

#[derive(Debug, Deserialize, ToSchema)]
pub struct TokenRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    pub access_token: String,
}

/// Exchange credentials for a time-bound bearer token.
#[utoipa::path(post, path = "/token/", tag = "token", request_body = TokenRequest,
    responses((status = 200, description = "Token issued"), (status = 401, description = "Unauthorized")))]
pub async fn issue_token(
    State(state): State<AppState>,
    Json(input): Json<TokenRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let seller = identity(&state)
        .authenticate(&input.email, &input.password)
        .await?;
    let token = state.tokens.issue(&seller.email)?;
    Ok(Json(TokenResponse { access_token: format!("Bearer {token}") }))
}

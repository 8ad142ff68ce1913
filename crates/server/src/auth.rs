use std::sync::Arc;

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts, HeaderMap};
use axum::Json;
use sea_orm::DatabaseConnection;
use tracing::debug;

use service::auth::{PasswordHasher, TokenIssuer};
use service::sellers::domain::Seller;
use service::sellers::errors::SellerError;
use service::sellers::repo::seaorm::SeaOrmSellerRepository;
use service::sellers::SellerIdentityService;

use crate::errors::ApiError;
use crate::routes::sellers::ReturnedSeller;

/// Shared request state: the connection pool plus the credential primitives,
/// all constructed once at startup.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub hasher: PasswordHasher,
    pub tokens: TokenIssuer,
}

/// Identity service over the SeaORM repository for the current request.
pub fn identity(state: &AppState) -> SellerIdentityService<SeaOrmSellerRepository> {
    SellerIdentityService::new(
        Arc::new(SeaOrmSellerRepository { db: state.db.clone() }),
        state.hasher,
    )
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Request gate for protected endpoints: extracts the bearer token, validates
/// it, and re-resolves the subject against storage.
///
/// Every failure (missing header, bad signature, expired token, subject
/// deleted since issuance) is reported as the same 401 so the response never
/// reveals which sub-check failed.
pub struct CurrentSeller(pub Seller);

#[async_trait]
impl FromRequestParts<AppState> for CurrentSeller {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Some(token) = bearer_token(&parts.headers) else {
            debug!("missing or malformed Authorization header");
            return Err(ApiError(SellerError::Unauthorized));
        };
        let subject = state.tokens.validate(token)?;
        match identity(state).get_by_email(&subject).await {
            Ok(seller) => Ok(CurrentSeller(seller)),
            Err(e) => {
                debug!(code = e.code(), "token subject no longer resolves");
                Err(ApiError(SellerError::Unauthorized))
            }
        }
    }
}

/// Profile of the authenticated seller.
#[utoipa::path(get, path = "/me", tag = "seller",
    responses((status = 200, description = "Current seller"), (status = 401, description = "Unauthorized")))]
pub async fn me(CurrentSeller(seller): CurrentSeller) -> Json<ReturnedSeller> {
    Json(seller.into())
}

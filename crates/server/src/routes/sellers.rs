use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use models::seller::{validate_email, validate_name, validate_password};
use service::sellers::domain::{Book, RegisterInput, Seller, SellerUpdate, SellerWithBooks};
use service::sellers::errors::SellerError;

use crate::auth::{identity, AppState};
use crate::errors::ApiError;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateSellerRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

/// Seller view returned to clients; password material never appears here.
#[derive(Debug, Serialize, ToSchema)]
pub struct ReturnedSeller {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl From<Seller> for ReturnedSeller {
    fn from(s: Seller) -> Self {
        Self { id: s.id, first_name: s.first_name, last_name: s.last_name, email: s.email }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReturnedAllSellers {
    pub sellers: Vec<ReturnedSeller>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReturnedBook {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub year: i32,
}

impl From<Book> for ReturnedBook {
    fn from(b: Book) -> Self {
        Self { id: b.id, title: b.title, author: b.author, year: b.year }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReturnedSellerDetails {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub books: Vec<ReturnedBook>,
}

impl From<SellerWithBooks> for ReturnedSellerDetails {
    fn from(s: SellerWithBooks) -> Self {
        Self {
            id: s.id,
            first_name: s.first_name,
            last_name: s.last_name,
            email: s.email,
            books: s.books.into_iter().map(ReturnedBook::from).collect(),
        }
    }
}

/// Allow-listed partial update; unknown keys are rejected, not ignored.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateSellerRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

fn invalid(e: models::errors::ModelError) -> ApiError {
    ApiError(SellerError::Validation(e.to_string()))
}

#[utoipa::path(post, path = "/seller/", tag = "seller", request_body = CreateSellerRequest,
    responses((status = 201, description = "Created"), (status = 400, description = "Bad Request")))]
pub async fn create_seller(
    State(state): State<AppState>,
    Json(input): Json<CreateSellerRequest>,
) -> Result<(StatusCode, Json<ReturnedSeller>), ApiError> {
    validate_name("first_name", &input.first_name).map_err(invalid)?;
    validate_name("last_name", &input.last_name).map_err(invalid)?;
    validate_email(&input.email).map_err(invalid)?;
    validate_password(&input.password).map_err(invalid)?;

    let created = identity(&state)
        .register(RegisterInput {
            first_name: input.first_name,
            last_name: input.last_name,
            email: input.email,
            password: input.password,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

#[utoipa::path(get, path = "/seller/", tag = "seller",
    responses((status = 200, description = "All sellers")))]
pub async fn list_sellers(
    State(state): State<AppState>,
) -> Result<Json<ReturnedAllSellers>, ApiError> {
    let sellers = identity(&state).list_all().await?;
    Ok(Json(ReturnedAllSellers {
        sellers: sellers.into_iter().map(ReturnedSeller::from).collect(),
    }))
}

#[utoipa::path(get, path = "/seller/{id}", tag = "seller",
    params(("id" = i32, Path, description = "seller id")),
    responses((status = 200, description = "Seller with books"), (status = 404, description = "Not Found")))]
pub async fn get_seller(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ReturnedSellerDetails>, ApiError> {
    let details = identity(&state).get_by_id_with_books(id).await?;
    Ok(Json(details.into()))
}

#[utoipa::path(put, path = "/seller/{id}", tag = "seller",
    params(("id" = i32, Path, description = "seller id")),
    request_body = UpdateSellerRequest,
    responses((status = 200, description = "Updated"), (status = 400, description = "Bad Request"), (status = 404, description = "Not Found")))]
pub async fn update_seller(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<ReturnedSeller>, ApiError> {
    // deserialize by hand so an unknown key is a 400, not a silent no-op
    let input: UpdateSellerRequest = serde_json::from_value(body)
        .map_err(|e| ApiError(SellerError::Validation(e.to_string())))?;
    if let Some(v) = input.first_name.as_deref() {
        validate_name("first_name", v).map_err(invalid)?;
    }
    if let Some(v) = input.last_name.as_deref() {
        validate_name("last_name", v).map_err(invalid)?;
    }
    if let Some(v) = input.email.as_deref() {
        validate_email(v).map_err(invalid)?;
    }

    let updated = identity(&state)
        .update(
            id,
            SellerUpdate {
                first_name: input.first_name,
                last_name: input.last_name,
                email: input.email,
                password: None,
            },
        )
        .await?;
    Ok(Json(updated.into()))
}

#[utoipa::path(delete, path = "/seller/{id}", tag = "seller",
    params(("id" = i32, Path, description = "seller id")),
    responses((status = 204, description = "Deleted"), (status = 404, description = "Not Found")))]
pub async fn delete_seller(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    identity(&state).remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

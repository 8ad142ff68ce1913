use utoipa::OpenApi;

use crate::routes::sellers::{
    CreateSellerRequest, ReturnedAllSellers, ReturnedBook, ReturnedSeller, ReturnedSellerDetails,
    UpdateSellerRequest,
};
use crate::routes::token::{TokenRequest, TokenResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::sellers::create_seller,
        crate::routes::sellers::list_sellers,
        crate::routes::sellers::get_seller,
        crate::routes::sellers::update_seller,
        crate::routes::sellers::delete_seller,
        crate::routes::token::issue_token,
        crate::auth::me,
    ),
    components(
        schemas(
            CreateSellerRequest,
            ReturnedSeller,
            ReturnedAllSellers,
            ReturnedBook,
            ReturnedSellerDetails,
            UpdateSellerRequest,
            TokenRequest,
            TokenResponse,
        )
    ),
    tags(
        (name = "health"),
        (name = "seller"),
        (name = "token")
    )
)]
pub struct ApiDoc;

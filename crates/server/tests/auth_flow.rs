use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::Duration;
use migration::MigratorTrait;
use serde_json::{json, Value};
use tower::Service;

use service::auth::{PasswordHasher, TokenConfig, TokenIssuer};

use server::auth::AppState;
use server::routes;

fn cors() -> tower_http::cors::CorsLayer {
    tower_http::cors::CorsLayer::very_permissive()
}

/// In-process app over an in-memory sqlite database; every test starts from
/// an empty schema, so assigned ids are predictable.
async fn build_app() -> anyhow::Result<(Router, AppState)> {
    let cfg = configs::DatabaseConfig { url: "sqlite::memory:".into(), ..Default::default() };
    let db = models::db::connect(&cfg).await?;
    migration::Migrator::up(&db, None).await?;
    let state = AppState {
        db,
        hasher: PasswordHasher::default(),
        tokens: TokenIssuer::new(TokenConfig::with_default_ttl("test-secret")),
    };
    Ok((routes::build_router(cors(), state.clone()), state))
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

fn put_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("PUT")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder().method("DELETE").uri(uri).body(Body::empty()).unwrap()
}

async fn body_json(resp: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn register_body(email: &str) -> Value {
    json!({"first_name": "Seller", "last_name": "Sellerow", "email": email, "password": "password1"})
}

#[tokio::test]
async fn register_returns_seller_without_password() -> anyhow::Result<()> {
    let (mut app, _) = build_app().await?;

    let resp = app.call(post_json("/seller/", register_body("a@mail.ru"))).await?;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body = body_json(resp).await;
    assert_eq!(
        body,
        json!({"id": 1, "first_name": "Seller", "last_name": "Sellerow", "email": "a@mail.ru"})
    );
    Ok(())
}

#[tokio::test]
async fn register_duplicate_email_is_bad_request() -> anyhow::Result<()> {
    let (mut app, _) = build_app().await?;

    let resp = app.call(post_json("/seller/", register_body("a@mail.ru"))).await?;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = app.call(post_json("/seller/", register_body("a@mail.ru"))).await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn register_rejects_invalid_fields() -> anyhow::Result<()> {
    let (mut app, _) = build_app().await?;

    let cases = [
        json!({"first_name": "Sel1er", "last_name": "Sellerow", "email": "a@mail.ru", "password": "password1"}),
        json!({"first_name": "Seller", "last_name": "S", "email": "a@mail.ru", "password": "password1"}),
        json!({"first_name": "Seller", "last_name": "Sellerow", "email": "not-an-email", "password": "password1"}),
        json!({"first_name": "Seller", "last_name": "Sellerow", "email": "a@mail.ru", "password": "short"}),
    ];
    for body in cases {
        let resp = app.call(post_json("/seller/", body)).await?;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
    Ok(())
}

#[tokio::test]
async fn list_sellers_wraps_in_envelope() -> anyhow::Result<()> {
    let (mut app, _) = build_app().await?;

    app.call(post_json("/seller/", register_body("seller2@mail.ru"))).await?;
    app.call(post_json("/seller/", register_body("seller3@mail.ru"))).await?;

    let resp = app.call(get("/seller/")).await?;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = body_json(resp).await;
    let emails: Vec<&str> =
        body["sellers"].as_array().unwrap().iter().map(|s| s["email"].as_str().unwrap()).collect();
    assert!(emails.contains(&"seller2@mail.ru"));
    assert!(emails.contains(&"seller3@mail.ru"));
    Ok(())
}

#[tokio::test]
async fn seller_details_include_books() -> anyhow::Result<()> {
    let (mut app, _) = build_app().await?;

    app.call(post_json("/seller/", register_body("seller4@mail.ru"))).await?;

    let resp = app.call(get("/seller/1")).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(
        body,
        json!({"id": 1, "first_name": "Seller", "last_name": "Sellerow", "email": "seller4@mail.ru", "books": []})
    );
    Ok(())
}

#[tokio::test]
async fn missing_seller_is_not_found() -> anyhow::Result<()> {
    let (mut app, _) = build_app().await?;

    let resp = app.call(get("/seller/42")).await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = app.call(put_json("/seller/42", json!({"first_name": "Ivan"}))).await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = app.call(delete("/seller/42")).await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn partial_update_keeps_absent_fields() -> anyhow::Result<()> {
    let (mut app, _) = build_app().await?;

    app.call(post_json("/seller/", register_body("seller6@mail.ru"))).await?;

    let resp = app.call(put_json("/seller/1", json!({"first_name": "Ivan"}))).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["first_name"], "Ivan");
    assert_eq!(body["last_name"], "Sellerow");
    assert_eq!(body["email"], "seller6@mail.ru");
    Ok(())
}

#[tokio::test]
async fn full_update_replaces_all_fields() -> anyhow::Result<()> {
    let (mut app, _) = build_app().await?;

    app.call(post_json("/seller/", register_body("seller6@mail.ru"))).await?;

    let resp = app
        .call(put_json(
            "/seller/1",
            json!({"first_name": "AnotherSeller", "last_name": "AnotherSellerow", "email": "anotherseller6@mail.ru"}),
        ))
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app.call(get("/seller/1")).await?;
    let body = body_json(resp).await;
    assert_eq!(body["first_name"], "AnotherSeller");
    assert_eq!(body["last_name"], "AnotherSellerow");
    assert_eq!(body["email"], "anotherseller6@mail.ru");
    Ok(())
}

#[tokio::test]
async fn update_rejects_unknown_fields() -> anyhow::Result<()> {
    let (mut app, _) = build_app().await?;

    app.call(post_json("/seller/", register_body("a@mail.ru"))).await?;

    let resp = app.call(put_json("/seller/1", json!({"nickname": "shadow"}))).await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // the bogus key must not have touched the record
    let resp = app.call(get("/seller/1")).await?;
    let body = body_json(resp).await;
    assert_eq!(body["first_name"], "Seller");
    Ok(())
}

#[tokio::test]
async fn update_to_taken_email_is_bad_request() -> anyhow::Result<()> {
    let (mut app, _) = build_app().await?;

    app.call(post_json("/seller/", register_body("a@mail.ru"))).await?;
    app.call(post_json("/seller/", register_body("b@mail.ru"))).await?;

    let resp = app.call(put_json("/seller/2", json!({"email": "a@mail.ru"}))).await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn delete_then_lookup_is_not_found() -> anyhow::Result<()> {
    let (mut app, _) = build_app().await?;

    app.call(post_json("/seller/", register_body("seller5@mail.ru"))).await?;

    let resp = app.call(delete("/seller/1")).await?;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = app.call(get("/seller/1")).await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = app.call(delete("/seller/1")).await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn token_flow_issues_bearer_and_resolves_profile() -> anyhow::Result<()> {
    let (mut app, _) = build_app().await?;

    app.call(post_json("/seller/", register_body("a@mail.ru"))).await?;

    let resp = app
        .call(post_json("/token/", json!({"email": "a@mail.ru", "password": "password1"})))
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    let access_token = body["access_token"].as_str().unwrap().to_string();
    assert!(access_token.starts_with("Bearer "));

    let req = Request::builder()
        .method("GET")
        .uri("/me")
        .header("Authorization", &access_token)
        .body(Body::empty())?;
    let resp = app.call(req).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["email"], "a@mail.ru");
    Ok(())
}

#[tokio::test]
async fn wrong_password_is_unauthorized_with_challenge() -> anyhow::Result<()> {
    let (mut app, _) = build_app().await?;

    app.call(post_json("/seller/", register_body("a@mail.ru"))).await?;

    let resp = app
        .call(post_json("/token/", json!({"email": "a@mail.ru", "password": "password2"})))
        .await?;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(resp.headers().get("www-authenticate").unwrap(), "Bearer");
    Ok(())
}

#[tokio::test]
async fn unknown_email_gets_the_same_unauthorized() -> anyhow::Result<()> {
    let (mut app, _) = build_app().await?;

    app.call(post_json("/seller/", register_body("a@mail.ru"))).await?;

    let wrong_password = app
        .call(post_json("/token/", json!({"email": "a@mail.ru", "password": "password2"})))
        .await?;
    let unknown_email = app
        .call(post_json("/token/", json!({"email": "ghost@mail.ru", "password": "password1"})))
        .await?;
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);
    // identical bodies: the response must not reveal whether the email exists
    assert_eq!(body_json(wrong_password).await, body_json(unknown_email).await);
    Ok(())
}

#[tokio::test]
async fn me_requires_a_valid_token() -> anyhow::Result<()> {
    let (mut app, _) = build_app().await?;

    let resp = app.call(get("/me")).await?;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(resp.headers().get("www-authenticate").unwrap(), "Bearer");

    let req = Request::builder()
        .method("GET")
        .uri("/me")
        .header("Authorization", "Bearer not.a.jwt")
        .body(Body::empty())?;
    let resp = app.call(req).await?;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn expired_token_is_unauthorized() -> anyhow::Result<()> {
    let (mut app, state) = build_app().await?;

    app.call(post_json("/seller/", register_body("a@mail.ru"))).await?;

    let token = state.tokens.issue_with_ttl("a@mail.ru", Duration::seconds(-60))?;
    let req = Request::builder()
        .method("GET")
        .uri("/me")
        .header("Authorization", format!("Bearer {token}"))
        .body(Body::empty())?;
    let resp = app.call(req).await?;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn token_of_deleted_seller_is_unauthorized() -> anyhow::Result<()> {
    let (mut app, _) = build_app().await?;

    app.call(post_json("/seller/", register_body("a@mail.ru"))).await?;
    let resp = app
        .call(post_json("/token/", json!({"email": "a@mail.ru", "password": "password1"})))
        .await?;
    let body = body_json(resp).await;
    let access_token = body["access_token"].as_str().unwrap().to_string();

    let resp = app.call(delete("/seller/1")).await?;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    // token still carries a valid signature but the subject is gone
    let req = Request::builder()
        .method("GET")
        .uri("/me")
        .header("Authorization", &access_token)
        .body(Body::empty())?;
    let resp = app.call(req).await?;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn health_is_public() -> anyhow::Result<()> {
    let (mut app, _) = build_app().await?;
    let resp = app.call(get("/health")).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["status"], "ok");
    Ok(())
}

use std::net::SocketAddr;

use axum::Router;
use chrono::Duration;
use common::utils::logging::init_logging_default;
use dotenvy::dotenv;
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::info;

use service::auth::{PasswordHasher, TokenConfig, TokenIssuer};

use crate::auth::AppState;
use crate::routes;

/// Initialize logging via shared common utils
fn init_logging() {
    init_logging_default();
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    let cfg = configs::AppConfig::load_and_validate()?;

    // DB connection + schema
    let db = models::db::connect(&cfg.database).await?;
    migration::Migrator::up(&db, None).await?;

    let tokens = TokenIssuer::new(TokenConfig::new(
        cfg.auth.jwt_secret.clone(),
        Duration::minutes(cfg.auth.token_ttl_minutes),
    ));
    let state = AppState { db, hasher: PasswordHasher::default(), tokens };

    // Build router
    let app: Router = routes::build_router(build_cors(), state);

    // Bind and serve
    let addr: SocketAddr = format!("{}:{}", cfg.server.host, cfg.server.port).parse()?;
    info!(%addr, "starting seller api server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

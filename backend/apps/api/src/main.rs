//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors; request errors are rendered by the
//! domain crates.

mod config;

use account::{AccountConfig, PgAccountRepository, account_router, account_router_generic};
use axum::extract::State;
use axum::routing::get;
use axum::{
    Json, Router, http,
    http::{Method, header},
};
use pon::{MemoryStore, PgPonRepository, SharedCatalog, pon_router, pon_router_generic};
use serde::Serialize;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,account=info,pon=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;

    // Pon catalog, swapped in place on SIGHUP
    let catalog = SharedCatalog::load(config.pon.clone()).await;
    #[cfg(unix)]
    spawn_catalog_reload(catalog.clone());

    let domain_routes = match config.database_url.as_deref() {
        Some(database_url) => {
            let pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(database_url)
                .await?;

            tracing::info!("Connected to database");

            // Run migrations
            sqlx::migrate!("../../../database/migrations")
                .run(&pool)
                .await?;

            tracing::info!("Migrations completed");

            let accounts = PgAccountRepository::new(pool.clone());
            account_router(accounts.clone(), config.account.clone()).merge(pon_router(
                accounts,
                PgPonRepository::new(pool),
                config.account.clone(),
                catalog,
            ))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using the in-memory store; data is lost on exit");
            memory_routes(config.account.clone(), catalog)
        }
    };

    // CORS configuration
    let allowed_origins: Vec<http::HeaderValue> = config
        .frontend_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    // Build router
    let app = build_app(domain_routes, &config.motd)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    tracing::info!("Listening on {}", config.bind_addr);

    let listener = TcpListener::bind(config.bind_addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// Account and pon routes over one shared in-memory store
fn memory_routes(account_config: AccountConfig, catalog: SharedCatalog) -> Router {
    let store = MemoryStore::new();
    account_router_generic(store.clone(), account_config.clone()).merge(pon_router_generic(
        store.clone(),
        store,
        account_config,
        catalog,
    ))
}

/// Nest the domain routes and `/hello` under `/api`
fn build_app(domain_routes: Router, motd: &str) -> Router {
    let hello_routes = Router::new()
        .route("/hello", get(hello))
        .with_state(Arc::<str>::from(motd));

    Router::new().nest("/api", domain_routes.merge(hello_routes))
}

#[derive(Debug, Serialize)]
struct HelloResponse {
    coinpon: &'static str,
    motd: String,
}

/// GET /api/hello
async fn hello(State(motd): State<Arc<str>>) -> Json<HelloResponse> {
    Json(HelloResponse {
        coinpon: env!("CARGO_PKG_VERSION"),
        motd: motd.to_string(),
    })
}

#[cfg(unix)]
fn spawn_catalog_reload(catalog: SharedCatalog) {
    use tokio::signal::unix::{SignalKind, signal};

    tokio::spawn(async move {
        let mut hangups = match signal(SignalKind::hangup()) {
            Ok(hangups) => hangups,
            Err(e) => {
                tracing::warn!(error = %e, "Cannot listen for SIGHUP, catalog reload disabled");
                return;
            }
        };

        while hangups.recv().await.is_some() {
            let pons = catalog.reload().await;
            tracing::info!(pons, "Catalog reloaded on SIGHUP");
        }
    });
}

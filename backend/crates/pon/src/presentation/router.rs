//! Pon Router

use account::{AccountConfig, PgAccountRepository};
use account::domain::repository::UserRepository;
use axum::{Router, routing::post};
use std::sync::Arc;

use crate::domain::repository::{BalanceRepository, InventoryRepository, PullRepository};
use crate::infra::catalog::SharedCatalog;
use crate::infra::postgres::PgPonRepository;
use crate::presentation::handlers::{self, PonAppState};

/// Create the Pon router with PostgreSQL repositories
pub fn pon_router(
    accounts: PgAccountRepository,
    repo: PgPonRepository,
    account_config: AccountConfig,
    catalog: SharedCatalog,
) -> Router {
    pon_router_generic(accounts, repo, account_config, catalog)
}

/// Create a generic Pon router for any repository implementations
pub fn pon_router_generic<A, R>(
    accounts: A,
    repo: R,
    account_config: AccountConfig,
    catalog: SharedCatalog,
) -> Router
where
    A: UserRepository + Clone + Send + Sync + 'static,
    R: BalanceRepository + PullRepository + InventoryRepository + Clone + Send + Sync + 'static,
{
    let state = PonAppState {
        accounts: Arc::new(accounts),
        repo: Arc::new(repo),
        account_config: Arc::new(account_config),
        catalog,
    };

    Router::new()
        .route("/pons/list", post(handlers::list_pons::<A, R>))
        .route("/pons/details", post(handlers::pon_details::<A, R>))
        .route("/pons/cards", post(handlers::pon_cards::<A, R>))
        .route("/pons/cards/data", post(handlers::card_data::<A, R>))
        .route("/pons/cards/image", post(handlers::card_image::<A, R>))
        .route("/pons/inventory", post(handlers::inventory::<A, R>))
        .route("/pull", post(handlers::pull::<A, R>))
        .with_state(state)
}

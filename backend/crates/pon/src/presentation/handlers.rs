//! HTTP Handlers

use account::AccountConfig;
use account::application::IdentifyUseCase;
use account::domain::repository::UserRepository;
use account::models::UserName;
use axum::Json;
use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceExt;
use tower_http::services::ServeFile;

use crate::application::{BrowseUseCase, InventoryUseCase, PullUseCase};
use crate::domain::repository::{BalanceRepository, InventoryRepository, PullRepository};
use crate::error::{PonError, PonResult};
use crate::infra::catalog::SharedCatalog;
use crate::presentation::dto::{
    CardResponse, CardsResponse, InventoryResponse, PonDetailsResponse, PonListResponse,
    PonRequest, PullResponse,
};
use crate::presentation::extract::PonJson;

/// Shared state for pon handlers
#[derive(Clone)]
pub struct PonAppState<A, R>
where
    A: UserRepository + Clone + Send + Sync + 'static,
    R: BalanceRepository + PullRepository + InventoryRepository + Clone + Send + Sync + 'static,
{
    /// Credential store, for token resolution
    pub accounts: Arc<A>,
    pub repo: Arc<R>,
    pub account_config: Arc<AccountConfig>,
    pub catalog: SharedCatalog,
}

impl<A, R> PonAppState<A, R>
where
    A: UserRepository + Clone + Send + Sync + 'static,
    R: BalanceRepository + PullRepository + InventoryRepository + Clone + Send + Sync + 'static,
{
    async fn authenticate(&self, token: &str) -> PonResult<UserName> {
        let use_case = IdentifyUseCase::new(self.accounts.clone(), self.account_config.clone());
        Ok(use_case.authenticate(token).await?)
    }

    async fn browse(&self) -> BrowseUseCase {
        BrowseUseCase::new(self.catalog.snapshot().await)
    }
}

/// POST /api/pons/list
pub async fn list_pons<A, R>(
    State(state): State<PonAppState<A, R>>,
    PonJson(req): PonJson<PonRequest>,
) -> PonResult<Json<PonListResponse>>
where
    A: UserRepository + Clone + Send + Sync + 'static,
    R: BalanceRepository + PullRepository + InventoryRepository + Clone + Send + Sync + 'static,
{
    state.authenticate(req.token()?).await?;

    Ok(Json(PonListResponse {
        pons: state.browse().await.list(),
    }))
}

/// POST /api/pons/details
pub async fn pon_details<A, R>(
    State(state): State<PonAppState<A, R>>,
    PonJson(req): PonJson<PonRequest>,
) -> PonResult<Json<PonDetailsResponse>>
where
    A: UserRepository + Clone + Send + Sync + 'static,
    R: BalanceRepository + PullRepository + InventoryRepository + Clone + Send + Sync + 'static,
{
    let (token, pon_id) = (req.token()?, req.pon_id()?);
    state.authenticate(token).await?;

    Ok(Json(PonDetailsResponse {
        meta: state.browse().await.details(pon_id)?,
    }))
}

/// POST /api/pons/cards
pub async fn pon_cards<A, R>(
    State(state): State<PonAppState<A, R>>,
    PonJson(req): PonJson<PonRequest>,
) -> PonResult<Json<CardsResponse>>
where
    A: UserRepository + Clone + Send + Sync + 'static,
    R: BalanceRepository + PullRepository + InventoryRepository + Clone + Send + Sync + 'static,
{
    let (token, pon_id) = (req.token()?, req.pon_id()?);
    state.authenticate(token).await?;

    Ok(Json(CardsResponse {
        cards: state.browse().await.cards(pon_id)?,
    }))
}

/// POST /api/pons/cards/data
pub async fn card_data<A, R>(
    State(state): State<PonAppState<A, R>>,
    PonJson(req): PonJson<PonRequest>,
) -> PonResult<Json<CardResponse>>
where
    A: UserRepository + Clone + Send + Sync + 'static,
    R: BalanceRepository + PullRepository + InventoryRepository + Clone + Send + Sync + 'static,
{
    let (token, pon_id, card_id) = (req.token()?, req.pon_id()?, req.card_id()?);
    state.authenticate(token).await?;

    Ok(Json(CardResponse {
        card: state.browse().await.card(pon_id, card_id)?,
    }))
}

/// POST /api/pons/cards/image
pub async fn card_image<A, R>(
    State(state): State<PonAppState<A, R>>,
    PonJson(req): PonJson<PonRequest>,
) -> PonResult<Response>
where
    A: UserRepository + Clone + Send + Sync + 'static,
    R: BalanceRepository + PullRepository + InventoryRepository + Clone + Send + Sync + 'static,
{
    let (token, pon_id, card_id) = (req.token()?, req.pon_id()?, req.card_id()?);
    state.authenticate(token).await?;

    let path = state
        .browse()
        .await
        .image_path(pon_id, card_id, req.variety_id.as_deref())?;

    serve_image(path).await
}

/// Stream an image file with a content type guessed from its extension
async fn serve_image(path: PathBuf) -> PonResult<Response> {
    let response = match ServeFile::new(&path)
        .oneshot(Request::new(Body::empty()))
        .await
    {
        Ok(response) => response,
        Err(never) => match never {},
    };

    match response.status() {
        StatusCode::NOT_FOUND => Err(PonError::ImageNotFound),
        status if status.is_server_error() => Err(PonError::Internal(format!(
            "failed to serve {}",
            path.display()
        ))),
        _ => Ok(response.map(Body::new)),
    }
}

/// POST /api/pull
pub async fn pull<A, R>(
    State(state): State<PonAppState<A, R>>,
    PonJson(req): PonJson<PonRequest>,
) -> PonResult<Json<PullResponse>>
where
    A: UserRepository + Clone + Send + Sync + 'static,
    R: BalanceRepository + PullRepository + InventoryRepository + Clone + Send + Sync + 'static,
{
    let (token, pon_id) = (req.token()?, req.pon_id()?);
    let user_name = state.authenticate(token).await?;

    // The snapshot stays fixed for this pull even if a reload lands meanwhile
    let catalog = state.catalog.snapshot().await;
    let output = PullUseCase::new(state.repo.clone())
        .execute(&user_name, pon_id, &catalog)
        .await?;

    Ok(Json(PullResponse {
        card: output.reference.as_str().to_string(),
        coins: output.remaining_coins,
    }))
}

/// POST /api/pons/inventory
pub async fn inventory<A, R>(
    State(state): State<PonAppState<A, R>>,
    PonJson(req): PonJson<PonRequest>,
) -> PonResult<Json<InventoryResponse>>
where
    A: UserRepository + Clone + Send + Sync + 'static,
    R: BalanceRepository + PullRepository + InventoryRepository + Clone + Send + Sync + 'static,
{
    let user_name = state.authenticate(req.token()?).await?;

    let entries = InventoryUseCase::new(state.repo.clone())
        .execute(&user_name, req.pon_id.as_deref())
        .await?;

    Ok(Json(InventoryResponse {
        entries: entries.into_iter().map(Into::into).collect(),
    }))
}

//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use std::sync::Arc;

use crate::application::config::AccountConfig;
use crate::application::{
    IdentifyUseCase, LoginInput, LoginUseCase, RegisterInput, RegisterUseCase,
};
use crate::domain::repository::UserRepository;
use crate::error::{AccountError, AccountResult};
use crate::presentation::extract::AccountJson;
use crate::presentation::dto::{
    BalanceResponse, CredentialsRequest, DetailResponse, LoginResponse, TokenRequest,
    WhoAmIResponse,
};

/// Shared state for account handlers
#[derive(Clone)]
pub struct AccountAppState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AccountConfig>,
}

/// POST /api/register
pub async fn register<R>(
    State(state): State<AccountAppState<R>>,
    AccountJson(req): AccountJson<CredentialsRequest>,
) -> AccountResult<Json<DetailResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = RegisterUseCase::new(state.repo.clone(), state.config.clone());

    use_case
        .execute(RegisterInput {
            user_name: req.username,
            password: req.password,
        })
        .await?;

    Ok(Json(DetailResponse { detail: "ok" }))
}

/// POST /api/login
pub async fn login<R>(
    State(state): State<AccountAppState<R>>,
    AccountJson(req): AccountJson<CredentialsRequest>,
) -> AccountResult<Json<LoginResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = LoginUseCase::new(state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(LoginInput {
            user_name: req.username,
            password: req.password,
        })
        .await?;

    Ok(Json(LoginResponse {
        token: output.token.into_inner(),
    }))
}

/// POST /api/account/whoami
pub async fn whoami<R>(
    State(state): State<AccountAppState<R>>,
    AccountJson(req): AccountJson<TokenRequest>,
) -> AccountResult<Json<WhoAmIResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = IdentifyUseCase::new(state.repo.clone(), state.config.clone());

    let user_name = use_case
        .identify(&req.token)
        .await?
        .ok_or(AccountError::UserNotFound)?;

    Ok(Json(WhoAmIResponse {
        username: user_name.into_inner(),
    }))
}

/// POST /api/account/balance
pub async fn balance<R>(
    State(state): State<AccountAppState<R>>,
    AccountJson(req): AccountJson<TokenRequest>,
) -> AccountResult<Json<BalanceResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = IdentifyUseCase::new(state.repo.clone(), state.config.clone());
    let balance = use_case.balance(&req.token).await?;

    Ok(Json(BalanceResponse {
        coins: balance.coins,
        tokens: balance.tokens,
    }))
}

//! Account crate tests
//!
//! Use cases run against an in-process credential store; the router tests drive the
//! real handlers through `tower::ServiceExt::oneshot`.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::application::config::AccountConfig;
use crate::domain::entity::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{TokenDigest, UserName};
use crate::error::{AccountError, AccountResult};

/// HashMap-backed credential store
#[derive(Clone, Default)]
struct MockUserRepository {
    users: Arc<Mutex<HashMap<String, User>>>,
}

impl UserRepository for MockUserRepository {
    async fn create(&self, user: &User) -> AccountResult<()> {
        let mut users = self.users.lock().await;
        if users.contains_key(user.user_name.as_str()) {
            return Err(AccountError::UsernameTaken);
        }
        users.insert(user.user_name.as_str().to_string(), user.clone());
        Ok(())
    }

    async fn exists_by_user_name(&self, user_name: &UserName) -> AccountResult<bool> {
        Ok(self.users.lock().await.contains_key(user_name.as_str()))
    }

    async fn find_by_user_name(&self, user_name: &UserName) -> AccountResult<Option<User>> {
        Ok(self.users.lock().await.get(user_name.as_str()).cloned())
    }

    async fn find_by_token_digest(&self, digest: &TokenDigest) -> AccountResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .await
            .values()
            .find(|u| &u.token_digest == digest)
            .cloned())
    }

    async fn update_token_digest(
        &self,
        user_name: &UserName,
        digest: &TokenDigest,
    ) -> AccountResult<()> {
        let mut users = self.users.lock().await;
        let user = users
            .get_mut(user_name.as_str())
            .ok_or(AccountError::UserNotFound)?;
        user.rotate_token(*digest);
        Ok(())
    }
}

// ============================================================================
// Use case tests
// ============================================================================

mod use_case_tests {
    use super::*;
    use crate::application::{
        IdentifyUseCase, LoginInput, LoginUseCase, RegisterInput, RegisterUseCase,
    };

    fn setup(config: AccountConfig) -> (Arc<MockUserRepository>, Arc<AccountConfig>) {
        (Arc::new(MockUserRepository::default()), Arc::new(config))
    }

    async fn register(
        repo: &Arc<MockUserRepository>,
        config: &Arc<AccountConfig>,
        name: &str,
        password: &str,
    ) -> AccountResult<()> {
        RegisterUseCase::new(repo.clone(), config.clone())
            .execute(RegisterInput {
                user_name: name.to_string(),
                password: password.to_string(),
            })
            .await
    }

    async fn login(
        repo: &Arc<MockUserRepository>,
        config: &Arc<AccountConfig>,
        name: &str,
        password: &str,
    ) -> AccountResult<String> {
        LoginUseCase::new(repo.clone(), config.clone())
            .execute(LoginInput {
                user_name: name.to_string(),
                password: password.to_string(),
            })
            .await
            .map(|out| out.token.into_inner())
    }

    #[tokio::test]
    async fn test_register_login_identify() {
        let (repo, config) = setup(AccountConfig::development());
        register(&repo, &config, "alice", "password1").await.unwrap();

        let token = login(&repo, &config, "alice", "password1").await.unwrap();
        let identify = IdentifyUseCase::new(repo.clone(), config.clone());
        let name = identify.identify(&token).await.unwrap();
        assert_eq!(name.map(|n| n.into_inner()), Some("alice".to_string()));
    }

    #[tokio::test]
    async fn test_password_never_stored_in_plaintext() {
        let (repo, config) = setup(AccountConfig::development());
        register(&repo, &config, "alice", "password1").await.unwrap();

        let users = repo.users.lock().await;
        let stored = users.get("alice").unwrap();
        assert!(!stored.password_hash.as_phc_string().contains("password1"));
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_user_look_the_same() {
        let (repo, config) = setup(AccountConfig::development());
        register(&repo, &config, "alice", "password1").await.unwrap();

        assert!(matches!(
            login(&repo, &config, "alice", "password2").await,
            Err(AccountError::InvalidCredentials)
        ));
        assert!(matches!(
            login(&repo, &config, "bob", "password1").await,
            Err(AccountError::InvalidCredentials)
        ));
        assert!(matches!(
            login(&repo, &config, "!", "password1").await,
            Err(AccountError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_duplicate_registration_conflicts() {
        let (repo, config) = setup(AccountConfig::development());
        register(&repo, &config, "alice", "password1").await.unwrap();

        let err = register(&repo, &config, "alice", "password2").await.unwrap_err();
        assert!(matches!(err, AccountError::UsernameTaken));
        assert_eq!(err.kind(), kernel::error::kind::ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_registrations_disabled() {
        let (repo, config) = setup(AccountConfig {
            registrations_enabled: false,
            ..AccountConfig::development()
        });

        assert!(matches!(
            register(&repo, &config, "alice", "password1").await,
            Err(AccountError::RegistrationsDisabled)
        ));
        assert!(repo.users.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_input_creates_nothing() {
        let (repo, config) = setup(AccountConfig::development());

        for name in ["ab", "a_very_long_name_17", "!"] {
            assert!(matches!(
                register(&repo, &config, name, "password1").await,
                Err(AccountError::InvalidUsername(_))
            ));
        }
        let too_long = "p".repeat(33);
        for password in ["1234567", too_long.as_str()] {
            assert!(matches!(
                register(&repo, &config, "alice", password).await,
                Err(AccountError::InvalidPassword(_))
            ));
        }
        assert!(repo.users.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_new_login_invalidates_previous_token() {
        let (repo, config) = setup(AccountConfig::development());
        register(&repo, &config, "alice", "password1").await.unwrap();

        let first = login(&repo, &config, "alice", "password1").await.unwrap();
        let second = login(&repo, &config, "alice", "password1").await.unwrap();
        assert_ne!(first, second);

        let identify = IdentifyUseCase::new(repo.clone(), config.clone());
        assert!(identify.identify(&first).await.unwrap().is_none());
        assert!(identify.identify(&second).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_tokens_do_not_survive_secret_change() {
        let (repo, config) = setup(AccountConfig::development());
        register(&repo, &config, "alice", "password1").await.unwrap();
        let token = login(&repo, &config, "alice", "password1").await.unwrap();

        let rotated = Arc::new(AccountConfig::development());
        let identify = IdentifyUseCase::new(repo.clone(), rotated);
        assert!(identify.identify(&token).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_balance_and_authenticate() {
        let (repo, config) = setup(AccountConfig::development());
        register(&repo, &config, "alice", "password1").await.unwrap();
        let token = login(&repo, &config, "alice", "password1").await.unwrap();

        let identify = IdentifyUseCase::new(repo.clone(), config.clone());
        let balance = identify.balance(&token).await.unwrap();
        assert_eq!((balance.coins, balance.tokens), (3, 0));

        assert!(matches!(
            identify.authenticate("nope").await,
            Err(AccountError::InvalidToken)
        ));
        assert!(matches!(
            identify.balance("").await,
            Err(AccountError::InvalidToken)
        ));
    }
}

// ============================================================================
// Router tests
// ============================================================================

mod router_tests {
    use super::*;
    use crate::presentation::router::account_router_generic;
    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
        post_text(app, uri, body.to_string()).await
    }

    async fn post_text(app: &Router, uri: &str, body: String) -> (StatusCode, Value) {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    fn app(config: AccountConfig) -> Router {
        account_router_generic(MockUserRepository::default(), config)
    }

    #[tokio::test]
    async fn test_full_account_flow() {
        let app = app(AccountConfig::development());
        let creds = json!({"username": "alice", "password": "password1"});

        let (status, body) = post(&app, "/register", creds.clone()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"detail": "ok"}));

        let (status, body) = post(&app, "/login", creds).await;
        assert_eq!(status, StatusCode::OK);
        let token = body["token"].as_str().unwrap().to_string();

        let (status, body) = post(&app, "/account/whoami", json!({"token": token})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"username": "alice"}));

        let (status, body) = post(&app, "/account/balance", json!({"token": token})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"coins": 3, "tokens": 0}));
    }

    #[tokio::test]
    async fn test_error_statuses() {
        let app = app(AccountConfig::development());
        let creds = json!({"username": "alice", "password": "password1"});
        post(&app, "/register", creds.clone()).await;

        let (status, body) = post(&app, "/register", creds).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["status"], 409);

        let (status, _) = post(
            &app,
            "/register",
            json!({"username": "ab", "password": "password1"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = post(
            &app,
            "/login",
            json!({"username": "alice", "password": "wrongpass"}),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = post(&app, "/account/whoami", json!({"token": "bogus"})).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = post(&app, "/account/balance", json!({"token": "bogus"})).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_registration_switch() {
        let app = app(AccountConfig {
            registrations_enabled: false,
            ..AccountConfig::development()
        });

        let (status, _) = post(
            &app,
            "/register",
            json!({"username": "alice", "password": "password1"}),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_malformed_bodies_are_problems() {
        let app = app(AccountConfig::development());

        for body in ["{not json", r#"{"username": 7, "password": "password1"}"#] {
            let (status, problem) = post_text(&app, "/register", body.to_string()).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "body {body}");
            assert_eq!(problem["status"], 400);
            assert!(problem["detail"].as_str().is_some());
        }

        let (status, problem) = post_text(&app, "/account/whoami", r#""just a string""#.to_string()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(problem["status"], 400);
    }
}

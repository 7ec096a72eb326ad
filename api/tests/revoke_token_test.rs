//! Integration tests for the revoke-token endpoint

use actix_web::cookie::Cookie;
use actix_web::dev::ServiceResponse;
use actix_web::{test, web};
use std::sync::Arc;

use mb_api::app::create_app;
use mb_api::routes::auth::{AppState, REFRESH_TOKEN_COOKIE};
use mb_api::security::JwtAccessTokenSigner;

use mb_core::domain::entities::User;
use mb_core::repositories::InMemoryCredentialStore;
use mb_core::services::{
    AuthService, BcryptPasswordVerifier, PasswordVerifier, TokenConfig, TokenService,
};

type TestState =
    web::Data<AppState<InMemoryCredentialStore, JwtAccessTokenSigner, BcryptPasswordVerifier>>;

async fn app_state_with_user(username: &str, password: &str) -> TestState {
    let store = Arc::new(InMemoryCredentialStore::new());
    let signer = Arc::new(JwtAccessTokenSigner::new("test-secret", 15));
    let verifier = Arc::new(BcryptPasswordVerifier::with_cost(4));

    let hash = verifier.hash(password).unwrap();
    store
        .add_user(User::new(username.to_string(), hash))
        .await
        .unwrap();

    let token_service = Arc::new(TokenService::new(
        Arc::clone(&store),
        Arc::clone(&signer),
        TokenConfig::default(),
    ));
    let auth_service = Arc::new(AuthService::new(
        Arc::clone(&store),
        Arc::clone(&token_service),
        verifier,
    ));

    web::Data::new(AppState {
        auth_service,
        token_service,
    })
}

fn login_request() -> actix_web::test::TestRequest {
    test::TestRequest::post()
        .uri("/api/v1/auth/authenticate")
        .set_json(serde_json::json!({
            "username": "nurse.joy",
            "password": "correct-password"
        }))
}

fn refresh_cookie_value<B>(resp: &ServiceResponse<B>) -> String {
    resp.response()
        .cookies()
        .find(|c| c.name() == REFRESH_TOKEN_COOKIE)
        .map(|c| c.value().to_string())
        .expect("refresh cookie should be set")
}

#[actix_web::test]
async fn test_revoked_token_no_longer_refreshes() {
    let app_state = app_state_with_user("nurse.joy", "correct-password").await;
    let app = test::init_service(create_app(app_state)).await;

    let login_resp = test::call_service(&app, login_request().to_request()).await;
    let token = refresh_cookie_value(&login_resp);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/revoke-token")
        .set_json(serde_json::json!({ "token": token }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Token revoked");

    // The session this token carried is dead
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/refresh-token")
        .cookie(Cookie::new(REFRESH_TOKEN_COOKIE, token))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn test_revoking_twice_returns_400() {
    let app_state = app_state_with_user("nurse.joy", "correct-password").await;
    let app = test::init_service(create_app(app_state)).await;

    let login_resp = test::call_service(&app, login_request().to_request()).await;
    let token = refresh_cookie_value(&login_resp);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/revoke-token")
        .set_json(serde_json::json!({ "token": token.clone() }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/revoke-token")
        .set_json(serde_json::json!({ "token": token }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 400);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "TOKEN_ALREADY_REVOKED");
}

#[actix_web::test]
async fn test_revoke_without_token_returns_400() {
    let app_state = app_state_with_user("nurse.joy", "correct-password").await;
    let app = test::init_service(create_app(app_state)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/revoke-token")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 400);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "REQUIRED_FIELD");
}

#[actix_web::test]
async fn test_revoke_unknown_token_returns_404() {
    let app_state = app_state_with_user("nurse.joy", "correct-password").await;
    let app = test::init_service(create_app(app_state)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/revoke-token")
        .set_json(serde_json::json!({ "token": "no-such-token" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 404);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "REFRESH_TOKEN_NOT_FOUND");
}

#[actix_web::test]
async fn test_revoke_falls_back_to_cookie() {
    let app_state = app_state_with_user("nurse.joy", "correct-password").await;
    let app = test::init_service(create_app(app_state)).await;

    let login_resp = test::call_service(&app, login_request().to_request()).await;
    let token = refresh_cookie_value(&login_resp);

    // No body at all: the handler should pick the token up from the cookie
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/revoke-token")
        .cookie(Cookie::new(REFRESH_TOKEN_COOKIE, token))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
}

use actix_web::{web, HttpServer};
use dotenv::dotenv;
use log::info;
use std::env;
use std::sync::Arc;

use mb_api::app::create_app;
use mb_api::config::ApiConfig;
use mb_api::routes::auth::AppState;
use mb_api::security::JwtAccessTokenSigner;

use mb_core::domain::entities::User;
use mb_core::repositories::InMemoryCredentialStore;
use mb_core::services::{
    AuthService, BcryptPasswordVerifier, PasswordVerifier, TokenConfig, TokenService,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting MedBook auth server");

    let config = ApiConfig::from_env();
    let token_config = TokenConfig::default();

    let store = Arc::new(InMemoryCredentialStore::new());
    let signer = Arc::new(JwtAccessTokenSigner::new(
        &config.jwt_secret,
        token_config.access_token_ttl_minutes,
    ));
    let password_verifier = Arc::new(BcryptPasswordVerifier::new());

    let token_service = Arc::new(TokenService::new(
        Arc::clone(&store),
        Arc::clone(&signer),
        token_config,
    ));
    let auth_service = Arc::new(AuthService::new(
        Arc::clone(&store),
        Arc::clone(&token_service),
        Arc::clone(&password_verifier),
    ));

    seed_user(&store, &password_verifier).await;

    let bind_address = config.bind_address();
    info!("Server will bind to: {}", bind_address);

    let app_state = web::Data::new(AppState {
        auth_service,
        token_service,
    });

    HttpServer::new(move || create_app(app_state.clone()))
        .bind(&bind_address)?
        .run()
        .await
}

/// Seeds a login from SEED_USERNAME/SEED_PASSWORD so a fresh in-memory
/// store has at least one account to authenticate against.
async fn seed_user(store: &InMemoryCredentialStore, verifier: &BcryptPasswordVerifier) {
    let (username, password) = match (env::var("SEED_USERNAME"), env::var("SEED_PASSWORD")) {
        (Ok(username), Ok(password)) => (username, password),
        _ => return,
    };

    let hash = verifier
        .hash(&password)
        .expect("failed to hash SEED_PASSWORD");
    store
        .add_user(User::new(username.clone(), hash))
        .await
        .expect("failed to seed user");

    info!("Seeded login for username: {}", username);
}

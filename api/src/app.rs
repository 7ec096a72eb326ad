//! Application factory
//!
//! Builds the Actix-web application with middleware and routes wired to the
//! shared service state.

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{middleware::Logger, web, App, Error, HttpResponse};

use crate::middleware::{cors::create_cors, security::SecurityMiddleware};
use crate::routes::auth::{
    authenticate::authenticate, refresh::refresh_token, revoke::revoke_token, AppState,
};

use mb_core::repositories::CredentialStore;
use mb_core::services::{AccessTokenSigner, PasswordVerifier};

/// Create and configure the application with all dependencies
pub fn create_app<S, G, P>(
    app_state: web::Data<AppState<S, G, P>>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
>
where
    S: CredentialStore + 'static,
    G: AccessTokenSigner + 'static,
    P: PasswordVerifier + 'static,
{
    // Configure CORS using our custom middleware
    let cors = create_cors();

    // Configure security middleware
    let security = SecurityMiddleware::new();

    App::new()
        // Add application state
        .app_data(app_state)
        // Add middleware (order matters: security first, then CORS, then logging)
        .wrap(Logger::default())
        .wrap(cors)
        .wrap(security)
        // Health check endpoint
        .route("/health", web::get().to(health_check))
        // API v1 routes
        .service(
            web::scope("/api/v1").service(
                web::scope("/auth")
                    .route("/authenticate", web::post().to(authenticate::<S, G, P>))
                    .route("/refresh-token", web::post().to(refresh_token::<S, G, P>))
                    .route("/revoke-token", web::post().to(revoke_token::<S, G, P>)),
            ),
        )
        // Default 404 handler
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "medbook-auth",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "error": "not_found",
        "message": "The requested resource was not found"
    }))
}

//! Unit tests for the token lifecycle service

use std::sync::Arc;

use chrono::{Duration, Utc};

use crate::domain::entities::refresh_token::{RefreshToken, REASON_REPLACED};
use crate::domain::entities::user::User;
use crate::errors::{DomainError, DomainResult, TokenError};
use crate::repositories::credential_store::{CredentialStore, InMemoryCredentialStore};
use crate::services::token::{AccessTokenSigner, TokenConfig, TokenService};

/// Signer emitting a predictable token per user.
struct StaticSigner;

impl AccessTokenSigner for StaticSigner {
    fn sign_access_token(&self, user: &User) -> DomainResult<String> {
        Ok(format!("access-token-for-{}", user.id))
    }
}

type TestService = TokenService<InMemoryCredentialStore, StaticSigner>;

async fn service_with_user(user: User) -> (TestService, Arc<InMemoryCredentialStore>) {
    let store = Arc::new(InMemoryCredentialStore::new());
    store.add_user(user).await.unwrap();
    let service = TokenService::new(store.clone(), Arc::new(StaticSigner), TokenConfig::default());
    (service, store)
}

fn active(name: &str) -> RefreshToken {
    RefreshToken::new(name.to_string(), Duration::days(7), Some("192.0.2.10"))
}

fn revoked(name: &str, replaced_by: Option<&str>) -> RefreshToken {
    let mut token = active(name);
    token.revoke(Some("192.0.2.10"), "earlier rotation");
    if let Some(successor) = replaced_by {
        token.mark_replaced(successor);
    }
    token
}

#[tokio::test]
async fn test_rotate_issues_fresh_linked_token() {
    let mut user = User::new("dr.green".to_string(), "hash".to_string());
    user.refresh_tokens.push(active("tok-a"));
    let user_id = user.id;
    let (service, store) = service_with_user(user).await;

    let pair = service.rotate("tok-a", Some("198.51.100.7")).await.unwrap();

    assert_ne!(pair.refresh_token, "tok-a");
    assert_eq!(pair.access_token, format!("access-token-for-{}", user_id));
    assert_eq!(pair.access_expires_in, 900);
    assert_eq!(pair.refresh_expires_in, 604_800);

    let user = store
        .find_by_refresh_token(&pair.refresh_token)
        .await
        .unwrap()
        .unwrap();
    let old = user.find_refresh_token("tok-a").unwrap();
    assert!(old.is_revoked());
    assert_eq!(
        old.replaced_by_token.as_deref(),
        Some(pair.refresh_token.as_str())
    );
    assert_eq!(old.reason_revoked.as_deref(), Some(REASON_REPLACED));
    assert_eq!(old.revoked_by_ip.as_deref(), Some("198.51.100.7"));

    let successor = user.find_refresh_token(&pair.refresh_token).unwrap();
    assert!(successor.is_active());
    assert_eq!(successor.created_by_ip.as_deref(), Some("198.51.100.7"));
    assert!(successor.replaced_by_token.is_none());
}

#[tokio::test]
async fn test_rotate_unknown_token_is_rejected() {
    let (service, _store) =
        service_with_user(User::new("dr.green".to_string(), "hash".to_string())).await;

    let result = service.rotate("tok-missing", None).await;

    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::RefreshTokenNotFound))
    ));
}

#[tokio::test]
async fn test_rotate_rejects_expired_token_without_mutation() {
    let mut user = User::new("dr.green".to_string(), "hash".to_string());
    let mut token = active("tok-old");
    token.expires_at = Utc::now() - Duration::hours(1);
    user.refresh_tokens.push(token);
    let (service, store) = service_with_user(user).await;

    let result = service.rotate("tok-old", Some("198.51.100.7")).await;

    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::InvalidRefreshToken))
    ));

    // Nothing was written: version still 0, record untouched.
    let user = store.find_by_refresh_token("tok-old").await.unwrap().unwrap();
    assert_eq!(user.version, 0);
    assert_eq!(user.refresh_tokens.len(), 1);
    let record = user.find_refresh_token("tok-old").unwrap();
    assert!(!record.is_revoked());
    assert!(record.replaced_by_token.is_none());
}

#[tokio::test]
async fn test_reuse_of_revoked_token_revokes_live_descendant() {
    let mut user = User::new("dr.green".to_string(), "hash".to_string());
    user.refresh_tokens.push(revoked("tok-a", Some("tok-b")));
    user.refresh_tokens.push(active("tok-b"));
    let (service, store) = service_with_user(user).await;

    let result = service.rotate("tok-a", Some("203.0.113.5")).await;
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::InvalidRefreshToken))
    ));

    // The breach containment was persisted even though the call failed.
    let user = store.find_by_refresh_token("tok-a").await.unwrap().unwrap();
    assert_eq!(user.version, 1);
    let descendant = user.find_refresh_token("tok-b").unwrap();
    assert!(descendant.is_revoked());
    assert_eq!(
        descendant.reason_revoked.as_deref(),
        Some("Attempted reuse of revoked ancestor token: tok-a")
    );
    assert_eq!(descendant.revoked_by_ip.as_deref(), Some("203.0.113.5"));
    assert!(descendant.replaced_by_token.is_none());

    // The legitimate holder of the descendant is locked out as well.
    let result = service.rotate("tok-b", Some("192.0.2.99")).await;
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::InvalidRefreshToken))
    ));
    let user = store.find_by_refresh_token("tok-b").await.unwrap().unwrap();
    assert_eq!(
        user.find_refresh_token("tok-b").unwrap().reason_revoked.as_deref(),
        Some("Attempted reuse of revoked ancestor token: tok-a")
    );
}

#[tokio::test]
async fn test_reuse_on_dead_lineage_changes_no_records() {
    let mut user = User::new("dr.green".to_string(), "hash".to_string());
    user.refresh_tokens.push(revoked("tok-a", Some("tok-b")));
    user.refresh_tokens.push(revoked("tok-b", Some("tok-c")));
    let mut end = active("tok-c");
    end.revoke(None, "logout");
    user.refresh_tokens.push(end);
    let (service, store) = service_with_user(user).await;

    let result = service.rotate("tok-a", None).await;
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::InvalidRefreshToken))
    ));

    let user = store.find_by_refresh_token("tok-a").await.unwrap().unwrap();
    assert_eq!(
        user.find_refresh_token("tok-a").unwrap().reason_revoked.as_deref(),
        Some("earlier rotation")
    );
    assert_eq!(
        user.find_refresh_token("tok-b").unwrap().reason_revoked.as_deref(),
        Some("earlier rotation")
    );
    assert_eq!(
        user.find_refresh_token("tok-c").unwrap().reason_revoked.as_deref(),
        Some("logout")
    );
}

#[tokio::test]
async fn test_rotation_sweeps_stale_tokens() {
    let mut user = User::new("dr.green".to_string(), "hash".to_string());

    let mut stale = revoked("tok-stale", None);
    stale.created_at = Utc::now() - Duration::days(10);
    user.refresh_tokens.push(stale);

    user.refresh_tokens.push(revoked("tok-recent-dead", None));
    user.refresh_tokens.push(active("tok-live"));
    let (service, store) = service_with_user(user).await;

    let pair = service.rotate("tok-live", None).await.unwrap();

    let user = store
        .find_by_refresh_token(&pair.refresh_token)
        .await
        .unwrap()
        .unwrap();
    assert!(user.find_refresh_token("tok-stale").is_none());
    assert!(user.find_refresh_token("tok-recent-dead").is_some());
    assert!(user.find_refresh_token("tok-live").unwrap().is_revoked());
    assert_eq!(user.refresh_tokens.len(), 3);
}

#[tokio::test]
async fn test_revoke_marks_token_without_replacement() {
    let mut user = User::new("dr.green".to_string(), "hash".to_string());
    user.refresh_tokens.push(active("tok-a"));
    let (service, store) = service_with_user(user).await;

    service.revoke("tok-a", Some("198.51.100.7")).await.unwrap();

    let user = store.find_by_refresh_token("tok-a").await.unwrap().unwrap();
    let record = user.find_refresh_token("tok-a").unwrap();
    assert!(record.is_revoked());
    assert_eq!(
        record.reason_revoked.as_deref(),
        Some("Revoked without replacement")
    );
    assert_eq!(record.revoked_by_ip.as_deref(), Some("198.51.100.7"));
    assert!(record.replaced_by_token.is_none());
    assert_eq!(user.version, 1);
}

#[tokio::test]
async fn test_revoke_is_rejected_when_already_revoked() {
    let mut user = User::new("dr.green".to_string(), "hash".to_string());
    user.refresh_tokens.push(revoked("tok-a", None));
    let (service, store) = service_with_user(user).await;

    let result = service.revoke("tok-a", None).await;

    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::AlreadyRevoked))
    ));
    let user = store.find_by_refresh_token("tok-a").await.unwrap().unwrap();
    assert_eq!(user.version, 0);
    assert_eq!(
        user.find_refresh_token("tok-a").unwrap().reason_revoked.as_deref(),
        Some("earlier rotation")
    );
}

#[tokio::test]
async fn test_revoke_is_rejected_when_expired() {
    let mut user = User::new("dr.green".to_string(), "hash".to_string());
    let mut token = active("tok-a");
    token.expires_at = Utc::now() - Duration::hours(1);
    user.refresh_tokens.push(token);
    let (service, _store) = service_with_user(user).await;

    let result = service.revoke("tok-a", None).await;

    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::AlreadyRevoked))
    ));
}

#[tokio::test]
async fn test_revoke_unknown_token_is_rejected() {
    let (service, _store) =
        service_with_user(User::new("dr.green".to_string(), "hash".to_string())).await;

    let result = service.revoke("tok-missing", None).await;

    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::RefreshTokenNotFound))
    ));
}

#[tokio::test]
async fn test_issue_appends_active_token() {
    let (service, store) =
        service_with_user(User::new("dr.green".to_string(), "hash".to_string())).await;
    let user = store.find_by_username("dr.green").await.unwrap().unwrap();
    let user_id = user.id;

    let pair = service.issue(user, Some("192.0.2.10")).await.unwrap();

    assert_eq!(pair.refresh_token.len(), 86);
    assert_eq!(pair.access_token, format!("access-token-for-{}", user_id));

    let user = store.find_by_username("dr.green").await.unwrap().unwrap();
    assert_eq!(user.refresh_tokens.len(), 1);
    assert!(user.refresh_tokens[0].is_active());
    assert_eq!(user.version, 1);
}

#[tokio::test]
async fn test_concurrent_rotation_loses_on_stale_snapshot() {
    let mut user = User::new("dr.green".to_string(), "hash".to_string());
    user.refresh_tokens.push(active("tok-a"));
    let (service, store) = service_with_user(user).await;

    // A second writer bumps the version between load and save.
    let pair = service.rotate("tok-a", None).await.unwrap();
    let stale = {
        let mut copy = store
            .find_by_refresh_token(&pair.refresh_token)
            .await
            .unwrap()
            .unwrap();
        copy.version = 0;
        copy
    };
    let result = store.save_user(stale).await;

    assert!(matches!(result, Err(DomainError::Conflict { .. })));
}

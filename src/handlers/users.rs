//! User list endpoint with method dispatch.
//! Used by: server.

use axum::extract::State;
use axum::http::{Method, Uri};
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::console;
use crate::error::{Error, Result};
use crate::state::AppState;

/// Handles every method on the users route. `GET` returns the full user
/// collection straight from the store; anything else is rejected with 405
/// and an `Allow: GET` header.
pub async fn handle(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
) -> Result<Response> {
    state.increment_requests();
    tracing::info!(method = %method, url = %uri, "handling request");

    if method == Method::GET {
        let users = state.users.all_users()?;
        state.metrics.record_users_listed();
        return Ok(Json(users).into_response());
    }

    state.metrics.record_request_rejected();
    console::log_method_rejected(method.as_str(), uri.path());
    Err(Error::MethodNotAllowed(method.to_string()))
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;
    use axum::http::StatusCode;
    use std::sync::atomic::Ordering::Relaxed;

    use super::*;
    use crate::state::build_test_state;
    use crate::store::sqlite::User;

    fn uri() -> Uri {
        "/api/users".parse().unwrap()
    }

    #[tokio::test]
    async fn get_returns_store_collection_unmodified() {
        let state = build_test_state().unwrap();
        state.users.insert("A").unwrap();
        state.users.insert("B").unwrap();

        let response = handle(State(state.clone()), Method::GET, uri())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let users: Vec<User> = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            users,
            vec![
                User { id: 1, name: "A".into() },
                User { id: 2, name: "B".into() },
            ]
        );
        assert_eq!(state.metrics.snapshot().users_listed, 1);
    }

    #[tokio::test]
    async fn get_on_empty_store_returns_empty_array() {
        let state = build_test_state().unwrap();
        let response = handle(State(state), Method::GET, uri()).await.unwrap();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let users: Vec<User> = serde_json::from_slice(&body).unwrap();
        assert!(users.is_empty());
    }

    #[tokio::test]
    async fn non_get_is_method_not_allowed() {
        let state = build_test_state().unwrap();
        for method in [Method::POST, Method::PUT, Method::DELETE] {
            let err = handle(State(state.clone()), method, uri())
                .await
                .unwrap_err();
            assert!(matches!(err, Error::MethodNotAllowed(_)));
        }
        assert_eq!(state.metrics.snapshot().requests_rejected, 3);
    }

    #[tokio::test]
    async fn every_request_is_counted_regardless_of_method() {
        let state = build_test_state().unwrap();
        handle(State(state.clone()), Method::GET, uri()).await.unwrap();
        handle(State(state.clone()), Method::POST, uri())
            .await
            .unwrap_err();
        assert_eq!(state.request_count.load(Relaxed), 2);
    }
}

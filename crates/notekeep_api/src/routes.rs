//! API route definitions.

use crate::auth::require_auth;
use crate::handlers::{auth_handlers, health, note_handlers};
use crate::state::AppState;
use axum::extract::Request;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use axum::middleware::{from_fn, from_fn_with_state, Next};
use axum::response::Response;
use axum::routing::{get, post};
use axum::Router;
use log::{info, warn};
use std::time::Instant;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

/// Origins allowed by the CORS layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CorsOrigins {
    /// Any origin, without credentials.
    #[default]
    Any,
    /// Exact origins, with credentials allowed.
    List(Vec<String>),
}

impl CorsOrigins {
    /// Parses a comma-separated origin list; blank input or `*` means any.
    pub fn parse(raw: &str) -> Self {
        let origins: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        if origins.is_empty() || origins.iter().any(|origin| origin == "*") {
            Self::Any
        } else {
            Self::List(origins)
        }
    }
}

/// Creates the API router.
///
/// Note routes sit behind [`require_auth`]; signup, login and health do not.
pub fn build_router(state: AppState, cors: &CorsOrigins) -> Router {
    let protected = Router::new()
        .route(
            "/api/notes",
            get(note_handlers::list_notes).post(note_handlers::create_note),
        )
        .route(
            "/api/notes/{id}",
            get(note_handlers::get_note)
                .put(note_handlers::update_note)
                .delete(note_handlers::delete_note),
        )
        .route_layer(from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .route("/", get(health::health))
        .route("/api/signup", post(auth_handlers::signup))
        .route("/api/login", post(auth_handlers::login))
        .merge(protected)
        .fallback(health::not_found)
        .layer(from_fn(log_requests))
        .layer(cors_layer(cors))
        .with_state(state)
}

fn cors_layer(origins: &CorsOrigins) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION]);

    match origins {
        CorsOrigins::Any => layer.allow_origin(Any),
        CorsOrigins::List(list) => {
            let values: Vec<HeaderValue> = list
                .iter()
                .filter_map(|origin| match HeaderValue::from_str(origin) {
                    Ok(value) => Some(value),
                    Err(_) => {
                        warn!("event=cors_config module=api status=skipped origin={origin}");
                        None
                    }
                })
                .collect();
            layer
                .allow_origin(AllowOrigin::list(values))
                .allow_credentials(true)
        }
    }
}

async fn log_requests(req: Request, next: Next) -> Response {
    let started_at = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;
    info!(
        "event=http_request module=api status={} method={} path={} duration_ms={}",
        response.status().as_u16(),
        method,
        path,
        started_at.elapsed().as_millis()
    );
    response
}

#[cfg(test)]
mod tests {
    use super::CorsOrigins;

    #[test]
    fn cors_origins_parse_lists_and_wildcards() {
        assert_eq!(CorsOrigins::parse(""), CorsOrigins::Any);
        assert_eq!(CorsOrigins::parse("*"), CorsOrigins::Any);
        assert_eq!(
            CorsOrigins::parse("http://localhost:3000, http://127.0.0.1:3000 ,"),
            CorsOrigins::List(vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
            ])
        );
    }
}

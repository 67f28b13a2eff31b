use std::time::Duration;

use axum::Router;
use axum::extract::{DefaultBodyLimit, MatchedPath};
use http::HeaderValue;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::bootstrap::app_context::AppContext;
use crate::bootstrap::config::Config;

pub mod error;
pub mod health;
pub mod images;
pub mod mail;
pub mod responses;
pub mod suppliers;
pub mod users;
pub mod work_suppliers;
pub mod works;


/// Every resource route, without middleware.
pub fn api_routes(ctx: AppContext) -> Router {
    Router::new()
        .merge(health::root_routes())
        .merge(works::routes(ctx.clone()))
        .merge(suppliers::routes(ctx.clone()))
        .merge(work_suppliers::routes(ctx.clone()))
        .merge(images::routes(ctx.clone()))
        .merge(users::routes(ctx.clone()))
        .merge(mail::routes(ctx))
}

/// Wraps a router with the deadline, body limit, CORS and request tracing.
///
/// The deadline answers 408 and drops the handler future, which cancels
/// the query, upload or SMTP exchange it was awaiting.
pub fn with_middleware(router: Router, cfg: &Config) -> Router {
    router
        .fallback(error::not_found)
        .layer(cors_layer(cfg))
        .layer(DefaultBodyLimit::max(cfg.upload_max_bytes))
        .layer(TimeoutLayer::new(Duration::from_secs(
            cfg.request_timeout_secs,
        )))
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &http::Request<_>| {
                let method = req.method().clone();
                let uri = req.uri().clone();
                let matched = req
                    .extensions()
                    .get::<MatchedPath>()
                    .map(|p| p.as_str().to_string())
                    .unwrap_or_default();
                tracing::info_span!("http", %method, %uri, matched_path = %matched)
            }),
        )
}

fn cors_layer(cfg: &Config) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([
            http::Method::GET,
            http::Method::POST,
            http::Method::DELETE,
            http::Method::OPTIONS,
        ])
        .allow_headers([http::header::CONTENT_TYPE]);

    if let Some(origin) = cfg.frontend_url.as_deref() {
        match HeaderValue::from_str(origin) {
            Ok(v) => return base.allow_origin(v),
            Err(_) => {
                tracing::warn!(%origin, "invalid_frontend_url_ignored");
            }
        }
    }
    if cfg.is_production {
        // No usable origin configured: deny cross-origin callers.
        base.allow_origin(AllowOrigin::exact(HeaderValue::from_static(
            "http://invalid",
        )))
    } else {
        base.allow_origin(AllowOrigin::mirror_request())
    }
}

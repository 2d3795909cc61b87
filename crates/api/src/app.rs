use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use shared::jwt::{JwtConfig, JwtError};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{metrics_handler, metrics_middleware, trace_id};
use crate::routes::{groups, health, invites, members};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub jwt: Arc<JwtConfig>,
}

pub fn create_app(config: Config, pool: PgPool) -> Result<Router, JwtError> {
    let config = Arc::new(config);

    let jwt = Arc::new(JwtConfig::with_leeway(
        &config.jwt.private_key,
        &config.jwt.public_key,
        config.jwt.access_token_expiry_secs,
        config.jwt.leeway_secs,
    )?);

    let state = AppState {
        pool,
        config: config.clone(),
        jwt,
    };

    // Build CORS layer based on configuration
    let cors = if config.security.cors_origins.is_empty() {
        // Default: allow any origin (for development)
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        // Production: only allow specified origins
        use tower_http::cors::AllowOrigin;
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Group and membership routes; authentication happens in the
    // UserAuth extractor on each handler.
    // Using /api/v1 prefix for versioned API
    let user_routes = Router::new()
        .route(
            "/api/v1/groups",
            post(groups::create_group).get(groups::list_groups),
        )
        .route(
            "/api/v1/groups/:group_id",
            get(groups::get_group).put(groups::update_group),
        )
        .route("/api/v1/groups/join", post(invites::join_group))
        .route("/api/v1/groups/:group_id/members", get(members::list_members))
        .route(
            "/api/v1/groups/:group_id/members/:member_id",
            put(members::update_member_permissions),
        )
        .route(
            "/api/v1/groups/:group_id/invites",
            post(invites::create_invite).get(invites::list_invites),
        )
        .route(
            "/api/v1/groups/:group_id/invites/:invite_id",
            delete(invites::delete_invite),
        );

    // Public routes (no authentication required)
    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler))
        // Group preview for unauthenticated invite-token holders
        .route("/api/v1/invites/:token", get(invites::preview_invite));

    // Merge all routes
    Ok(Router::new()
        .merge(public_routes)
        .merge(user_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware)) // Prometheus metrics
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id)) // Request ID and logging
        .layer(cors)
        .with_state(state))
}

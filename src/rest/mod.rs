// SPDX-License-Identifier: MIT
// rest/mod.rs — Public REST API server.
//
// Axum HTTP server, local-only by default.
//
// Endpoints:
//   POST  /api/v1/plans
//   GET   /api/v1/plans/{plan_id}
//   PATCH /api/v1/plans/{plan_id}/days/{day_number}
//   GET   /api/v1/streaks/me
//   GET   /api/v1/circles/{circle_id}/stats
//   GET   /api/v1/health

pub mod auth;
pub mod routes;

use anyhow::Result;
use axum::{
    routing::{get, patch, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::AppContext;

pub async fn start_rest_server(ctx: Arc<AppContext>) -> Result<()> {
    let bind = format!("{}:{}", ctx.config.bind_address, ctx.config.port);
    let addr: SocketAddr = bind.parse()?;

    let router = build_router(ctx);

    info!("REST API listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;
    Ok(())
}

pub fn build_router(ctx: Arc<AppContext>) -> Router {
    Router::new()
        // Health (no identity required)
        .route("/api/v1/health", get(routes::health::health))
        // Plans
        .route("/api/v1/plans", post(routes::plans::create_plan))
        .route("/api/v1/plans/{plan_id}", get(routes::plans::get_plan))
        .route(
            "/api/v1/plans/{plan_id}/days/{day_number}",
            patch(routes::plans::update_day),
        )
        // Streaks
        .route("/api/v1/streaks/me", get(routes::streaks::my_streak))
        // Circles (read-side)
        .route(
            "/api/v1/circles/{circle_id}/stats",
            get(routes::circles::circle_stats),
        )
        .layer(CorsLayer::permissive())
        .with_state(ctx)
}

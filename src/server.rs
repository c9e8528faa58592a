// ABOUTME: HTTP server assembly - merges domain routers and serves them
// ABOUTME: Applies tracing and CORS layers; binds via tokio TcpListener
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftcycle Project

use crate::context::ServerResources;
use crate::routes::{
    ExerciseRoutes, HealthRoutes, HistoryRoutes, LogRoutes, PlanRoutes, ScheduleRoutes,
    TemplateRoutes,
};
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

/// Build the full application router
#[must_use]
pub fn router(resources: Arc<ServerResources>) -> Router {
    let api = Router::new()
        .merge(HealthRoutes::routes())
        .merge(TemplateRoutes::routes(resources.clone()))
        .merge(PlanRoutes::routes(resources.clone()))
        .merge(ScheduleRoutes::routes(resources.clone()))
        .merge(ExerciseRoutes::routes(resources.clone()))
        .merge(LogRoutes::routes(resources.clone()))
        .merge(HistoryRoutes::routes(resources));

    Router::new()
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Bind the configured port and serve requests until shutdown
///
/// # Errors
///
/// Returns an error if the port cannot be bound or the server fails
pub async fn serve(resources: Arc<ServerResources>) -> Result<()> {
    let port = resources.config.http_port;
    let app = router(resources);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;
    info!("HTTP server listening on port {port}");

    axum::serve(listener, app).await?;

    Ok(())
}

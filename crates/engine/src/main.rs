//! Flickpick Service - Personalized Movie Recommendations
//!
//! Port: 8087

use actix_web::{web, App, HttpServer};
use flickpick_engine::{config::EngineConfig, recommend::RecommendationEngine, server};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    // Load configuration
    let config = Arc::new(EngineConfig::load()?);
    let bind_addr = config.bind_addr();

    info!(
        "Loading catalog from {} and similarity table from {}",
        config.data.catalog_path, config.data.similarity_path
    );

    // Load catalog and similarity data before binding
    let engine = Arc::new(RecommendationEngine::load(
        &config.data.catalog_path,
        &config.data.similarity_path,
    )?);

    info!(
        "Flickpick Service listening on {} with {} catalog rows",
        bind_addr,
        engine.catalog().len()
    );

    // Create application state
    let app_state = web::Data::new(server::AppState {
        engine,
        config: config.clone(),
    });

    // Start HTTP server with routes
    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .route("/health", web::get().to(server::health_check))
            .route("/ready", web::get().to(server::readiness_check))
            .configure(server::configure_routes)
            .wrap(actix_web::middleware::Logger::default())
    })
    .workers(config.server.workers.unwrap_or_else(num_cpus::get))
    .bind(&bind_addr)?
    .run()
    .await?;

    Ok(())
}

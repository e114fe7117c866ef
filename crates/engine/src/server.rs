//! HTTP surface: JSON endpoints over the engine and catalog queries.

use actix_web::{web, HttpResponse, Responder};
use chrono::{DateTime, Utc};
use flickpick_core::{Movie, TasteProfile};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use validator::Validate;

use crate::config::EngineConfig;
use crate::reason::Reason;
use crate::recommend::RecommendationEngine;

/// Rows returned by the top-rated listing when the query names no limit.
const DEFAULT_TOP_RATED_LIMIT: usize = 20;

pub struct AppState {
    pub engine: Arc<RecommendationEngine>,
    pub config: Arc<EngineConfig>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RecommendRequest {
    #[serde(flatten)]
    pub taste: TasteProfile,

    /// Rows to return; the configured default applies when absent.
    #[validate(range(max = 100))]
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ExplainRequest {
    /// Exact catalog title to explain.
    #[validate(length(min = 1, max = 512))]
    pub title: String,

    #[serde(flatten)]
    pub taste: TasteProfile,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct FeaturedRequest {
    #[serde(default)]
    pub watched_titles: Vec<String>,

    /// Rows to return, capped by the configured featured limit.
    #[validate(range(max = 100))]
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WatchedRequest {
    #[serde(default)]
    pub watched_titles: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TopRatedQuery {
    #[validate(range(max = 100))]
    pub limit: Option<usize>,
}

/// One recommended row plus the evidence behind it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationItem {
    pub title: String,
    pub genres: String,
    pub rating: f32,
    pub certificate: Option<String>,
    pub released_year: Option<String>,
    /// Rendered evidence sentence; absent when nothing ties the row to the
    /// caller's taste.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub watched_matches: Vec<String>,
    pub genre_matches: Vec<String>,
}

impl RecommendationItem {
    fn new(movie: &Movie, reason: Reason) -> Self {
        Self {
            title: movie.title.clone(),
            genres: movie.genres.clone(),
            rating: movie.rating,
            certificate: movie.certificate.clone(),
            released_year: movie.released_year.clone(),
            reason: reason.render(),
            watched_matches: reason.because_watched,
            genre_matches: reason.because_genres,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendResponse {
    pub recommendations: Vec<RecommendationItem>,
    pub count: usize,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplainResponse {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub watched_matches: Vec<String>,
    pub genre_matches: Vec<String>,
}

pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "flickpick-service",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

pub async fn readiness_check() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "ready"
    }))
}

async fn recommend(
    data: web::Data<AppState>,
    payload: web::Json<RecommendRequest>,
) -> impl Responder {
    if let Err(e) = payload.validate() {
        return HttpResponse::BadRequest().json(json!({
            "error": "Invalid recommendation request",
            "message": e.to_string()
        }));
    }

    let request = payload.into_inner();
    let limit = request
        .limit
        .unwrap_or(data.config.recommendations.default_limit);

    let recommendations: Vec<RecommendationItem> = data
        .engine
        .recommend_explained(&request.taste, limit)
        .into_iter()
        .map(|(movie, reason)| RecommendationItem::new(movie, reason))
        .collect();

    tracing::debug!(
        "Scored {} genres and {} watched titles into {} recommendations",
        request.taste.preferred_genres.len(),
        request.taste.watched_titles.len(),
        recommendations.len()
    );

    HttpResponse::Ok().json(RecommendResponse {
        count: recommendations.len(),
        recommendations,
        generated_at: Utc::now(),
    })
}

async fn explain(
    data: web::Data<AppState>,
    payload: web::Json<ExplainRequest>,
) -> impl Responder {
    if let Err(e) = payload.validate() {
        return HttpResponse::BadRequest().json(json!({
            "error": "Invalid explain request",
            "message": e.to_string()
        }));
    }

    let request = payload.into_inner();

    match data.engine.explain(&request.title, &request.taste) {
        Some(reason) => HttpResponse::Ok().json(ExplainResponse {
            title: request.title,
            reason: reason.render(),
            watched_matches: reason.because_watched,
            genre_matches: reason.because_genres,
        }),
        None => HttpResponse::NotFound().json(json!({
            "error": "Title not found",
            "title": request.title
        })),
    }
}

async fn genres(data: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(json!({
        "genres": data.engine.catalog().genre_vocabulary()
    }))
}

async fn top_rated(
    data: web::Data<AppState>,
    query: web::Query<TopRatedQuery>,
) -> impl Responder {
    if let Err(e) = query.validate() {
        return HttpResponse::BadRequest().json(json!({
            "error": "Invalid top-rated query",
            "message": e.to_string()
        }));
    }

    let limit = query.limit.unwrap_or(DEFAULT_TOP_RATED_LIMIT);
    HttpResponse::Ok().json(data.engine.catalog().top_rated(limit))
}

async fn featured(
    data: web::Data<AppState>,
    payload: web::Json<FeaturedRequest>,
) -> impl Responder {
    if let Err(e) = payload.validate() {
        return HttpResponse::BadRequest().json(json!({
            "error": "Invalid featured request",
            "message": e.to_string()
        }));
    }

    let request = payload.into_inner();
    let cap = data.config.recommendations.featured_limit;
    let limit = request.limit.unwrap_or(cap).min(cap);

    HttpResponse::Ok().json(
        data.engine
            .catalog()
            .featured(&request.watched_titles, limit),
    )
}

async fn watched(
    data: web::Data<AppState>,
    payload: web::Json<WatchedRequest>,
) -> impl Responder {
    let request = payload.into_inner();
    HttpResponse::Ok().json(
        data.engine
            .catalog()
            .rows_for_titles(&request.watched_titles),
    )
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .route("/recommendations", web::post().to(recommend))
            .route("/recommendations/explain", web::post().to(explain))
            .route("/catalog/genres", web::get().to(genres))
            .route("/catalog/top-rated", web::get().to(top_rated))
            .route("/catalog/featured", web::post().to(featured))
            .route("/catalog/watched", web::post().to(watched)),
    );
}

//! # bh-api
//!
//! Development-only mock HTTP layer simulating a backend for the
//! directory front-end. These endpoints are external collaborators of
//! the persistence core, not part of it: they accept a matching
//! path/method and return the corresponding in-memory collection as
//! JSON, or 404 for an unknown slug.

pub mod handlers;
pub mod middleware;

use actix_web::web;

/// Configures the mock API routes.
///
/// Scoped under `/api` so the main binary can mount static assets or a
/// UI dev proxy next to it.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health))
            .route("/borghi", web::get().to(handlers::list_borghi))
            .route("/borghi/{slug}", web::get().to(handlers::get_borgo))
            .route("/borghi/{slug}/poi", web::get().to(handlers::borgo_poi))
            .route("/borghi/{slug}/videos", web::get().to(handlers::borgo_videos))
            .route("/poi/{id}/videos", web::get().to(handlers::poi_videos))
            .route(
                "/newsletter/subscribe",
                web::post().to(handlers::newsletter_subscribe),
            ),
    );
}

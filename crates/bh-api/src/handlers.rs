//! # bh-api Handlers
//!
//! Thin JSON handlers over the seeded borgo directory and the video
//! repository. No business logic lives here.

use std::sync::Arc;

use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::json;

use bh_core::borghi;
use bh_repos::VideoRepo;

/// State shared across all workers.
pub struct ApiState {
    pub videos: Arc<VideoRepo>,
}

pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

pub async fn list_borghi() -> impl Responder {
    HttpResponse::Ok().json(borghi::all_borghi())
}

pub async fn get_borgo(path: web::Path<String>) -> impl Responder {
    match borghi::find_borgo(&path.into_inner()) {
        Some(borgo) => HttpResponse::Ok().json(borgo),
        None => HttpResponse::NotFound().finish(),
    }
}

pub async fn borgo_poi(path: web::Path<String>) -> impl Responder {
    let slug = path.into_inner();
    if borghi::find_borgo(&slug).is_none() {
        return HttpResponse::NotFound().finish();
    }
    HttpResponse::Ok().json(borghi::poi_for(&slug))
}

pub async fn borgo_videos(
    data: web::Data<ApiState>,
    path: web::Path<String>,
) -> impl Responder {
    let slug = path.into_inner();
    if borghi::find_borgo(&slug).is_none() {
        return HttpResponse::NotFound().finish();
    }
    let videos = data.videos.list_published_by_borgo(&slug).await;
    HttpResponse::Ok().json(videos)
}

pub async fn poi_videos(data: web::Data<ApiState>, path: web::Path<String>) -> impl Responder {
    let poi_id = path.into_inner();
    let Some(poi) = borghi::all_borghi()
        .iter()
        .flat_map(|b| borghi::poi_for(&b.slug))
        .find(|p| p.id == poi_id)
    else {
        return HttpResponse::NotFound().finish();
    };
    let videos = data.videos.list_published_by_poi(&poi.borgo_slug, &poi_id).await;
    HttpResponse::Ok().json(videos)
}

#[derive(Debug, Deserialize)]
pub struct SubscribeForm {
    #[serde(default)]
    pub email: String,
}

/// Mock endpoint: accepts the form and pretends a backend enqueued it.
pub async fn newsletter_subscribe(form: web::Json<SubscribeForm>) -> impl Responder {
    let email = form.email.trim();
    if email.is_empty() || !email.contains('@') {
        return HttpResponse::BadRequest().json(json!({ "error": "invalid email" }));
    }
    tracing::info!(email, "newsletter subscription (mock)");
    HttpResponse::Ok().json(json!({ "subscribed": true }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};
    use bh_store_memory::{MemoryBlobStore, MemoryRecordStore};

    fn state() -> web::Data<ApiState> {
        let records = Arc::new(MemoryRecordStore::new());
        let blobs = Arc::new(MemoryBlobStore::new());
        web::Data::new(ApiState { videos: Arc::new(VideoRepo::new(records, blobs)) })
    }

    #[actix_web::test]
    async fn health_and_directory_endpoints_respond() {
        let app = test::init_service(
            App::new().app_data(state()).configure(crate::configure_routes),
        )
        .await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/api/health").to_request()).await;
        assert!(res.status().is_success());

        let res = test::call_service(&app, test::TestRequest::get().uri("/api/borghi").to_request()).await;
        assert!(res.status().is_success());

        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/api/borghi/viggiano").to_request(),
        )
        .await;
        assert!(res.status().is_success());

        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/api/borghi/atlantide").to_request(),
        )
        .await;
        assert_eq!(res.status(), actix_web::http::StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn newsletter_rejects_garbage() {
        let app = test::init_service(
            App::new().app_data(state()).configure(crate::configure_routes),
        )
        .await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/newsletter/subscribe")
                .set_json(serde_json::json!({ "email": "nope" }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), actix_web::http::StatusCode::BAD_REQUEST);

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/newsletter/subscribe")
                .set_json(serde_json::json!({ "email": "sindaco@viggiano.it" }))
                .to_request(),
        )
        .await;
        assert!(res.status().is_success());
    }
}

//! # Borghista Binary
//!
//! Assembles the persistence core behind the development mock API.
//! The storage backend is selected at compile time via features.

use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use tracing::info;
use tracing_subscriber::EnvFilter;

use bh_api::handlers::ApiState;
use bh_api::middleware;
use bh_core::ports::{BlobStore, RecordStore};
use bh_repos::VideoRepo;

#[cfg(feature = "store-local")]
use bh_store_local::{JsonFileRecordStore, LocalBlobStore};

#[cfg(all(feature = "store-memory", not(feature = "store-local")))]
use bh_store_memory::{MemoryBlobStore, MemoryRecordStore};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    #[cfg(feature = "store-local")]
    let (records, video_blobs): (Arc<dyn RecordStore>, Arc<dyn BlobStore>) = {
        let data_dir =
            std::env::var("BORGHISTA_DATA_DIR").unwrap_or_else(|_| "./data".to_string());
        let records = JsonFileRecordStore::open(format!("{data_dir}/collections")).await?;
        let blobs =
            LocalBlobStore::open(format!("{data_dir}/media/videos"), "/static/videos").await?;
        (Arc::new(records), Arc::new(blobs))
    };

    #[cfg(all(feature = "store-memory", not(feature = "store-local")))]
    let (records, video_blobs): (Arc<dyn RecordStore>, Arc<dyn BlobStore>) = (
        Arc::new(MemoryRecordStore::new()),
        Arc::new(MemoryBlobStore::new()),
    );

    let state = web::Data::new(ApiState {
        videos: Arc::new(VideoRepo::new(records, video_blobs)),
    });

    let bind =
        std::env::var("BORGHISTA_BIND").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
    info!("borghista mock API listening on http://{bind}");

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(middleware::standard_middleware())
            .wrap(middleware::cors_policy())
            .configure(bh_api::configure_routes)
    })
    .bind(bind.as_str())?
    .run()
    .await?;

    Ok(())
}

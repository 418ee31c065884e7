#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the explorer.
//!
//! Loads the working set once at startup, then serves every core output
//! (filtered records, bar-chart aggregates, trend series, jittered map
//! points, exports) as JSON or downloadable files. Each request
//! recomputes its derived data synchronously from the shared read-only
//! session.

mod handlers;

use std::path::Path;
use std::sync::Arc;

use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpServer, middleware, web};
use pfie_engine::ExplorerSession;

/// Directory of pre-built frontend assets served at the root path.
const ASSETS_DIR: &str = "app/dist";

/// Shared application state.
pub struct AppState {
    /// The immutable explorer session.
    pub session: Arc<ExplorerSession>,
}

/// Loads the dataset and runs the HTTP server until shutdown.
///
/// This is a regular async function — the caller provides the async
/// runtime (e.g. via `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an error if the server fails to bind or encounters a runtime
/// error.
///
/// # Panics
///
/// Panics if the dataset cannot be loaded — the engine must not run
/// with partial or missing source data.
pub async fn run_server(bind_addr: &str, port: u16, data_dir: &Path) -> std::io::Result<()> {
    log::info!("Loading dataset from {}...", data_dir.display());
    let session = pfie_ingest::load_session(data_dir).expect("Failed to load dataset");

    let state = web::Data::new(AppState {
        session: Arc::new(session),
    });

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .service(
                web::scope("/api")
                    .route("/health", web::get().to(handlers::health))
                    .route("/meta", web::get().to(handlers::meta))
                    .route("/incidents", web::get().to(handlers::incidents))
                    .route("/agencies", web::get().to(handlers::agencies))
                    .route("/trends", web::get().to(handlers::trends))
                    .route("/map", web::get().to(handlers::map))
                    .route("/export", web::get().to(handlers::export)),
            )
            // Serve frontend static files (production)
            .service(Files::new("/", ASSETS_DIR).index_file("index.html"))
    })
    .bind((bind_addr.to_string(), port))?
    .run()
    .await
}

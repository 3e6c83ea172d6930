use std::io;
use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use tokio::signal;

mod anticheat;
mod api_error;
mod auth;
mod config;
mod engine;
mod games;
mod http;
mod middleware;
mod models;
mod service;
mod store;
mod telemetry;

use crate::config::Config;
use crate::games::GameRegistry;
use crate::http::AppState;
use crate::middleware::cors_middleware;
use crate::service::{ScoreService, SessionService};
use crate::store::MemoryStore;
use crate::telemetry::init_telemetry;

#[tokio::main]
async fn main() -> io::Result<()> {
    // Load configuration
    let config = Config::from_env().expect("Failed to load configuration");

    // Initialize telemetry
    init_telemetry();

    // Wire shared state: game catalog, entity store, services
    let games = Arc::new(GameRegistry::with_builtin_games());
    let store = Arc::new(MemoryStore::new());
    let session_service = Arc::new(SessionService::new(
        store.clone(),
        games.clone(),
        config.session.ttl_minutes,
    ));
    let score_service = Arc::new(ScoreService::new(store.clone(), games.clone()));

    let state = web::Data::new(AppState {
        session_service,
        score_service,
        store,
        games,
    });

    tracing::info!(
        "Starting arcade backend server on {}:{}",
        config.server.host,
        config.server.port
    );

    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(cors_middleware())
            .wrap(actix_web::middleware::Logger::default())
            .service(
                web::scope("/api")
                    .route("/health", web::get().to(crate::http::health::health_check))
                    .route(
                        "/session",
                        web::post().to(crate::http::session_handler::create_session),
                    )
                    .route(
                        "/score",
                        web::post().to(crate::http::score_handler::submit_score),
                    )
                    .route(
                        "/leaderboard/{game_id}",
                        web::get().to(crate::http::leaderboard_handler::get_leaderboard),
                    ),
            )
    })
    .bind((config.server.host.clone(), config.server.port))?
    .run();

    // Graceful shutdown
    let server_handle = server.handle();
    tokio::spawn(async move {
        signal::ctrl_c()
            .await
            .expect("Failed to listen for shutdown signal");
        tracing::info!("Shutdown signal received, stopping server...");
        server_handle.stop(true).await;
    });

    server.await
}

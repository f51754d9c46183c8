//! Application builder: wires router, middleware and state into an Axum app.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::middleware as axum_middleware;
use tokio::sync::watch;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use vidhub_auth::jwt::{JwtDecoder, JwtEncoder};
use vidhub_auth::password::{PasswordHasher, PasswordValidator};
use vidhub_auth::session::{SessionManager, SessionStore};
use vidhub_core::config::AppConfig;
use vidhub_core::error::AppError;
use vidhub_core::traits::storage::StorageProvider;
use vidhub_database::DatabasePool;
use vidhub_database::repositories::{
    CommentRepository, DashboardRepository, LikeRepository, PlaylistRepository,
    SessionRepository, SubscriptionRepository, TweetRepository, UserRepository,
    VideoRepository,
};
use vidhub_service::{
    CommentService, DashboardService, HealthService, LikeService, PlaylistService,
    SubscriptionService, TweetService, UserService, VideoService,
};
use vidhub_storage::{LocalStorageProvider, MediaManager};

use crate::middleware::cors::build_cors_layer;
use crate::middleware::logging::request_logging;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.server.cors);
    build_router(state)
        .layer(axum_middleware::from_fn(request_logging))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Construct repositories, auth components and services over a pool.
pub async fn build_state(config: AppConfig, db: DatabasePool) -> Result<AppState, AppError> {
    // ── Media storage ────────────────────────────────────────────
    let provider: Arc<dyn StorageProvider> =
        Arc::new(LocalStorageProvider::new(&config.storage.root_path).await?);
    let media = Arc::new(MediaManager::new(Arc::clone(&provider), &config.storage));

    // ── Repositories ─────────────────────────────────────────────
    let pool = db.pool().clone();
    let user_repo = Arc::new(UserRepository::new(pool.clone()));
    let session_repo = Arc::new(SessionRepository::new(pool.clone()));
    let video_repo = Arc::new(VideoRepository::new(pool.clone()));
    let comment_repo = Arc::new(CommentRepository::new(pool.clone()));
    let like_repo = Arc::new(LikeRepository::new(pool.clone()));
    let playlist_repo = Arc::new(PlaylistRepository::new(pool.clone()));
    let subscription_repo = Arc::new(SubscriptionRepository::new(pool.clone()));
    let tweet_repo = Arc::new(TweetRepository::new(pool.clone()));
    let dashboard_repo = Arc::new(DashboardRepository::new(pool));

    // ── Auth ─────────────────────────────────────────────────────
    let password_hasher = Arc::new(PasswordHasher::new());
    let password_validator = Arc::new(PasswordValidator::new(&config.auth));
    let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth)?);
    let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));
    let session_store = Arc::new(SessionStore::new(Arc::clone(&session_repo)));
    let session_manager = Arc::new(SessionManager::new(
        Arc::clone(&jwt_encoder),
        Arc::clone(&jwt_decoder),
        session_store,
        Arc::clone(&user_repo),
        Arc::clone(&password_hasher),
    ));

    // ── Services ─────────────────────────────────────────────────
    let user_service = Arc::new(UserService::new(
        Arc::clone(&user_repo),
        password_hasher,
        password_validator,
        Arc::clone(&session_manager),
        Arc::clone(&media),
    ));
    let video_service = Arc::new(VideoService::new(
        Arc::clone(&video_repo),
        Arc::clone(&user_repo),
        Arc::clone(&media),
    ));
    let comment_service = Arc::new(CommentService::new(
        Arc::clone(&comment_repo),
        Arc::clone(&video_repo),
    ));
    let like_service = Arc::new(LikeService::new(
        like_repo,
        Arc::clone(&video_repo),
        comment_repo,
        Arc::clone(&tweet_repo),
    ));
    let playlist_service = Arc::new(PlaylistService::new(
        playlist_repo,
        video_repo,
        Arc::clone(&user_repo),
    ));
    let subscription_service = Arc::new(SubscriptionService::new(
        subscription_repo,
        Arc::clone(&user_repo),
    ));
    let tweet_service = Arc::new(TweetService::new(tweet_repo, Arc::clone(&user_repo)));
    let dashboard_service = Arc::new(DashboardService::new(dashboard_repo, user_repo));
    let health_service = Arc::new(HealthService::new(db.clone(), provider));

    Ok(AppState {
        config: Arc::new(config),
        db,
        media,
        session_manager,
        user_service,
        video_service,
        comment_service,
        like_service,
        playlist_service,
        subscription_service,
        tweet_service,
        dashboard_service,
        health_service,
    })
}

/// Runs the VidHub server until a shutdown signal arrives.
pub async fn run_server(config: AppConfig, db: DatabasePool) -> Result<(), AppError> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);

    let state = build_state(config, db).await?;

    match state.session_manager.purge_expired().await {
        Ok(purged) => info!(purged, "Expired sessions purged"),
        Err(e) => warn!(error = %e, "Failed to purge expired sessions"),
    }

    let app = build_app(state.clone());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    info!("VidHub server listening on {}", addr);

    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    let server = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async move {
        shutdown_signal().await;
        let _ = shutdown_tx.send(true);
    })
    .into_future();

    tokio::select! {
        result = server => {
            result.map_err(|e| AppError::internal(format!("Server error: {e}")))?;
        }
        _ = async {
            let _ = shutdown_rx.changed().await;
            tokio::time::sleep(grace).await;
        } => {
            warn!(grace_seconds = grace.as_secs(), "Shutdown grace period elapsed, dropping open connections");
        }
    }

    state.db.close().await;
    info!("VidHub server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutdown signal received");
}

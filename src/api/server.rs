//! HTTP server

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;

use crate::auth::{route_guard, Credentials, FileStorage, SessionStore};
use crate::config::Config;
use crate::error::Result;
use crate::guard::{Page, ROUTES};
use crate::ui;

use super::routes;

/// Application state shared across handlers
pub struct AppState {
    pub config: Config,
    pub session: SessionStore,
}

impl AppState {
    /// Build the state for a config, restoring any persisted session
    pub fn from_config(config: Config) -> Result<Self> {
        let storage = Arc::new(FileStorage::new(config.storage.dir.clone()));
        let mut session =
            SessionStore::new(storage).with_latency(config.auth.simulated_latency());
        session.restore()?;
        Ok(Self { config, session })
    }
}

pub type SharedState = Arc<RwLock<AppState>>;

/// Sign in through the shared session.
///
/// The simulated latency is awaited with no lock held; the write lock is only
/// taken to store the accepted identity.
pub async fn sign_in(state: &SharedState, credentials: &Credentials) -> Result<bool> {
    let attempt = state.read().await.session.attempt();

    let Some(identity) = attempt.run(credentials).await else {
        return Ok(false);
    };

    state.write().await.session.complete_login(identity)?;
    Ok(true)
}

/// Run the portal server
pub async fn run_server(config: Config, host: &str, port: u16) -> Result<()> {
    let state = Arc::new(RwLock::new(AppState::from_config(config)?));

    let app = create_router(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Portal listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the router with all routes
pub fn create_router(state: SharedState) -> Router {
    // Every page sits behind the guard, including the fallback for unknown paths
    let mut pages = Router::new();
    for route in ROUTES {
        pages = match route.page {
            Page::Login => pages.route(route.path, get(ui::login_page).post(ui::login_submit)),
            _ => pages.route(route.path, get(ui::page)),
        };
    }
    let pages = pages
        .fallback(ui::fallback)
        .layer(middleware::from_fn_with_state(state.clone(), route_guard));

    Router::new()
        // API routes
        .route("/api/health", get(routes::health))
        .route(
            "/api/session",
            get(routes::get_session)
                .post(routes::create_session)
                .delete(routes::delete_session),
        )
        .route("/logout", post(routes::logout))
        .merge(pages)
        // Middleware
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

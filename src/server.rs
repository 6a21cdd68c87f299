use axum::{Router, routing::get};
use std::{net::SocketAddr, str::FromStr, sync::Arc};

use crate::{
    api,
    catalog::{Catalog, CatalogOptions},
    config::{AudioFallback, Config},
    error, info,
    management::{SessionManager, UserManager},
    upstream::{HttpTransport, Transport},
    warning,
};

/// State shared by every handler.
pub struct AppState<T> {
    pub catalog: Arc<Catalog<T>>,
    pub users: Arc<UserManager>,
    pub sessions: Arc<SessionManager>,
    pub audio_fallback: Arc<AudioFallback>,
}

impl<T> Clone for AppState<T> {
    fn clone(&self) -> Self {
        Self {
            catalog: Arc::clone(&self.catalog),
            users: Arc::clone(&self.users),
            sessions: Arc::clone(&self.sessions),
            audio_fallback: Arc::clone(&self.audio_fallback),
        }
    }
}

impl<T: Transport> AppState<T> {
    pub fn new(catalog: Catalog<T>, users: UserManager) -> Self {
        Self {
            catalog: Arc::new(catalog),
            users: Arc::new(users),
            sessions: Arc::new(SessionManager::new()),
            audio_fallback: Arc::new(AudioFallback::default()),
        }
    }

    pub fn with_sessions(mut self, sessions: SessionManager) -> Self {
        self.sessions = Arc::new(sessions);
        self
    }

    pub fn with_audio_fallback(mut self, fallback: AudioFallback) -> Self {
        self.audio_fallback = Arc::new(fallback);
        self
    }
}

pub fn router<T: Transport + 'static>(state: AppState<T>) -> Router {
    Router::new()
        .route("/", get(api::home::<T>))
        .route("/search", get(api::search_form::<T>).post(api::search::<T>))
        .route("/music/{track_id}", get(api::music::<T>))
        .route("/profile/{artist_id}", get(api::profile::<T>))
        .route("/login", get(api::login_form::<T>).post(api::login::<T>))
        .route("/signup", get(api::signup_form::<T>).post(api::signup::<T>))
        .route("/logout", get(api::logout::<T>))
        .route("/health", get(api::health))
        .with_state(state)
}

/// Builds the production state from `config` and serves until shutdown.
///
/// Any startup failure (bad address, unreadable user store, port in use)
/// terminates the process.
pub async fn start_server(config: Config, open_browser: bool) {
    let transport = match HttpTransport::new(&config) {
        Ok(t) => t,
        Err(e) => error!("Failed to build the HTTP client: {}", e),
    };

    let users = match UserManager::load(config.users_path()).await {
        Ok(users) => users,
        Err(e) => error!(
            "Failed to load user store {}: {}",
            config.users_path().display(),
            e
        ),
    };

    let catalog = Catalog::new(transport, CatalogOptions::from(&config));
    let state =
        AppState::new(catalog, users).with_audio_fallback(config.audio_fallback.clone());

    let addr = match SocketAddr::from_str(&config.server_addr) {
        Ok(addr) => addr,
        Err(e) => error!("Failed to parse server address: {}", e),
    };

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => error!("Failed to bind {}: {}", addr, e),
    };

    let url = format!("http://{}", addr);
    info!("Listening on {}", url);

    if open_browser && webbrowser::open(&url).is_err() {
        warning!("Failed to open browser. Please navigate to {} manually.", url);
    }

    if let Err(e) = axum::serve(listener, router(state)).await {
        error!("Server stopped: {}", e);
    }
}

use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

mod auth;
mod config;
mod dto;
mod error;
mod extract;
mod handlers;
mod models;
mod services;
mod storage;
mod validation;

use config::Config;
use services::diary::DiaryService;
use storage::JsonFileStorage;

#[derive(Clone)]
pub struct AppState {
    /// One lock serializes every operation, including the snapshot write.
    pub diary: Arc<Mutex<DiaryService>>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(diary: DiaryService, config: Config) -> Self {
        Self {
            diary: Arc::new(Mutex::new(diary)),
            config: Arc::new(config),
        }
    }
}

fn cors_layer(config: &Config) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = config
        .allowed_origins()
        .iter()
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(hv) => Some(hv),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
}

pub fn build_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/", get(handlers::health::index))
        .route("/health", get(handlers::health::health_check))
        .route("/readyz", get(handlers::health::readyz));

    let auth_routes = Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/switch", post(handlers::auth::switch_user))
        .route("/auth/me", get(handlers::auth::me));

    let diary_routes = Router::new()
        .route(
            "/entries",
            get(handlers::entries::list_entries).post(handlers::entries::add_entry),
        )
        .route("/entries/view", get(handlers::entries::view_entry))
        .route("/reports/general", get(handlers::reports::general_report))
        .route("/reports/mood", get(handlers::reports::mood_report))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::middleware::require_active_user,
        ));

    let cors = cors_layer(&state.config);

    Router::new()
        .merge(public_routes)
        .merge(auth_routes)
        .merge(diary_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "moodtracker_api=debug,tower_http=debug".into()),
        )
        .json()
        .init();

    let config = Config::from_env()?;

    let storage = JsonFileStorage::new(&config.data_file);
    tracing::info!(path = %storage.path().display(), "Opening mood diary");
    let diary = DiaryService::open(Box::new(storage))?;

    let addr = config.listen_addr();
    let state = AppState::new(diary, config);
    let app = build_router(state);

    tracing::info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

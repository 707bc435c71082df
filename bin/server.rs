// Shelter Dashboard - Web Server
// REST API with Axum over one read-only record store

use anyhow::{Context, Result};
use axum::{
    extract::{Path, RawQuery, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::get,
    Router,
};
use clap::Parser;
use serde::Serialize;
use shelter_dashboard::{
    init_logging, open_source, BatchSummary, Config, DashboardSettings, DashboardView,
    DataQualityEngine, FilterOptions, FilterQuery, RecordStore,
};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tracing::{error, info, warn};
use url::form_urlencoded;

/// Shelter Dashboard web server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    ///
    /// If not specified, looks for shelter-dashboard.toml in the current directory
    #[arg(short, long, value_name = "FILE", env = "SHELTER_DASHBOARD_CONFIG")]
    config: Option<PathBuf>,

    /// Bind address (overrides the config file)
    #[arg(long, value_name = "ADDR", env = "SHELTER_DASHBOARD_ADDR")]
    addr: Option<String>,

    /// Enable verbose logging output
    #[arg(short, long)]
    verbose: bool,
}

/// Shared application state
///
/// The store is immutable after load, so requests share it without locks.
#[derive(Clone)]
struct AppState {
    store: Arc<RecordStore>,
    options: Arc<FilterOptions>,
    settings: DashboardSettings,
    quality: Arc<BatchSummary>,
}

impl AppState {
    fn new(store: RecordStore, settings: DashboardSettings) -> Self {
        let options = store.filter_options();
        let engine = DataQualityEngine::new();
        let quality = engine.batch_summary(&engine.validate_batch(store.records()));

        Self {
            store: Arc::new(store),
            options: Arc::new(options),
            settings,
            quality: Arc::new(quality),
        }
    }
}

/// API Response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            error: None,
        }
    }
}

impl ApiResponse<()> {
    fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: (),
            error: Some(message.into()),
        }
    }
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ApiResponse::error(message))).into_response()
}

/// Decode a query string with repeatable list keys
fn parse_query(raw: Option<String>) -> FilterQuery {
    let raw = raw.unwrap_or_default();
    FilterQuery::from_pairs(form_urlencoded::parse(raw.as_bytes()))
}

/// Parse the query against the store's options, then run the pipeline
fn build_view(state: &AppState, query: FilterQuery) -> Result<DashboardView, Response> {
    let criteria = query.into_criteria(&state.options).map_err(|e| {
        warn!("Rejected filter query: {}", e);
        error_response(StatusCode::BAD_REQUEST, e.to_string())
    })?;

    Ok(DashboardView::build(&state.store, &criteria, &state.settings))
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// GET /api/filters - Selectable values and the intake date range
async fn get_filters(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::ok(state.options.as_ref().clone()))
}

/// GET /api/dashboard - Every chart payload for one set of filters
async fn get_dashboard(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Response {
    match build_view(&state, parse_query(query)) {
        Ok(view) => (StatusCode::OK, Json(ApiResponse::ok(view))).into_response(),
        Err(response) => response,
    }
}

/// GET /api/zones/:zip_code - Open-case zone for one zip code
async fn get_zone(
    State(state): State<AppState>,
    Path(zip_code): Path<String>,
    RawQuery(query): RawQuery,
) -> Response {
    let view = match build_view(&state, parse_query(query)) {
        Ok(view) => view,
        Err(response) => return response,
    };

    match view.geo.open_zones.into_iter().find(|z| z.zip_code == zip_code) {
        Some(zone) => (StatusCode::OK, Json(ApiResponse::ok(zone))).into_response(),
        None => error_response(
            StatusCode::NOT_FOUND,
            format!("No open cases in zip code {}", zip_code),
        ),
    }
}

/// GET /api/quality - Data quality summary for the loaded records
async fn get_quality(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::ok(state.quality.as_ref().clone()))
}

/// GET / - Serve index.html
async fn serve_index() -> impl IntoResponse {
    Html(include_str!("../web/index.html"))
}

fn app(state: AppState) -> Router {
    // Build API routes
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/filters", get(get_filters))
        .route("/dashboard", get(get_dashboard))
        .route("/zones/:zip_code", get(get_zone))
        .route("/quality", get(get_quality))
        .with_state(state);

    // Build main router
    Router::new()
        .route("/", get(serve_index))
        .nest("/api", api_routes)
        .nest_service("/static", ServeDir::new("web"))
        .layer(CorsLayer::permissive())
}

// ============================================================================
// Main Server
// ============================================================================

/// One warehouse session: open, fetch, close
fn load_store(config: &Config) -> Result<RecordStore> {
    let mut source = open_source(&config.source)?;
    let store = RecordStore::load(source.as_mut(), config.source.limit)?;
    source.close().context("Failed to close record source")?;
    Ok(store)
}

async fn run(args: Args) -> Result<()> {
    let mut config = Config::resolve(args.config.as_deref())?;
    if let Some(addr) = args.addr {
        config.server.addr = addr;
    }

    let store = load_store(&config)?;
    println!("✓ Loaded {} records from {}", store.len(), store.source_name());

    let state = AppState::new(store, DashboardSettings::from(&config.map));

    let addr = config.server.addr.as_str();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("Listening on {}", addr);

    println!("\n🚀 Server running on http://{}", addr);
    println!("   API: http://{}/api/dashboard", addr);
    println!("   UI:  http://{}", addr);
    println!("\n   Press Ctrl+C to stop\n");

    axum::serve(listener, app(state))
        .await
        .context("Server error")?;

    Ok(())
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if let Err(e) = init_logging(args.verbose) {
        eprintln!("❌ Error: {:#}", e);
        std::process::exit(1);
    }

    println!("🌐 Shelter Dashboard - Web Server");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    if let Err(e) = run(args).await {
        error!("{:#}", e);
        eprintln!("❌ Error: {:#}", e);
        std::process::exit(1);
    }
}

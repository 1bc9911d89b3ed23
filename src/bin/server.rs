use axum::{
    Json, Router,
    http::StatusCode,
    routing::{get, post},
};
use cutlist::config::{DEFAULT_KERF, DEFAULT_MIN_OFFCUT_SIZE};
use cutlist::types::{CutLayout, FitStrategy, OptimizerConfig, Part, StockPanel};
use cutlist::{OptimizeError, Optimizer};
use serde::{Deserialize, Serialize};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
struct OptimizeRequest {
    stock: StockPanel,
    #[serde(default)]
    parts: Vec<Part>,
    #[serde(default = "default_kerf")]
    kerf: f64,
    #[serde(default)]
    strategy: FitStrategy,
    #[serde(default = "default_min_offcut_size")]
    min_offcut_size: f64,
}

fn default_kerf() -> f64 {
    DEFAULT_KERF
}

fn default_min_offcut_size() -> f64 {
    DEFAULT_MIN_OFFCUT_SIZE
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn bad_request(e: OptimizeError) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
}

async fn optimize(
    Json(req): Json<OptimizeRequest>,
) -> Result<Json<CutLayout>, (StatusCode, Json<ErrorResponse>)> {
    tracing::info!(
        body = serde_json::to_string(&req).unwrap_or_default(),
        "POST /optimize"
    );

    let optimizer = Optimizer::new(OptimizerConfig {
        kerf: req.kerf,
        strategy: req.strategy,
        min_offcut_size: req.min_offcut_size,
        ..OptimizerConfig::default()
    });
    let layout = optimizer
        .optimize(req.stock, &req.parts)
        .map_err(bad_request)?;

    Ok(Json(layout))
}

fn app() -> Router {
    Router::new()
        .route("/up", get(|| async { "ok" }))
        .route("/optimize", post(optimize))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}

fn main() {
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open("development.log")
        .expect("failed to open development.log");

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_target(false)
        .with_ansi(false)
        .with_max_level(Level::INFO)
        .init();

    // Panics are reported only when a DSN is configured.
    let _sentry = std::env::var("SENTRY_DSN").ok().map(|dsn| {
        sentry::init((
            dsn,
            sentry::ClientOptions {
                release: sentry::release_name!(),
                ..Default::default()
            },
        ))
    });

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("failed to build tokio runtime")
        .block_on(serve());
}

async fn serve() {
    let port = std::env::var("PORT").unwrap_or_else(|_| "3001".to_string());
    let addr = format!("0.0.0.0:{port}");

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    eprintln!("Listening on {addr}");
    axum::serve(listener, app()).await.unwrap();
}

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use axum::http::{header, HeaderValue};
use axum::routing::get;
use axum::Router;
use clap::Parser;
use stickerboard_shared::BoardConfig;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tracing_subscriber::EnvFilter;

mod handlers;
mod state;

use crate::handlers::index_handler;
use crate::state::AppState;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Directory holding index.html and the built wasm bundle.
    #[arg(long)]
    public_dir: Option<PathBuf>,
    /// JSON board config to inline into the index page.
    #[arg(long)]
    board_config: Option<PathBuf>,
    #[arg(long, env = "PORT", default_value_t = 3000)]
    port: u16,
}

fn load_board_config(path: &Path) -> Result<Arc<str>, String> {
    let text = std::fs::read_to_string(path)
        .map_err(|error| format!("cannot read {}: {error}", path.display()))?;
    let config = BoardConfig::from_json(&text).map_err(|error| error.to_string())?;
    let json = serde_json::to_string(&config).map_err(|error| error.to_string())?;
    Ok(json.into())
}

fn app(state: AppState, public_dir: &Path) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/index.html", get(index_handler))
        .fallback_service(ServeDir::new(public_dir))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-cache"),
        ))
        .with_state(state)
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let public_dir = args
        .public_dir
        .unwrap_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../public"));
    let board_config = match args.board_config.as_deref().map(load_board_config).transpose() {
        Ok(config) => config,
        Err(error) => {
            tracing::error!(%error, "invalid board config");
            return ExitCode::FAILURE;
        }
    };

    let state = AppState {
        index_file: public_dir.join("index.html"),
        board_config,
    };

    let app = app(state, &public_dir);

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(error) => {
            tracing::error!(%addr, %error, "failed to bind");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(public_dir = %public_dir.display(), "Whiteboard running at http://localhost:{}", args.port);

    if let Err(error) = axum::serve(listener, app).await {
        tracing::error!(%error, "server stopped");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

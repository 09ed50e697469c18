use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};

use crate::state::AppState;

pub const CONFIG_PLACEHOLDER: &str = "<!-- board-config -->";

pub async fn index_handler(State(state): State<AppState>) -> impl IntoResponse {
    match tokio::fs::read_to_string(&state.index_file).await {
        Ok(contents) => Html(inject_config(&contents, state.board_config.as_deref())).into_response(),
        Err(error) => {
            tracing::error!(path = %state.index_file.display(), %error, "failed to read index page");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Swaps the config placeholder for a JSON script block the client reads at startup.
pub fn inject_config(index: &str, config: Option<&str>) -> String {
    let Some(config) = config else {
        return index.to_string();
    };
    // `</` inside the JSON would close the script element early.
    let config = config.replace("</", "<\\/");
    let script = format!("<script type=\"application/json\" id=\"board-config\">{config}</script>");
    index.replacen(CONFIG_PLACEHOLDER, &script, 1)
}

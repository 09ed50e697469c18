use std::path::PathBuf;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub index_file: PathBuf,
    /// Validated board config as JSON, inlined into every served index page.
    pub board_config: Option<Arc<str>>,
}

use std::sync::Arc;

use crate::config::ServerConfig;

/// State handed to every handler and to the [`CurrentUser`](crate::middleware::auth::CurrentUser)
/// extractor. Cloned per request; both fields are cheap handles.
#[derive(Clone)]
pub struct AppState {
    pub pool: fbfp_db::DbPool,
    pub config: Arc<ServerConfig>,
}

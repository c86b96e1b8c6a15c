use std::sync::Arc;
use std::time::Duration;

use shareflix_resolver::pipeline::StreamResolver;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<StreamResolver>,
    /// Upper bound on one stream resolution.
    pub resolve_timeout: Duration,
}

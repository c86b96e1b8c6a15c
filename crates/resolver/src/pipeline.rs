//! IMDb id -> playable streams.
//!
//! ```text
//! titles (metadata) -> session -> search trials -> file links -> streams
//! ```
//!
//! Every stage degrades to "nothing found"; `resolve` never fails.

use std::sync::Arc;

use shareflix_core::types::{ImdbId, StreamDescriptor};
use shareflix_metadata::provider::{TitleProvider, resolve_titles};
use shareflix_webshare::api::WebshareApi;
use shareflix_webshare::session::SessionManager;
use tracing::{info, warn};

use crate::ResolverConfig;
use crate::links::resolve_streams;
use crate::scope::SessionScope;
use crate::search::SearchEngine;

pub struct StreamResolver {
    titles: Arc<dyn TitleProvider>,
    api: Arc<dyn WebshareApi>,
    sessions: Arc<SessionManager>,
    config: ResolverConfig,
}

impl StreamResolver {
    pub fn new(
        titles: Arc<dyn TitleProvider>,
        api: Arc<dyn WebshareApi>,
        sessions: Arc<SessionManager>,
        config: ResolverConfig,
    ) -> Self {
        Self {
            titles,
            api,
            sessions,
            config,
        }
    }

    pub fn sessions(&self) -> &Arc<SessionManager> {
        &self.sessions
    }

    /// Streams for `imdb_id`, in search-result order. Possibly empty.
    pub async fn resolve(&self, imdb_id: &ImdbId) -> Vec<StreamDescriptor> {
        let titles = resolve_titles(self.titles.as_ref(), imdb_id).await;
        if titles.is_empty() {
            info!(imdb_id = %imdb_id, "no titles; skipping search");
            return Vec::new();
        }

        let Some(session) = self.sessions.ensure_session().await else {
            warn!(imdb_id = %imdb_id, "no backend session; skipping search");
            return Vec::new();
        };
        let mut scope = SessionScope::new(&self.sessions, session, self.config.auth_retry);

        let files = SearchEngine::new(self.api.as_ref(), self.config.search)
            .find_files(&titles.candidates(), &mut scope)
            .await;
        if files.is_empty() {
            info!(imdb_id = %imdb_id, titles = ?titles.titles, "no matching files");
            return Vec::new();
        }

        let streams = resolve_streams(self.api.as_ref(), &files, &mut scope).await;
        info!(
            imdb_id = %imdb_id,
            files = files.len(),
            streams = streams.len(),
            "resolved streams"
        );
        streams
    }
}

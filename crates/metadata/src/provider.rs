use shareflix_core::types::ImdbId;

use crate::{MetadataError, TitleSet};

/// A metadata source that can turn an external id into search titles.
#[async_trait::async_trait]
pub trait TitleProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Look up the movie behind `imdb_id` and collect its titles.
    ///
    /// Returns `MetadataError::NotFound` when the provider has no record.
    async fn lookup_titles(&self, imdb_id: &ImdbId) -> Result<TitleSet, MetadataError>;
}

/// Resolve titles, degrading every failure to an empty set.
pub async fn resolve_titles(provider: &dyn TitleProvider, imdb_id: &ImdbId) -> TitleSet {
    match provider.lookup_titles(imdb_id).await {
        Ok(set) => set,
        Err(MetadataError::NotFound) => {
            tracing::info!(provider = provider.name(), imdb_id = %imdb_id, "no metadata record");
            TitleSet::default()
        }
        Err(e) => {
            tracing::warn!(provider = provider.name(), imdb_id = %imdb_id, error = %e, "metadata lookup failed");
            TitleSet::default()
        }
    }
}

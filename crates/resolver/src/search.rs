//! Search strategy: titles × variants × sort orders, first hit wins.
//!
//! Trials are generated lazily and run one at a time. The first trial that
//! returns any file ends the search; failed trials count as empty.

use std::collections::HashSet;

use shareflix_core::types::{FileRecord, SortOrder, TitleCandidate};
use shareflix_webshare::SearchOptions;
use shareflix_webshare::api::WebshareApi;
use tracing::{debug, info};

use crate::scope::SessionScope;
use crate::variants::generate_variants;

/// One search request: a query string under one sort order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Trial {
    pub query: String,
    pub sort: SortOrder,
}

/// All trials for `candidates`, outer to inner: title, variant, sort order.
pub fn trials(candidates: &[TitleCandidate]) -> impl Iterator<Item = Trial> + '_ {
    candidates
        .iter()
        .flat_map(|c| generate_variants(&c.text, &c.year))
        .flat_map(|query| {
            SortOrder::ALL.into_iter().map(move |sort| Trial {
                query: query.clone(),
                sort,
            })
        })
}

/// Keep the first record for each `ident`, preserving order.
pub fn dedupe_by_ident(files: Vec<FileRecord>) -> Vec<FileRecord> {
    let mut seen = HashSet::new();
    files
        .into_iter()
        .filter(|f| seen.insert(f.ident.clone()))
        .collect()
}

pub struct SearchEngine<'a> {
    api: &'a dyn WebshareApi,
    options: SearchOptions,
}

impl<'a> SearchEngine<'a> {
    pub fn new(api: &'a dyn WebshareApi, options: SearchOptions) -> Self {
        Self { api, options }
    }

    /// Files from the first trial with a non-empty answer, or nothing.
    pub async fn find_files(
        &self,
        candidates: &[TitleCandidate],
        scope: &mut SessionScope<'_>,
    ) -> Vec<FileRecord> {
        let mut tried = HashSet::new();
        let mut attempts = 0usize;

        for trial in trials(candidates) {
            if !tried.insert(trial.clone()) {
                continue;
            }
            attempts += 1;

            let api = self.api;
            let options = self.options;
            let query = trial.query.as_str();
            let sort = trial.sort;
            let result = scope
                .call(|session| async move {
                    api.search(&session.token, query, sort, options).await
                })
                .await;

            match result {
                Ok(files) if !files.is_empty() => {
                    let files = dedupe_by_ident(files);
                    info!(
                        query = %trial.query,
                        sort = %trial.sort,
                        attempts,
                        found = files.len(),
                        "search hit"
                    );
                    return files;
                }
                Ok(_) => {
                    debug!(query = %trial.query, sort = %trial.sort, "no results");
                }
                Err(e) => {
                    debug!(query = %trial.query, sort = %trial.sort, error = %e, "search trial failed");
                }
            }
        }

        info!(attempts, "search exhausted without results");
        Vec::new()
    }
}

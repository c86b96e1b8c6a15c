//! TMDB (The Movie Database) title lookup.
//!
//! Uses TMDB API v3: https://developer.themoviedb.org/docs
//! `/find/{external_id}` maps an IMDb id to a TMDB movie, and
//! `/movie/{id}/alternative_titles` supplies regional titles.

use std::time::Duration;

use shareflix_core::types::ImdbId;
use tracing::{debug, warn};

use crate::provider::TitleProvider;
use crate::{MetadataError, TitleSet};

const BASE_URL: &str = "https://api.themoviedb.org/3";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Regions whose alternative titles are collected when none are configured.
pub const DEFAULT_REGIONS: &[&str] = &["CZ", "US"];

pub struct TmdbClient {
    api_key: String,
    base_url: String,
    regions: Vec<String>,
    language: Option<String>,
    client: reqwest::Client,
}

impl TmdbClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, BASE_URL)
    }

    /// Point the client at another host (used by tests).
    pub fn with_base_url(api_key: String, base_url: impl Into<String>) -> Self {
        Self {
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            regions: DEFAULT_REGIONS.iter().map(|r| r.to_string()).collect(),
            language: None,
            client: reqwest::Client::new(),
        }
    }

    /// ISO 3166-1 regions whose alternative titles are kept, in priority order.
    pub fn regions(mut self, regions: Vec<String>) -> Self {
        self.regions = regions
            .into_iter()
            .map(|r| r.trim().to_uppercase())
            .filter(|r| !r.is_empty())
            .collect();
        self
    }

    /// TMDB `language` parameter, e.g. `cs-CZ`, used to localize the primary title.
    pub fn language(mut self, language: Option<String>) -> Self {
        self.language = language.filter(|l| !l.trim().is_empty());
        self
    }

    async fn get_json(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<serde_json::Value, MetadataError> {
        let mut all_params = vec![("api_key", self.api_key.as_str())];
        if let Some(ref language) = self.language {
            all_params.push(("language", language.as_str()));
        }
        all_params.extend_from_slice(params);

        let url = format!("{}{path}", self.base_url);
        debug!(url = %url, "TMDB request");

        let resp = self
            .client
            .get(&url)
            .query(&all_params)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| MetadataError::Network(e.to_string()))?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(MetadataError::NotFound);
        }

        if !resp.status().is_success() {
            return Err(MetadataError::Provider(format!(
                "TMDB returned {}",
                resp.status()
            )));
        }

        resp.json()
            .await
            .map_err(|e| MetadataError::Provider(format!("parse JSON: {e}")))
    }
}

#[async_trait::async_trait]
impl TitleProvider for TmdbClient {
    fn name(&self) -> &str {
        "tmdb"
    }

    async fn lookup_titles(&self, imdb_id: &ImdbId) -> Result<TitleSet, MetadataError> {
        let data = self
            .get_json(
                &format!("/find/{imdb_id}"),
                &[("external_source", "imdb_id")],
            )
            .await?;

        let (tmdb_id, mut titles) = parse_find_result(&data).ok_or(MetadataError::NotFound)?;

        match self
            .get_json(&format!("/movie/{tmdb_id}/alternative_titles"), &[])
            .await
        {
            Ok(alt) => collect_alternative_titles(&alt, &self.regions, &mut titles),
            Err(e) => {
                warn!(tmdb_id, error = %e, "alternative titles unavailable");
            }
        }

        debug!(imdb_id = %imdb_id, tmdb_id, titles = ?titles.titles, year = %titles.year, "resolved titles");
        Ok(titles)
    }
}

/// Pick the first movie match and seed the title set with its primary and
/// original titles.
fn parse_find_result(data: &serde_json::Value) -> Option<(u64, TitleSet)> {
    let movie = data["movie_results"].as_array()?.first()?;
    let tmdb_id = movie["id"].as_u64()?;

    let mut titles = TitleSet {
        titles: Vec::new(),
        year: movie["release_date"]
            .as_str()
            .and_then(|d| d.get(..4))
            .filter(|y| y.chars().all(|c| c.is_ascii_digit()))
            .unwrap_or_default()
            .to_string(),
    };
    if let Some(title) = movie["title"].as_str() {
        titles.push_unique(title);
    }
    if let Some(original) = movie["original_title"].as_str() {
        titles.push_unique(original);
    }

    Some((tmdb_id, titles))
}

/// Append alternative titles for the wanted regions, region priority first.
fn collect_alternative_titles(data: &serde_json::Value, regions: &[String], titles: &mut TitleSet) {
    let Some(entries) = data["titles"].as_array() else {
        return;
    };

    for region in regions {
        for entry in entries {
            let matches = entry["iso_3166_1"]
                .as_str()
                .is_some_and(|r| r.eq_ignore_ascii_case(region));
            if matches {
                if let Some(title) = entry["title"].as_str() {
                    titles.push_unique(title);
                }
            }
        }
    }
}

//! Process configuration from `SHAREFLIX_*` environment variables.

use std::time::Duration;

use anyhow::{Context, bail};
use shareflix_metadata::tmdb::DEFAULT_REGIONS;
use shareflix_resolver::{AuthRetry, ResolverConfig};
use shareflix_webshare::{Credentials, SearchOptions};

#[derive(Debug, Clone)]
pub struct AddonConfig {
    pub bind_addr: String,
    pub credentials: Credentials,
    pub tmdb_api_key: String,
    pub tmdb_language: Option<String>,
    pub title_regions: Vec<String>,
    pub resolver: ResolverConfig,
    pub resolve_timeout: Duration,
}

impl AddonConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key lookup; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let require = |key: &str| get(key).with_context(|| format!("{key} must be set"));

        let credentials = Credentials {
            username: require("SHAREFLIX_WS_USER")?,
            password: require("SHAREFLIX_WS_PASS")?,
        };
        let tmdb_api_key = require("SHAREFLIX_TMDB_KEY")?;

        let title_regions = get("SHAREFLIX_TITLE_REGIONS")
            .map(|raw| {
                raw.split(',')
                    .map(|r| r.trim().to_uppercase())
                    .filter(|r| !r.is_empty())
                    .collect()
            })
            .unwrap_or_else(|| DEFAULT_REGIONS.iter().map(|r| r.to_string()).collect());

        let limit: u32 = match get("SHAREFLIX_SEARCH_LIMIT") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("SHAREFLIX_SEARCH_LIMIT is not a number: {raw}"))?,
            None => SearchOptions::default().limit,
        };
        if limit == 0 {
            bail!("SHAREFLIX_SEARCH_LIMIT must be at least 1");
        }

        let auth_retry = match get("SHAREFLIX_AUTH_RETRY") {
            Some(raw) => AuthRetry::parse(&raw)?,
            None => AuthRetry::default(),
        };

        let timeout_secs: u64 = match get("SHAREFLIX_RESOLVE_TIMEOUT_SECS") {
            Some(raw) => raw.parse().with_context(|| {
                format!("SHAREFLIX_RESOLVE_TIMEOUT_SECS is not a number: {raw}")
            })?,
            None => 30,
        };

        Ok(Self {
            bind_addr: get("SHAREFLIX_BIND").unwrap_or_else(|| "0.0.0.0:7000".to_string()),
            credentials,
            tmdb_api_key,
            tmdb_language: get("SHAREFLIX_TMDB_LANGUAGE"),
            title_regions,
            resolver: ResolverConfig {
                search: SearchOptions { limit },
                auth_retry,
            },
            resolve_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

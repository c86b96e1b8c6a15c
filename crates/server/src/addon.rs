//! Stream-addon wire types: the manifest and `/stream` responses.

use std::collections::BTreeMap;

use serde::Serialize;
use shareflix_core::types::{MediaKind, StreamDescriptor};

pub const ADDON_ID: &str = "community.shareflix";
const ADDON_NAME: &str = "Shareflix (Webshare)";
const STREAM_NAME: &str = "Webshare";
const BINGE_GROUP: &str = "shareflix-webshare";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub id: &'static str,
    pub version: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub resources: Vec<&'static str>,
    pub types: Vec<&'static str>,
    pub id_prefixes: Vec<&'static str>,
    pub catalogs: Vec<serde_json::Value>,
}

impl Manifest {
    pub fn new() -> Self {
        Self {
            id: ADDON_ID,
            version: env!("CARGO_PKG_VERSION"),
            name: ADDON_NAME,
            description: "Movie streams from Webshare, matched by title search",
            resources: vec!["stream"],
            types: vec![MediaKind::Movie.as_str()],
            id_prefixes: vec!["tt"],
            catalogs: Vec::new(),
        }
    }
}

impl Default for Manifest {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Default, Serialize)]
pub struct StreamsResponse {
    pub streams: Vec<AddonStream>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddonStream {
    pub name: String,
    pub title: String,
    pub url: String,
    pub behavior_hints: BehaviorHints,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BehaviorHints {
    pub not_web_ready: bool,
    pub binge_group: String,
    pub proxy_headers: ProxyHeaders,
}

#[derive(Debug, Serialize)]
pub struct ProxyHeaders {
    pub request: BTreeMap<String, String>,
}

impl From<&StreamDescriptor> for AddonStream {
    fn from(d: &StreamDescriptor) -> Self {
        Self {
            name: STREAM_NAME.to_string(),
            title: d.title().to_string(),
            url: d.url().to_string(),
            behavior_hints: BehaviorHints {
                // Links need the session cookie, which browsers cannot attach.
                not_web_ready: true,
                binge_group: BINGE_GROUP.to_string(),
                proxy_headers: ProxyHeaders {
                    request: d.auth_headers().clone(),
                },
            },
        }
    }
}

impl StreamsResponse {
    pub fn from_descriptors(descriptors: &[StreamDescriptor]) -> Self {
        Self {
            streams: descriptors.iter().map(AddonStream::from).collect(),
        }
    }
}

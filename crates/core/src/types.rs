use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static IMDB_ID_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-z]{2}\d+$").unwrap());

const GIB: f64 = 1024.0 * 1024.0 * 1024.0;

/// External movie identifier, e.g. `tt0111161`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ImdbId(String);

#[derive(Debug, thiserror::Error)]
#[error("invalid imdb id: {0}")]
pub struct InvalidImdbId(pub String);

impl ImdbId {
    pub fn parse(raw: &str) -> Result<Self, InvalidImdbId> {
        let trimmed = raw.trim();
        if IMDB_ID_RE.is_match(trimmed) {
            Ok(Self(trimmed.to_string()))
        } else {
            Err(InvalidImdbId(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ImdbId {
    type Error = InvalidImdbId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ImdbId> for String {
    fn from(id: ImdbId) -> Self {
        id.0
    }
}

impl std::fmt::Display for ImdbId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Content type requested by an addon client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Movie,
    Series,
}

impl MediaKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Series => "series",
        }
    }

    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s {
            "movie" => Some(Self::Movie),
            "series" => Some(Self::Series),
            _ => None,
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result ordering supported by the file-sharing search endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Rating,
    Recent,
    Largest,
}

impl SortOrder {
    /// Trial order used by the search engine.
    pub const ALL: [SortOrder; 3] = [Self::Rating, Self::Recent, Self::Largest];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rating => "rating",
            Self::Recent => "recent",
            Self::Largest => "largest",
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A title to search for, with the release year shared by all titles of one movie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleCandidate {
    pub text: String,
    /// Four-digit year or empty.
    pub year: String,
}

/// A file returned by the backend search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub ident: String,
    pub name: String,
    pub size_bytes: u64,
}

/// A resolved, directly fetchable stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StreamDescriptor {
    title: String,
    url: String,
    auth_headers: BTreeMap<String, String>,
}

impl StreamDescriptor {
    pub fn new(title: String, url: String, auth_headers: BTreeMap<String, String>) -> Self {
        Self {
            title,
            url,
            auth_headers,
        }
    }

    /// Build a descriptor for a matched file: `"{name} ({size} GB)"`.
    pub fn for_file(file: &FileRecord, url: String, auth_headers: BTreeMap<String, String>) -> Self {
        let title = format!("{} ({})", file.name, format_size_gib(file.size_bytes));
        Self::new(title, url, auth_headers)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn auth_headers(&self) -> &BTreeMap<String, String> {
        &self.auth_headers
    }
}

/// Format a byte count in gibibytes with two decimals, e.g. `"1.50 GB"`.
pub fn format_size_gib(bytes: u64) -> String {
    format!("{:.2} GB", bytes as f64 / GIB)
}

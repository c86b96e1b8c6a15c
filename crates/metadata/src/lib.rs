pub mod provider;
pub mod tmdb;

use shareflix_core::types::TitleCandidate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("provider error: {0}")]
    Provider(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("not found")]
    NotFound,
}

/// Search titles for one movie, most authoritative first.
///
/// The year is shared by every title; it is empty when the provider has no
/// release date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TitleSet {
    pub titles: Vec<String>,
    pub year: String,
}

impl TitleSet {
    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    /// Append a title unless it is blank or already present.
    pub fn push_unique(&mut self, title: &str) {
        let title = title.trim();
        if title.is_empty() || self.titles.iter().any(|t| t == title) {
            return;
        }
        self.titles.push(title.to_string());
    }

    pub fn candidates(&self) -> Vec<TitleCandidate> {
        self.titles
            .iter()
            .map(|text| TitleCandidate {
                text: text.clone(),
                year: self.year.clone(),
            })
            .collect()
    }
}

//! HTTP client for the Webshare API.
//!
//! Every call is a form-encoded `POST {base}/api/{endpoint}/` answered with XML.

use std::time::Duration;

use serde::de::DeserializeOwned;
use shareflix_core::types::{FileRecord, SortOrder};
use tracing::debug;

use crate::api::WebshareApi;
use crate::xml::{self, LinkResponse, LoginResponse, SaltResponse, SearchResponse};
use crate::{SearchOptions, WebshareError};

const BASE_URL: &str = "https://webshare.cz";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

pub struct WebshareClient {
    base_url: String,
    client: reqwest::Client,
}

impl WebshareClient {
    pub fn new() -> Self {
        Self::with_base_url(BASE_URL)
    }

    /// Point the client at another host (used by tests).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post_xml<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        form: &[(&str, &str)],
    ) -> Result<T, WebshareError> {
        let url = format!("{}/api/{endpoint}/", self.base_url);
        debug!(url = %url, "Webshare request");

        let resp = self
            .client
            .post(&url)
            .header(reqwest::header::ACCEPT, "text/xml; charset=UTF-8")
            .form(form)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| WebshareError::Network(e.to_string()))?;

        let status = resp.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(WebshareError::Unauthorized(format!("HTTP {status}")));
        }
        if !status.is_success() {
            return Err(WebshareError::Network(format!("Webshare returned {status}")));
        }

        let body = resp
            .text()
            .await
            .map_err(|e| WebshareError::Network(e.to_string()))?;
        xml::decode(&body)
    }
}

impl Default for WebshareClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl WebshareApi for WebshareClient {
    async fn salt(&self, username: &str) -> Result<String, WebshareError> {
        let resp: SaltResponse = self
            .post_xml("salt", &[("username_or_email", username)])
            .await?;
        xml::non_empty(resp.salt).ok_or(WebshareError::MissingField("salt"))
    }

    async fn login(
        &self,
        username: &str,
        password_hash: &str,
        digest: &str,
    ) -> Result<String, WebshareError> {
        let resp: LoginResponse = self
            .post_xml(
                "login",
                &[
                    ("username_or_email", username),
                    ("password", password_hash),
                    ("digest", digest),
                    ("keep_logged_in", "1"),
                ],
            )
            .await?;
        xml::non_empty(resp.token).ok_or(WebshareError::MissingField("token"))
    }

    async fn search(
        &self,
        token: &str,
        query: &str,
        sort: SortOrder,
        options: SearchOptions,
    ) -> Result<Vec<FileRecord>, WebshareError> {
        let limit = options.limit.to_string();
        let resp: SearchResponse = self
            .post_xml(
                "search",
                &[
                    ("what", query),
                    ("category", "video"),
                    ("sort", sort.as_str()),
                    ("limit", limit.as_str()),
                    ("offset", "0"),
                    ("maybe_removed", "true"),
                    ("wst", token),
                ],
            )
            .await?;
        Ok(resp.files.into_iter().map(FileRecord::from).collect())
    }

    async fn file_link(
        &self,
        token: &str,
        ident: &str,
        device_id: &str,
    ) -> Result<Option<String>, WebshareError> {
        let resp: LinkResponse = self
            .post_xml(
                "file_link",
                &[
                    ("ident", ident),
                    ("wst", token),
                    ("download_type", "video_stream"),
                    ("device_uuid", device_id),
                    ("force_https", "1"),
                ],
            )
            .await?;
        Ok(xml::non_empty(resp.link))
    }
}

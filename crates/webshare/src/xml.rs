//! Decoding of the backend's XML envelopes.
//!
//! Every response is `<response><status>..</status>...</response>`; anything
//! other than `OK` carries `<code>` and `<message>`.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use shareflix_core::types::FileRecord;

use crate::WebshareError;

#[derive(Debug, Deserialize)]
struct StatusEnvelope {
    status: String,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SaltResponse {
    #[serde(default)]
    pub salt: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LinkResponse {
    #[serde(default)]
    pub link: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default, rename = "file")]
    pub files: Vec<FileNode>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FileNode {
    pub ident: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub size: u64,
}

impl From<FileNode> for FileRecord {
    fn from(node: FileNode) -> Self {
        FileRecord {
            ident: node.ident,
            name: node.name,
            size_bytes: node.size,
        }
    }
}

/// Check the envelope status, then decode the body into `T`.
pub(crate) fn decode<T: DeserializeOwned>(body: &str) -> Result<T, WebshareError> {
    let envelope: StatusEnvelope =
        quick_xml::de::from_str(body).map_err(|e| WebshareError::Parse(e.to_string()))?;

    if !envelope.status.trim().eq_ignore_ascii_case("OK") {
        let code = envelope.code.unwrap_or_default();
        let message = envelope.message.unwrap_or_default();
        if is_auth_message(&code, &message) {
            return Err(WebshareError::Unauthorized(format!("{code} {message}")));
        }
        return Err(WebshareError::Api {
            status: envelope.status,
            code,
            message,
        });
    }

    quick_xml::de::from_str(body).map_err(|e| WebshareError::Parse(e.to_string()))
}

/// A `FATAL` reply that points at the session rather than the request.
fn is_auth_message(code: &str, message: &str) -> bool {
    let text = format!("{code} {message}").to_lowercase();
    ["token", "login", "logged"].iter().any(|w| text.contains(w))
}

/// Treat empty text nodes as absent.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

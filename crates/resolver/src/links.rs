use std::collections::BTreeMap;

use shareflix_core::types::{FileRecord, StreamDescriptor};
use shareflix_webshare::api::WebshareApi;
use shareflix_webshare::session::Session;
use tracing::{debug, warn};

use crate::scope::SessionScope;

/// Headers a player must send to fetch a link issued for `session`.
pub fn auth_headers(session: &Session) -> BTreeMap<String, String> {
    BTreeMap::from([("Cookie".to_string(), format!("wst={}", session.token))])
}

/// Exchange a file ident for a direct download URL.
///
/// Any failure, or an answer without a link, yields `None`.
pub async fn resolve_link(
    api: &dyn WebshareApi,
    ident: &str,
    scope: &mut SessionScope<'_>,
) -> Option<String> {
    let result = scope
        .call(|session| async move {
            api.file_link(&session.token, ident, &session.device_id)
                .await
        })
        .await;

    match result {
        Ok(Some(url)) => Some(url),
        Ok(None) => {
            debug!(ident, "backend offered no link");
            None
        }
        Err(e) => {
            warn!(ident, error = %e, "link resolution failed");
            None
        }
    }
}

/// Resolve every file in order, skipping the ones without a link.
pub async fn resolve_streams(
    api: &dyn WebshareApi,
    files: &[FileRecord],
    scope: &mut SessionScope<'_>,
) -> Vec<StreamDescriptor> {
    let mut streams = Vec::with_capacity(files.len());
    for file in files {
        if let Some(url) = resolve_link(api, &file.ident, scope).await {
            let headers = auth_headers(scope.session());
            streams.push(StreamDescriptor::for_file(file, url, headers));
        }
    }
    streams
}

//! In-memory backend used by the unit tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use shareflix_core::types::{FileRecord, SortOrder};
use shareflix_webshare::api::WebshareApi;
use shareflix_webshare::{Credentials, SearchOptions, WebshareError};

type SearchFn =
    dyn Fn(usize, &str, &str, SortOrder) -> Result<Vec<FileRecord>, WebshareError> + Send + Sync;

/// Scripted backend. `search` answers via a closure given the 1-based call
/// number, token, query and sort; `file_link` answers from a fixed table.
pub(crate) struct MockApi {
    respond: Box<SearchFn>,
    links: HashMap<String, Result<Option<String>, String>>,
    pub searches: Mutex<Vec<(String, String, SortOrder)>>,
    pub link_calls: Mutex<Vec<(String, String)>>,
    pub logins: AtomicUsize,
}

impl MockApi {
    pub fn new(
        respond: impl Fn(usize, &str, &str, SortOrder) -> Result<Vec<FileRecord>, WebshareError>
        + Send
        + Sync
        + 'static,
    ) -> Self {
        Self {
            respond: Box::new(respond),
            links: HashMap::new(),
            searches: Mutex::new(Vec::new()),
            link_calls: Mutex::new(Vec::new()),
            logins: AtomicUsize::new(0),
        }
    }

    pub fn link(mut self, ident: &str, url: Option<&str>) -> Self {
        self.links
            .insert(ident.to_string(), Ok(url.map(|u| u.to_string())));
        self
    }

    pub fn link_error(mut self, ident: &str) -> Self {
        self.links
            .insert(ident.to_string(), Err("FILE_LINK_FATAL_1".to_string()));
        self
    }

    pub fn search_count(&self) -> usize {
        self.searches.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl WebshareApi for MockApi {
    async fn salt(&self, _username: &str) -> Result<String, WebshareError> {
        Ok("salt".into())
    }

    async fn login(
        &self,
        _username: &str,
        _password_hash: &str,
        _digest: &str,
    ) -> Result<String, WebshareError> {
        let n = self.logins.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!("token-{n}"))
    }

    async fn search(
        &self,
        token: &str,
        query: &str,
        sort: SortOrder,
        _options: SearchOptions,
    ) -> Result<Vec<FileRecord>, WebshareError> {
        let n = {
            let mut searches = self.searches.lock().unwrap();
            searches.push((token.to_string(), query.to_string(), sort));
            searches.len()
        };
        (self.respond)(n, token, query, sort)
    }

    async fn file_link(
        &self,
        token: &str,
        ident: &str,
        _device_id: &str,
    ) -> Result<Option<String>, WebshareError> {
        self.link_calls
            .lock()
            .unwrap()
            .push((token.to_string(), ident.to_string()));
        match self.links.get(ident) {
            Some(Ok(link)) => Ok(link.clone()),
            Some(Err(code)) => Err(WebshareError::Api {
                status: "FATAL".into(),
                code: code.clone(),
                message: "File not found.".into(),
            }),
            None => Ok(None),
        }
    }
}

pub(crate) fn file(ident: &str, name: &str, size_bytes: u64) -> FileRecord {
    FileRecord {
        ident: ident.into(),
        name: name.into(),
        size_bytes,
    }
}

pub(crate) fn credentials() -> Credentials {
    Credentials {
        username: "alice".into(),
        password: "secret".into(),
    }
}

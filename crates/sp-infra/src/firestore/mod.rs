//! Firestore REST v1 adapter for the item store and the postal-code
//! directory.

mod path;
mod value;

pub use path::{document_id, item_ancestry, ItemAncestry};

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use sp_core::ports::{ItemRecord, ItemStorePort, PostalCodeDirectoryPort, RemoteStoreError};
use sp_core::{PostalCode, PostalCodeDetail};
use tracing::{debug, info, warn};

use crate::records::item_record;
use value::Document;

pub const DEFAULT_BASE_URL: &str = "https://firestore.googleapis.com/v1";
pub const DEFAULT_POSTAL_CODE_COLLECTION: &str = "zipcodes";
const ITEMS_COLLECTION: &str = "items";
const LIST_PAGE_SIZE: u32 = 300;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirestoreConfig {
    pub project_id: String,
    /// Web API key sent as `key=`; `None` relies on open security rules
    pub api_key: Option<String>,
    pub base_url: String,
    pub postal_code_collection: String,
    pub timeout: Duration,
}

impl FirestoreConfig {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            postal_code_collection: DEFAULT_POSTAL_CODE_COLLECTION.to_string(),
            timeout: Duration::from_secs(15),
        }
    }
}

#[derive(Deserialize)]
struct RunQueryEntry {
    document: Option<Document>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListDocumentsPage {
    #[serde(default)]
    documents: Vec<Document>,
    next_page_token: Option<String>,
}

pub struct FirestoreClient {
    http: reqwest::Client,
    config: FirestoreConfig,
}

impl FirestoreClient {
    pub fn new(config: FirestoreConfig) -> Result<Self, RemoteStoreError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| RemoteStoreError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http, config })
    }

    fn documents_root(&self) -> String {
        format!(
            "{}/projects/{}/databases/(default)/documents",
            self.config.base_url.trim_end_matches('/'),
            self.config.project_id
        )
    }

    /// `documents/{collection}/{id}` with `id` as one percent-encoded segment.
    fn document_url(&self, collection: &str, id: &str) -> Result<Url, RemoteStoreError> {
        let mut url = Url::parse(&self.documents_root())
            .map_err(|e| RemoteStoreError::Transport(format!("invalid base URL: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| RemoteStoreError::Transport("base URL cannot carry a path".to_string()))?
            .push(collection)
            .push(id);
        Ok(url)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, RemoteStoreError> {
        let request = match &self.config.api_key {
            Some(key) => request.query(&[("key", key)]),
            None => request,
        };

        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RemoteStoreError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| RemoteStoreError::Decode(e.to_string()))
    }
}

fn is_document_id(id: &str) -> bool {
    !id.is_empty() && id != "." && id != ".." && !id.contains('/')
}

fn transport_error(error: reqwest::Error) -> RemoteStoreError {
    if error.is_timeout() {
        RemoteStoreError::Transport(format!("request timed out: {error}"))
    } else if let Some(status) = error.status() {
        RemoteStoreError::Status {
            status: status.as_u16(),
            body: error.to_string(),
        }
    } else {
        RemoteStoreError::Transport(error.to_string())
    }
}

#[async_trait]
impl ItemStorePort for FirestoreClient {
    async fn get_all_items_across_stores(&self) -> Result<Vec<ItemRecord>, RemoteStoreError> {
        let url = format!("{}:runQuery", self.documents_root());
        let body = json!({
            "structuredQuery": {
                "from": [{ "collectionId": ITEMS_COLLECTION, "allDescendants": true }]
            }
        });

        let entries: Vec<RunQueryEntry> = self.send_json(self.http.post(&url).json(&body)).await?;

        let mut records = Vec::with_capacity(entries.len());
        for document in entries.into_iter().filter_map(|entry| entry.document) {
            let Some(ancestry) = item_ancestry(&document.name) else {
                warn!(name = %document.name, "Item document has no store ancestry, skipping");
                continue;
            };
            records.push(item_record(
                ancestry.id,
                ancestry.store,
                ancestry.postal_code,
                &document.plain_fields(),
            ));
        }

        info!(count = records.len(), "Fetched item documents");
        Ok(records)
    }
}

#[async_trait]
impl PostalCodeDirectoryPort for FirestoreClient {
    async fn list_postal_codes(&self) -> Result<Vec<PostalCode>, RemoteStoreError> {
        let url = format!(
            "{}/{}",
            self.documents_root(),
            self.config.postal_code_collection
        );
        let page_size = LIST_PAGE_SIZE.to_string();

        let mut codes = Vec::new();
        let mut page_token: Option<String> = None;
        loop {
            let mut request = self.http.get(&url).query(&[("pageSize", page_size.as_str())]);
            if let Some(token) = &page_token {
                request = request.query(&[("pageToken", token.as_str())]);
            }

            let page: ListDocumentsPage = self.send_json(request).await?;
            codes.extend(
                page.documents
                    .iter()
                    .map(|doc| PostalCode::new(document_id(&doc.name))),
            );

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        debug!(count = codes.len(), "Listed postal codes");
        Ok(codes)
    }

    async fn get_postal_code_detail(
        &self,
        code: &PostalCode,
    ) -> Result<Option<PostalCodeDetail>, RemoteStoreError> {
        if !is_document_id(code.as_str()) {
            debug!(code = %code, "Not a document id");
            return Ok(None);
        }

        let url = self.document_url(&self.config.postal_code_collection, code.as_str())?;

        match self.send_json::<Document>(self.http.get(url)).await {
            Ok(document) => {
                let body = Value::Object(document.plain_fields());
                Ok(Some(PostalCodeDetail::from_value(&body)))
            }
            Err(RemoteStoreError::Status { status, .. })
                if status == StatusCode::NOT_FOUND.as_u16() =>
            {
                debug!(code = %code, "No postal code document");
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }
}

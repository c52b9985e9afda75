use std::sync::Arc;
use cb_core::types::{CollectionSummary, Manifest};
use cb_core::{Error, Lookup, Result};
use reqwest::Client;
use tracing::info;
use url::Url;

use crate::config::{join, parse_base, ClientConfig};
use crate::http::{fetch_json, fetch_lookup, HttpCorpusApi};
use crate::safety::is_safe_name;

/// Client for the archive server as a whole: collection discovery and
/// per-collection API handles.
#[derive(Debug, Clone)]
pub struct ServerClient {
    client: Arc<Client>,
    server: Url,
}

impl ServerClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Ok(Self {
            client: Arc::new(config.build_client()?),
            server: config.server.clone(),
        })
    }

    pub fn collections_url(&self) -> String {
        join(&self.server, &["api", "collections"])
    }

    /// API base of a collection, `{server}/api/c/<id>`.
    pub fn collection_base(&self, id: &str) -> Result<Url> {
        if !is_safe_name(id) {
            return Err(Error::InvalidName(id.to_string()));
        }
        parse_base(&join(&self.server, &["api", "c", id]))
    }

    pub async fn list_collections(&self) -> Result<Vec<CollectionSummary>> {
        let collections: Vec<CollectionSummary> =
            fetch_json(&self.client, &self.collections_url()).await?;
        info!("📚 Found {} collections on {}", collections.len(), self.server);
        Ok(collections)
    }

    pub async fn manifest(&self, id: &str) -> Result<Lookup<Manifest>> {
        let base = self.collection_base(id)?;
        fetch_lookup(&self.client, &join(&base, &["manifest"])).await
    }

    /// A `CorpusApi` scoped to one collection, sharing this client's connection pool.
    pub fn collection(&self, id: &str) -> Result<HttpCorpusApi> {
        Ok(HttpCorpusApi::with_client(self.client.clone(), self.collection_base(id)?))
    }
}

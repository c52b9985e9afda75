use std::fmt;
use std::sync::Arc;
use async_trait::async_trait;
use cb_core::format::is_truthy;
use cb_core::types::{Annotation, ArticleDetail, ArticlePage, SegmentDetail, SegmentIndex, SegmentSummary};
use cb_core::{CorpusApi, Error, Lookup, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::config::{join, parse_base, ClientConfig};

/// `CorpusApi` over HTTP, rooted at one collection's API base
/// (e.g. `http://host/api/c/<collection>`).
#[derive(Clone)]
pub struct HttpCorpusApi {
    client: Arc<Client>,
    api_base: Url,
}

impl HttpCorpusApi {
    pub fn new(api_base: &str, config: &ClientConfig) -> Result<Self> {
        Ok(Self {
            client: Arc::new(config.build_client()?),
            api_base: parse_base(api_base)?,
        })
    }

    pub(crate) fn with_client(client: Arc<Client>, api_base: Url) -> Self {
        Self { client, api_base }
    }

    pub fn api_base(&self) -> &Url {
        &self.api_base
    }

    pub fn articles_url(&self, page: u32, per_page: u32) -> String {
        format!("{}?page={}&per_page={}", join(&self.api_base, &["articles"]), page, per_page)
    }

    pub fn article_url(&self, id: &str) -> String {
        let id = urlencoding::encode(id);
        join(&self.api_base, &["articles", id.as_ref()])
    }

    pub fn segments_url(&self) -> String {
        join(&self.api_base, &["segments"])
    }

    pub fn segment_url(&self, id: &str) -> String {
        let id = urlencoding::encode(id);
        join(&self.api_base, &["segments", id.as_ref()])
    }

    pub fn annotation_url(&self, id: &str) -> String {
        let id = urlencoding::encode(id);
        join(&self.api_base, &["annotations", id.as_ref()])
    }
}

impl fmt::Debug for HttpCorpusApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpCorpusApi")
            .field("client", &"<reqwest::Client>")
            .field("api_base", &self.api_base.as_str())
            .finish()
    }
}

#[async_trait]
impl CorpusApi for HttpCorpusApi {
    async fn list_articles(&self, page: u32, per_page: u32) -> Result<ArticlePage> {
        fetch_json(&self.client, &self.articles_url(page, per_page)).await
    }

    async fn get_article(&self, id: &str) -> Result<Lookup<ArticleDetail>> {
        fetch_lookup(&self.client, &self.article_url(id)).await
    }

    async fn list_segments(&self) -> Result<Vec<SegmentSummary>> {
        let index: SegmentIndex = fetch_json(&self.client, &self.segments_url()).await?;
        Ok(index.segments)
    }

    async fn get_segment(&self, id: &str) -> Result<Lookup<SegmentDetail>> {
        fetch_lookup(&self.client, &self.segment_url(id)).await
    }

    async fn get_annotation(&self, id: &str) -> Result<Lookup<Annotation>> {
        fetch_lookup(&self.client, &self.annotation_url(id)).await
    }
}

/// GET a JSON document that must come back with a success status.
pub(crate) async fn fetch_json<T: DeserializeOwned>(client: &Client, url: &str) -> Result<T> {
    debug!("GET {}", url);
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(Error::Status {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }
    Ok(response.json::<T>().await?)
}

/// GET a single record. An error-flagged body means "not found", whatever the status.
pub(crate) async fn fetch_lookup<T: DeserializeOwned>(client: &Client, url: &str) -> Result<Lookup<T>> {
    debug!("GET {}", url);
    let response = client.get(url).send().await?;
    let status = response.status().as_u16();
    let body = response.bytes().await?;
    classify_lookup(status, url, &body)
}

pub(crate) fn classify_lookup<T: DeserializeOwned>(status: u16, url: &str, body: &[u8]) -> Result<Lookup<T>> {
    let success = (200..300).contains(&status);
    let value: Value = match serde_json::from_slice(body) {
        Ok(value) => value,
        Err(_) if !success => {
            return Err(Error::Status {
                status,
                url: url.to_string(),
            })
        }
        Err(e) => return Err(e.into()),
    };

    if value.get("error").map(is_truthy).unwrap_or(false) {
        debug!("{} reported not found", url);
        return Ok(Lookup::NotFound);
    }
    if !success {
        return Err(Error::Status {
            status,
            url: url.to_string(),
        });
    }
    Ok(Lookup::Found(serde_json::from_value(value)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api() -> HttpCorpusApi {
        let config = ClientConfig::new("http://localhost:5222").unwrap();
        HttpCorpusApi::new("http://localhost:5222/api/c/sillok/", &config).unwrap()
    }

    #[test]
    fn test_urls() {
        let api = api();
        assert_eq!(
            api.articles_url(3, 50),
            "http://localhost:5222/api/c/sillok/articles?page=3&per_page=50"
        );
        assert_eq!(api.segments_url(), "http://localhost:5222/api/c/sillok/segments");
    }

    #[test]
    fn test_ids_are_percent_encoded() {
        let api = api();
        assert_eq!(
            api.article_url("abc/def"),
            "http://localhost:5222/api/c/sillok/articles/abc%2Fdef"
        );
        assert_eq!(
            api.segment_url("學而 1"),
            "http://localhost:5222/api/c/sillok/segments/%E5%AD%B8%E8%80%8C%201"
        );
        assert_eq!(
            api.annotation_url("1.1/zhuxi#2"),
            "http://localhost:5222/api/c/sillok/annotations/1.1%2Fzhuxi%232"
        );
    }

    #[test]
    fn test_classify_not_found() {
        let body = br#"{"error": "not found"}"#;
        let lookup: Lookup<ArticleDetail> = classify_lookup(404, "u", body).unwrap();
        assert_eq!(lookup, Lookup::NotFound);

        let body = br#"{"error": true}"#;
        let lookup: Lookup<ArticleDetail> = classify_lookup(200, "u", body).unwrap();
        assert_eq!(lookup, Lookup::NotFound);
    }

    #[test]
    fn test_classify_found() {
        let body = br#"{"id": "a1", "metadata": {}, "original": {"paragraphs": ["x"]}, "has_translation": false, "error": false}"#;
        let lookup: Lookup<ArticleDetail> = classify_lookup(200, "u", body).unwrap();
        let detail = lookup.found().unwrap();
        assert_eq!(detail.id, "a1");
        assert_eq!(detail.original_paragraphs(), ["x".to_string()]);
    }

    #[test]
    fn test_classify_annotation() {
        let body = br#"{"error": "not found"}"#;
        let lookup: Lookup<Annotation> = classify_lookup(404, "u", body).unwrap();
        assert_eq!(lookup, Lookup::NotFound);

        let body = r#"{"id": "a-1", "commentator": "heyan", "commentary_type": "注", "text": "馬曰"}"#.as_bytes();
        let annotation = classify_lookup::<Annotation>(200, "u", body).unwrap().found().unwrap();
        assert_eq!(annotation.id.as_deref(), Some("a-1"));
        assert_eq!(annotation.display_name(), "heyan");
    }

    #[test]
    fn test_classify_transport_failures() {
        let result: Result<Lookup<ArticleDetail>> = classify_lookup(502, "u", b"<html>bad gateway</html>");
        assert!(matches!(result, Err(Error::Status { status: 502, .. })));

        let result: Result<Lookup<ArticleDetail>> = classify_lookup(500, "u", br#"{"message": "boom"}"#);
        assert!(matches!(result, Err(Error::Status { status: 500, .. })));

        let result: Result<Lookup<ArticleDetail>> = classify_lookup(200, "u", b"not json");
        assert!(matches!(result, Err(Error::Serialization(_))));
    }
}

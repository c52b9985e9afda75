use async_trait::async_trait;
use crate::types::{Annotation, ArticleDetail, ArticlePage, SegmentDetail, SegmentSummary};
use crate::Result;

/// Result of a single-record lookup. The API reports a missing record with a
/// payload carrying a truthy `error` field, which is not a transport failure.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    Found(T),
    NotFound,
}

impl<T> Lookup<T> {
    pub fn found(self) -> Option<T> {
        match self {
            Lookup::Found(value) => Some(value),
            Lookup::NotFound => None,
        }
    }
}

/// Read-only access to one collection of the corpus archive.
#[async_trait]
pub trait CorpusApi: Send + Sync {
    /// Fetch one page of article summaries
    async fn list_articles(&self, page: u32, per_page: u32) -> Result<ArticlePage>;

    /// Fetch a single article by id
    async fn get_article(&self, id: &str) -> Result<Lookup<ArticleDetail>>;

    /// Fetch the full segment index, in display order
    async fn list_segments(&self) -> Result<Vec<SegmentSummary>>;

    /// Fetch a segment together with its annotations
    async fn get_segment(&self, id: &str) -> Result<Lookup<SegmentDetail>>;

    /// Fetch a single annotation by id
    async fn get_annotation(&self, id: &str) -> Result<Lookup<Annotation>>;
}

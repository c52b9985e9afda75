// Shared fixtures for the controller integration tests: an in-memory
// `CorpusApi` that pages like the real server, plus HTML query helpers.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use cb_core::types::{Annotation, ArticleDetail, ArticlePage, ArticleSummary, SegmentDetail, SegmentSummary};
use cb_core::{CorpusApi, Error, Lookup, Result};
use cb_views::dom::{Document, BESPOKE_MAIN, SEGMENT_INDEX, THREADS_MAIN};
use scraper::{Html, Selector};
use serde_json::{json, Value};
use tokio::sync::oneshot;

#[derive(Default)]
pub struct FakeApi {
    articles: Vec<ArticleSummary>,
    details: HashMap<String, ArticleDetail>,
    segments: Vec<SegmentSummary>,
    segment_details: HashMap<String, SegmentDetail>,
    annotations: HashMap<String, Annotation>,
    failing: Mutex<bool>,
    gates: Mutex<HashMap<String, oneshot::Receiver<()>>>,
    requests: Mutex<Vec<String>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// `count` summaries with ids `art-1..=art-count`.
    pub fn with_articles(mut self, count: usize) -> Self {
        self.articles = (1..=count)
            .map(|i| {
                serde_json::from_value(json!({
                    "id": format!("art-{}", i),
                    "source": "sillok",
                    "metadata": {"title": format!("기사 {}", i), "date": {"year": 1392, "month": 7}}
                }))
                .unwrap()
            })
            .collect();
        self
    }

    pub fn with_article(mut self, detail: Value) -> Self {
        let detail: ArticleDetail = serde_json::from_value(detail).unwrap();
        self.details.insert(detail.id.clone(), detail);
        self
    }

    pub fn with_segments(mut self, segments: Value) -> Self {
        self.segments = serde_json::from_value(segments).unwrap();
        self
    }

    pub fn with_segment(mut self, detail: Value) -> Self {
        let detail: SegmentDetail = serde_json::from_value(detail).unwrap();
        self.segment_details.insert(detail.segment.id.clone(), detail);
        self
    }

    pub fn with_annotation(mut self, annotation: Value) -> Self {
        let annotation: Annotation = serde_json::from_value(annotation).unwrap();
        let id = annotation.id.clone().unwrap_or_default();
        self.annotations.insert(id, annotation);
        self
    }

    /// Make every subsequent request fail as a transport error.
    pub fn fail_requests(&self, on: bool) {
        *self.failing.lock().unwrap() = on;
    }

    /// Hold the response for `key` (e.g. `article:x`, `segment:x`, `annotation:x`) until the sender fires.
    pub fn gate(&self, key: &str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(key.to_string(), rx);
        tx
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    async fn enter(&self, request: String, gate_key: String) -> Result<()> {
        self.requests.lock().unwrap().push(request.clone());
        let gate = self.gates.lock().unwrap().remove(&gate_key);
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        if *self.failing.lock().unwrap() {
            return Err(Error::Status {
                status: 503,
                url: request,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl CorpusApi for FakeApi {
    async fn list_articles(&self, page: u32, per_page: u32) -> Result<ArticlePage> {
        self.enter(format!("list_articles({},{})", page, per_page), format!("page:{}", page))
            .await?;
        let total = self.articles.len() as u32;
        let pages = total.div_ceil(per_page).max(1);
        let page = page.clamp(1, pages);
        let start = ((page - 1) * per_page) as usize;
        let results = self
            .articles
            .iter()
            .skip(start)
            .take(per_page as usize)
            .cloned()
            .collect();
        Ok(ArticlePage {
            page,
            pages,
            total: total as u64,
            per_page: Some(per_page),
            results,
        })
    }

    async fn get_article(&self, id: &str) -> Result<Lookup<ArticleDetail>> {
        self.enter(format!("get_article({})", id), format!("article:{}", id)).await?;
        Ok(match self.details.get(id) {
            Some(detail) => Lookup::Found(detail.clone()),
            None => Lookup::NotFound,
        })
    }

    async fn list_segments(&self) -> Result<Vec<SegmentSummary>> {
        self.enter("list_segments".to_string(), "segments".to_string()).await?;
        Ok(self.segments.clone())
    }

    async fn get_segment(&self, id: &str) -> Result<Lookup<SegmentDetail>> {
        self.enter(format!("get_segment({})", id), format!("segment:{}", id)).await?;
        Ok(match self.segment_details.get(id) {
            Some(detail) => Lookup::Found(detail.clone()),
            None => Lookup::NotFound,
        })
    }

    async fn get_annotation(&self, id: &str) -> Result<Lookup<Annotation>> {
        self.enter(format!("get_annotation({})", id), format!("annotation:{}", id)).await?;
        Ok(match self.annotations.get(id) {
            Some(annotation) => Lookup::Found(annotation.clone()),
            None => Lookup::NotFound,
        })
    }
}

pub fn document() -> Arc<Document> {
    Arc::new(Document::with_mounts(&[BESPOKE_MAIN, SEGMENT_INDEX, THREADS_MAIN]))
}

pub async fn mount_html(document: &Document, mount: &str) -> String {
    document.html(mount).await.expect("mount point exists")
}

pub fn count(html: &str, selector: &str) -> usize {
    let fragment = Html::parse_fragment(html);
    let selector = Selector::parse(selector).unwrap();
    fragment.select(&selector).count()
}

pub fn texts(html: &str, selector: &str) -> Vec<String> {
    let fragment = Html::parse_fragment(html);
    let selector = Selector::parse(selector).unwrap();
    fragment
        .select(&selector)
        .map(|el| el.text().collect::<String>())
        .collect()
}

pub fn attrs(html: &str, selector: &str, name: &str) -> Vec<String> {
    let fragment = Html::parse_fragment(html);
    let selector = Selector::parse(selector).unwrap();
    fragment
        .select(&selector)
        .filter_map(|el| el.value().attr(name).map(str::to_string))
        .collect()
}

use std::sync::Arc;
use cb_core::{CorpusApi, Lookup, Result};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::dom::{error_message, Document, LOAD_FAILED, SEGMENT_INDEX, THREADS_MAIN};
use crate::nav::{Generations, Outcome};

pub mod render;

/// Lifecycle of the segment browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentPhase {
    Uninitialized,
    /// The index request failed; `init` may be retried.
    IndexError,
    IndexLoaded,
    SegmentLoading,
    SegmentLoaded,
    SegmentError,
}

#[derive(Debug)]
struct SegmentState {
    phase: SegmentPhase,
    active_segment_id: Option<String>,
}

/// Segment browser: a sidebar index in `#segment-index` and the selected
/// segment's annotations in `#threads-main`. Selection is not reflected in
/// the location.
pub struct SegmentController {
    api: Arc<dyn CorpusApi>,
    document: Arc<Document>,
    state: Mutex<SegmentState>,
    generations: Generations,
}

impl SegmentController {
    pub fn new(api: Arc<dyn CorpusApi>, document: Arc<Document>) -> Self {
        Self {
            api,
            document,
            state: Mutex::new(SegmentState {
                phase: SegmentPhase::Uninitialized,
                active_segment_id: None,
            }),
            generations: Generations::default(),
        }
    }

    pub async fn phase(&self) -> SegmentPhase {
        self.state.lock().await.phase
    }

    pub async fn active_segment_id(&self) -> Option<String> {
        self.state.lock().await.active_segment_id.clone()
    }

    /// Load the index, render the sidebar, and select the first segment if any.
    pub async fn init(&self) -> Result<Outcome> {
        let segments = match self.api.list_segments().await {
            Ok(segments) => segments,
            Err(e) => {
                warn!("⚠️ Segment index request failed: {}", e);
                self.state.lock().await.phase = SegmentPhase::IndexError;
                self.document
                    .replace(SEGMENT_INDEX, vec![error_message(LOAD_FAILED)])
                    .await;
                return Err(e);
            }
        };

        self.document.replace(SEGMENT_INDEX, render::sidebar(&segments)).await;
        info!("🧵 Rendered segment index ({} segments)", segments.len());

        self.state.lock().await.phase = SegmentPhase::IndexLoaded;

        match segments.first().map(|s| s.id.clone()) {
            Some(id) => self.load_segment(&id).await,
            None => Ok(Outcome::Rendered),
        }
    }

    /// Sidebar click: select `segment_id` and render its annotations.
    pub async fn load_segment(&self, segment_id: &str) -> Result<Outcome> {
        let ticket = self.generations.begin();
        {
            let mut state = self.state.lock().await;
            state.active_segment_id = Some(segment_id.to_string());
            state.phase = SegmentPhase::SegmentLoading;
        }
        self.document
            .update(SEGMENT_INDEX, |sidebar| render::highlight(sidebar, segment_id))
            .await;

        let result = self.api.get_segment(segment_id).await;

        let (phase, view, outcome) = match result {
            Ok(Lookup::Found(detail)) => {
                debug!("Segment {} has {} annotations", segment_id, detail.annotations.len());
                (SegmentPhase::SegmentLoaded, render::segment_view(&detail), Ok(Outcome::Rendered))
            }
            Ok(Lookup::NotFound) => (SegmentPhase::SegmentError, render::not_found(), Ok(Outcome::NotFound)),
            Err(e) => (SegmentPhase::SegmentError, vec![error_message(LOAD_FAILED)], Err(e)),
        };

        // Phase is written under the generation check, before rendering.
        {
            let mut state = self.state.lock().await;
            if !self.generations.is_current(ticket) {
                debug!("Discarding stale response for segment {}", segment_id);
                return Ok(Outcome::Discarded);
            }
            state.phase = phase;
        }

        self.document.replace(THREADS_MAIN, view).await;
        match &outcome {
            Ok(Outcome::NotFound) => info!("Segment {} not found", segment_id),
            Err(e) => warn!("⚠️ Segment {} request failed: {}", segment_id, e),
            _ => info!("📖 Rendered segment {}", segment_id),
        }
        outcome
    }
}

/// Render one annotation on its own into `#threads-main`, outside any
/// segment selection.
pub async fn show_annotation(api: &dyn CorpusApi, document: &Document, annotation_id: &str) -> Result<Outcome> {
    match api.get_annotation(annotation_id).await {
        Ok(Lookup::Found(annotation)) => {
            document.replace(THREADS_MAIN, render::annotation_view(&annotation)).await;
            info!("📝 Rendered annotation {}", annotation_id);
            Ok(Outcome::Rendered)
        }
        Ok(Lookup::NotFound) => {
            document.replace(THREADS_MAIN, render::annotation_not_found()).await;
            info!("Annotation {} not found", annotation_id);
            Ok(Outcome::NotFound)
        }
        Err(e) => {
            warn!("⚠️ Annotation {} request failed: {}", annotation_id, e);
            document.replace(THREADS_MAIN, vec![error_message(LOAD_FAILED)]).await;
            Err(e)
        }
    }
}

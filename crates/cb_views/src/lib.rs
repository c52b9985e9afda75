pub mod articles;
pub mod dom;
pub mod nav;
pub mod router;
pub mod segments;

pub use articles::ArticleController;
pub use dom::Document;
pub use nav::Outcome;
pub use router::Route;
pub use segments::{show_annotation, SegmentController, SegmentPhase};

pub mod prelude {
    pub use crate::dom::{Document, BESPOKE_MAIN, SEGMENT_INDEX, THREADS_MAIN};
    pub use crate::{show_annotation, ArticleController, Outcome, SegmentController};
    pub use cb_core::{CorpusApi, Error, Result};
}

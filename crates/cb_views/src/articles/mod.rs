use std::sync::Arc;
use cb_core::{CorpusApi, Error, Lookup, Result};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::dom::{error_message, Document, BESPOKE_MAIN, LOAD_FAILED};
use crate::nav::{Generations, Outcome, Ticket};
use crate::router::{Location, Route};

pub mod render;

pub const PER_PAGE: u32 = 50;

#[derive(Debug)]
struct ArticleState {
    current_page: u32,
    /// Page count from the last rendered list, if any.
    pages: Option<u32>,
    location: Location,
}

/// Article browser: paginated list plus bilingual detail pages, routed by
/// the location fragment and rendered into `#bespoke-main`.
pub struct ArticleController {
    api: Arc<dyn CorpusApi>,
    document: Arc<Document>,
    state: Mutex<ArticleState>,
    generations: Generations,
}

impl ArticleController {
    pub fn new(api: Arc<dyn CorpusApi>, document: Arc<Document>) -> Self {
        Self::with_location(api, document, "")
    }

    pub fn with_location(api: Arc<dyn CorpusApi>, document: Arc<Document>, fragment: &str) -> Self {
        Self {
            api,
            document,
            state: Mutex::new(ArticleState {
                current_page: 1,
                pages: None,
                location: Location::new(fragment),
            }),
            generations: Generations::default(),
        }
    }

    pub async fn current_page(&self) -> u32 {
        self.state.lock().await.current_page
    }

    pub async fn fragment(&self) -> String {
        self.state.lock().await.location.fragment().to_string()
    }

    /// Initial load: dispatch whatever the location currently says.
    pub async fn start(&self) -> Result<Outcome> {
        self.route().await
    }

    /// Assign the location fragment; a change dispatches exactly one route.
    pub async fn navigate(&self, fragment: &str) -> Result<Outcome> {
        let changed = self.state.lock().await.location.assign(fragment);
        if !changed {
            debug!("Fragment unchanged ({}), no navigation", fragment);
            return Ok(Outcome::Unchanged);
        }
        self.route().await
    }

    pub async fn route(&self) -> Result<Outcome> {
        let route = self.state.lock().await.location.route();
        debug!("Routing to {:?}", route);
        match route {
            Route::Article(id) => self.show_article_detail(&id).await,
            Route::List => self.show_article_list(None).await,
        }
    }

    /// Row click.
    pub async fn open_article(&self, id: &str) -> Result<Outcome> {
        self.navigate(&Route::Article(id.to_string()).fragment()).await
    }

    /// "Back to list" link.
    pub async fn back_to_list(&self) -> Result<Outcome> {
        self.navigate(&Route::List.fragment()).await
    }

    pub async fn prev_page(&self) -> Result<Outcome> {
        let page = self.state.lock().await.current_page;
        if page <= 1 {
            return Ok(Outcome::Unchanged);
        }
        self.show_article_list(Some(page - 1)).await
    }

    pub async fn next_page(&self) -> Result<Outcome> {
        let (page, pages) = {
            let state = self.state.lock().await;
            (state.current_page, state.pages)
        };
        if pages.map_or(true, |pages| page >= pages) {
            return Ok(Outcome::Unchanged);
        }
        self.show_article_list(Some(page + 1)).await
    }

    /// Fetch and render one page of the list. `None` re-renders the current page.
    pub async fn show_article_list(&self, page: Option<u32>) -> Result<Outcome> {
        let ticket = self.generations.begin();
        let requested = match page {
            Some(page) => page.max(1),
            None => self.state.lock().await.current_page,
        };

        let listing = match self.api.list_articles(requested, PER_PAGE).await {
            Ok(listing) => listing,
            Err(e) => return self.fail(ticket, e).await,
        };
        {
            let mut state = self.state.lock().await;
            if !self.generations.is_current(ticket) {
                debug!("Discarding stale article list for page {}", requested);
                return Ok(Outcome::Discarded);
            }
            state.current_page = listing.page;
            state.pages = Some(listing.pages);
        }
        self.document.replace(BESPOKE_MAIN, render::list_view(&listing)).await;
        info!(
            "📜 Rendered article list page {}/{} ({} rows)",
            listing.page,
            listing.pages,
            listing.results.len()
        );
        Ok(Outcome::Rendered)
    }

    pub async fn show_article_detail(&self, id: &str) -> Result<Outcome> {
        let ticket = self.generations.begin();

        let lookup = match self.api.get_article(id).await {
            Ok(lookup) => lookup,
            Err(e) => return self.fail(ticket, e).await,
        };
        if !self.generations.is_current(ticket) {
            debug!("Discarding stale article {}", id);
            return Ok(Outcome::Discarded);
        }

        match lookup {
            Lookup::Found(article) => {
                self.document.replace(BESPOKE_MAIN, render::detail_view(&article)).await;
                info!("📰 Rendered article {}", article.id);
                Ok(Outcome::Rendered)
            }
            Lookup::NotFound => {
                self.document.replace(BESPOKE_MAIN, render::not_found()).await;
                info!("Article {} not found", id);
                Ok(Outcome::NotFound)
            }
        }
    }

    async fn fail(&self, ticket: Ticket, error: Error) -> Result<Outcome> {
        if !self.generations.is_current(ticket) {
            debug!("Dropping failure from a stale navigation: {}", error);
            return Ok(Outcome::Discarded);
        }
        warn!("⚠️ Article request failed: {}", error);
        self.document
            .replace(BESPOKE_MAIN, vec![error_message(LOAD_FAILED)])
            .await;
        Err(error)
    }
}

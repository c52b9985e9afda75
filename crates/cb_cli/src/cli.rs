use std::sync::Arc;
use cb_core::types::CollectionKind;
use cb_core::Lookup;
use cb_views::prelude::*;
use clap::Subcommand;
use tracing::info;

use crate::config::Settings;

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// List the collections published by the server
    Collections,
    /// Render one page of the article list
    Articles {
        #[arg(long)]
        page: Option<u32>,
    },
    /// Route a location fragment through the article browser (e.g. '#article/<id>')
    Open { fragment: String },
    /// Render the segment browser, optionally selecting a segment after the first
    Threads {
        #[arg(long)]
        segment: Option<String>,
    },
    /// Render a single annotation by id
    Annotation { id: String },
    /// Render the collection's default browser, picked from its manifest
    View,
}

pub async fn handle_command(command: Commands, settings: &Settings) -> Result<()> {
    match command {
        Commands::Collections => list_collections(settings).await,
        Commands::Articles { page } => {
            let (document, articles) = article_browser(settings, "")?;
            let result = articles.show_article_list(page).await;
            print_mounts(&document, &[BESPOKE_MAIN]).await;
            result.map(|_| ())
        }
        Commands::Open { fragment } => {
            let (document, articles) = article_browser(settings, &fragment)?;
            let result = articles.start().await;
            print_mounts(&document, &[BESPOKE_MAIN]).await;
            result.map(|_| ())
        }
        Commands::Threads { segment } => threads(settings, segment.as_deref()).await,
        Commands::Annotation { id } => {
            let document = Document::with_mounts(&[THREADS_MAIN]);
            let result = show_annotation(settings.corpus_api()?.as_ref(), &document, &id).await;
            print_mounts(&document, &[THREADS_MAIN]).await;
            result.map(|_| ())
        }
        Commands::View => view(settings).await,
    }
}

async fn list_collections(settings: &Settings) -> Result<()> {
    let collections = settings.server()?.list_collections().await?;
    for collection in collections {
        println!(
            "{:<24} {:<9} {:>8}  {}",
            collection.id,
            collection.kind.as_str(),
            collection.record_count,
            collection.title
        );
    }
    Ok(())
}

fn article_browser(settings: &Settings, fragment: &str) -> Result<(Arc<Document>, ArticleController)> {
    let document = Arc::new(Document::with_mounts(&[BESPOKE_MAIN]));
    let controller = ArticleController::with_location(settings.corpus_api()?, document.clone(), fragment);
    Ok((document, controller))
}

async fn threads(settings: &Settings, segment: Option<&str>) -> Result<()> {
    let document = Arc::new(Document::with_mounts(&[SEGMENT_INDEX, THREADS_MAIN]));
    let controller = SegmentController::new(settings.corpus_api()?, document.clone());

    let mut result = controller.init().await;
    if let (true, Some(id)) = (result.is_ok(), segment) {
        result = controller.load_segment(id).await;
    }
    print_mounts(&document, &[SEGMENT_INDEX, THREADS_MAIN]).await;
    if let Ok(Outcome::NotFound) = result {
        info!("Segment {} not found", segment.unwrap_or_default());
    }
    result.map(|_| ())
}

async fn view(settings: &Settings) -> Result<()> {
    let collection = settings.require_collection()?;
    let manifest = match settings.server()?.manifest(collection).await? {
        Lookup::Found(manifest) => manifest,
        Lookup::NotFound => {
            return Err(Error::Config(format!("collection '{}' not found", collection)))
        }
    };
    info!(
        "🗂️ {} ({})",
        manifest.title.as_deref().unwrap_or(collection),
        manifest.kind.as_str()
    );

    match manifest.kind {
        CollectionKind::Articles => {
            let (document, articles) = article_browser(settings, "")?;
            let result = articles.start().await;
            print_mounts(&document, &[BESPOKE_MAIN]).await;
            result.map(|_| ())
        }
        CollectionKind::Threads => threads(settings, None).await,
        CollectionKind::Other(kind) => Err(Error::Config(format!(
            "collection '{}' has unsupported type '{}'",
            collection, kind
        ))),
    }
}

async fn print_mounts(document: &Document, mounts: &[&str]) {
    for mount in mounts {
        if let Some(html) = document.html(mount).await {
            println!("{}", html);
        }
    }
}

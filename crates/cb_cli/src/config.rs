use std::sync::Arc;
use std::time::Duration;
use cb_client::config::DEFAULT_SERVER;
use cb_client::{ClientConfig, HttpCorpusApi, ServerClient};
use cb_core::{CorpusApi, Error, Result};
use clap::Parser;
use tracing::debug;

use crate::cli::Commands;

#[derive(Parser, Debug)]
#[command(author, version, about = "Read-only browser for a corpus archive", long_about = None)]
pub struct Cli {
    /// Archive server root
    #[arg(long, env = "BESPOKE_SERVER", default_value = DEFAULT_SERVER)]
    pub server: String,
    /// Explicit collection API base; overrides --server/--collection for the views
    #[arg(long, env = "BESPOKE_API_BASE")]
    pub api_base: Option<String>,
    /// Collection id on the server (e.g. sillok, lunyu)
    #[arg(short, long, env = "BESPOKE_COLLECTION")]
    pub collection: Option<String>,
    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,
    /// Debug logging
    #[arg(short, long)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Commands,
}

/// Validated connection settings derived from the command line.
#[derive(Debug, Clone)]
pub struct Settings {
    pub client: ClientConfig,
    pub api_base: Option<String>,
    pub collection: Option<String>,
}

impl Settings {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        if cli.timeout_secs == 0 {
            return Err(Error::Config("--timeout-secs must be positive".to_string()));
        }
        let client = ClientConfig::new(&cli.server)?.with_timeout(Duration::from_secs(cli.timeout_secs));
        Ok(Self {
            client,
            api_base: cli.api_base.clone(),
            collection: cli.collection.clone(),
        })
    }

    pub fn server(&self) -> Result<ServerClient> {
        ServerClient::new(&self.client)
    }

    /// API handle for the views: the explicit base if given, else the collection on the server.
    pub fn corpus_api(&self) -> Result<Arc<dyn CorpusApi>> {
        let api = match (&self.api_base, &self.collection) {
            (Some(base), _) => HttpCorpusApi::new(base, &self.client)?,
            (None, Some(collection)) => self.server()?.collection(collection)?,
            (None, None) => {
                return Err(Error::Config(
                    "either --collection or --api-base is required".to_string(),
                ))
            }
        };
        debug!("Using API base {}", api.api_base());
        Ok(Arc::new(api))
    }

    pub fn require_collection(&self) -> Result<&str> {
        self.collection
            .as_deref()
            .ok_or_else(|| Error::Config("--collection is required".to_string()))
    }
}

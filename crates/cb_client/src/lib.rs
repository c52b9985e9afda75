pub mod catalog;
pub mod config;
pub mod http;
pub mod safety;

pub use catalog::ServerClient;
pub use config::ClientConfig;
pub use http::HttpCorpusApi;


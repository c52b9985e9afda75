pub mod api;
pub mod error;
pub mod format;
pub mod html;
pub mod types;

pub use api::{CorpusApi, Lookup};
pub use error::Error;
pub use types::*;

pub type Result<T> = std::result::Result<T, Error>;


pub mod cache;
pub mod config;
pub mod error;
pub mod handlers;

pub use cache::{CacheHealth, CacheState, FileSnapshotSource, SnapshotSource, SuggestionCache};
pub use config::Config;
pub use error::{AppError, LookupError};

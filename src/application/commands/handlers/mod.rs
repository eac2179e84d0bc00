//! Command Handlers 实现

mod audio_cacher;
mod lookup_handlers;
mod metadata_fetcher;

pub use audio_cacher::{AudioCacheError, AudioCacheOutcome, AudioCacher, CacheStatus};
pub use lookup_handlers::{LookupHandler, LookupHandlerConfig, LookupPorts};
pub use metadata_fetcher::MetadataFetcher;

/// Imagery Module - progressive reveal and fallback image acquisition
///
/// - imagery_data.rs: texture states, reveal gate, completion events
/// - imagery_operations.rs: gating, fetch scheduling, completion handling
/// - fetcher.rs: the byte-source seam plus a file-system implementation
pub mod fetcher;
pub mod imagery_data;
pub mod imagery_operations;

pub use fetcher::{FileFetcher, ImageFetcher};
pub use imagery_data::{
    FetchError, FetchEvent, ImageSource, ImageryConfig, ImageryData, ImageryStats,
    RevealDriver, RevealGateData, Surface, TextureState,
};

pub use imagery_operations::{
    acquire_image, advance_reveal, create_imagery, create_reveal_gate, decode_image,
    drain_completions, extract_seed, fallback_locator, fallback_seed, flush_bindings,
    reveal_handle, revealed_count, run_reveal_timer, sync_reveal,
};

//! Manifest sources

pub mod fetcher;
pub mod memory;

pub use fetcher::{HttpManifestFetcher, ManifestFetcher};
pub use memory::StaticManifestFetcher;

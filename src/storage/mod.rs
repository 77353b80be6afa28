//! Filesystem collaborators: source discovery/decoding and thresholded image output

pub mod images;
pub mod loader;

pub use images::ImageStore;
pub use loader::{discover_sources, load_sources, SourceImage};

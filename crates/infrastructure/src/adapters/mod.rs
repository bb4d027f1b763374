//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod tmap_adapter;

pub use tmap_adapter::TmapAdapter;

//! OMDb lookup client for the reel tracker.
//!
//! One search endpoint, one detail endpoint, one attempt per call — no
//! retry, no backoff, no caching. The remote marks absent fields with the
//! literal placeholder `"N/A"`; the mapping into
//! [`CatalogItem`](reel_core::item::CatalogItem) translates that sentinel to
//! `None` so it never reaches the store.

mod client;
mod wire;

pub mod error;

pub use client::OmdbClient;
pub use error::{Error, Result};
pub use wire::{DetailedTitle, SearchHit};

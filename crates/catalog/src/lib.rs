//! Typed async client for the remote game catalog API.
//!
//! Wraps a RAWG-style REST catalog: free-text search, structured filters
//! (genre/platform/developer/publisher/tag), date-window queries for
//! trending/upcoming/anticipated/events lists, and the per-game
//! sub-resources (screenshots, additions, series, storefronts) that the
//! detail aggregator composes.
//!
//! Every request carries the fixed API key as a query-string parameter and
//! a 30-second timeout. List queries are served read-through from
//! [`cache::QueryCache`] within a 5-minute freshness window.

pub mod cache;
pub mod client;
pub mod dates;
pub mod error;
pub mod page;
pub mod types;

pub use client::CatalogClient;
pub use error::CatalogError;
pub use page::{Page, next_page};
pub use types::{
    Achievement, Addition, Creator, GameId, GameSummary, Genre, Screenshot, StoreEntry,
};

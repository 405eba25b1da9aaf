//! Game detail aggregation.
//!
//! Composes one primary catalog request and several auxiliary requests into
//! a single [`GameDetail`] view. The primary request is load-bearing — its
//! failure fails the whole operation — while every auxiliary request
//! degrades to an empty collection on failure.
//!
//! The aggregator runs against the [`GameSource`] trait rather than the
//! concrete client, so tests (and alternative backends) can supply their
//! own source.

pub mod aggregate;
pub mod source;

pub use aggregate::{GameDetail, fetch_game_details};
pub use source::{GameSource, SourceFuture};

//! Abstract source of game records and sub-resources.

use std::future::Future;
use std::pin::Pin;

use playdex_catalog::{
    Addition, CatalogClient, CatalogError, GameId, GameSummary, Screenshot, StoreEntry,
};

/// Boxed future returned by [`GameSource`] methods.
pub type SourceFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, CatalogError>> + Send + 'a>>;

/// Abstract catalog backend for the detail aggregator.
///
/// Object-safe so the aggregator can take `&dyn GameSource`; implemented by
/// [`CatalogClient`] and by in-memory fakes in tests.
pub trait GameSource: Send + Sync {
    /// Primary detail record.
    fn game(&self, id: GameId) -> SourceFuture<'_, GameSummary>;

    /// Screenshot sub-resource.
    fn screenshots(&self, id: GameId) -> SourceFuture<'_, Vec<Screenshot>>;

    /// Add-on (DLC) sub-resource.
    fn additions(&self, id: GameId) -> SourceFuture<'_, Vec<Addition>>;

    /// Series sub-resource.
    fn game_series(&self, id: GameId) -> SourceFuture<'_, Vec<GameSummary>>;

    /// Storefront sub-resource.
    fn stores(&self, id: GameId) -> SourceFuture<'_, Vec<StoreEntry>>;

    /// Games sharing any of `genre_ids`, excluding `exclude`.
    fn similar_by_genres(
        &self,
        genre_ids: &[u64],
        exclude: GameId,
    ) -> SourceFuture<'_, Vec<GameSummary>>;
}

impl GameSource for CatalogClient {
    fn game(&self, id: GameId) -> SourceFuture<'_, GameSummary> {
        Box::pin(CatalogClient::game(self, id))
    }

    fn screenshots(&self, id: GameId) -> SourceFuture<'_, Vec<Screenshot>> {
        Box::pin(CatalogClient::screenshots(self, id))
    }

    fn additions(&self, id: GameId) -> SourceFuture<'_, Vec<Addition>> {
        Box::pin(CatalogClient::additions(self, id))
    }

    fn game_series(&self, id: GameId) -> SourceFuture<'_, Vec<GameSummary>> {
        Box::pin(CatalogClient::game_series(self, id))
    }

    fn stores(&self, id: GameId) -> SourceFuture<'_, Vec<StoreEntry>> {
        Box::pin(CatalogClient::stores(self, id))
    }

    fn similar_by_genres(
        &self,
        genre_ids: &[u64],
        exclude: GameId,
    ) -> SourceFuture<'_, Vec<GameSummary>> {
        let genre_ids = genre_ids.to_vec();
        Box::pin(async move { CatalogClient::similar_by_genres(self, &genre_ids, exclude).await })
    }
}

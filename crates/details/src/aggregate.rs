//! The aggregation orchestrator.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use playdex_catalog::{
    Achievement, Addition, CatalogError, Creator, GameId, GameSummary, Screenshot, StoreEntry,
};

use crate::source::GameSource;

/// The merged detail view of a game: the primary record plus its auxiliary
/// collections.
///
/// Constructed only by [`fetch_game_details`]; a missing auxiliary resource
/// is an empty collection, never an error state on the whole entity.
/// `creators` and `achievements` have no upstream endpoint and are always
/// empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameDetail {
    pub game: GameSummary,
    pub screenshots: Vec<Screenshot>,
    pub dlc: Vec<Addition>,
    pub game_series: Vec<GameSummary>,
    pub stores: Vec<StoreEntry>,
    pub similar_games: Vec<GameSummary>,
    pub creators: Vec<Creator>,
    pub achievements: Vec<Achievement>,
}

/// Fetches the aggregated detail view for `id`.
///
/// The primary record is fetched first; its failure fails the whole
/// operation. The four auxiliary sub-resources are then fetched
/// concurrently, each degrading to an empty collection on failure. Similar
/// games are derived last from the primary record's genres (skipped
/// entirely when it has none) and never include `id` itself.
pub async fn fetch_game_details(
    source: &dyn GameSource,
    id: GameId,
) -> Result<GameDetail, CatalogError> {
    let game = source.game(id).await?;
    debug!(id, name = %game.name, "aggregating game detail");

    let (screenshots, dlc, game_series, stores) = tokio::join!(
        source.screenshots(id),
        source.additions(id),
        source.game_series(id),
        source.stores(id),
    );

    let screenshots = or_empty(screenshots, "screenshots", id);
    let dlc = or_empty(dlc, "additions", id);
    let game_series = or_empty(game_series, "game series", id);
    let stores = or_empty(stores, "stores", id);

    let genre_ids = game.genre_ids();
    let similar_games = if genre_ids.is_empty() {
        // An unfiltered query would return the whole catalog; skip it.
        Vec::new()
    } else {
        or_empty(source.similar_by_genres(&genre_ids, id).await, "similar games", id)
            .into_iter()
            .filter(|g| g.id != id)
            .collect()
    };

    Ok(GameDetail {
        game,
        screenshots,
        dlc,
        game_series,
        stores,
        similar_games,
        creators: Vec::new(),
        achievements: Vec::new(),
    })
}

/// Resolves an auxiliary result to its value, degrading failures to empty.
fn or_empty<T>(result: Result<Vec<T>, CatalogError>, what: &'static str, id: GameId) -> Vec<T> {
    match result {
        Ok(items) => items,
        Err(err) => {
            warn!(id, resource = what, error = %err, "auxiliary fetch failed, using empty");
            Vec::new()
        }
    }
}

//! The synthesized events feed.
//!
//! Relabels the upcoming quarter's releases into launch-event shape. Like
//! the news feed, this is a presentation transform over game records, not a
//! distinct data source.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use playdex_catalog::{CatalogClient, CatalogError, GameSummary};

/// Category of a synthesized event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Release,
}

/// A launch event relabeled from an upcoming release.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GamingEvent {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub location: String,
    pub kind: EventKind,
    pub image_url: Option<String>,
}

/// Fetches releases over the next quarter and relabels them as events.
pub async fn upcoming_events(client: &CatalogClient) -> Result<Vec<GamingEvent>, CatalogError> {
    let games = client.events_window().await?;
    Ok(games.into_iter().map(to_event).collect())
}

/// Relabels a game record into event shape.
fn to_event(game: GameSummary) -> GamingEvent {
    GamingEvent {
        id: game.id,
        title: format!("{} Launch Event", game.name),
        description: format!(
            "Get ready for the launch of {}! Join the gaming community in celebrating this \
             highly anticipated release.",
            game.name
        ),
        start_date: game.released,
        end_date: game.released,
        location: "Global Release".to_string(),
        kind: EventKind::Release,
        image_url: game.background_image,
    }
}

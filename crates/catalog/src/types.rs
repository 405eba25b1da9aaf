//! Wire types for the catalog API.
//!
//! The upstream JSON is loosely shaped — fields come and go per endpoint —
//! so everything optional is `Option` or `#[serde(default)]` and validated
//! here at the boundary rather than trusted downstream.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Catalog-assigned game identifier.
pub type GameId = u64;

/// A genre tag on a game record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genre {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub slug: String,
}

/// A platform record (nested inside [`PlatformRef`] on game records).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub slug: String,
}

/// Platform entry on a game record. The upstream nests the platform object
/// one level down.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformRef {
    pub platform: Platform,
}

/// A developer or publisher studio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Studio {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub games_count: u64,
    #[serde(default)]
    pub image_background: Option<String>,
}

/// A user-applied tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub language: Option<String>,
}

/// Short video clip reference attached to some game records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clip {
    pub clip: String,
    #[serde(default)]
    pub preview: Option<String>,
}

/// A game record as returned by list endpoints and `/games/{id}`.
///
/// The detail endpoint fills more fields (notably `description_raw`) than
/// list endpoints do; absent fields deserialize to their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSummary {
    pub id: GameId,
    pub name: String,
    #[serde(default)]
    pub background_image: Option<String>,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub metacritic: Option<i32>,
    #[serde(default)]
    pub released: Option<NaiveDate>,
    #[serde(default)]
    pub description_raw: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub platforms: Vec<PlatformRef>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub developers: Vec<Studio>,
    #[serde(default)]
    pub publishers: Vec<Studio>,
    #[serde(default)]
    pub clip: Option<Clip>,
}

impl GameSummary {
    /// Genre ids of this record, in listed order.
    pub fn genre_ids(&self) -> Vec<u64> {
        self.genres.iter().map(|g| g.id).collect()
    }
}

/// A screenshot from `/games/{id}/screenshots`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Screenshot {
    pub id: u64,
    pub image: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub is_deleted: bool,
}

/// An add-on (DLC/edition) from `/games/{id}/additions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Addition {
    pub id: GameId,
    pub name: String,
    #[serde(default)]
    pub background_image: Option<String>,
    #[serde(default)]
    pub released: Option<NaiveDate>,
}

/// Storefront metadata nested inside a [`StoreEntry`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreInfo {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub slug: String,
}

/// A storefront listing from `/games/{id}/stores`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreEntry {
    pub id: u64,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub store: Option<StoreInfo>,
}

/// A person credited on a game. The upstream exposes no usable creators
/// endpoint; the type exists so the detail aggregate carries an explicit
/// (empty) collection rather than omitting the field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Creator {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub image: Option<String>,
}

/// An achievement record. Same situation as [`Creator`]: modeled, never
/// populated from upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub percent: f64,
}

/// Raw paginated response envelope (internal).
#[derive(Debug, Deserialize)]
pub(crate) struct ApiPage<T> {
    #[serde(default)]
    #[allow(dead_code)]
    pub count: u64,
    #[serde(default)]
    #[allow(dead_code)]
    pub next: Option<String>,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_summary_full_record() {
        let json = r#"{
            "id": 3498,
            "name": "Grand Theft Auto V",
            "background_image": "https://img.example/gta.jpg",
            "rating": 4.47,
            "metacritic": 92,
            "released": "2013-09-17",
            "genres": [{"id": 4, "name": "Action", "slug": "action"}],
            "platforms": [{"platform": {"id": 4, "name": "PC", "slug": "pc"}}],
            "tags": [{"id": 31, "name": "Singleplayer", "slug": "singleplayer", "language": "eng"}]
        }"#;
        let game: GameSummary = serde_json::from_str(json).unwrap();
        assert_eq!(game.id, 3498);
        assert_eq!(game.metacritic, Some(92));
        assert_eq!(game.released, NaiveDate::from_ymd_opt(2013, 9, 17));
        assert_eq!(game.genre_ids(), vec![4]);
        assert_eq!(game.platforms[0].platform.name, "PC");
    }

    #[test]
    fn game_summary_minimal_record() {
        let json = r#"{"id": 1, "name": "Bare"}"#;
        let game: GameSummary = serde_json::from_str(json).unwrap();
        assert_eq!(game.rating, 0.0);
        assert!(game.metacritic.is_none());
        assert!(game.released.is_none());
        assert!(game.genres.is_empty());
        assert!(game.clip.is_none());
    }

    #[test]
    fn game_summary_null_optionals() {
        // Upstream sends explicit nulls for absent media fields.
        let json = r#"{"id": 2, "name": "Nulls", "background_image": null, "released": null, "metacritic": null}"#;
        let game: GameSummary = serde_json::from_str(json).unwrap();
        assert!(game.background_image.is_none());
        assert!(game.released.is_none());
    }

    #[test]
    fn store_entry_without_store_object() {
        let json = r#"{"id": 290375, "url": "https://store.example/gta"}"#;
        let entry: StoreEntry = serde_json::from_str(json).unwrap();
        assert!(entry.store.is_none());
        assert_eq!(entry.url, "https://store.example/gta");
    }

    #[test]
    fn api_page_defaults_to_empty_results() {
        let page: ApiPage<GameSummary> = serde_json::from_str(r#"{"count": 0}"#).unwrap();
        assert!(page.results.is_empty());
        assert!(page.next.is_none());
    }

    #[test]
    fn api_page_parses_results() {
        let json = r#"{
            "count": 2,
            "next": "https://api.example/games?page=2",
            "results": [{"id": 1, "name": "A"}, {"id": 2, "name": "B"}]
        }"#;
        let page: ApiPage<GameSummary> = serde_json::from_str(json).unwrap();
        assert_eq!(page.results.len(), 2);
        assert_eq!(page.results[1].name, "B");
    }
}

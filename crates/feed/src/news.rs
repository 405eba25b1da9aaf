//! The synthesized news feed.
//!
//! There is no news endpoint upstream. Each page of the feed relabels the
//! recently-updated game list into article shape; the published timestamp is
//! the wall-clock time of the request, not the game's own update time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use playdex_catalog::{CatalogClient, CatalogError, GameSummary, Page};

/// Articles per news page.
pub const NEWS_PAGE_SIZE: u32 = 10;

/// Total articles the feed will synthesize before ending pagination.
pub const NEWS_TOTAL_CAP: u32 = 50;

/// Characters of the game description kept as the article body.
const BODY_LEN: usize = 200;

const TITLE_SUFFIX: &str = " - Latest Updates";
const FALLBACK_BODY: &str = "No description available";

/// A news article relabeled from a game record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsArticle {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    pub website: Option<String>,
    pub published: DateTime<Utc>,
}

/// Fetches one page of the news feed. Pages start at 1.
///
/// The feed stops at [`NEWS_TOTAL_CAP`] articles overall: a page past the
/// cap is empty and issues no request, and a page straddling it is cut
/// short.
pub async fn news_page(
    client: &CatalogClient,
    page: u32,
) -> Result<Page<NewsArticle>, CatalogError> {
    let budget = page_budget(page);
    if budget == 0 {
        debug!(page, "news cap reached");
        return Ok(Page::empty());
    }

    let games = client.recently_updated(page).await?;
    debug!(page, count = games.len(), "synthesizing news page");

    let now = Utc::now();
    let results = games
        .into_iter()
        .take(budget)
        .map(|g| to_article(g, now))
        .collect();
    Ok(Page {
        results,
        next: news_next_page(page),
    })
}

/// Articles a page may still emit under the total cap.
fn page_budget(page: u32) -> usize {
    let first = page.saturating_sub(1).saturating_mul(NEWS_PAGE_SIZE);
    NEWS_TOTAL_CAP.saturating_sub(first).min(NEWS_PAGE_SIZE) as usize
}

/// Continuation rule for the news feed: tokens are offered for every page
/// whose first item falls under the total cap, so pages 1–5 (at 10 per page
/// and a 50-item cap) carry a token and page 6 is the first without one.
pub fn news_next_page(page: u32) -> Option<u32> {
    if page.saturating_sub(1) * NEWS_PAGE_SIZE < NEWS_TOTAL_CAP {
        Some(page + 1)
    } else {
        None
    }
}

/// Relabels a game record into article shape.
fn to_article(game: GameSummary, published: DateTime<Utc>) -> NewsArticle {
    let description = match game.description_raw.as_deref() {
        Some(text) if !text.trim().is_empty() => {
            let body: String = text.chars().take(BODY_LEN).collect();
            format!("{body}...")
        }
        _ => FALLBACK_BODY.to_string(),
    };

    NewsArticle {
        id: game.id,
        title: format!("{}{TITLE_SUFFIX}", game.name),
        description,
        image: game.background_image,
        website: game.website,
        published,
    }
}

//! Catalog API client.
//!
//! Async HTTP client using `reqwest`; authentication is a fixed API key sent
//! as a query-string parameter on every request. List queries retry a small
//! fixed number of times with linear backoff and are cached read-through;
//! detail, sub-resource, and search queries fail straight through to the
//! caller, who decides whether to retry.

use std::time::Duration;

use chrono::{NaiveDate, Utc};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::cache::QueryCache;
use crate::dates::DateWindow;
use crate::error::CatalogError;
use crate::page::{Page, next_page};
use crate::types::{Addition, ApiPage, GameId, GameSummary, Screenshot, StoreEntry};

const DEFAULT_BASE_URL: &str = "https://api.rawg.io/api";

/// Upper bound on any single request, transport included.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Page size for filtered and open-ended game lists.
pub const LIST_PAGE_SIZE: u32 = 20;

/// Page size for feed-shaped lists (news source, events window).
pub const FEED_PAGE_SIZE: u32 = 10;

/// Cap on the similar-games derivation.
const SIMILAR_LIMIT: u32 = 4;

/// Retry budget for list queries; delays grow linearly (1s, 2s, 3s).
const LIST_RETRIES: u32 = 3;
const RETRY_BASE_DELAY: Duration = Duration::from_secs(1);

/// Catalog API client.
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    list_cache: QueryCache<Vec<GameSummary>>,
}

impl CatalogClient {
    /// Creates a new client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Result<Self, CatalogError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|source| CatalogError::Fetch {
                operation: "client setup",
                source,
            })?;

        Ok(Self {
            http,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            list_cache: QueryCache::new(),
        })
    }

    /// Points the client at a different base URL (self-hosted mirrors,
    /// tests).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    // -- list queries -------------------------------------------------------

    /// Free-text search. The query string is passed to the upstream
    /// unmodified; matching semantics are the upstream's.
    pub async fn search(&self, query: &str) -> Result<Vec<GameSummary>, CatalogError> {
        let params = search_params(query);
        self.get_games("search", &params, false).await
    }

    /// Open-ended paged game list. The sequence ends when a page comes back
    /// short or empty.
    pub async fn games(&self, page: u32) -> Result<Page<GameSummary>, CatalogError> {
        let params = vec![
            ("page", page.to_string()),
            ("page_size", LIST_PAGE_SIZE.to_string()),
        ];
        let results = self.get_games("games", &params, true).await?;
        let next = next_page(page, results.len(), LIST_PAGE_SIZE as usize);
        Ok(Page { results, next })
    }

    /// Highest-rated games with a strong critic score.
    pub async fn top_rated(&self) -> Result<Vec<GameSummary>, CatalogError> {
        let params = vec![
            ("ordering", "-rating".to_string()),
            ("metacritic", "80,100".to_string()),
        ];
        self.get_games("top rated games", &params, true).await
    }

    /// Games releasing within the next year, most-added first.
    pub async fn upcoming(&self) -> Result<Vec<GameSummary>, CatalogError> {
        let window = DateWindow::next_year(self.today());
        let params = windowed_params(window, "-added", LIST_PAGE_SIZE);
        self.get_games("upcoming games", &params, true).await
    }

    /// Games added over the trailing month, most-added first.
    pub async fn trending(&self) -> Result<Vec<GameSummary>, CatalogError> {
        let window = DateWindow::trailing_month(self.today());
        let params = windowed_params(window, "-added", LIST_PAGE_SIZE);
        self.get_games("trending games", &params, true).await
    }

    /// Most-anticipated games over the next year. Same window as
    /// [`upcoming`](Self::upcoming), kept as a distinct logical operation.
    pub async fn anticipated(&self) -> Result<Vec<GameSummary>, CatalogError> {
        let window = DateWindow::next_year(self.today());
        let params = windowed_params(window, "-added", LIST_PAGE_SIZE);
        self.get_games("anticipated games", &params, true).await
    }

    /// Releases over the next quarter in release order; source data for the
    /// synthesized events feed.
    pub async fn events_window(&self) -> Result<Vec<GameSummary>, CatalogError> {
        let window = DateWindow::next_quarter(self.today());
        let params = windowed_params(window, "released", FEED_PAGE_SIZE);
        self.get_games("gaming events", &params, true).await
    }

    /// Recently-updated games, paged; source data for the synthesized news
    /// feed.
    pub async fn recently_updated(&self, page: u32) -> Result<Vec<GameSummary>, CatalogError> {
        let params = vec![
            ("ordering", "-updated".to_string()),
            ("page_size", FEED_PAGE_SIZE.to_string()),
            ("page", page.to_string()),
        ];
        self.get_games("game news", &params, true).await
    }

    /// Games in a genre.
    pub async fn by_genre(&self, genre_id: u64) -> Result<Vec<GameSummary>, CatalogError> {
        let params = filter_params("genres", genre_id.to_string());
        self.get_games("games by genre", &params, true).await
    }

    /// Games on a platform.
    pub async fn by_platform(&self, platform_id: u64) -> Result<Vec<GameSummary>, CatalogError> {
        let params = filter_params("platforms", platform_id.to_string());
        self.get_games("games by platform", &params, true).await
    }

    /// Games by a developer studio.
    pub async fn by_developer(&self, developer_id: u64) -> Result<Vec<GameSummary>, CatalogError> {
        let params = filter_params("developers", developer_id.to_string());
        self.get_games("games by developer", &params, true).await
    }

    /// Games by a publisher.
    pub async fn by_publisher(&self, publisher_id: u64) -> Result<Vec<GameSummary>, CatalogError> {
        let params = filter_params("publishers", publisher_id.to_string());
        self.get_games("games by publisher", &params, true).await
    }

    /// Games carrying a tag slug.
    pub async fn by_tag(&self, tag: &str) -> Result<Vec<GameSummary>, CatalogError> {
        let params = filter_params("tags", tag.to_string());
        self.get_games("games by tag", &params, true).await
    }

    /// Games sharing any of `genre_ids`, base games only, capped at
    /// [`SIMILAR_LIMIT`] and filtered of `exclude`.
    pub async fn similar_by_genres(
        &self,
        genre_ids: &[u64],
        exclude: GameId,
    ) -> Result<Vec<GameSummary>, CatalogError> {
        let params = vec![
            ("genres", join_ids(genre_ids)),
            ("exclude_additions", "true".to_string()),
            ("page_size", SIMILAR_LIMIT.to_string()),
        ];
        let results = self.get_games("similar games", &params, false).await?;
        Ok(results.into_iter().filter(|g| g.id != exclude).collect())
    }

    // -- detail and sub-resources -------------------------------------------

    /// Primary detail record for a game. Failure here is user-visible; no
    /// automatic retry.
    pub async fn game(&self, id: GameId) -> Result<GameSummary, CatalogError> {
        self.get_json("game details", &format!("/games/{id}"), &[])
            .await
    }

    /// Screenshots for a game.
    pub async fn screenshots(&self, id: GameId) -> Result<Vec<Screenshot>, CatalogError> {
        let page: ApiPage<Screenshot> = self
            .get_json("screenshots", &format!("/games/{id}/screenshots"), &[])
            .await?;
        Ok(page.results)
    }

    /// Add-ons (DLC, editions) for a game.
    pub async fn additions(&self, id: GameId) -> Result<Vec<Addition>, CatalogError> {
        let page: ApiPage<Addition> = self
            .get_json("additions", &format!("/games/{id}/additions"), &[])
            .await?;
        Ok(page.results)
    }

    /// Other entries in the game's series.
    pub async fn game_series(&self, id: GameId) -> Result<Vec<GameSummary>, CatalogError> {
        let page: ApiPage<GameSummary> = self
            .get_json("game series", &format!("/games/{id}/game-series"), &[])
            .await?;
        Ok(page.results)
    }

    /// Storefront listings for a game.
    pub async fn stores(&self, id: GameId) -> Result<Vec<StoreEntry>, CatalogError> {
        let page: ApiPage<StoreEntry> = self
            .get_json("stores", &format!("/games/{id}/stores"), &[])
            .await?;
        Ok(page.results)
    }

    // -- internals ----------------------------------------------------------

    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }

    /// Fetches `/games` with the given parameters: read-through cache, then
    /// the retry loop (linear backoff) when `retry` is set.
    async fn get_games(
        &self,
        operation: &'static str,
        params: &[(&str, String)],
        retry: bool,
    ) -> Result<Vec<GameSummary>, CatalogError> {
        let key = cache_key("/games", params);
        if let Some(hit) = self.list_cache.get(&key) {
            debug!(operation, "served from query cache");
            return Ok(hit);
        }

        let mut attempt = 0u32;
        let page = loop {
            match self
                .get_json::<ApiPage<GameSummary>>(operation, "/games", params)
                .await
            {
                Ok(page) => break page,
                Err(err) if retry && attempt < LIST_RETRIES && err.is_retryable() => {
                    attempt += 1;
                    let delay = RETRY_BASE_DELAY * attempt;
                    warn!(operation, attempt, error = %err, "list fetch failed, retrying");
                    tokio::time::sleep(delay).await;
                }
                Err(err) => return Err(err),
            }
        };

        self.list_cache.insert(key, page.results.clone());
        Ok(page.results)
    }

    /// Performs an authenticated GET and decodes the JSON body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, CatalogError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(operation, path, "catalog request");

        let resp = self
            .http
            .get(&url)
            .query(&[("key", self.api_key.as_str())])
            .query(params)
            .send()
            .await
            .map_err(|source| CatalogError::Fetch { operation, source })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(CatalogError::Api {
                operation,
                status: status.as_u16(),
                body,
            });
        }

        let body = resp
            .bytes()
            .await
            .map_err(|source| CatalogError::Fetch { operation, source })?;
        serde_json::from_slice(&body).map_err(|source| CatalogError::Decode { operation, source })
    }
}

/// Builds the search parameter list. The raw query goes through unmodified.
fn search_params(query: &str) -> Vec<(&'static str, String)> {
    vec![("search", query.to_string())]
}

/// Builds a single-filter parameter list with the standard list page size.
fn filter_params(filter: &'static str, value: String) -> Vec<(&'static str, String)> {
    vec![
        (filter, value),
        ("page_size", LIST_PAGE_SIZE.to_string()),
    ]
}

/// Builds a date-windowed parameter list.
fn windowed_params(
    window: DateWindow,
    ordering: &str,
    page_size: u32,
) -> Vec<(&'static str, String)> {
    vec![
        ("dates", window.to_param()),
        ("ordering", ordering.to_string()),
        ("page_size", page_size.to_string()),
    ]
}

/// Canonical cache key for a logical query: path plus parameters in build
/// order.
fn cache_key(path: &str, params: &[(&str, String)]) -> String {
    let mut key = String::from(path);
    for (i, (name, value)) in params.iter().enumerate() {
        key.push(if i == 0 { '?' } else { '&' });
        key.push_str(name);
        key.push('=');
        key.push_str(value);
    }
    key
}

/// Joins numeric ids into the upstream's comma-separated filter form.
fn join_ids(ids: &[u64]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    use super::*;

    /// Starts a mock HTTP server that answers each request with the next
    /// scripted `(status, body)` pair (the last one repeats). Returns the
    /// base URL and a counter of requests served.
    async fn mock_server(responses: Vec<(u16, &str)>) -> (String, Arc<AtomicUsize>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let url = format!("http://127.0.0.1:{port}");
        let responses: Vec<(u16, String)> = responses
            .into_iter()
            .map(|(status, body)| (status, body.to_string()))
            .collect();

        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();

        tokio::spawn(async move {
            loop {
                let Ok((mut stream, _)) = listener.accept().await else {
                    break;
                };
                let served = counter.fetch_add(1, Ordering::SeqCst);
                let (status, body) = &responses[served.min(responses.len() - 1)];

                let mut buf = vec![0u8; 8192];
                let _ = stream.read(&mut buf).await;

                let resp = format!(
                    "HTTP/1.1 {status} OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    body.len(),
                    body
                );
                let _ = stream.write_all(resp.as_bytes()).await;
                let _ = stream.shutdown().await;
            }
        });

        (url, hits)
    }

    const ONE_GAME_PAGE: &str = r#"{"count":1,"results":[{"id":1,"name":"Zelda"}]}"#;

    #[tokio::test]
    async fn repeated_search_is_served_from_cache() {
        let (url, hits) = mock_server(vec![(200, ONE_GAME_PAGE)]).await;
        let client = CatalogClient::new("test-key").unwrap().with_base_url(url);

        let first = client.search("zelda").await.unwrap();
        let second = client.search("zelda").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(
            hits.load(Ordering::SeqCst),
            1,
            "second identical query must not reach the network"
        );
    }

    #[tokio::test]
    async fn list_fetch_retries_after_server_error() {
        let (url, hits) = mock_server(vec![(500, "{}"), (200, ONE_GAME_PAGE)]).await;
        let client = CatalogClient::new("test-key").unwrap().with_base_url(url);

        let games = client.top_rated().await.unwrap();

        assert_eq!(games.len(), 1);
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn search_does_not_auto_retry() {
        let (url, hits) = mock_server(vec![(500, "{}")]).await;
        let client = CatalogClient::new("test-key").unwrap().with_base_url(url);

        let err = client.search("zelda").await.unwrap_err();

        assert!(matches!(err, CatalogError::Api { status: 500, .. }));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn missing_game_maps_to_api_error() {
        let (url, _hits) = mock_server(vec![(404, r#"{"detail":"Not found."}"#)]).await;
        let client = CatalogClient::new("test-key").unwrap().with_base_url(url);

        let err = client.game(3498).await.unwrap_err();

        match err {
            CatalogError::Api {
                operation, status, ..
            } => {
                assert_eq!(operation, "game details");
                assert_eq!(status, 404);
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_body_maps_to_decode_error() {
        let (url, _hits) = mock_server(vec![(200, "not json")]).await;
        let client = CatalogClient::new("test-key").unwrap().with_base_url(url);

        let err = client.game(1).await.unwrap_err();
        assert!(matches!(err, CatalogError::Decode { .. }));
    }

    #[test]
    fn search_query_passes_through_raw() {
        let params = search_params("zelda: breath & wild");
        assert_eq!(
            params,
            vec![("search", "zelda: breath & wild".to_string())]
        );
    }

    #[test]
    fn filter_params_carry_page_size() {
        let params = filter_params("genres", "4".into());
        assert!(params.contains(&("page_size", "20".to_string())));
        assert!(params.contains(&("genres", "4".to_string())));
    }

    #[test]
    fn windowed_params_serialize_the_window() {
        let today = chrono::NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let params = windowed_params(DateWindow::next_quarter(today), "released", 10);
        assert!(params.contains(&("dates", "2024-03-15,2024-06-15".to_string())));
        assert!(params.contains(&("ordering", "released".to_string())));
    }

    #[test]
    fn join_ids_comma_separates() {
        assert_eq!(join_ids(&[4, 51, 3]), "4,51,3");
        assert_eq!(join_ids(&[7]), "7");
        assert_eq!(join_ids(&[]), "");
    }

    #[test]
    fn cache_key_is_deterministic() {
        let params = vec![("page", "2".to_string()), ("page_size", "20".to_string())];
        assert_eq!(cache_key("/games", &params), "/games?page=2&page_size=20");
        assert_eq!(cache_key("/games", &[]), "/games");
    }

    #[test]
    fn cache_key_distinguishes_queries() {
        let a = cache_key("/games", &[("search", "zelda".to_string())]);
        let b = cache_key("/games", &[("search", "mario".to_string())]);
        assert_ne!(a, b);
    }
}

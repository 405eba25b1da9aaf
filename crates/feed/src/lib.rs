//! Synthesized news and events feeds.
//!
//! Neither feed is a real upstream data source: both relabel catalog game
//! records into article/event shape at request time. News pages through the
//! recently-updated list with a fixed total cap; events cover the upcoming
//! quarter's releases.

pub mod events;
pub mod news;

pub use events::{EventKind, GamingEvent, upcoming_events};
pub use news::{NEWS_PAGE_SIZE, NEWS_TOTAL_CAP, NewsArticle, news_next_page, news_page};

//! Paged results and the continuation rule for open-ended lists.

use serde::{Deserialize, Serialize};

/// One page of results plus the continuation token for the next page.
///
/// `next` of `None` means end of sequence. Page numbers start at 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub results: Vec<T>,
    pub next: Option<u32>,
}

impl<T> Page<T> {
    /// A well-formed response with zero items and no continuation.
    /// Distinct from a failed request.
    pub fn empty() -> Self {
        Self {
            results: Vec::new(),
            next: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Continuation rule for open-ended lists: offer page `current + 1` only
/// when the current page came back full. A short or empty page ends the
/// sequence.
pub fn next_page(current: u32, returned: usize, page_size: usize) -> Option<u32> {
    if returned >= page_size && page_size > 0 {
        Some(current + 1)
    } else {
        None
    }
}

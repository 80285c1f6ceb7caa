//! Pending and visited URL sets for a single crawl.
//!
//! The frontier is a FIFO queue paired with a membership set, so pages are
//! visited in discovery order and a URL is queued at most once while it is
//! pending. The visited set only grows during a run and is dropped with the
//! crawler; nothing is persisted.

use std::collections::{HashSet, VecDeque};

use url::Url;

/// Worklist of discovered URLs plus the set of URLs already claimed.
#[derive(Debug, Default)]
pub struct Frontier {
    queue: VecDeque<Url>,
    pending: HashSet<Url>,
    visited: HashSet<Url>,
}

impl Frontier {
    /// Creates a frontier holding only the seed.
    pub fn new(seed: Url) -> Self {
        let mut frontier = Self::default();
        frontier.push(seed);
        frontier
    }

    /// Queues a URL unless it was already visited or is already pending.
    ///
    /// Returns `true` when the URL was added.
    pub fn push(&mut self, url: Url) -> bool {
        if self.visited.contains(&url) || self.pending.contains(&url) {
            return false;
        }
        self.pending.insert(url.clone());
        self.queue.push_back(url);
        true
    }

    /// Takes the oldest pending URL.
    pub fn pop(&mut self) -> Option<Url> {
        let url = self.queue.pop_front()?;
        self.pending.remove(&url);
        Some(url)
    }

    /// Claims a URL for fetching. Returns `false` if it was already visited.
    pub fn mark_visited(&mut self, url: &Url) -> bool {
        self.visited.insert(url.clone())
    }

    pub fn is_visited(&self, url: &Url) -> bool {
        self.visited.contains(url)
    }

    pub fn visited(&self) -> &HashSet<Url> {
        &self.visited
    }

    pub fn pending_len(&self) -> usize {
        self.queue.len()
    }

    pub fn into_visited(self) -> HashSet<Url> {
        self.visited
    }
}

//! In-process graph store for tests.
//!
//! `MemoryGraph` follows the same rules as the Neo4j queries it stands in
//! for: books are keyed on (title, author), `SIMILAR_TO` edges are matched
//! in either direction, and titles are compared exactly. It can also
//! simulate an unreachable server or a connection that drops after a given
//! number of writes, and it counts open sessions so tests can check that
//! every operation releases its connection.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use catalog::Book;

use crate::connection::{GraphConnector, GraphSession};
use crate::error::{Result, StoreError};

type NodeKey = (String, String);

#[derive(Debug, Default)]
struct MemoryState {
    nodes: BTreeSet<NodeKey>,
    edges: Vec<(NodeKey, NodeKey)>,
    unreachable: bool,
    /// Writes allowed before the connection "drops"; `None` means unlimited
    writes_before_drop: Option<usize>,
    open_sessions: usize,
}

/// Shared in-memory graph. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct MemoryGraph {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryGraph {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MemoryState> {
        lock(&self.state)
    }

    /// Add an undirected `SIMILAR_TO` edge, creating either node if needed.
    pub fn add_similar(&self, a: &Book, b: &Book) {
        let mut state = self.state();
        let a = key_of(a);
        let b = key_of(b);
        state.nodes.insert(a.clone());
        state.nodes.insert(b.clone());
        state.edges.push((a, b));
    }

    /// Refuse every new session until `restore` is called.
    pub fn set_unreachable(&self) {
        self.state().unreachable = true;
    }

    /// Allow `writes` more successful merges, then fail every merge after
    /// that until `restore` is called.
    pub fn drop_after_writes(&self, writes: usize) {
        self.state().writes_before_drop = Some(writes);
    }

    /// Clear any injected failure.
    pub fn restore(&self) {
        let mut state = self.state();
        state.unreachable = false;
        state.writes_before_drop = None;
    }

    pub fn node_count(&self) -> usize {
        self.state().nodes.len()
    }

    pub fn contains(&self, book: &Book) -> bool {
        self.state().nodes.contains(&key_of(book))
    }

    /// Sessions opened and not yet dropped
    pub fn open_sessions(&self) -> usize {
        self.state().open_sessions
    }
}

#[async_trait]
impl GraphConnector for MemoryGraph {
    type Session = MemorySession;

    async fn open(&self) -> Result<MemorySession> {
        let mut state = self.state();
        if state.unreachable {
            return Err(StoreError::unavailable("connection refused"));
        }
        state.open_sessions += 1;
        Ok(MemorySession {
            state: Arc::clone(&self.state),
        })
    }
}

/// Session handed out by `MemoryGraph`
#[derive(Debug)]
pub struct MemorySession {
    state: Arc<Mutex<MemoryState>>,
}

#[async_trait]
impl GraphSession for MemorySession {
    async fn merge_book(&mut self, book: &Book) -> Result<()> {
        let mut state = lock(&self.state);
        let remaining = state.writes_before_drop;
        match remaining {
            Some(0) => return Err(StoreError::unavailable("connection reset by peer")),
            Some(n) => state.writes_before_drop = Some(n - 1),
            None => {}
        }
        state.nodes.insert(key_of(book));
        Ok(())
    }

    async fn similar_titles(&mut self, title: &str) -> Result<Vec<String>> {
        let state = lock(&self.state);
        let titles = state
            .edges
            .iter()
            .filter_map(|(a, b)| {
                if a.0 == title {
                    Some(b.0.clone())
                } else if b.0 == title {
                    Some(a.0.clone())
                } else {
                    None
                }
            })
            .collect();
        Ok(titles)
    }
}

impl Drop for MemorySession {
    fn drop(&mut self) {
        let mut state = lock(&self.state);
        state.open_sessions = state.open_sessions.saturating_sub(1);
    }
}

fn key_of(book: &Book) -> NodeKey {
    (book.title.clone(), book.author.clone())
}

// A panicking test shouldn't poison the graph for the assertions after it
fn lock(state: &Mutex<MemoryState>) -> MutexGuard<'_, MemoryState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_merge_is_keyed_on_title_and_author() {
        let graph = MemoryGraph::new();
        let mut session = graph.open().await.unwrap();

        session.merge_book(&Book::new("Emma", "Jane Austen")).await.unwrap();
        session.merge_book(&Book::new("Emma", "Jane Austen")).await.unwrap();
        session.merge_book(&Book::new("Emma", "Someone Else")).await.unwrap();

        assert_eq!(graph.node_count(), 2);
    }

    #[tokio::test]
    async fn test_edges_match_either_direction() {
        let graph = MemoryGraph::new();
        let dune = Book::new("Dune", "Frank Herbert");
        graph.add_similar(&dune, &Book::new("Hyperion", "Dan Simmons"));
        graph.add_similar(&Book::new("Foundation", "Isaac Asimov"), &dune);

        let mut session = graph.open().await.unwrap();
        let mut titles = session.similar_titles("Dune").await.unwrap();
        titles.sort();
        assert_eq!(titles, vec!["Foundation", "Hyperion"]);

        assert!(session.similar_titles("dune").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_session_count_tracks_drops() {
        let graph = MemoryGraph::new();
        let first = graph.open().await.unwrap();
        let second = graph.open().await.unwrap();
        assert_eq!(graph.open_sessions(), 2);

        drop(first);
        assert_eq!(graph.open_sessions(), 1);
        drop(second);
        assert_eq!(graph.open_sessions(), 0);
    }

    #[tokio::test]
    async fn test_injected_failures() {
        let graph = MemoryGraph::new();
        graph.set_unreachable();
        assert!(graph.open().await.is_err());

        graph.restore();
        graph.drop_after_writes(1);
        let mut session = graph.open().await.unwrap();
        assert!(session.merge_book(&Book::new("A", "a")).await.is_ok());
        assert!(session.merge_book(&Book::new("B", "b")).await.is_err());
        assert_eq!(graph.node_count(), 1);
    }
}

//! The pull-based graph source consumed by [`ForceLayout::set_feed`](crate::ForceLayout::set_feed).

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A synchronous graph source.
///
/// `nodes` yields every key once; its order fixes the node indices. `edges` yields the keys a
/// node points to. Direction is irrelevant to the layout: `A -> B` and `B -> A` describe the same
/// undirected edge.
pub trait GraphFeed {
    fn nodes(&self) -> impl Iterator<Item = &str>;

    fn edges(&self, node: &str) -> impl Iterator<Item = &str>;
}

/// Insertion-ordered adjacency lists held in memory.
///
/// Serialises as a JSON object mapping each node key to the keys it points to:
/// `{"A": ["B"], "B": ["C"], "C": []}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemoryFeed {
    adjacency: IndexMap<String, Vec<String>, FxBuildHasher>,
}

impl MemoryFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a feed from `(from, to)` pairs, listing nodes in first-seen order.
    pub fn from_edges<'a>(edges: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut feed = Self::new();
        for (from, to) in edges {
            feed.add_edge(from, to);
        }
        feed
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn add_node(&mut self, key: impl Into<String>) -> &mut Self {
        self.adjacency.entry(key.into()).or_default();
        self
    }

    /// Records `from -> to`, adding either endpoint if it is not present yet.
    pub fn add_edge(&mut self, from: impl Into<String>, to: impl Into<String>) -> &mut Self {
        let to = to.into();
        self.adjacency.entry(from.into()).or_default().push(to.clone());
        self.add_node(to)
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }
}

impl GraphFeed for MemoryFeed {
    fn nodes(&self) -> impl Iterator<Item = &str> {
        self.adjacency.keys().map(String::as_str)
    }

    fn edges(&self, node: &str) -> impl Iterator<Item = &str> {
        self.adjacency
            .get(node)
            .into_iter()
            .flatten()
            .map(String::as_str)
    }
}

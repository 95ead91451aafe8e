use jostle_symtrix::SymMatrix;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::feed::GraphFeed;
use crate::index::NodeIndex;
use crate::options::LayoutOptions;
use crate::rng::{RandomSource, XorShift64Star};

/// A position in the unit square.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Maps the normalized position onto a `width` x `height` surface, rounding to the nearest
    /// pixel.
    pub fn to_pixel(self, width: u32, height: u32) -> (i64, i64) {
        (
            (self.x * f64::from(width)).round() as i64,
            (self.y * f64::from(height)).round() as i64,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutState {
    /// No nodes.
    Empty,
    /// Fresh random placement, not relaxed yet.
    Populated,
    Relaxed { steps: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedOutcome {
    /// Index, adjacency and positions were rebuilt from the feed.
    Rebuilt { nodes: usize, edges: usize },
    /// The feed describes the graph already laid out; positions were kept.
    Unchanged,
    /// The feed had no nodes and the previous layout was dropped.
    Cleared,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Convergence {
    pub steps: usize,
    pub converged: bool,
    /// Largest per-axis displacement of the last step run.
    pub last_delta: f64,
}

/// Key-addressed copy of a layout, detached from the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LayoutResult {
    pub positions: BTreeMap<String, Point>,
    pub edges: Vec<(String, String)>,
}

/// Spring/repulsion layout over the nodes of a [`GraphFeed`].
///
/// Each [`step`](Self::step) visits every unordered node pair once. Pairs repel with a force
/// proportional to `1 / r²`, rescaled to `[0, 1]` across the whole graph and averaged over the
/// node count. Adjacent pairs additionally attract with the raw `r²`. Coordinates are clamped to
/// the unit square after every step.
#[derive(Debug, Clone)]
pub struct ForceLayout<R = XorShift64Star> {
    options: LayoutOptions,
    rng: R,
    index: NodeIndex,
    adjacency: SymMatrix,
    positions: Vec<Point>,
    state: LayoutState,
}

impl ForceLayout<XorShift64Star> {
    pub fn new(options: LayoutOptions) -> Self {
        let rng = XorShift64Star::new(options.random_seed);
        Self::with_rng(options, rng)
    }
}

impl Default for ForceLayout<XorShift64Star> {
    fn default() -> Self {
        Self::new(LayoutOptions::default())
    }
}

impl<R: RandomSource> ForceLayout<R> {
    pub fn with_rng(options: LayoutOptions, rng: R) -> Self {
        Self {
            options,
            rng,
            index: NodeIndex::new(),
            adjacency: SymMatrix::new(0),
            positions: Vec::new(),
            state: LayoutState::Empty,
        }
    }

    /// Drains `feed` and rebuilds the layout from it.
    ///
    /// On error the current layout is left as it was.
    pub fn set_feed<F: GraphFeed>(&mut self, feed: &F) -> Result<FeedOutcome> {
        let (index, adjacency) = ingest(feed)?;

        if index == self.index && adjacency == self.adjacency {
            tracing::debug!(nodes = index.len(), "feed unchanged, keeping layout");
            return Ok(FeedOutcome::Unchanged);
        }
        if index.is_empty() {
            self.clear();
            return Ok(FeedOutcome::Cleared);
        }

        let nodes = index.len();
        let jitter = self.options.initial_jitter;
        let rng = &mut self.rng;
        self.positions = (0..nodes)
            .map(|_| Point::new(jittered(rng, jitter), jittered(rng, jitter)))
            .collect();
        self.index = index;
        self.adjacency = adjacency;
        self.state = LayoutState::Populated;

        let edges = self.edge_count();
        tracing::debug!(nodes, edges, "rebuilt force layout");

        if self.options.relax_on_feed {
            self.step();
        }
        Ok(FeedOutcome::Rebuilt { nodes, edges })
    }

    /// Drops every node, edge and position.
    pub fn clear(&mut self) {
        tracing::debug!(nodes = self.index.len(), "clearing force layout");
        self.index = NodeIndex::new();
        self.adjacency = SymMatrix::new(0);
        self.positions.clear();
        self.state = LayoutState::Empty;
    }

    /// Runs one relaxation iteration and returns the largest per-axis displacement applied.
    pub fn step(&mut self) -> f64 {
        let n = self.positions.len();
        if n == 0 {
            return 0.0;
        }
        self.state = match self.state {
            LayoutState::Relaxed { steps } => LayoutState::Relaxed { steps: steps + 1 },
            _ => LayoutState::Relaxed { steps: 1 },
        };
        if n == 1 {
            return 0.0;
        }

        let pos = &self.positions;
        let dx = SymMatrix::from_fn(n, |i, j| pos[i].x - pos[j].x);
        let dy = SymMatrix::from_fn(n, |i, j| pos[i].y - pos[j].y);
        let dist_sq = &(&dx * &dx) + &(&dy * &dy);

        let floor = self.options.min_distance_sq.max(f64::MIN_POSITIVE);
        let mut repulse = dist_sq.map(|r2| 1.0 / r2.max(floor));
        repulse.normalize();
        let attract = &dist_sq * &self.adjacency;

        let (kx, ky) = (&dx * &repulse, &dy * &repulse);
        let (hx, hy) = (&dx * &attract, &dy * &attract);

        let mut max_delta = 0.0_f64;
        for i in 0..n {
            let (mut push_x, mut push_y, mut pull_x, mut pull_y) = (0.0, 0.0, 0.0, 0.0);
            for j in 0..n {
                if i > j {
                    push_x += kx[(i, j)];
                    push_y += ky[(i, j)];
                    pull_x -= hx[(i, j)];
                    pull_y -= hy[(i, j)];
                } else if i < j {
                    push_x -= kx[(i, j)];
                    push_y -= ky[(i, j)];
                    pull_x += hx[(i, j)];
                    pull_y += hy[(i, j)];
                }
            }
            // Averaged over every node, itself included.
            push_x /= n as f64;
            push_y /= n as f64;

            let p = &mut self.positions[i];
            let before = *p;
            p.x = (p.x + (push_x + pull_x)).clamp(0.0, 1.0);
            p.y = (p.y + (push_y + pull_y)).clamp(0.0, 1.0);
            max_delta = max_delta
                .max((p.x - before.x).abs())
                .max((p.y - before.y).abs());
        }

        tracing::trace!(nodes = n, delta = max_delta, "relaxation step");
        max_delta
    }

    /// Runs `steps` iterations and returns the displacement of the last one.
    pub fn relax(&mut self, steps: usize) -> f64 {
        let mut delta = 0.0;
        for _ in 0..steps {
            delta = self.step();
        }
        delta
    }

    /// Steps until the largest displacement drops below `tolerance`, at most `max_steps` times.
    pub fn relax_until(&mut self, tolerance: f64, max_steps: usize) -> Convergence {
        let mut out = Convergence {
            steps: 0,
            converged: false,
            last_delta: 0.0,
        };
        while out.steps < max_steps {
            out.last_delta = self.step();
            out.steps += 1;
            if out.last_delta < tolerance {
                out.converged = true;
                break;
            }
        }
        tracing::debug!(
            steps = out.steps,
            converged = out.converged,
            delta = out.last_delta,
            "relaxation finished"
        );
        out
    }

    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    pub fn state(&self) -> LayoutState {
        self.state
    }

    pub fn node_count(&self) -> usize {
        self.positions.len()
    }

    pub fn positions(&self) -> &[Point] {
        &self.positions
    }

    pub fn position(&self, index: usize) -> Option<Point> {
        self.positions.get(index).copied()
    }

    pub fn position_of(&self, key: &str) -> Option<Point> {
        self.index.get(key).and_then(|i| self.position(i))
    }

    pub fn node_key(&self, index: usize) -> Option<&str> {
        self.index.key(index)
    }

    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.index.get(key)
    }

    /// Adjacency as a 0/1 matrix over node indices.
    pub fn adjacency(&self) -> &SymMatrix {
        &self.adjacency
    }

    /// Whether `i` and `j` share an edge. Identical or unknown indices are never adjacent.
    pub fn is_adjacent(&self, i: usize, j: usize) -> bool {
        self.adjacency.try_get(i, j).is_ok_and(|v| v != 0.0)
    }

    /// Connected index pairs `(lo, hi)`, `lo < hi`, each reported once.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.adjacency
            .pairs()
            .filter(|&(_, _, v)| v != 0.0)
            .map(|(i, j, _)| (j, i))
    }

    pub fn edge_count(&self) -> usize {
        self.edges().count()
    }

    pub fn snapshot(&self) -> LayoutResult {
        let positions = self
            .index
            .keys()
            .zip(&self.positions)
            .map(|(key, &p)| (key.to_string(), p))
            .collect();
        let edges = self
            .edges()
            .filter_map(|(lo, hi)| {
                Some((self.node_key(lo)?.to_string(), self.node_key(hi)?.to_string()))
            })
            .collect();
        LayoutResult { positions, edges }
    }
}

fn ingest<F: GraphFeed>(feed: &F) -> Result<(NodeIndex, SymMatrix)> {
    let mut index = NodeIndex::new();
    for key in feed.nodes() {
        if index.insert(key).is_none() {
            return Err(Error::DuplicateNode {
                key: key.to_string(),
            });
        }
    }

    let mut adjacency = SymMatrix::new(index.len());
    for (i, from) in index.keys().enumerate() {
        for to in feed.edges(from) {
            let Some(j) = index.get(to) else {
                return Err(Error::UnknownNode {
                    from: from.to_string(),
                    to: to.to_string(),
                });
            };
            if i == j {
                tracing::debug!(node = from, "ignoring self-edge");
                continue;
            }
            adjacency.set(i, j, 1.0);
        }
    }
    Ok((index, adjacency))
}

/// `0.5 ± U(0, jitter)`: magnitude first, then the sign.
fn jittered<R: RandomSource>(rng: &mut R, jitter: f64) -> f64 {
    let magnitude = rng.next_f64_unit() * jitter;
    let v = if rng.next_f64_unit() < 0.5 {
        0.5 - magnitude
    } else {
        0.5 + magnitude
    };
    v.clamp(0.0, 1.0)
}

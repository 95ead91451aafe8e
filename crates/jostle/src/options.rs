use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    /// Seed for the default [`XorShift64Star`](crate::XorShift64Star) source. Ignored when a
    /// source is injected with [`ForceLayout::with_rng`](crate::ForceLayout::with_rng).
    pub random_seed: u64,
    /// Largest per-axis offset from the centre `(0.5, 0.5)` used for initial placement.
    pub initial_jitter: f64,
    /// Lower bound for the squared distance in the repulsion term, so coincident nodes yield a
    /// finite force.
    pub min_distance_sq: f64,
    /// Run one relaxation step right after a feed rebuilds the layout.
    pub relax_on_feed: bool,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            random_seed: 0,
            initial_jitter: 0.125,
            min_distance_sq: 1e-9,
            relax_on_feed: false,
        }
    }
}

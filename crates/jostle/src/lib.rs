#![forbid(unsafe_code)]

//! Headless force-directed graph layout.
//!
//! `jostle` reads a graph through a [`GraphFeed`], places every node near the centre of the unit
//! square and relaxes the placement one [`ForceLayout::step`] at a time. It only produces
//! normalized coordinates and adjacency; drawing them is up to the caller.

pub mod engine;
pub mod error;
pub mod feed;
pub mod index;
pub mod options;
pub mod rng;

pub use engine::{Convergence, FeedOutcome, ForceLayout, LayoutResult, LayoutState, Point};
pub use error::{Error, Result};
pub use feed::{GraphFeed, MemoryFeed};
pub use index::NodeIndex;
pub use jostle_symtrix as symtrix;
pub use options::LayoutOptions;
pub use rng::{RandomSource, XorShift64Star};

/// One-shot entry point: ingest `feed`, run `steps` relaxation steps and return the result.
pub fn layout<F: GraphFeed>(
    feed: &F,
    options: &LayoutOptions,
    steps: usize,
) -> Result<LayoutResult> {
    let mut engine = ForceLayout::new(options.clone());
    engine.set_feed(feed)?;
    engine.relax(steps);
    Ok(engine.snapshot())
}

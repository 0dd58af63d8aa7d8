//! `epi-spatial` — proximity queries over region centroids.
//!
//! # Crate layout
//!
//! | Module    | Contents                                   |
//! |-----------|--------------------------------------------|
//! | [`index`] | `SpatialIndex` (R-tree), `Neighbor`        |
//!
//! The index is built once per run (centroids never move) and answers
//! "regions within R metres of P, nearest first, at most K".  It never
//! fails: an empty index simply returns no neighbors.

pub mod index;

#[cfg(test)]
mod tests;

pub use index::{Neighbor, SpatialIndex};

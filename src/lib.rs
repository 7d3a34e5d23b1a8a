//! wayfinder: a weighted directed graph answering single-source to
//! single-destination shortest-path queries with Dijkstra's algorithm, built
//! on a from-scratch separately chained hash map.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: keep each layer small enough to reason about on its own, with the
//!   hash map as the only storage primitive the graph relies on for lookup.
//! - Layers:
//!   - HashtableMap<K, V, S>: generic key/value map over an array of
//!     collision chains; doubles its bucket count when the load factor
//!     reaches 0.8.
//!   - Graph<N>: node records live in a generational arena; a HashtableMap
//!     indexes them by identity, and each node keeps HashtableMaps of its
//!     outgoing edges (target -> weight) and incoming sources.
//!   - ShortestPaths<'g, N>: borrows a Graph and runs Dijkstra on demand.
//!     Nothing persists between queries.
//!   - Routes<'g, N>: per-leg weights along a route and the cheapest common
//!     destination for several starts, built on ShortestPaths.
//!
//! Constraints
//! - Single-threaded and synchronous; no I/O.
//! - Edge weights are finite and non-negative. Anything else is rejected at
//!   insertion, so the search can rely on first settlement being final.
//! - At most one edge per ordered (source, target) pair. Inserting an
//!   existing edge overwrites its weight.
//! - Failures are `Result`s (`MapError`, `GraphError`); no operation leaves
//!   partial state behind when it fails.
//!
//! Hasher and rehashing invariants
//! - Each map entry stores its precomputed `u64` hash. A bucket index is
//!   `hash % capacity`; growing the table re-buckets every entry from the
//!   stored hash, so `K: Hash` is never invoked during a rehash.
//! - `len / capacity < 0.8` holds immediately after every insertion.
//! - `clear()` keeps the bucket count.
//!
//! Search invariants
//! - The frontier orders candidates by cost, then by push order, so equal-cost
//!   ties resolve the same way on every run.
//! - A node is settled once and never re-expanded; cycles terminate and
//!   self-loops never beat the zero-cost path from a node to itself.
//! - The search tree is an arena of settled nodes whose predecessors are
//!   arena indices. Path reconstruction walks indices, never references.
//!
//! Notes and non-goals
//! - No persistence, no concurrent mutation during queries (the engine's
//!   shared borrow of the graph makes that a compile error), no negative
//!   weights, no all-pairs tables.
//! - Parsing graph descriptions and rendering results belong to callers;
//!   this crate only exposes the programmatic contract they need.
//! - The library emits `tracing` events but installs no subscriber.

pub mod config;
pub mod dijkstra;
pub mod error;
pub mod graph;
pub mod hashtable_map;
mod hashtable_map_proptest;
pub mod routes;

// Public surface
pub use config::{GraphConfig, MapConfig};
pub use dijkstra::{Path, SearchTree, ShortestPaths};
pub use error::{GraphError, GraphResult, MapError};
pub use graph::Graph;
pub use hashtable_map::HashtableMap;
pub use routes::Routes;

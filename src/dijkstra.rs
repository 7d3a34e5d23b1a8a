//! Dijkstra shortest-path search over a borrowed [`Graph`].
//!
//! Every query runs a fresh search; nothing is cached between calls. Search
//! state is index based: settled nodes are appended to an arena `Vec` and
//! each records its predecessor as an arena index, so the tree can be walked
//! back from any settled node without pointer chasing.
//!
//! Invariants
//! - A node is settled at most once, by the first frontier entry popped for
//!   it. With non-negative weights that entry carries the minimal cost, so a
//!   settled cost never changes.
//! - Candidates are only pushed toward nodes that are not yet settled. This
//!   is what makes cycles terminate and turns self-loops into dead weight.
//! - Predecessor indices always point to earlier arena slots; walking them
//!   always reaches the start node.

use crate::error::{GraphError, GraphResult};
use crate::graph::{Graph, NodeKey};
use crate::hashtable_map::HashtableMap;
use core::borrow::Borrow;
use core::cmp::Ordering;
use core::hash::Hash;
use std::collections::BinaryHeap;
use tracing::{debug, trace};

/// A settled entry of the search tree.
#[derive(Debug, Clone, Copy)]
struct SearchNode {
    node: NodeKey,
    cost: f64,
    predecessor: Option<usize>,
}

/// A frontier entry: a path to `node` not yet known to be optimal.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    cost: f64,
    /// Push order; breaks cost ties so results are reproducible.
    seq: u64,
    node: NodeKey,
    predecessor: Option<usize>,
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed on both keys: BinaryHeap is a max-heap and we want the
        // cheapest, then the earliest pushed.
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

/// A shortest path and its total cost.
#[derive(Debug, Clone, PartialEq)]
pub struct Path<N> {
    /// Node identities from start to end, both included.
    pub nodes: Vec<N>,
    /// Sum of the edge weights along `nodes`.
    pub cost: f64,
}

/// Result of a search from one start node: the shortest-path tree over
/// everything the search settled.
pub struct SearchTree<'g, N> {
    graph: &'g Graph<N>,
    arena: Vec<SearchNode>,
    settled: HashtableMap<NodeKey, usize>,
}

impl<'g, N> SearchTree<'g, N>
where
    N: Eq + Hash + Clone,
{
    fn settled_index<Q>(&self, node: &Q) -> GraphResult<usize>
    where
        N: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let key = self.graph.key_of(node).ok_or(GraphError::NodeNotFound)?;
        self.settled
            .get(&key)
            .copied()
            .map_err(|_| GraphError::NoPathFound)
    }

    // Walk predecessors back to the start, then flip to start -> end order.
    fn reconstruct(&self, index: usize) -> Vec<N> {
        let mut path = Vec::new();
        let mut cursor = Some(index);
        while let Some(i) = cursor {
            let step = &self.arena[i];
            if let Some(data) = self.graph.data(step.node) {
                path.push(data.clone());
            }
            cursor = step.predecessor;
        }
        path.reverse();
        path
    }

    /// Whether `node` was reached from the start.
    pub fn reached<Q>(&self, node: &Q) -> bool
    where
        N: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.settled_index(node).is_ok()
    }

    /// Shortest-path cost from the start to `node`.
    pub fn cost_to<Q>(&self, node: &Q) -> GraphResult<f64>
    where
        N: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        Ok(self.arena[self.settled_index(node)?].cost)
    }

    /// Shortest-path node sequence from the start to `node`.
    pub fn path_to<Q>(&self, node: &Q) -> GraphResult<Vec<N>>
    where
        N: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        Ok(self.reconstruct(self.settled_index(node)?))
    }

    /// Every reached node with its cost, in settlement (non-decreasing cost)
    /// order. The start node comes first.
    pub fn reachable(&self) -> Vec<(N, f64)> {
        self.arena
            .iter()
            .filter_map(|s| self.graph.data(s.node).map(|d| (d.clone(), s.cost)))
            .collect()
    }

    pub(crate) fn cost_of(&self, key: NodeKey) -> Option<f64> {
        self.settled.get(&key).ok().map(|&i| self.arena[i].cost)
    }

    pub fn settled_count(&self) -> usize {
        self.arena.len()
    }
}

/// Shortest-path queries against a graph. Holds only a shared borrow, so the
/// graph cannot change while a query runs.
#[derive(Debug)]
pub struct ShortestPaths<'g, N> {
    graph: &'g Graph<N>,
}

impl<'g, N> ShortestPaths<'g, N>
where
    N: Eq + Hash + Clone,
{
    pub fn new(graph: &'g Graph<N>) -> Self {
        Self { graph }
    }

    pub fn graph(&self) -> &'g Graph<N> {
        self.graph
    }

    fn endpoints<Q>(&self, start: &Q, end: &Q) -> GraphResult<(NodeKey, NodeKey)>
    where
        N: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let s = self.graph.key_of(start).ok_or(GraphError::NodeNotFound)?;
        let e = self.graph.key_of(end).ok_or(GraphError::NodeNotFound)?;
        Ok((s, e))
    }

    /// Nodes along the cheapest `start -> end` path, both ends included.
    /// `start == end` yields `[start]`.
    pub fn shortest_path_data<Q>(&self, start: &Q, end: &Q) -> GraphResult<Vec<N>>
    where
        N: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.shortest_path(start, end).map(|p| p.nodes)
    }

    /// Total weight of the cheapest `start -> end` path.
    pub fn shortest_path_cost<Q>(&self, start: &Q, end: &Q) -> GraphResult<f64>
    where
        N: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.shortest_path(start, end).map(|p| p.cost)
    }

    /// Nodes and cost of the cheapest path, from a single search.
    pub fn shortest_path<Q>(&self, start: &Q, end: &Q) -> GraphResult<Path<N>>
    where
        N: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let (s, e) = self.endpoints(start, end)?;
        let tree = self.run(s, Some(e));
        let index = tree
            .settled
            .get(&e)
            .copied()
            .map_err(|_| GraphError::NoPathFound)?;
        Ok(Path {
            nodes: tree.reconstruct(index),
            cost: tree.arena[index].cost,
        })
    }

    /// Search from `start` until the frontier is exhausted, settling every
    /// reachable node.
    pub fn search_from<Q>(&self, start: &Q) -> GraphResult<SearchTree<'g, N>>
    where
        N: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let s = self.graph.key_of(start).ok_or(GraphError::NodeNotFound)?;
        Ok(self.run(s, None))
    }

    /// Core loop. Stops early once `target` is settled, since its cost can no
    /// longer improve.
    fn run(&self, start: NodeKey, target: Option<NodeKey>) -> SearchTree<'g, N> {
        let mut tree = SearchTree {
            graph: self.graph,
            arena: Vec::new(),
            settled: HashtableMap::new(),
        };
        let mut frontier = BinaryHeap::new();
        let mut seq = 0u64;
        frontier.push(Candidate {
            cost: 0.0,
            seq,
            node: start,
            predecessor: None,
        });

        while let Some(current) = frontier.pop() {
            if tree.settled.contains_key(&current.node) {
                continue;
            }
            let index = tree.arena.len();
            tree.arena.push(SearchNode {
                node: current.node,
                cost: current.cost,
                predecessor: current.predecessor,
            });
            let fresh = tree.settled.put(current.node, index).is_ok();
            debug_assert!(fresh, "settled check above");
            trace!(cost = current.cost, settled = index + 1, "settled node");

            if target == Some(current.node) {
                break;
            }

            for (next, weight) in self.graph.out_edges(current.node) {
                if tree.settled.contains_key(&next) {
                    continue;
                }
                seq += 1;
                frontier.push(Candidate {
                    cost: current.cost + weight,
                    seq,
                    node: next,
                    predecessor: Some(index),
                });
            }
        }

        debug!(
            settled = tree.arena.len(),
            reached_target = target.map(|t| tree.settled.contains_key(&t)),
            "dijkstra search finished"
        );
        tree
    }
}

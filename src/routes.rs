//! Route queries derived from shortest paths: the per-leg view of a route
//! and the meeting point that is cheapest to reach from several places.

use crate::dijkstra::{SearchTree, ShortestPaths};
use crate::error::{GraphError, GraphResult};
use crate::graph::Graph;
use core::borrow::Borrow;
use core::hash::Hash;
use tracing::debug;

/// Route queries over a borrowed graph.
#[derive(Debug)]
pub struct Routes<'g, N> {
    paths: ShortestPaths<'g, N>,
}

impl<'g, N> Routes<'g, N>
where
    N: Eq + Hash + Clone,
{
    pub fn new(graph: &'g Graph<N>) -> Self {
        Self {
            paths: ShortestPaths::new(graph),
        }
    }

    /// Locations along the shortest route, start and end included.
    pub fn locations_on_path<Q>(&self, start: &Q, end: &Q) -> GraphResult<Vec<N>>
    where
        N: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.paths.shortest_path_data(start, end)
    }

    /// Weight of each leg of the shortest route, in travel order. Empty when
    /// `start == end`.
    pub fn times_on_path<Q>(&self, start: &Q, end: &Q) -> GraphResult<Vec<f64>>
    where
        N: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let graph = self.paths.graph();
        self.paths
            .shortest_path_data(start, end)?
            .windows(2)
            .map(|leg| graph.get_edge::<N>(&leg[0], &leg[1]))
            .collect()
    }

    /// The node reachable from every start whose summed shortest-path cost
    /// from all starts is smallest. Start nodes are candidates too. On equal
    /// sums the node listed first by [`Graph::get_all_nodes`] wins.
    pub fn closest_destination_from_all<'q, Q, I>(&self, starts: I) -> GraphResult<N>
    where
        N: Borrow<Q>,
        Q: ?Sized + Hash + Eq + 'q,
        I: IntoIterator<Item = &'q Q>,
    {
        // One exhaustive search per start covers every candidate at once.
        let trees = starts
            .into_iter()
            .map(|s| self.paths.search_from(s))
            .collect::<GraphResult<Vec<SearchTree<'g, N>>>>()?;
        if trees.is_empty() {
            return Err(GraphError::InvalidArgument(
                "at least one start location is required",
            ));
        }

        let mut best: Option<(N, f64)> = None;
        for (candidate, key) in self.paths.graph().node_keys() {
            let total = trees
                .iter()
                .map(|t| t.cost_of(key))
                .sum::<Option<f64>>();
            let Some(total) = total else { continue };
            if best.as_ref().map_or(true, |(_, b)| total < *b) {
                best = Some((candidate.clone(), total));
            }
        }

        debug!(
            starts = trees.len(),
            found = best.is_some(),
            "closest common destination"
        );
        best.map(|(node, _)| node).ok_or(GraphError::NoPathFound)
    }
}

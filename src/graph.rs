//! Graph: directed, weighted graph store indexed through `HashtableMap`.

use crate::config::GraphConfig;
use crate::error::{GraphError, GraphResult};
use crate::hashtable_map::HashtableMap;
use core::borrow::Borrow;
use core::fmt;
use core::hash::Hash;
use slotmap::{new_key_type, SlotMap};
use tracing::debug;

new_key_type! {
    /// Generational arena key of a node record.
    pub(crate) struct NodeKey;
}

#[derive(Debug)]
struct Node<N> {
    data: N,
    /// target -> weight; the edges this node owns.
    outgoing: HashtableMap<NodeKey, f64>,
    /// Sources of edges pointing here, kept so removal can unlink them.
    incoming: HashtableMap<NodeKey, ()>,
}

impl<N> Node<N> {
    fn new(data: N, config: &GraphConfig) -> Self {
        Self {
            data,
            outgoing: HashtableMap::from_config(config.edge_map()),
            incoming: HashtableMap::from_config(config.edge_map()),
        }
    }
}

/// Directed graph with at most one weighted edge per ordered node pair.
///
/// Node identities (`N`) index into a generational arena through a
/// [`HashtableMap`]; edges refer to their target by arena key, so removing a
/// node can never leave an edge resolving to a different node.
pub struct Graph<N> {
    index: HashtableMap<N, NodeKey>,
    nodes: SlotMap<NodeKey, Node<N>>,
    edge_count: usize,
    config: GraphConfig,
}

/// Weights must be finite and non-negative for Dijkstra to be correct.
fn check_weight(weight: f64) -> GraphResult<()> {
    if weight.is_finite() && weight >= 0.0 {
        Ok(())
    } else {
        Err(GraphError::InvalidWeight(weight))
    }
}

impl<N> Graph<N>
where
    N: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self::with_config(GraphConfig::default())
    }

    pub fn with_config(config: GraphConfig) -> Self {
        Self {
            index: HashtableMap::from_config(config.node_map()),
            nodes: SlotMap::with_key(),
            edge_count: 0,
            config,
        }
    }

    pub(crate) fn key_of<Q>(&self, data: &Q) -> Option<NodeKey>
    where
        N: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.index.get(data).ok().copied()
    }

    pub(crate) fn data(&self, key: NodeKey) -> Option<&N> {
        self.nodes.get(key).map(|n| &n.data)
    }

    /// Identities with their arena keys, in `get_all_nodes` order.
    pub(crate) fn node_keys(&self) -> impl Iterator<Item = (&N, NodeKey)> + '_ {
        self.index.iter().map(|(n, &k)| (n, k))
    }

    /// Outgoing `(target, weight)` pairs of the node at `key`.
    pub(crate) fn out_edges(&self, key: NodeKey) -> impl Iterator<Item = (NodeKey, f64)> + '_ {
        self.nodes
            .get(key)
            .into_iter()
            .flat_map(|n| n.outgoing.iter().map(|(&k, &w)| (k, w)))
    }

    /// Add a node. Returns `false` (and changes nothing) if it already exists.
    pub fn insert_node(&mut self, data: N) -> bool {
        if self.index.contains_key(&data) {
            return false;
        }
        let key = self.nodes.insert(Node::new(data.clone(), &self.config));
        let fresh = self.index.put(data, key).is_ok();
        debug_assert!(fresh, "presence was checked above");
        true
    }

    /// Remove a node together with every edge leaving or entering it.
    pub fn remove_node<Q>(&mut self, data: &Q) -> GraphResult<()>
    where
        N: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let key = self
            .index
            .remove(data)
            .map_err(|_| GraphError::NodeNotFound)?;
        let Some(node) = self.nodes.remove(key) else {
            return Err(GraphError::NodeNotFound);
        };

        for (&target, _) in node.outgoing.iter() {
            if let Some(t) = self.nodes.get_mut(target) {
                let _ = t.incoming.remove(&key);
            }
        }
        for (&source, _) in node.incoming.iter() {
            if let Some(s) = self.nodes.get_mut(source) {
                let _ = s.outgoing.remove(&key);
            }
        }

        // A self-loop sits in both maps but is a single edge.
        let self_loop = usize::from(node.outgoing.contains_key(&key));
        let detached = node.outgoing.len() + node.incoming.len() - self_loop;
        self.edge_count -= detached;
        debug!(
            outgoing = node.outgoing.len(),
            incoming = node.incoming.len(),
            detached,
            "removed node"
        );
        Ok(())
    }

    pub fn contains_node<Q>(&self, data: &Q) -> bool
    where
        N: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.index.contains_key(data)
    }

    /// Create the `source -> target` edge, or overwrite its weight if it
    /// already exists. Returns the previous weight.
    ///
    /// Both endpoints and the weight are validated before anything changes.
    pub fn insert_edge<Q>(&mut self, source: &Q, target: &Q, weight: f64) -> GraphResult<Option<f64>>
    where
        N: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let s = self.key_of(source).ok_or(GraphError::NodeNotFound)?;
        let t = self.key_of(target).ok_or(GraphError::NodeNotFound)?;
        check_weight(weight)?;

        let previous = self
            .nodes
            .get_mut(s)
            .ok_or(GraphError::NodeNotFound)?
            .outgoing
            .upsert(t, weight);
        if previous.is_none() {
            if let Some(tn) = self.nodes.get_mut(t) {
                tn.incoming.upsert(s, ());
            }
            self.edge_count += 1;
        }
        Ok(previous)
    }

    /// Remove the `source -> target` edge and return its weight.
    pub fn remove_edge<Q>(&mut self, source: &Q, target: &Q) -> GraphResult<f64>
    where
        N: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let (s, t) = self.endpoints(source, target)?;
        let weight = self
            .nodes
            .get_mut(s)
            .and_then(|n| n.outgoing.remove(&t).ok())
            .ok_or(GraphError::EdgeNotFound)?;
        if let Some(tn) = self.nodes.get_mut(t) {
            let _ = tn.incoming.remove(&s);
        }
        self.edge_count -= 1;
        Ok(weight)
    }

    /// Weight of the `source -> target` edge.
    pub fn get_edge<Q>(&self, source: &Q, target: &Q) -> GraphResult<f64>
    where
        N: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let (s, t) = self.endpoints(source, target)?;
        self.nodes
            .get(s)
            .and_then(|n| n.outgoing.get(&t).ok())
            .copied()
            .ok_or(GraphError::EdgeNotFound)
    }

    pub fn contains_edge<Q>(&self, source: &Q, target: &Q) -> bool
    where
        N: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.get_edge(source, target).is_ok()
    }

    // Missing endpoints mean the edge cannot exist.
    fn endpoints<Q>(&self, source: &Q, target: &Q) -> GraphResult<(NodeKey, NodeKey)>
    where
        N: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        match (self.key_of(source), self.key_of(target)) {
            (Some(s), Some(t)) => Ok((s, t)),
            _ => Err(GraphError::EdgeNotFound),
        }
    }

    /// Snapshot of outgoing `(target, weight)` pairs.
    pub fn successors<Q>(&self, data: &Q) -> GraphResult<Vec<(N, f64)>>
    where
        N: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let key = self.key_of(data).ok_or(GraphError::NodeNotFound)?;
        Ok(self
            .out_edges(key)
            .filter_map(|(t, w)| self.data(t).map(|d| (d.clone(), w)))
            .collect())
    }

    /// Snapshot of every node identity. The order is unspecified but stable
    /// while the graph is not mutated.
    pub fn get_all_nodes(&self) -> Vec<N> {
        self.index.keys()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Remove all nodes and edges.
    pub fn clear(&mut self) {
        debug!(
            nodes = self.nodes.len(),
            edges = self.edge_count,
            "clearing graph"
        );
        self.index.clear();
        self.nodes.clear();
        self.edge_count = 0;
    }
}

impl<N> Default for Graph<N>
where
    N: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<N> fmt::Debug for Graph<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Graph")
            .field("nodes", &self.nodes.len())
            .field("edges", &self.edge_count)
            .finish()
    }
}

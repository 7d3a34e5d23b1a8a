//! Sizing knobs for the map and the graph store.

/// Bucket count used when no capacity is requested.
pub const DEFAULT_CAPACITY: usize = 64;

/// A map doubles its bucket count once `len / capacity` reaches this value.
pub const MAX_LOAD_FACTOR: f64 = 0.8;

/// Initial bucket count of each node's adjacency maps. Most nodes have few
/// edges, so these start small and grow on demand.
pub const DEFAULT_EDGE_CAPACITY: usize = 4;

/// Construction parameters for [`HashtableMap`](crate::HashtableMap).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapConfig {
    /// Starting bucket count. Zero is raised to one.
    pub initial_capacity: usize,
}

impl MapConfig {
    pub fn initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// The bucket count a map built from this config starts with.
    pub(crate) fn bucket_count(&self) -> usize {
        self.initial_capacity.max(1)
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_CAPACITY,
        }
    }
}

/// Construction parameters for [`Graph`](crate::Graph).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphConfig {
    /// Starting bucket count of the node index.
    pub node_capacity: usize,
    /// Starting bucket count of every per-node adjacency map.
    pub edge_capacity: usize,
}

impl GraphConfig {
    pub fn node_capacity(mut self, capacity: usize) -> Self {
        self.node_capacity = capacity;
        self
    }

    pub fn edge_capacity(mut self, capacity: usize) -> Self {
        self.edge_capacity = capacity;
        self
    }

    pub(crate) fn node_map(&self) -> MapConfig {
        MapConfig::default().initial_capacity(self.node_capacity)
    }

    pub(crate) fn edge_map(&self) -> MapConfig {
        MapConfig::default().initial_capacity(self.edge_capacity)
    }
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            node_capacity: DEFAULT_CAPACITY,
            edge_capacity: DEFAULT_EDGE_CAPACITY,
        }
    }
}

//! Point-in-time view of the cluster under test.

use std::collections::{BTreeMap, HashSet};

use crate::node::{has_quorum, is_registered, NodeHealth, NodeInfo, NodeList};
use crate::shard::{shard_counts, shard_variance, ShardAssignment, ShardList};

/// Nodes, shard placement and coordinator health captured together.
///
/// A snapshot is never mutated after capture; take a new one to observe
/// change. Assignments may reference node ids that are absent from the
/// node set; those are reported by [`ClusterSnapshot::orphaned_assignments`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClusterSnapshot {
    nodes: Vec<NodeInfo>,
    shards: Vec<ShardAssignment>,
    num_shards: Option<u32>,
    coordinator_healthy: bool,
}

impl ClusterSnapshot {
    /// Assemble a snapshot from its three reads.
    pub fn new(nodes: NodeList, shards: ShardList, coordinator_healthy: bool) -> Self {
        Self {
            nodes: nodes.nodes,
            shards: shards.shards,
            num_shards: shards.num_shards,
            coordinator_healthy,
        }
    }

    /// Reported nodes.
    pub fn nodes(&self) -> &[NodeInfo] {
        &self.nodes
    }

    /// Reported shard assignments.
    pub fn shards(&self) -> &[ShardAssignment] {
        &self.shards
    }

    /// Declared shard count, or the number of reported assignments.
    pub fn total_shards(&self) -> usize {
        self.num_shards
            .map(|n| n as usize)
            .unwrap_or(self.shards.len())
    }

    /// Whether `GET /health` on the coordinator succeeded.
    pub fn coordinator_healthy(&self) -> bool {
        self.coordinator_healthy
    }

    /// Node entry for `node_id`, by id or by address port.
    pub fn node(&self, node_id: &str, expected_port: Option<u16>) -> Option<&NodeInfo> {
        self.nodes
            .iter()
            .find(|n| n.id == node_id)
            .or_else(|| self.nodes.iter().find(|n| n.matches(node_id, expected_port)))
    }

    /// See [`is_registered`].
    pub fn is_registered(&self, node_id: &str, expected_port: Option<u16>) -> bool {
        is_registered(node_id, expected_port, &self.nodes)
    }

    /// See [`has_quorum`].
    pub fn has_quorum(&self) -> bool {
        has_quorum(&self.nodes)
    }

    /// Ids of nodes reporting the given health.
    pub fn nodes_with_health(&self, health: NodeHealth) -> Vec<&str> {
        self.nodes
            .iter()
            .filter(|n| n.health() == health)
            .map(|n| n.id.as_str())
            .collect()
    }

    /// Placed shards per node id.
    pub fn shard_counts(&self) -> BTreeMap<String, usize> {
        shard_counts(&self.shards)
    }

    /// See [`shard_variance`].
    pub fn shard_variance(&self) -> f64 {
        shard_variance(&self.shards)
    }

    /// Assignments owned by `node_id`.
    pub fn shards_on(&self, node_id: &str) -> Vec<&ShardAssignment> {
        self.shards.iter().filter(|s| s.node_id == node_id).collect()
    }

    /// Placed assignments whose owner is not in this snapshot's node set.
    pub fn orphaned_assignments(&self) -> Vec<&ShardAssignment> {
        let known: HashSet<&str> = self.nodes.iter().map(|n| n.id.as_str()).collect();
        self.shards
            .iter()
            .filter(|s| s.is_placed() && !known.contains(s.node_id.as_str()))
            .collect()
    }
}

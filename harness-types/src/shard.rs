//! Placement types reported by the coordinator's `GET /shards`.
//!
//! The coordinator serialises assignments with PascalCase field names
//! (`ShardID`, `NodeID`, `IsPrimary`). That is the canonical form here;
//! the snake_case spelling is accepted on input as an alias.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::TypesError;

/// One shard → node assignment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShardAssignment {
    /// Shard identifier, `0..num_shards`
    #[serde(rename = "ShardID", alias = "shard_id")]
    pub shard_id: u32,
    /// Owning node id; empty when the coordinator has not placed the shard
    #[serde(rename = "NodeID", alias = "node_id", default)]
    pub node_id: String,
    /// Primary or replica
    #[serde(rename = "IsPrimary", alias = "is_primary", default = "default_primary")]
    pub is_primary: bool,
}

fn default_primary() -> bool {
    true
}

impl ShardAssignment {
    /// Create a primary assignment.
    pub fn primary(shard_id: u32, node_id: impl Into<String>) -> Self {
        Self {
            shard_id,
            node_id: node_id.into(),
            is_primary: true,
        }
    }

    /// True if the shard has an owner.
    pub fn is_placed(&self) -> bool {
        !self.node_id.is_empty()
    }
}

/// Body of `GET /shards`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ShardList {
    /// Assignments, in coordinator order
    pub shards: Vec<ShardAssignment>,
    /// Declared total shard count, when the coordinator reports one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_shards: Option<u32>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ShardsBody {
    Bare(Vec<ShardAssignment>),
    Wrapped {
        #[serde(default)]
        shards: Vec<ShardAssignment>,
        #[serde(default)]
        num_shards: Option<u32>,
    },
}

impl ShardList {
    /// Decode either `{"shards": [...], "num_shards": n}` or a bare JSON array.
    pub fn from_json(body: &[u8]) -> Result<Self, TypesError> {
        let body: ShardsBody = serde_json::from_slice(body).map_err(TypesError::Malformed)?;
        Ok(match body {
            ShardsBody::Bare(shards) => Self {
                shards,
                num_shards: None,
            },
            ShardsBody::Wrapped { shards, num_shards } => Self { shards, num_shards },
        })
    }

    /// Assignments owned by `node_id`.
    pub fn on_node(&self, node_id: &str) -> Vec<&ShardAssignment> {
        self.shards.iter().filter(|s| s.node_id == node_id).collect()
    }

    /// Assignment for `shard_id`, if reported.
    pub fn find(&self, shard_id: u32) -> Option<&ShardAssignment> {
        self.shards.iter().find(|s| s.shard_id == shard_id)
    }

    /// Declared shard count, or the number of reported assignments.
    pub fn total(&self) -> usize {
        self.num_shards
            .map(|n| n as usize)
            .unwrap_or(self.shards.len())
    }

    /// Difference between the busiest and the idlest node (0 when empty).
    pub fn spread(&self) -> usize {
        let counts = shard_counts(&self.shards);
        match (counts.values().max(), counts.values().min()) {
            (Some(max), Some(min)) => max - min,
            _ => 0,
        }
    }
}

/// Number of placed shards per node id.
pub fn shard_counts(shards: &[ShardAssignment]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for shard in shards.iter().filter(|s| s.is_placed()) {
        *counts.entry(shard.node_id.clone()).or_insert(0) += 1;
    }
    counts
}

/// Population variance of per-node shard counts.
///
/// `mean((count_i - mean(count))^2)` over nodes that own at least one shard.
/// Returns `0.0` when no node owns a shard.
pub fn shard_variance(shards: &[ShardAssignment]) -> f64 {
    let counts = shard_counts(shards);
    if counts.is_empty() {
        return 0.0;
    }

    let n = counts.len() as f64;
    let mean = counts.values().sum::<usize>() as f64 / n;
    counts
        .values()
        .map(|&c| {
            let d = c as f64 - mean;
            d * d
        })
        .sum::<f64>()
        / n
}

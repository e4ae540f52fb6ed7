//! # cluster-harness-types
//!
//! Wire format and snapshot types for the cluster lifecycle harness.
//!
//! This crate holds everything the harness reads back from a running
//! coordinator, plus the pure aggregate checks derived from it:
//! - [`NodeInfo`], [`NodeList`] - Membership as reported by `GET /nodes`
//! - [`ShardAssignment`], [`ShardList`] - Placement as reported by `GET /shards`
//! - [`ClusterSnapshot`] - A point-in-time read of both, plus coordinator health
//! - [`shard_variance`], [`has_quorum`], [`is_registered`] - Derived properties
//! - [`TypesError`] - Error types

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod node;
mod shard;
mod snapshot;

pub use error::TypesError;
pub use node::{has_quorum, is_registered, NodeHealth, NodeInfo, NodeList};
pub use shard::{shard_counts, shard_variance, ShardAssignment, ShardList};
pub use snapshot::ClusterSnapshot;

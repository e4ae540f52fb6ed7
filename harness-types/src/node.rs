//! Membership types reported by the coordinator's `GET /nodes`.

use serde::{Deserialize, Serialize};

use crate::TypesError;

/// Health of a node as the coordinator reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeHealth {
    /// Last health check succeeded
    Healthy,
    /// Health checks are failing
    Unhealthy,
    /// Not checked yet, or the coordinator does not report health
    Unknown,
}

/// A node entry in the coordinator's membership list.
///
/// Only `id` is required. Coordinators report health either as a string
/// `status` or as a boolean `healthy`; both are honoured by [`NodeInfo::health`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeInfo {
    /// Logical node id (e.g. `n1`)
    pub id: String,
    /// Advertised address (e.g. `http://localhost:8081`)
    #[serde(default)]
    pub addr: String,
    /// Health status string (`healthy`, `unhealthy`, `unknown`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Boolean health flag used by some coordinator builds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub healthy: Option<bool>,
    /// Timestamp of the last health check, verbatim
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_health_check: Option<String>,
}

impl NodeInfo {
    /// Create a node entry with no health information.
    pub fn new(id: impl Into<String>, addr: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            addr: addr.into(),
            status: None,
            healthy: None,
            last_health_check: None,
        }
    }

    /// Set the reported status string.
    pub fn with_status(mut self, status: &str) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Reported health, preferring the status string over the boolean flag.
    pub fn health(&self) -> NodeHealth {
        match self.status.as_deref() {
            Some("healthy") => NodeHealth::Healthy,
            Some("unhealthy") => NodeHealth::Unhealthy,
            _ => match self.healthy {
                Some(true) => NodeHealth::Healthy,
                Some(false) => NodeHealth::Unhealthy,
                None => NodeHealth::Unknown,
            },
        }
    }

    /// Port at the end of the advertised address, if there is one.
    pub fn port(&self) -> Option<u16> {
        let addr = self.addr.trim_end_matches('/');
        let (_, tail) = addr.rsplit_once(':')?;
        tail.parse().ok()
    }

    /// Whether the advertised address ends with `:<port>`.
    pub fn listens_on(&self, port: u16) -> bool {
        self.port() == Some(port)
    }

    /// Whether this entry denotes `node_id`, by id or by address port.
    pub fn matches(&self, node_id: &str, expected_port: Option<u16>) -> bool {
        self.id == node_id || expected_port.is_some_and(|port| self.listens_on(port))
    }
}

/// Body of `GET /nodes`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NodeList {
    /// Reported nodes, in coordinator order
    pub nodes: Vec<NodeInfo>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NodesBody {
    Wrapped {
        #[serde(default)]
        nodes: Vec<NodeInfo>,
    },
    Bare(Vec<NodeInfo>),
}

impl NodeList {
    /// Decode either `{"nodes": [...]}` or a bare JSON array.
    pub fn from_json(body: &[u8]) -> Result<Self, TypesError> {
        let body: NodesBody = serde_json::from_slice(body).map_err(TypesError::Malformed)?;
        let nodes = match body {
            NodesBody::Wrapped { nodes } => nodes,
            NodesBody::Bare(nodes) => nodes,
        };
        Ok(Self { nodes })
    }

    /// Find the entry denoting `node_id`, by id first, then by address port.
    pub fn find(&self, node_id: &str, expected_port: Option<u16>) -> Option<&NodeInfo> {
        self.nodes
            .iter()
            .find(|n| n.id == node_id)
            .or_else(|| self.nodes.iter().find(|n| n.matches(node_id, expected_port)))
    }

    /// Number of reported nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if no node is registered.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Whether `node_id` appears in `nodes`.
///
/// A node counts as registered if an entry carries its id, or if an entry's
/// address ends with the node's expected port. Coordinators identify nodes by
/// logical id on some paths and by network address on others.
pub fn is_registered(node_id: &str, expected_port: Option<u16>, nodes: &[NodeInfo]) -> bool {
    nodes.iter().any(|n| n.matches(node_id, expected_port))
}

/// True iff strictly more than half of `nodes` report healthy.
pub fn has_quorum(nodes: &[NodeInfo]) -> bool {
    let healthy = nodes
        .iter()
        .filter(|n| n.health() == NodeHealth::Healthy)
        .count();
    healthy * 2 > nodes.len()
}

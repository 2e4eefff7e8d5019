//! Record types stored by the operator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Bookkeeping record for a Service the operator has reconciled.
///
/// Records are advisory: the cluster holds the authoritative state, and
/// reconciliation never reads them back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRecord {
    /// Service name, unique within the namespace.
    pub name: String,
    /// Namespace the Service lives in.
    pub namespace: String,
    /// Cluster IP assigned by the control plane, if any.
    pub cluster_ip: Option<String>,
    /// When the operator created the Service.
    pub created_at: DateTime<Utc>,
}

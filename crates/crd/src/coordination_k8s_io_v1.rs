//! coordination.k8s.io/v1 resources

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Spec object for the `Lease` kind
///
/// Timestamps are kept in their RFC 3339 wire form.
#[derive(CustomResource, Deserialize, Serialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
#[kube(
    kind = "Lease",
    group = "coordination.k8s.io",
    version = "v1",
    plural = "leases",
    namespaced
)]
pub struct LeaseSpec {
    /// Time at which the current lease was acquired.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acquire_time: Option<String>,
    /// Identity of the holder of a current lease.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub holder_identity: Option<String>,
    /// Duration that candidates for a lease need to wait to force acquire it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lease_duration_seconds: Option<i32>,
    /// Number of transitions of a lease between holders.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lease_transitions: Option<i32>,
    /// Signals to a lease holder that the lease has a more optimal holder and should be given up.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_holder: Option<String>,
    /// Time when the current holder of a lease has last updated the lease.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub renew_time: Option<String>,
    /// Strategy indicates the strategy for picking the leader for coordinated leader election.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parses_live_lease() {
        let json = serde_json::json!({
            "apiVersion": "coordination.k8s.io/v1",
            "kind": "Lease",
            "metadata": {
                "name": "kube-scheduler",
                "namespace": "kube-system",
                "resourceVersion": "1234"
            },
            "spec": {
                "acquireTime": "2025-01-02T03:04:05.000000Z",
                "holderIdentity": "node-1_5c1d",
                "leaseDurationSeconds": 15,
                "leaseTransitions": 3,
                "renewTime": "2025-01-02T03:14:05.123456Z"
            }
        });
        let lease: Lease = serde_json::from_value(json).unwrap();
        assert_eq!(lease.spec.lease_duration_seconds, Some(15));
        assert_eq!(lease.spec.holder_identity.as_deref(), Some("node-1_5c1d"));
        assert_eq!(lease.metadata.resource_version.as_deref(), Some("1234"));
    }

    #[test]
    fn empty_spec_round_trips_to_empty_object() {
        let lease = Lease::new("empty", LeaseSpec::default());
        let yaml = serde_yaml::to_string(&lease).unwrap();
        assert!(yaml.contains("spec: {}"));
        let parsed: Lease = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.spec, LeaseSpec::default());
    }
}

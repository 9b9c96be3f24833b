//! snapshot.storage.k8s.io/v1 resources

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Where a snapshot is taken from, or the pre-existing content it binds to
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct VolumeSnapshotSource {
    /// Name of the PersistentVolumeClaim object representing the volume from which a snapshot should be created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub persistent_volume_claim_name: Option<String>,
    /// Name of a pre-existing VolumeSnapshotContent object representing an existing volume snapshot.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume_snapshot_content_name: Option<String>,
}

/// Spec object for the `VolumeSnapshot` kind
#[derive(CustomResource, Deserialize, Serialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
#[kube(
    kind = "VolumeSnapshot",
    group = "snapshot.storage.k8s.io",
    version = "v1",
    plural = "volumesnapshots",
    namespaced
)]
pub struct VolumeSnapshotSpec {
    /// Source specifies where a snapshot will be created from.
    pub source: VolumeSnapshotSource,
    /// Name of the VolumeSnapshotClass requested by the VolumeSnapshot.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume_snapshot_class_name: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parses_upstream_manifest() {
        let manifest = r"
apiVersion: snapshot.storage.k8s.io/v1
kind: VolumeSnapshot
metadata:
  name: new-snapshot-test
  namespace: default
spec:
  volumeSnapshotClassName: csi-hostpath-snapclass
  source:
    persistentVolumeClaimName: pvc-test
";
        let snapshot: VolumeSnapshot = serde_yaml::from_str(manifest).unwrap();
        assert_eq!(
            snapshot.spec.source.persistent_volume_claim_name.as_deref(),
            Some("pvc-test")
        );
        assert_eq!(snapshot.spec.source.volume_snapshot_content_name, None);
    }
}

use k8s_provider_crd::{VolumeSnapshot, VolumeSnapshotSpec};
use k8s_provider_framework::Attribute;

use super::CrdKind;
use crate::validators;

impl CrdKind for VolumeSnapshot {
    type Spec = VolumeSnapshotSpec;

    const TYPE_NAME: &'static str = "snapshot_storage_k8s_io_volume_snapshot_v1";
    const NAMESPACED: bool = true;
    const DESCRIPTION: &'static str = "VolumeSnapshot is a user's request for either creating a point-in-time snapshot of a persistent volume, or binding to a pre-existing snapshot.";

    fn spec_attributes() -> Vec<Attribute> {
        let [length, pattern] = validators::object_name();
        vec![
            Attribute::object(
                "source",
                "source",
                vec![
                    Attribute::string("persistent_volume_claim_name", "persistentVolumeClaimName")
                        .description("PersistentVolumeClaimName specifies the name of the PersistentVolumeClaim object representing the volume from which a snapshot should be created. This PVC is assumed to be in the same namespace as the VolumeSnapshot object."),
                    Attribute::string("volume_snapshot_content_name", "volumeSnapshotContentName")
                        .description("VolumeSnapshotContentName specifies the name of a pre-existing VolumeSnapshotContent object representing an existing volume snapshot."),
                ],
            )
            .required()
            .description("Source specifies where a snapshot will be created from. Exactly one of its members must be set."),
            Attribute::string("volume_snapshot_class_name", "volumeSnapshotClassName")
                .description("VolumeSnapshotClassName is the name of the VolumeSnapshotClass requested by the VolumeSnapshot.")
                .validator(length)
                .validator(pattern),
        ]
    }
}

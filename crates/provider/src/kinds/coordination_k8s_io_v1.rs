use k8s_provider_crd::{Lease, LeaseSpec};
use k8s_provider_framework::Attribute;

use super::CrdKind;
use crate::validators;

impl CrdKind for Lease {
    type Spec = LeaseSpec;

    const TYPE_NAME: &'static str = "coordination_k8s_io_lease_v1";
    const NAMESPACED: bool = true;
    const DESCRIPTION: &'static str = "Lease defines a lease concept.";

    fn spec_attributes() -> Vec<Attribute> {
        vec![
            Attribute::string("acquire_time", "acquireTime")
                .description("AcquireTime is a time when the current lease was acquired.")
                .validator(validators::date_time()),
            Attribute::string("holder_identity", "holderIdentity")
                .description("HolderIdentity contains the identity of the holder of a current lease."),
            Attribute::int64("lease_duration_seconds", "leaseDurationSeconds")
                .description("LeaseDurationSeconds is a duration that candidates for a lease need to wait to force acquire it.")
                .validator(validators::int32_at_least(1)),
            Attribute::int64("lease_transitions", "leaseTransitions")
                .description("LeaseTransitions is the number of transitions of a lease between holders.")
                .validator(validators::int32_at_least(0)),
            Attribute::string("preferred_holder", "preferredHolder")
                .description("PreferredHolder signals to a lease holder that the lease has a more optimal holder and should be given up."),
            Attribute::string("renew_time", "renewTime")
                .description("RenewTime is a time when the current holder of a lease has last updated the lease.")
                .validator(validators::date_time()),
            Attribute::string("strategy", "strategy")
                .description("Strategy indicates the strategy for picking the leader for coordinated leader election."),
        ]
    }
}

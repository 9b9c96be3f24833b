//! Kinds exported as data sources
//!
//! Every kind declares its spec attributes once. The live variant projects
//! them to read-only, the manifest variant uses them as declared.

mod apiregistration_k8s_io_v1;
mod cert_manager_io_v1;
mod coordination_k8s_io_v1;
mod gateway_networking_k8s_io_v1;
mod snapshot_storage_k8s_io_v1;

use k8s_provider_framework::{Attribute, DataSource};
use kube::Resource;
use schemars::JsonSchema;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::datasource::{LiveDataSource, ManifestDataSource};
use crate::provider::ProviderData;

/// A Kubernetes kind that can be read from a cluster and rendered as a manifest
pub trait CrdKind:
    Resource<DynamicType = ()> + Serialize + DeserializeOwned + Clone + Send + Sync + 'static
{
    /// Model of the `spec` field
    type Spec: JsonSchema;

    /// Data source type name without the provider prefix
    const TYPE_NAME: &'static str;

    /// Whether objects live inside a namespace
    const NAMESPACED: bool;

    /// One sentence describing the kind
    const DESCRIPTION: &'static str;

    /// Attributes of `spec`, with wire names matching [`Self::Spec`]
    fn spec_attributes() -> Vec<Attribute>;

    /// Whether a manifest needs a `spec` block at all
    fn spec_required() -> bool {
        Self::spec_attributes().iter().any(Attribute::is_required)
    }
}

fn register<K: CrdKind>(data_sources: &mut Vec<Box<dyn DataSource<ProviderData>>>) {
    data_sources.push(Box::new(LiveDataSource::<K>::new()));
    data_sources.push(Box::new(ManifestDataSource::<K>::new()));
}

/// Live and manifest data sources of every supported kind
#[must_use]
pub fn data_sources() -> Vec<Box<dyn DataSource<ProviderData>>> {
    let mut data_sources = Vec::new();
    register::<k8s_provider_crd::APIService>(&mut data_sources);
    register::<k8s_provider_crd::Certificate>(&mut data_sources);
    register::<k8s_provider_crd::Lease>(&mut data_sources);
    register::<k8s_provider_crd::GatewayClass>(&mut data_sources);
    register::<k8s_provider_crd::VolumeSnapshot>(&mut data_sources);
    data_sources
}

// Copyright 2025 K8s Provider Maintainers
// SPDX-License-Identifier: Apache-2.0

//! Models of the Kubernetes kinds exported as data sources.
//!
//! Each module mirrors one API group version. Only `metadata` and `spec` are
//! modelled; status is owned by the cluster and never read by the provider.

pub mod apiregistration_k8s_io_v1;
pub mod cert_manager_io_v1;
pub mod coordination_k8s_io_v1;
pub mod gateway_networking_k8s_io_v1;
pub mod snapshot_storage_k8s_io_v1;

pub use apiregistration_k8s_io_v1::{APIService, APIServiceSpec};
pub use cert_manager_io_v1::{Certificate, CertificateSpec};
pub use coordination_k8s_io_v1::{Lease, LeaseSpec};
pub use gateway_networking_k8s_io_v1::{GatewayClass, GatewayClassSpec};
pub use snapshot_storage_k8s_io_v1::{VolumeSnapshot, VolumeSnapshotSpec};

// Copyright 2025 K8s Provider Maintainers
// SPDX-License-Identifier: Apache-2.0

//! Provider internals

/// Generic error for a single data source request
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// No client was configured for the provider
    #[error(
        "the provider is running in offline mode, reading objects from a cluster is not supported"
    )]
    Offline,

    /// An attribute needed to address the object is absent from the config
    #[error("missing value for {0}")]
    MissingAttribute(String),

    /// The single GET against the API server failed
    #[error("failed to get {resource} {name}: {source}")]
    Get {
        /// Plural resource name
        resource: String,
        /// Object identity, `namespace/name` or `name`
        name: String,
        /// Underlying client error
        #[source]
        source: kube::Error,
    },

    /// The provider block could not be decoded
    #[error("Provider Config Error: {0}")]
    ProviderConfig(#[source] serde_json::Error),

    /// JSON decoding into the model failed
    #[error("Serialization Error: {0}")]
    Decode(#[from] serde_json::Error),

    /// YAML encoding of the model failed
    #[error("YAML Error: {0}")]
    Encode(#[from] serde_yaml::Error),

    /// The model did not fit the declared attribute tree
    #[error("State Error: {0}")]
    State(#[from] StateError),

    /// The kubeconfig could not be loaded
    #[error("Kubeconfig Error: {0}")]
    Kubeconfig(#[from] KubeconfigError),

    /// Neither a kubeconfig nor an in-cluster environment was found
    #[error("Kubeconfig Error: {0}")]
    InferConfig(#[from] InferConfigError),

    /// Kubernetes client construction failed
    #[error("Kube Error: {0}")]
    Kube(#[from] kube::Error),
}

/// Generic result type to be used by the data sources
pub type Result<T, E = Error> = std::result::Result<T, E>;

pub mod datasource;
pub mod kinds;
pub mod provider;
pub mod telemetry;
pub mod utilities;
pub mod validators;

use k8s_provider_framework::StateError;
use kube::config::{InferConfigError, KubeconfigError};

pub use crate::provider::{KubernetesProvider, ProviderData};

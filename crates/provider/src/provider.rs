//! Provider configuration and data source registration

use std::path::PathBuf;

use k8s_provider_framework::{Attribute, DataSource, Diagnostics, Provider, Schema, async_trait};
use kube::Client;
use kube::config::{Config, KubeConfigOptions, Kubeconfig};
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, instrument};

use crate::{Error, Result, kinds, utilities};

/// Type name of the provider and prefix of every data source
pub const PROVIDER_TYPE_NAME: &str = "k8s";

/// Data shared with every data source after configuration
///
/// The client handle is cloned into each data source and never mutated.
#[derive(Clone, Default)]
pub struct ProviderData {
    client: Option<Client>,
}

impl ProviderData {
    /// No cluster access, live reads fail immediately
    #[must_use]
    pub fn offline() -> Self {
        Self { client: None }
    }

    /// Live reads go through `client`
    #[must_use]
    pub fn online(client: Client) -> Self {
        Self {
            client: Some(client),
        }
    }

    /// Configured client, `None` when offline
    #[must_use]
    pub fn client(&self) -> Option<&Client> {
        self.client.as_ref()
    }
}

/// Provider block configuration
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct ProviderConfig {
    /// Path to a kubeconfig file
    pub kubeconfig: Option<PathBuf>,
    /// Kubeconfig context to use
    pub context: Option<String>,
    /// Disables cluster access, only manifest data sources work
    pub offline: Option<bool>,
}

/// Provider exposing Kubernetes kinds as read-only data sources
#[derive(Clone, Default)]
pub struct KubernetesProvider {
    client: Option<Client>,
}

impl KubernetesProvider {
    /// Provider creating its client from the provider config
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Provider that hands out `client` instead of loading a kubeconfig
    #[must_use]
    pub fn with_client(client: Client) -> Self {
        Self {
            client: Some(client),
        }
    }
}

/// Builds a client from an explicit kubeconfig, a context of the default
/// kubeconfig, or the inferred environment, in that order
async fn build_client(config: &ProviderConfig) -> Result<Client> {
    let options = KubeConfigOptions {
        context: config.context.clone(),
        ..KubeConfigOptions::default()
    };
    let kube_config = match (&config.kubeconfig, &config.context) {
        (Some(path), _) => {
            Config::from_custom_kubeconfig(Kubeconfig::read_from(path)?, &options).await?
        }
        (None, Some(_)) => Config::from_kubeconfig(&options).await?,
        (None, None) => Config::infer().await?,
    };
    Ok(Client::try_from(kube_config)?)
}

#[async_trait]
impl Provider for KubernetesProvider {
    type Data = ProviderData;

    fn type_name(&self) -> &'static str {
        PROVIDER_TYPE_NAME
    }

    fn version(&self) -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }

    fn schema(&self) -> Schema {
        Schema::new("Read Kubernetes objects and render manifests as data sources.")
            .attribute(
                Attribute::string("kubeconfig", "kubeconfig")
                    .description("Path to the kubeconfig file. Defaults to the KUBECONFIG environment variable, ~/.kube/config or the in-cluster configuration."),
            )
            .attribute(
                Attribute::string("context", "context")
                    .description("Name of the kubeconfig context to use. Defaults to the current context."),
            )
            .attribute(
                Attribute::bool("offline", "offline")
                    .description("Skip cluster access entirely. Only manifest data sources can be read."),
            )
    }

    #[instrument(skip(self, config))]
    async fn configure(&self, config: &Value) -> Result<ProviderData, Diagnostics> {
        let config: ProviderConfig = if config.is_null() {
            ProviderConfig::default()
        } else {
            serde_json::from_value(config.clone()).map_err(|e| {
                Diagnostics::from(utilities::diagnostic(&Error::ProviderConfig(e)))
            })?
        };

        if config.offline.unwrap_or(false) {
            info!("provider configured in offline mode");
            return Ok(ProviderData::offline());
        }
        if let Some(client) = &self.client {
            return Ok(ProviderData::online(client.clone()));
        }

        let client = build_client(&config)
            .await
            .map_err(|e| Diagnostics::from(utilities::diagnostic(&e)))?;
        info!(
            default_namespace = client.default_namespace(),
            "kubernetes client initialized successfully"
        );
        Ok(ProviderData::online(client))
    }

    fn data_sources(&self) -> Vec<Box<dyn DataSource<ProviderData>>> {
        kinds::data_sources()
    }
}

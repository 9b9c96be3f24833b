//! Provider contract and the in-process server answering plugin requests

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::datasource::{DataSource, ReadResponse};
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::schema::Schema;
use crate::state::validate_config;

/// A provider: its own configuration plus the data sources it exports
#[async_trait]
pub trait Provider: Send + Sync {
    /// Data handed to every data source after configuration
    type Data: Send + Sync;

    /// Prefix of every data source type name
    fn type_name(&self) -> &'static str;

    /// Provider version
    fn version(&self) -> String;

    /// Attribute tree of the provider block
    fn schema(&self) -> Schema;

    /// Turns a validated provider config into data source data
    ///
    /// # Errors
    ///
    /// Returns diagnostics when the provider cannot be configured.
    async fn configure(&self, config: &Value) -> Result<Self::Data, Diagnostics>;

    /// Every data source this provider exports, unconfigured
    fn data_sources(&self) -> Vec<Box<dyn DataSource<Self::Data>>>;
}

/// Answer to a metadata request
#[derive(Clone, Debug, Serialize)]
pub struct ProviderMetadata {
    /// Provider type name
    pub type_name: String,
    /// Provider version
    pub version: String,
    /// Sorted data source type names
    pub data_sources: Vec<String>,
}

/// Answer to a schema request
#[derive(Clone, Debug, Serialize)]
pub struct ProviderSchema {
    /// Schema of the provider block
    pub provider: Schema,
    /// Schema of every data source keyed by type name
    pub data_sources: BTreeMap<String, Schema>,
}

/// Hosts one provider and routes requests to its data sources
pub struct ProviderServer<P: Provider> {
    provider: P,
    data_sources: BTreeMap<String, Box<dyn DataSource<P::Data>>>,
}

impl<P: Provider> ProviderServer<P> {
    /// Registers every data source of `provider`
    ///
    /// # Errors
    ///
    /// Returns diagnostics on duplicate type names or malformed schemas.
    pub fn new(provider: P) -> Result<Self, Diagnostics> {
        let mut diags = provider.schema().validate_implementation();
        let mut data_sources = BTreeMap::new();

        for data_source in provider.data_sources() {
            let type_name = data_source.type_name(provider.type_name());
            for diagnostic in data_source.schema().validate_implementation() {
                diags.push(Diagnostic {
                    summary: format!("{type_name}: {}", diagnostic.summary),
                    ..diagnostic
                });
            }
            if data_sources.insert(type_name.clone(), data_source).is_some() {
                diags.error(
                    "Duplicate Data Source Type Name",
                    format!("{type_name} is registered more than once"),
                );
            }
        }

        if diags.has_error() {
            return Err(diags);
        }
        debug!(
            provider = provider.type_name(),
            data_sources = data_sources.len(),
            "registered data sources"
        );
        Ok(Self {
            provider,
            data_sources,
        })
    }

    /// Provider type name, version and data source type names
    #[must_use]
    pub fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            type_name: self.provider.type_name().to_string(),
            version: self.provider.version(),
            data_sources: self.data_sources.keys().cloned().collect(),
        }
    }

    /// Provider schema and all data source schemas
    #[must_use]
    pub fn schema(&self) -> ProviderSchema {
        ProviderSchema {
            provider: self.provider.schema(),
            data_sources: self
                .data_sources
                .iter()
                .map(|(name, ds)| (name.clone(), ds.schema()))
                .collect(),
        }
    }

    /// Validates and applies the provider config, then configures every data source
    #[instrument(skip(self, config), fields(provider = self.provider.type_name()))]
    pub async fn configure(&mut self, config: &Value) -> Diagnostics {
        let mut diags = validate_config(&self.provider.schema().attributes, config);
        if diags.has_error() {
            return diags;
        }

        let data = match self.provider.configure(config).await {
            Ok(data) => data,
            Err(errors) => {
                warn!(diagnostics = errors.len(), "provider configuration failed");
                diags.extend(errors);
                return diags;
            }
        };

        for data_source in self.data_sources.values_mut() {
            diags.extend(data_source.configure(&data));
        }
        diags
    }

    /// Validates a data source config without reading
    #[must_use]
    pub fn validate_data_source_config(&self, type_name: &str, config: &Value) -> Diagnostics {
        match self.data_sources.get(type_name) {
            Some(data_source) => validate_config(&data_source.schema().attributes, config),
            None => unknown_data_source(type_name).into(),
        }
    }

    /// Validates the config and reads the data source
    #[instrument(skip(self, config))]
    pub async fn read_data_source(&self, type_name: &str, config: &Value) -> ReadResponse {
        let Some(data_source) = self.data_sources.get(type_name) else {
            return ReadResponse::error(unknown_data_source(type_name));
        };

        let diags = validate_config(&data_source.schema().attributes, config);
        if diags.has_error() {
            debug!(diagnostics = diags.len(), "config rejected before read");
            return ReadResponse::failed(diags);
        }

        data_source.read(config).await
    }
}

fn unknown_data_source(type_name: &str) -> Diagnostic {
    Diagnostic::error(
        "Unknown Data Source Type",
        format!("the provider does not export a data source named {type_name}"),
    )
}

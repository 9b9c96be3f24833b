use std::marker::PhantomData;

use k8s_provider_framework::state::{from_config, normalize};
use k8s_provider_framework::{Attribute, DataSource, Diagnostics, ReadResponse, Schema, async_trait};
use serde_json::{Value, json};
use tracing::{debug, instrument, warn};

use super::{MANIFEST_SUFFIX, manifest_schema};
use crate::kinds::CrdKind;
use crate::provider::ProviderData;
use crate::{Result, utilities};

/// Renders an object of kind `K` to YAML without contacting a cluster
pub struct ManifestDataSource<K> {
    schema: Schema,
    kind: PhantomData<fn() -> K>,
}

impl<K: CrdKind> ManifestDataSource<K> {
    /// Creates the data source
    #[must_use]
    pub fn new() -> Self {
        Self {
            schema: manifest_schema::<K>(),
            kind: PhantomData,
        }
    }

    fn children(&self, name: &str) -> &[Attribute] {
        self.schema
            .get(name)
            .and_then(Attribute::children)
            .unwrap_or_default()
    }

    /// Builds the typed object from config and serializes it
    #[instrument(skip(self, config), fields(data_source = K::TYPE_NAME))]
    fn render(&self, config: &Value) -> Result<String> {
        let document = json!({
            "apiVersion": K::api_version(&()),
            "kind": K::kind(&()),
            "metadata": from_config(self.children("metadata"), &config["metadata"]),
            "spec": from_config(self.children("spec"), &config["spec"]),
        });
        let object: K = serde_json::from_value(document)?;
        let yaml = serde_yaml::to_string(&object)?;
        debug!(bytes = yaml.len(), "rendered manifest");
        Ok(yaml)
    }
}

impl<K: CrdKind> Default for ManifestDataSource<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<K: CrdKind> DataSource<ProviderData> for ManifestDataSource<K> {
    fn type_name(&self, provider_type_name: &str) -> String {
        format!("{provider_type_name}_{}{MANIFEST_SUFFIX}", K::TYPE_NAME)
    }

    fn schema(&self) -> Schema {
        self.schema.clone()
    }

    fn configure(&mut self, _data: &ProviderData) -> Diagnostics {
        Diagnostics::new()
    }

    async fn read(&self, config: &Value) -> ReadResponse {
        match self.render(config) {
            Ok(yaml) => {
                let mut state = normalize(&self.schema.attributes, config);
                state["yaml"] = Value::String(yaml);
                ReadResponse::state(state)
            }
            Err(err) => {
                warn!(data_source = K::TYPE_NAME, error = %err, "render failed");
                ReadResponse::error(utilities::diagnostic(&err))
            }
        }
    }
}

//! Dumps the provider and data source schemas as JSON.
//! Writes `schema.json` into `SCHEMA_DIR` when it is set, stdout otherwise.
use std::{fs::File, io::Write, path};

use anyhow::{Context, anyhow};
use k8s_provider::{KubernetesProvider, telemetry};
use k8s_provider_framework::ProviderServer;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init()?;

    let server = ProviderServer::new(KubernetesProvider::new())
        .map_err(|diags| anyhow!("invalid provider schema: {diags}"))?;
    let schema = serde_json::to_string_pretty(&server.schema())?;

    match std::env::var_os("SCHEMA_DIR") {
        Some(dir) => {
            let schema_path = path::Path::new(&dir).join("schema.json");
            let mut schema_file = File::create(&schema_path)
                .with_context(|| format!("creating {}", schema_path.display()))?;
            schema_file.write_all(schema.as_bytes())?;
            info!(path = %schema_path.display(), "wrote provider schema");
        }
        None => println!("{schema}"),
    }
    Ok(())
}

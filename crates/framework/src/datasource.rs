//! Read-only data source contract

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::schema::Schema;

/// Outcome of a read: state on success, diagnostics always
#[derive(Clone, Debug, Default, Serialize)]
pub struct ReadResponse {
    /// State object conforming to the data source schema
    pub state: Option<Value>,
    /// Problems encountered while reading
    pub diagnostics: Diagnostics,
}

impl ReadResponse {
    /// Successful read
    #[must_use]
    pub fn state(state: Value) -> Self {
        Self {
            state: Some(state),
            diagnostics: Diagnostics::new(),
        }
    }

    /// Failed read, never carries state
    #[must_use]
    pub fn error(diagnostic: Diagnostic) -> Self {
        Self::failed(diagnostic.into())
    }

    /// Failed read with several diagnostics
    #[must_use]
    pub fn failed(diagnostics: Diagnostics) -> Self {
        Self {
            state: None,
            diagnostics,
        }
    }
}

/// A data source configured with provider data of type `D`
#[async_trait]
pub trait DataSource<D>: Send + Sync {
    /// Full type name, derived from the provider type name
    fn type_name(&self, provider_type_name: &str) -> String;

    /// Attribute tree of this data source
    fn schema(&self) -> Schema;

    /// Receives the data produced by the provider's configure step
    fn configure(&mut self, data: &D) -> Diagnostics;

    /// Produces the state for an already validated config
    async fn read(&self, config: &Value) -> ReadResponse;
}

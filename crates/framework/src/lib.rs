// Copyright 2025 K8s Provider Maintainers
// SPDX-License-Identifier: Apache-2.0

//! Plugin framework layer for read-only Terraform data sources.
//!
//! Data sources declare an attribute tree ([`Schema`]), validate configuration
//! against it, and return state objects encoded as [`serde_json::Value`].
//! A [`ProviderServer`] hosts the metadata, schema, configure and read requests.

pub mod conformance;
pub mod datasource;
pub mod diagnostics;
pub mod path;
pub mod provider;
pub mod schema;
pub mod state;
pub mod validator;

pub use datasource::{DataSource, ReadResponse};
pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use path::AttributePath;
pub use provider::{Provider, ProviderMetadata, ProviderSchema, ProviderServer};
pub use schema::{Attribute, AttributeType, Mode, Scalar, Schema};
pub use state::StateError;
pub use validator::Validator;

// Re-exported for implementors of the async traits
pub use async_trait::async_trait;

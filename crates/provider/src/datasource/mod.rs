//! Generic data sources shared by every kind
//!
//! Each kind is exported twice: a live variant reading the object from the
//! cluster, and a manifest variant rendering YAML from configuration alone.

mod live;
mod manifest;

pub use live::LiveDataSource;
pub use manifest::ManifestDataSource;

use k8s_provider_framework::{Attribute, Scalar, Schema};

use crate::kinds::CrdKind;
use crate::validators;

/// Suffix of manifest data source type names
pub const MANIFEST_SUFFIX: &str = "_manifest";

fn name_attribute() -> Attribute {
    let [length, pattern] = validators::object_name();
    Attribute::string("name", "name")
        .required()
        .description("Unique within a namespace, the name of the object.")
        .validator(length)
        .validator(pattern)
}

fn namespace_attribute() -> Attribute {
    let [length, pattern] = validators::namespace();
    Attribute::string("namespace", "namespace")
        .required()
        .description("Namespace defines the space within which the object's name must be unique.")
        .validator(length)
        .validator(pattern)
}

/// `metadata` attributes of a live data source: identity in, labels and annotations out
fn live_metadata(namespaced: bool) -> Vec<Attribute> {
    let mut attributes = vec![name_attribute()];
    if namespaced {
        attributes.push(namespace_attribute());
    }
    attributes.push(
        Attribute::map("labels", "labels", Scalar::String)
            .computed()
            .description("Map of string keys and values that can be used to organize and categorize objects."),
    );
    attributes.push(
        Attribute::map("annotations", "annotations", Scalar::String)
            .computed()
            .description("Unstructured key value map stored with a resource that may be set by external tools."),
    );
    attributes
}

/// `metadata` attributes of a manifest data source, everything configurable
fn manifest_metadata(namespaced: bool) -> Vec<Attribute> {
    let mut attributes = vec![name_attribute()];
    if namespaced {
        attributes.push(namespace_attribute());
    }
    attributes.push(
        Attribute::map("labels", "labels", Scalar::String)
            .optional()
            .description("Map of string keys and values that can be used to organize and categorize objects.")
            .validator(validators::labels()),
    );
    attributes.push(
        Attribute::map("annotations", "annotations", Scalar::String)
            .optional()
            .description("Unstructured key value map stored with a resource that may be set by external tools.")
            .validator(validators::annotations()),
    );
    attributes
}

fn description<K: CrdKind>(variant: &str) -> String {
    format!(
        "{} ({}/{} {variant})",
        K::DESCRIPTION,
        K::api_version(&()),
        K::kind(&())
    )
}

/// Schema of the live variant: the kind's spec projected to read-only
#[must_use]
pub fn live_schema<K: CrdKind>() -> Schema {
    Schema::new(&description::<K>("from a cluster"))
        .attribute(
            Attribute::synthetic_string("id")
                .description("Contains the value `metadata.namespace/metadata.name` for namespaced objects, `metadata.name` otherwise."),
        )
        .attribute(
            Attribute::string("api_version", "apiVersion")
                .computed()
                .description("The API group and version of the object."),
        )
        .attribute(
            Attribute::string("kind", "kind")
                .computed()
                .description("The kind of the object."),
        )
        .attribute(
            Attribute::object("metadata", "metadata", live_metadata(K::NAMESPACED))
                .required()
                .description("Data that helps uniquely identify this object."),
        )
        .attribute(
            Attribute::object("spec", "spec", K::spec_attributes())
                .description("Desired state of the object.")
                .into_computed(),
        )
}

/// Schema of the manifest variant: the kind's spec as declared, plus the rendered YAML
#[must_use]
pub fn manifest_schema<K: CrdKind>() -> Schema {
    let spec = Attribute::object("spec", "spec", K::spec_attributes())
        .description("Desired state of the object.");
    let spec = if K::spec_required() {
        spec.required()
    } else {
        spec.optional()
    };

    Schema::new(&description::<K>("manifest"))
        .attribute(
            Attribute::synthetic_string("yaml")
                .description("The generated manifest in YAML format."),
        )
        .attribute(
            Attribute::object("metadata", "metadata", manifest_metadata(K::NAMESPACED))
                .required()
                .description("Data that helps uniquely identify this object."),
        )
        .attribute(spec)
}

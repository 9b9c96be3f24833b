//! Checks that an attribute declaration and its model struct describe the same shape
//!
//! The model side is read from the JSON schema `schemars` generates for the
//! struct, so serde renames are honoured.

use schemars::JsonSchema;
use serde_json::Value;

use crate::schema::{Attribute, AttributeType};

/// Lists every difference between the wire names of `attributes` and the
/// fields of `T`. An empty result means both sides agree.
#[must_use]
pub fn model_mismatches<T: JsonSchema>(attributes: &[Attribute]) -> Vec<String> {
    let schema = schemars::schema_for!(T);
    let root = schema.as_value();
    let mut mismatches = Vec::new();
    compare(root, root, attributes, "", &mut mismatches);
    mismatches
}

fn is_null_schema(schema: &Value) -> bool {
    schema.get("type").and_then(Value::as_str) == Some("null")
}

fn resolve<'a>(root: &'a Value, schema: &'a Value) -> &'a Value {
    if let Some(reference) = schema.get("$ref").and_then(Value::as_str) {
        let target = reference
            .strip_prefix("#/$defs/")
            .map(|name| ("$defs", name))
            .or_else(|| {
                reference
                    .strip_prefix("#/definitions/")
                    .map(|name| ("definitions", name))
            });
        return match target.and_then(|(section, name)| root.get(section)?.get(name)) {
            Some(definition) => resolve(root, definition),
            None => schema,
        };
    }
    for combinator in ["anyOf", "oneOf", "allOf"] {
        if let Some(variants) = schema.get(combinator).and_then(Value::as_array)
            && let Some(variant) = variants.iter().find(|v| !is_null_schema(v))
        {
            return resolve(root, variant);
        }
    }
    schema
}

fn join(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}.{name}")
    }
}

fn compare(
    root: &Value,
    schema: &Value,
    attributes: &[Attribute],
    path: &str,
    mismatches: &mut Vec<String>,
) {
    let resolved = resolve(root, schema);
    let Some(properties) = resolved.get("properties").and_then(Value::as_object) else {
        mismatches.push(format!("{path}: model is not an object"));
        return;
    };

    for attribute in attributes {
        let Some(json_name) = &attribute.json_name else {
            continue;
        };
        let field_path = join(path, json_name);
        let Some(field) = properties.get(json_name) else {
            mismatches.push(format!("{field_path}: declared attribute has no model field"));
            continue;
        };
        match &attribute.kind {
            AttributeType::Object(children) => {
                compare(root, field, children, &field_path, mismatches);
            }
            AttributeType::ObjectList(children) => match resolve(root, field).get("items") {
                Some(items) => compare(root, items, children, &field_path, mismatches),
                None => mismatches.push(format!("{field_path}: model field is not a list")),
            },
            _ => {}
        }
    }

    for name in properties.keys() {
        if !attributes
            .iter()
            .any(|a| a.json_name.as_deref() == Some(name.as_str()))
        {
            mismatches.push(format!(
                "{}: model field has no declared attribute",
                join(path, name)
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use schemars::JsonSchema;
    use serde::{Deserialize, Serialize};

    use super::*;
    use crate::schema::Scalar;

    #[derive(Serialize, Deserialize, JsonSchema)]
    #[serde(rename_all = "camelCase")]
    #[allow(dead_code)]
    struct ServiceReference {
        name: Option<String>,
        port: Option<i32>,
    }

    #[derive(Serialize, Deserialize, JsonSchema)]
    #[serde(rename_all = "camelCase")]
    #[allow(dead_code)]
    struct Sample {
        group_priority_minimum: i32,
        ca_bundle: Option<String>,
        service: Option<ServiceReference>,
        endpoints: Option<Vec<ServiceReference>>,
        hosts: Vec<String>,
    }

    fn service() -> Vec<Attribute> {
        vec![
            Attribute::string("name", "name"),
            Attribute::int64("port", "port"),
        ]
    }

    #[test]
    fn matching_declaration_has_no_mismatches() {
        let attributes = vec![
            Attribute::synthetic_string("id"),
            Attribute::int64("group_priority_minimum", "groupPriorityMinimum"),
            Attribute::string("ca_bundle", "caBundle"),
            Attribute::object("service", "service", service()),
            Attribute::object_list("endpoints", "endpoints", service()),
            Attribute::list("hosts", "hosts", Scalar::String),
        ];
        assert_eq!(model_mismatches::<Sample>(&attributes), Vec::<String>::new());
    }

    #[test]
    fn reports_both_directions() {
        let attributes = vec![
            Attribute::int64("group_priority_minimum", "groupPriorityMinimum"),
            Attribute::string("ca_bundle", "caBundel"),
            Attribute::object(
                "service",
                "service",
                vec![Attribute::string("name", "name")],
            ),
            Attribute::object_list("endpoints", "endpoints", service()),
            Attribute::list("hosts", "hosts", Scalar::String),
        ];
        let mismatches = model_mismatches::<Sample>(&attributes);
        for expected in [
            "caBundel: declared attribute has no model field",
            "caBundle: model field has no declared attribute",
            "service.port: model field has no declared attribute",
        ] {
            assert!(mismatches.iter().any(|m| m == expected), "{expected}");
        }
        assert_eq!(mismatches.len(), 3);
    }
}

//! Conversion between Kubernetes wire JSON and Terraform config/state objects
//!
//! State objects are keyed by Terraform attribute names and always carry every
//! declared attribute. Wire objects are keyed by Kubernetes field names and
//! omit absent values.

use serde_json::{Map, Value};

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::path::AttributePath;
use crate::schema::{Attribute, AttributeType, Scalar};

/// Wire JSON did not match the attribute declaration
#[derive(thiserror::Error, Debug)]
pub enum StateError {
    /// Value has a different type than declared
    #[error("{path}: expected {expected}, got {found}")]
    TypeMismatch {
        /// Location of the value
        path: AttributePath,
        /// Declared type
        expected: &'static str,
        /// JSON type found
        found: &'static str,
    },
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn scalar_matches(scalar: Scalar, value: &Value) -> bool {
    match scalar {
        Scalar::String => value.is_string(),
        Scalar::Int64 => value.is_i64(),
        Scalar::Bool => value.is_boolean(),
    }
}

fn mismatch(path: &AttributePath, expected: &'static str, value: &Value) -> StateError {
    StateError::TypeMismatch {
        path: path.clone(),
        expected,
        found: json_type(value),
    }
}

/// Maps a wire object onto the declared attributes.
///
/// Attributes without a wire name (synthesized by the provider) are emitted as
/// `null` for the caller to fill in.
///
/// # Errors
///
/// Returns [`StateError::TypeMismatch`] when a wire value has an unexpected type.
pub fn to_state(attributes: &[Attribute], source: &Value) -> Result<Value, StateError> {
    object_to_state(attributes, source, &AttributePath::root())
}

fn object_to_state(
    attributes: &[Attribute],
    source: &Value,
    path: &AttributePath,
) -> Result<Value, StateError> {
    let empty = Map::new();
    let fields = match source {
        Value::Object(fields) => fields,
        Value::Null => &empty,
        other => return Err(mismatch(path, "object", other)),
    };

    let mut state = Map::new();
    for attribute in attributes {
        let value = match &attribute.json_name {
            Some(json_name) => fields.get(json_name).unwrap_or(&Value::Null),
            None => &Value::Null,
        };
        let path = path.attribute(&attribute.name);
        state.insert(
            attribute.name.clone(),
            value_to_state(&attribute.kind, value, &path)?,
        );
    }
    Ok(Value::Object(state))
}

fn value_to_state(
    kind: &AttributeType,
    value: &Value,
    path: &AttributePath,
) -> Result<Value, StateError> {
    if value.is_null() {
        return Ok(Value::Null);
    }
    match kind {
        AttributeType::String => scalar_to_state(Scalar::String, value, path),
        AttributeType::Int64 => scalar_to_state(Scalar::Int64, value, path),
        AttributeType::Bool => scalar_to_state(Scalar::Bool, value, path),
        AttributeType::List(scalar) => {
            let items = value.as_array().ok_or_else(|| mismatch(path, "list", value))?;
            items
                .iter()
                .enumerate()
                .map(|(i, item)| scalar_to_state(*scalar, item, &path.index(i)))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array)
        }
        AttributeType::Map(scalar) => {
            let entries = value.as_object().ok_or_else(|| mismatch(path, "map", value))?;
            entries
                .iter()
                .map(|(k, v)| Ok((k.clone(), scalar_to_state(*scalar, v, &path.key(k))?)))
                .collect::<Result<Map<String, Value>, StateError>>()
                .map(Value::Object)
        }
        AttributeType::Object(children) => object_to_state(children, value, path),
        AttributeType::ObjectList(children) => {
            let items = value
                .as_array()
                .ok_or_else(|| mismatch(path, "list of objects", value))?;
            items
                .iter()
                .enumerate()
                .map(|(i, item)| object_to_state(children, item, &path.index(i)))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array)
        }
    }
}

fn scalar_to_state(
    scalar: Scalar,
    value: &Value,
    path: &AttributePath,
) -> Result<Value, StateError> {
    if value.is_null() || scalar_matches(scalar, value) {
        Ok(value.clone())
    } else {
        Err(mismatch(path, scalar.name(), value))
    }
}

/// Maps a Terraform config object back onto wire names, dropping nulls and
/// synthesized attributes
#[must_use]
pub fn from_config(attributes: &[Attribute], config: &Value) -> Value {
    let Some(fields) = config.as_object() else {
        return Value::Object(Map::new());
    };

    let mut wire = Map::new();
    for attribute in attributes {
        let Some(json_name) = &attribute.json_name else {
            continue;
        };
        let value = fields.get(&attribute.name).unwrap_or(&Value::Null);
        if value.is_null() {
            continue;
        }
        let converted = match &attribute.kind {
            AttributeType::Object(children) => from_config(children, value),
            AttributeType::ObjectList(children) => Value::Array(
                value
                    .as_array()
                    .map(|items| items.iter().map(|item| from_config(children, item)).collect())
                    .unwrap_or_default(),
            ),
            _ => value.clone(),
        };
        wire.insert(json_name.clone(), converted);
    }
    Value::Object(wire)
}

/// Returns `config` with every declared attribute present, absent ones as `null`
#[must_use]
pub fn normalize(attributes: &[Attribute], config: &Value) -> Value {
    let empty = Map::new();
    let fields = config.as_object().unwrap_or(&empty);

    let mut state = Map::new();
    for attribute in attributes {
        let value = fields.get(&attribute.name).unwrap_or(&Value::Null);
        let normalized = match (&attribute.kind, value) {
            (_, Value::Null) => Value::Null,
            (AttributeType::Object(children), value) => normalize(children, value),
            (AttributeType::ObjectList(children), Value::Array(items)) => Value::Array(
                items.iter().map(|item| normalize(children, item)).collect(),
            ),
            (_, value) => value.clone(),
        };
        state.insert(attribute.name.clone(), normalized);
    }
    Value::Object(state)
}

/// Checks a Terraform config object against the declared attributes
#[must_use]
pub fn validate_config(attributes: &[Attribute], config: &Value) -> Diagnostics {
    let mut diags = Diagnostics::new();
    validate_object(attributes, config, &AttributePath::root(), &mut diags);
    diags
}

fn validate_object(
    attributes: &[Attribute],
    config: &Value,
    path: &AttributePath,
    diags: &mut Diagnostics,
) {
    let empty = Map::new();
    let fields = match config {
        Value::Object(fields) => fields,
        Value::Null => &empty,
        other => {
            diags.push(type_error(path, "object", other));
            return;
        }
    };

    for key in fields.keys() {
        if !attributes.iter().any(|a| &a.name == key) {
            diags.push(
                Diagnostic::error(
                    "Unsupported argument",
                    format!("An argument named \"{key}\" is not expected here."),
                )
                .at(&path.attribute(key)),
            );
        }
    }

    for attribute in attributes {
        let path = path.attribute(&attribute.name);
        let value = fields.get(&attribute.name).unwrap_or(&Value::Null);

        if value.is_null() {
            if attribute.is_required() {
                diags.push(
                    Diagnostic::error(
                        "Missing Configuration for Required Attribute",
                        format!("Must set a configuration value for the {path} attribute."),
                    )
                    .at(&path),
                );
            }
            continue;
        }
        if attribute.is_computed() {
            diags.push(
                Diagnostic::error(
                    "Invalid Configuration for Read-Only Attribute",
                    format!("Cannot set value for the {path} attribute, it is read-only."),
                )
                .at(&path),
            );
            continue;
        }
        if validate_type(&attribute.kind, value, &path, diags) {
            for validator in &attribute.validators {
                validator.validate(&path, value, diags);
            }
        }
    }
}

/// Returns true if the value has the declared type
fn validate_type(
    kind: &AttributeType,
    value: &Value,
    path: &AttributePath,
    diags: &mut Diagnostics,
) -> bool {
    let before = diags.len();
    match kind {
        AttributeType::String | AttributeType::Int64 | AttributeType::Bool => {
            let scalar = match kind {
                AttributeType::String => Scalar::String,
                AttributeType::Int64 => Scalar::Int64,
                _ => Scalar::Bool,
            };
            if !scalar_matches(scalar, value) {
                diags.push(type_error(path, scalar.name(), value));
            }
        }
        AttributeType::List(scalar) => match value {
            Value::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    if !scalar_matches(*scalar, item) {
                        diags.push(type_error(&path.index(i), scalar.name(), item));
                    }
                }
            }
            other => diags.push(type_error(path, "list", other)),
        },
        AttributeType::Map(scalar) => match value {
            Value::Object(entries) => {
                for (key, item) in entries {
                    if !scalar_matches(*scalar, item) {
                        diags.push(type_error(&path.key(key), scalar.name(), item));
                    }
                }
            }
            other => diags.push(type_error(path, "map", other)),
        },
        AttributeType::Object(children) => match value {
            Value::Object(_) => validate_object(children, value, path, diags),
            other => diags.push(type_error(path, "object", other)),
        },
        AttributeType::ObjectList(children) => match value {
            Value::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    validate_object(children, item, &path.index(i), diags);
                }
            }
            other => diags.push(type_error(path, "list of objects", other)),
        },
    }
    diags.len() == before
}

fn type_error(path: &AttributePath, expected: &str, value: &Value) -> Diagnostic {
    Diagnostic::error(
        "Incorrect attribute value type",
        format!(
            "Inappropriate value for attribute {path}: {expected} required, got {}.",
            json_type(value)
        ),
    )
    .at(path)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::validator;

    fn attributes() -> Vec<Attribute> {
        vec![
            Attribute::synthetic_string("id"),
            Attribute::string("secret_name", "secretName").required(),
            Attribute::int64("revision_history_limit", "revisionHistoryLimit")
                .validator(validator::int64_at_least(1)),
            Attribute::list("dns_names", "dnsNames", Scalar::String),
            Attribute::map("labels", "labels", Scalar::String),
            Attribute::object(
                "issuer_ref",
                "issuerRef",
                vec![
                    Attribute::string("name", "name").required(),
                    Attribute::string("kind", "kind"),
                ],
            ),
            Attribute::object_list(
                "other_names",
                "otherNames",
                vec![
                    Attribute::string("oid", "oid"),
                    Attribute::string("utf8_value", "utf8Value"),
                ],
            ),
        ]
    }

    #[test]
    fn wire_json_to_state_fills_every_attribute() {
        let wire = json!({
            "secretName": "tls",
            "dnsNames": ["a.example.com"],
            "issuerRef": {"name": "letsencrypt"},
            "otherNames": [{"oid": "1.2.3", "utf8Value": "x"}],
            "unknownField": true
        });
        let state = to_state(&attributes(), &wire).unwrap();
        assert_eq!(
            state,
            json!({
                "id": null,
                "secret_name": "tls",
                "revision_history_limit": null,
                "dns_names": ["a.example.com"],
                "labels": null,
                "issuer_ref": {"name": "letsencrypt", "kind": null},
                "other_names": [{"oid": "1.2.3", "utf8_value": "x"}]
            })
        );
    }

    #[test]
    fn to_state_reports_type_mismatch_path() {
        let wire = json!({"issuerRef": {"name": 5}});
        let err = to_state(&attributes(), &wire).unwrap_err();
        assert_eq!(err.to_string(), "issuer_ref.name: expected string, got number");
    }

    #[test]
    fn config_maps_back_to_wire_names() {
        let config = json!({
            "id": "ignored",
            "secret_name": "tls",
            "revision_history_limit": null,
            "issuer_ref": {"name": "letsencrypt", "kind": null},
            "other_names": [{"oid": "1.2.3", "utf8_value": null}]
        });
        assert_eq!(
            from_config(&attributes(), &config),
            json!({
                "secretName": "tls",
                "issuerRef": {"name": "letsencrypt"},
                "otherNames": [{"oid": "1.2.3"}]
            })
        );
    }

    #[test]
    fn normalize_adds_missing_attributes() {
        let config = json!({"secret_name": "tls", "issuer_ref": {"name": "x"}});
        let state = normalize(&attributes(), &config);
        assert_eq!(state["issuer_ref"], json!({"name": "x", "kind": null}));
        assert_eq!(state["dns_names"], Value::Null);
        assert_eq!(state.as_object().map(Map::len), Some(7));
    }

    #[test]
    fn validate_config_collects_every_problem() {
        let config = json!({
            "id": "set",
            "revision_history_limit": 0,
            "dns_names": ["ok", 1],
            "issuer_ref": {"kind": "Issuer"},
            "bogus": 1
        });
        let summaries: Vec<String> = validate_config(&attributes(), &config)
            .iter()
            .map(|d| {
                let path = d
                    .attribute
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_default();
                format!("{path}: {}", d.summary)
            })
            .collect();
        assert_eq!(
            summaries,
            vec![
                "bogus: Unsupported argument",
                "id: Invalid Configuration for Read-Only Attribute",
                "secret_name: Missing Configuration for Required Attribute",
                "revision_history_limit: Invalid Attribute Value",
                "dns_names[1]: Incorrect attribute value type",
                "issuer_ref.name: Missing Configuration for Required Attribute",
            ]
        );
    }

    #[test]
    fn valid_config_has_no_diagnostics() {
        let config = json!({
            "secret_name": "tls",
            "labels": {"app": "web"},
            "issuer_ref": {"name": "letsencrypt"}
        });
        assert!(validate_config(&attributes(), &config).is_empty());
    }
}

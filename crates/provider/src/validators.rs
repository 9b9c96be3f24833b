//! Kubernetes specific attribute validators

use std::sync::{Arc, LazyLock};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use k8s_openapi::chrono::DateTime;
use k8s_provider_framework::validator::{int64_between, length_between, regex_matches};
use k8s_provider_framework::{AttributePath, Diagnostic, Diagnostics, Validator};
use regex::Regex;
use serde_json::Value;

/// RFC 1123 subdomain, used for object names
pub const DNS_SUBDOMAIN: &str = r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?(\.[a-z0-9]([-a-z0-9]*[a-z0-9])?)*$";

/// RFC 1123 label, used for namespaces
pub const DNS_LABEL: &str = r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?$";

const QUALIFIED_NAME: &str = r"^([A-Za-z0-9][-A-Za-z0-9_.]*)?[A-Za-z0-9]$";

// Patterns are literals covered by the tests below.
#[allow(clippy::expect_used)]
static SUBDOMAIN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(DNS_SUBDOMAIN).expect("valid subdomain pattern"));
#[allow(clippy::expect_used)]
static QUALIFIED_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(QUALIFIED_NAME).expect("valid qualified name pattern"));

/// Object name: a DNS subdomain of at most 253 characters
#[must_use]
pub fn object_name() -> [Arc<dyn Validator>; 2] {
    [
        length_between(1, 253),
        regex_matches(
            DNS_SUBDOMAIN,
            "must consist of lower case alphanumeric characters, '-' or '.', and must start and end with an alphanumeric character",
        ),
    ]
}

/// Namespace: a DNS label of at most 63 characters
#[must_use]
pub fn namespace() -> [Arc<dyn Validator>; 2] {
    [
        length_between(1, 63),
        regex_matches(
            DNS_LABEL,
            "must consist of lower case alphanumeric characters or '-', and must start and end with an alphanumeric character",
        ),
    ]
}

fn invalid(path: &AttributePath, detail: String) -> Diagnostic {
    Diagnostic::error("Invalid Attribute Value", detail).at(path)
}

fn qualified_name_problem(key: &str) -> Option<String> {
    let (prefix, name) = match key.split_once('/') {
        Some((prefix, name)) => (Some(prefix), name),
        None => (None, key),
    };
    if let Some(prefix) = prefix
        && (prefix.is_empty() || prefix.len() > 253 || !SUBDOMAIN_RE.is_match(prefix))
    {
        return Some(format!("prefix of {key:?} must be a DNS subdomain"));
    }
    if name.is_empty() || name.len() > 63 {
        return Some(format!("name part of {key:?} must be between 1 and 63 characters"));
    }
    if !QUALIFIED_NAME_RE.is_match(name) {
        return Some(format!(
            "name part of {key:?} must consist of alphanumeric characters, '-', '_' or '.', and must start and end with an alphanumeric character"
        ));
    }
    None
}

#[derive(Debug)]
struct Labels;

impl Validator for Labels {
    fn description(&self) -> String {
        "keys must be qualified names and values must be valid label values".to_string()
    }

    fn validate(&self, path: &AttributePath, value: &Value, diagnostics: &mut Diagnostics) {
        let Some(entries) = value.as_object() else {
            return;
        };
        for (key, item) in entries {
            let path = path.key(key);
            if let Some(problem) = qualified_name_problem(key) {
                diagnostics.push(invalid(&path, format!("Attribute {path} {problem}")));
            }
            let Some(label) = item.as_str() else {
                continue;
            };
            if label.len() > 63 || !(label.is_empty() || QUALIFIED_NAME_RE.is_match(label)) {
                diagnostics.push(invalid(
                    &path,
                    format!("Attribute {path} value must be empty or a valid label value, got: {label}"),
                ));
            }
        }
    }
}

/// Label map: qualified name keys and at most 63 character label values
#[must_use]
pub fn labels() -> Arc<dyn Validator> {
    Arc::new(Labels)
}

#[derive(Debug)]
struct Annotations;

impl Validator for Annotations {
    fn description(&self) -> String {
        "keys must be qualified names".to_string()
    }

    fn validate(&self, path: &AttributePath, value: &Value, diagnostics: &mut Diagnostics) {
        let Some(entries) = value.as_object() else {
            return;
        };
        for key in entries.keys() {
            if let Some(problem) = qualified_name_problem(key) {
                let path = path.key(key);
                diagnostics.push(invalid(&path, format!("Attribute {path} {problem}")));
            }
        }
    }
}

/// Annotation map: qualified name keys
#[must_use]
pub fn annotations() -> Arc<dyn Validator> {
    Arc::new(Annotations)
}

#[derive(Debug)]
struct DateTime64;

impl Validator for DateTime64 {
    fn description(&self) -> String {
        "value must be a RFC 3339 date-time".to_string()
    }

    fn validate(&self, path: &AttributePath, value: &Value, diagnostics: &mut Diagnostics) {
        let Some(s) = value.as_str() else {
            return;
        };
        if let Err(e) = DateTime::parse_from_rfc3339(s) {
            diagnostics.push(invalid(
                path,
                format!("Attribute {path} {}, got: {s} ({e})", self.description()),
            ));
        }
    }
}

/// RFC 3339 date-time string, as used by `format: date-time` fields
#[must_use]
pub fn date_time() -> Arc<dyn Validator> {
    Arc::new(DateTime64)
}

#[derive(Debug)]
struct Base64;

impl Validator for Base64 {
    fn description(&self) -> String {
        "value must be base64 encoded".to_string()
    }

    fn validate(&self, path: &AttributePath, value: &Value, diagnostics: &mut Diagnostics) {
        let Some(s) = value.as_str() else {
            return;
        };
        if let Err(e) = STANDARD.decode(s) {
            diagnostics.push(invalid(
                path,
                format!("Attribute {path} {}: {e}", self.description()),
            ));
        }
    }
}

/// Base64 string, as used by `format: byte` fields
#[must_use]
pub fn base64() -> Arc<dyn Validator> {
    Arc::new(Base64)
}

/// Integer backed by a `format: int32` field, at least `min`
#[must_use]
pub fn int32_at_least(min: i32) -> Arc<dyn Validator> {
    int64_between(min.into(), i32::MAX.into())
}

/// Integer backed by a `format: int32` field
#[must_use]
pub fn int32() -> Arc<dyn Validator> {
    int32_at_least(i32::MIN)
}

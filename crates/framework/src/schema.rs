//! Declarative attribute trees describing data source configuration and state

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::{Serialize, Serializer};

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::path::AttributePath;
use crate::validator::Validator;

/// Names Terraform reserves for meta-arguments at the root of a data source block
pub const RESERVED_ROOT_NAMES: [&str; 7] = [
    "connection",
    "count",
    "depends_on",
    "for_each",
    "lifecycle",
    "provider",
    "provisioner",
];

/// Element type of list and map attributes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Scalar {
    /// UTF-8 string
    String,
    /// 64 bit signed integer
    Int64,
    /// Boolean
    Bool,
}

impl Scalar {
    /// Name used in diagnostics
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Scalar::String => "string",
            Scalar::Int64 => "number",
            Scalar::Bool => "bool",
        }
    }
}

/// Value type of an attribute
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "kind", content = "of", rename_all = "snake_case")]
pub enum AttributeType {
    /// UTF-8 string
    String,
    /// 64 bit signed integer
    Int64,
    /// Boolean
    Bool,
    /// List of scalars
    List(Scalar),
    /// String keyed map of scalars
    Map(Scalar),
    /// Single nested object
    Object(Vec<Attribute>),
    /// List of nested objects
    ObjectList(Vec<Attribute>),
}

impl AttributeType {
    /// Name used in diagnostics
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            AttributeType::String => "string",
            AttributeType::Int64 => "number",
            AttributeType::Bool => "bool",
            AttributeType::List(_) => "list",
            AttributeType::Map(_) => "map",
            AttributeType::Object(_) => "object",
            AttributeType::ObjectList(_) => "list of objects",
        }
    }
}

/// Who supplies the value of an attribute
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Must be set in configuration
    Required,
    /// May be set in configuration
    Optional,
    /// Set by the data source only
    Computed,
}

/// A named, typed and described node of a [`Schema`]
#[derive(Clone, Debug, Serialize)]
pub struct Attribute {
    /// Terraform attribute name (`snake_case`)
    pub name: String,
    /// Kubernetes wire name, absent for attributes synthesized by the provider
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json_name: Option<String>,
    /// Human readable description
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Value type
    #[serde(rename = "type")]
    pub kind: AttributeType,
    /// Required, optional or computed
    pub mode: Mode,
    /// Checks applied to configured values
    #[serde(
        serialize_with = "serialize_validators",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub validators: Vec<Arc<dyn Validator>>,
}

fn serialize_validators<S: Serializer>(
    validators: &[Arc<dyn Validator>],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(validators.iter().map(|v| v.description()))
}

impl Attribute {
    fn new(name: &str, json_name: Option<&str>, kind: AttributeType) -> Self {
        Self {
            name: name.to_string(),
            json_name: json_name.map(ToString::to_string),
            description: String::new(),
            kind,
            mode: Mode::Optional,
            validators: Vec::new(),
        }
    }

    /// String attribute mapped to `json_name`
    #[must_use]
    pub fn string(name: &str, json_name: &str) -> Self {
        Self::new(name, Some(json_name), AttributeType::String)
    }

    /// Integer attribute mapped to `json_name`
    #[must_use]
    pub fn int64(name: &str, json_name: &str) -> Self {
        Self::new(name, Some(json_name), AttributeType::Int64)
    }

    /// Boolean attribute mapped to `json_name`
    #[must_use]
    pub fn bool(name: &str, json_name: &str) -> Self {
        Self::new(name, Some(json_name), AttributeType::Bool)
    }

    /// List of scalars mapped to `json_name`
    #[must_use]
    pub fn list(name: &str, json_name: &str, element: Scalar) -> Self {
        Self::new(name, Some(json_name), AttributeType::List(element))
    }

    /// Map of scalars mapped to `json_name`
    #[must_use]
    pub fn map(name: &str, json_name: &str, element: Scalar) -> Self {
        Self::new(name, Some(json_name), AttributeType::Map(element))
    }

    /// Single nested object mapped to `json_name`
    #[must_use]
    pub fn object(name: &str, json_name: &str, attributes: Vec<Attribute>) -> Self {
        Self::new(name, Some(json_name), AttributeType::Object(attributes))
    }

    /// List of nested objects mapped to `json_name`
    #[must_use]
    pub fn object_list(name: &str, json_name: &str, attributes: Vec<Attribute>) -> Self {
        Self::new(name, Some(json_name), AttributeType::ObjectList(attributes))
    }

    /// Computed string that has no counterpart on the Kubernetes object
    #[must_use]
    pub fn synthetic_string(name: &str) -> Self {
        Self::new(name, None, AttributeType::String).computed()
    }

    /// Marks the attribute as required
    #[must_use]
    pub fn required(mut self) -> Self {
        self.mode = Mode::Required;
        self
    }

    /// Marks the attribute as optional
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.mode = Mode::Optional;
        self
    }

    /// Marks the attribute as computed
    #[must_use]
    pub fn computed(mut self) -> Self {
        self.mode = Mode::Computed;
        self
    }

    /// Sets the description
    #[must_use]
    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Adds a validator
    #[must_use]
    pub fn validator(mut self, validator: Arc<dyn Validator>) -> Self {
        self.validators.push(validator);
        self
    }

    /// True for [`Mode::Required`]
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.mode == Mode::Required
    }

    /// True for [`Mode::Computed`]
    #[must_use]
    pub fn is_computed(&self) -> bool {
        self.mode == Mode::Computed
    }

    /// Nested attributes of object and list of object attributes
    #[must_use]
    pub fn children(&self) -> Option<&[Attribute]> {
        match &self.kind {
            AttributeType::Object(children) | AttributeType::ObjectList(children) => {
                Some(children)
            }
            _ => None,
        }
    }

    /// Read-only projection: computed all the way down, without validators
    #[must_use]
    pub fn into_computed(mut self) -> Self {
        self.mode = Mode::Computed;
        self.validators.clear();
        self.kind = match self.kind {
            AttributeType::Object(children) => {
                AttributeType::Object(children.into_iter().map(Self::into_computed).collect())
            }
            AttributeType::ObjectList(children) => AttributeType::ObjectList(
                children.into_iter().map(Self::into_computed).collect(),
            ),
            other => other,
        };
        self
    }
}

/// Root of a data source or provider attribute tree
#[derive(Clone, Debug, Default, Serialize)]
pub struct Schema {
    /// Human readable description
    pub description: String,
    /// Root attributes
    pub attributes: Vec<Attribute>,
}

impl Schema {
    /// Empty schema with a description
    #[must_use]
    pub fn new(description: &str) -> Self {
        Self {
            description: description.to_string(),
            attributes: Vec::new(),
        }
    }

    /// Appends a root attribute
    #[must_use]
    pub fn attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Looks up a root attribute by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Checks the declaration itself for mistakes Terraform would reject at startup
    #[must_use]
    pub fn validate_implementation(&self) -> Diagnostics {
        let mut diags = Diagnostics::new();
        for attribute in &self.attributes {
            if RESERVED_ROOT_NAMES.contains(&attribute.name.as_str()) {
                diags.push(
                    Diagnostic::error(
                        "Reserved Root Attribute Name",
                        format!("\"{}\" is reserved by Terraform", attribute.name),
                    )
                    .at(&AttributePath::root().attribute(&attribute.name)),
                );
            }
        }
        check_attributes(&self.attributes, &AttributePath::root(), false, &mut diags);
        diags
    }
}

fn valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_lowercase() || c == '_')
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

fn check_attributes(
    attributes: &[Attribute],
    parent: &AttributePath,
    parent_computed: bool,
    diags: &mut Diagnostics,
) {
    let mut names = BTreeSet::new();
    let mut json_names = BTreeSet::new();

    for attribute in attributes {
        let path = parent.attribute(&attribute.name);

        if !valid_name(&attribute.name) {
            diags.push(
                Diagnostic::error(
                    "Invalid Attribute Name",
                    format!(
                        "\"{}\" must contain only lowercase alphanumerics and underscores and must not start with a digit",
                        attribute.name
                    ),
                )
                .at(&path),
            );
        }
        if !names.insert(attribute.name.as_str()) {
            diags.push(
                Diagnostic::error(
                    "Duplicate Attribute Name",
                    format!("\"{}\" is declared more than once", attribute.name),
                )
                .at(&path),
            );
        }
        if let Some(json_name) = &attribute.json_name {
            if json_name.is_empty() {
                diags.push(
                    Diagnostic::error("Invalid Wire Name", "wire name must not be empty")
                        .at(&path),
                );
            } else if !json_names.insert(json_name.as_str()) {
                diags.push(
                    Diagnostic::error(
                        "Duplicate Wire Name",
                        format!("\"{json_name}\" is mapped by more than one attribute"),
                    )
                    .at(&path),
                );
            }
        }
        if parent_computed && !attribute.is_computed() {
            diags.push(
                Diagnostic::error(
                    "Configurable Attribute In Computed Object",
                    "attributes nested in a computed attribute must be computed",
                )
                .at(&path),
            );
        }
        if attribute.is_computed() && !attribute.validators.is_empty() {
            diags.push(
                Diagnostic::error(
                    "Validators On Computed Attribute",
                    "computed attributes are never configured and cannot carry validators",
                )
                .at(&path),
            );
        }
        for validator in &attribute.validators {
            if let Some(problem) = validator.check_definition() {
                diags.push(Diagnostic::error("Invalid Validator", problem).at(&path));
            }
        }
        if let Some(children) = attribute.children() {
            if children.is_empty() {
                diags.push(
                    Diagnostic::error(
                        "Missing Nested Attributes",
                        "nested attributes must declare at least one attribute",
                    )
                    .at(&path),
                );
            }
            check_attributes(children, &path, attribute.is_computed(), diags);
        }
    }
}

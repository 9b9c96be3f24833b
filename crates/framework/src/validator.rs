//! Reusable attribute value validators
//!
//! Validators only ever see non-null values whose type already matches the
//! attribute declaration. Each failed check appends one error diagnostic.

use std::fmt::{self, Debug};
use std::sync::Arc;

use regex::Regex;
use serde_json::Value;

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::path::AttributePath;

/// Check applied to a configured attribute value
pub trait Validator: Debug + Send + Sync {
    /// Human readable description used in schema documents
    fn description(&self) -> String;

    /// Validates `value` found at `path`, appending diagnostics on failure
    fn validate(&self, path: &AttributePath, value: &Value, diagnostics: &mut Diagnostics);

    /// Reports a problem with the validator definition itself
    fn check_definition(&self) -> Option<String> {
        None
    }
}

fn display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[derive(Debug)]
struct StringLength {
    min: Option<usize>,
    max: Option<usize>,
}

impl StringLength {
    fn bounds(&self) -> String {
        match (self.min, self.max) {
            (Some(min), Some(max)) => format!("between {min} and {max}"),
            (Some(min), None) => format!("at least {min}"),
            (None, Some(max)) => format!("at most {max}"),
            (None, None) => "unbounded".to_string(),
        }
    }
}

impl Validator for StringLength {
    fn description(&self) -> String {
        format!("string length must be {}", self.bounds())
    }

    fn validate(&self, path: &AttributePath, value: &Value, diagnostics: &mut Diagnostics) {
        let Some(s) = value.as_str() else {
            return;
        };
        let len = s.chars().count();
        let too_short = self.min.is_some_and(|min| len < min);
        let too_long = self.max.is_some_and(|max| len > max);
        if too_short || too_long {
            diagnostics.push(
                Diagnostic::error(
                    "Invalid Attribute Value Length",
                    format!("Attribute {path} {}, got: {len}", self.description()),
                )
                .at(path),
            );
        }
    }

    fn check_definition(&self) -> Option<String> {
        match (self.min, self.max) {
            (Some(min), Some(max)) if min > max => {
                Some(format!("minimum length {min} exceeds maximum length {max}"))
            }
            _ => None,
        }
    }
}

/// String length in unicode scalar values must be within `min..=max`
#[must_use]
pub fn length_between(min: usize, max: usize) -> Arc<dyn Validator> {
    Arc::new(StringLength {
        min: Some(min),
        max: Some(max),
    })
}

/// String length must be at least `min`
#[must_use]
pub fn length_at_least(min: usize) -> Arc<dyn Validator> {
    Arc::new(StringLength {
        min: Some(min),
        max: None,
    })
}

/// String length must be at most `max`
#[must_use]
pub fn length_at_most(max: usize) -> Arc<dyn Validator> {
    Arc::new(StringLength {
        min: None,
        max: Some(max),
    })
}

struct RegexMatches {
    pattern: String,
    message: String,
    regex: Result<Regex, regex::Error>,
}

impl Debug for RegexMatches {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegexMatches")
            .field("pattern", &self.pattern)
            .finish_non_exhaustive()
    }
}

impl Validator for RegexMatches {
    fn description(&self) -> String {
        if self.message.is_empty() {
            format!("value must match regular expression '{}'", self.pattern)
        } else {
            self.message.clone()
        }
    }

    fn validate(&self, path: &AttributePath, value: &Value, diagnostics: &mut Diagnostics) {
        let (Some(s), Ok(regex)) = (value.as_str(), &self.regex) else {
            return;
        };
        if !regex.is_match(s) {
            diagnostics.push(
                Diagnostic::error(
                    "Invalid Attribute Value Match",
                    format!("Attribute {path} {}, got: {s}", self.description()),
                )
                .at(path),
            );
        }
    }

    fn check_definition(&self) -> Option<String> {
        self.regex
            .as_ref()
            .err()
            .map(|e| format!("invalid regular expression '{}': {e}", self.pattern))
    }
}

/// String must match `pattern`; `message` replaces the default description when non-empty.
///
/// An invalid pattern never matches anything and is reported by
/// [`crate::Schema::validate_implementation`].
#[must_use]
pub fn regex_matches(pattern: &str, message: &str) -> Arc<dyn Validator> {
    Arc::new(RegexMatches {
        pattern: pattern.to_string(),
        message: message.to_string(),
        regex: Regex::new(pattern),
    })
}

#[derive(Debug)]
struct OneOf {
    values: Vec<String>,
}

impl OneOf {
    fn quoted(&self) -> String {
        let quoted: Vec<String> = self.values.iter().map(|v| format!("{v:?}")).collect();
        format!("[{}]", quoted.join(" "))
    }
}

impl Validator for OneOf {
    fn description(&self) -> String {
        format!("value must be one of: {}", self.quoted())
    }

    fn validate(&self, path: &AttributePath, value: &Value, diagnostics: &mut Diagnostics) {
        let Some(s) = value.as_str() else {
            return;
        };
        if !self.values.iter().any(|v| v == s) {
            diagnostics.push(
                Diagnostic::error(
                    "Invalid Attribute Value Match",
                    format!("Attribute {path} {}, got: {s:?}", self.description()),
                )
                .at(path),
            );
        }
    }

    fn check_definition(&self) -> Option<String> {
        self.values
            .is_empty()
            .then(|| "one_of requires at least one value".to_string())
    }
}

/// String must equal one of `values`
#[must_use]
pub fn one_of(values: &[&str]) -> Arc<dyn Validator> {
    Arc::new(OneOf {
        values: values.iter().map(ToString::to_string).collect(),
    })
}

#[derive(Debug)]
struct Int64Range {
    min: Option<i64>,
    max: Option<i64>,
}

impl Validator for Int64Range {
    fn description(&self) -> String {
        match (self.min, self.max) {
            (Some(min), Some(max)) => format!("value must be between {min} and {max}"),
            (Some(min), None) => format!("value must be at least {min}"),
            (None, Some(max)) => format!("value must be at most {max}"),
            (None, None) => "value is unbounded".to_string(),
        }
    }

    fn validate(&self, path: &AttributePath, value: &Value, diagnostics: &mut Diagnostics) {
        let Some(n) = value.as_i64() else {
            return;
        };
        let below = self.min.is_some_and(|min| n < min);
        let above = self.max.is_some_and(|max| n > max);
        if below || above {
            diagnostics.push(
                Diagnostic::error(
                    "Invalid Attribute Value",
                    format!("Attribute {path} {}, got: {n}", self.description()),
                )
                .at(path),
            );
        }
    }

    fn check_definition(&self) -> Option<String> {
        match (self.min, self.max) {
            (Some(min), Some(max)) if min > max => {
                Some(format!("minimum {min} exceeds maximum {max}"))
            }
            _ => None,
        }
    }
}

/// Integer must be within `min..=max`
#[must_use]
pub fn int64_between(min: i64, max: i64) -> Arc<dyn Validator> {
    Arc::new(Int64Range {
        min: Some(min),
        max: Some(max),
    })
}

/// Integer must be at least `min`
#[must_use]
pub fn int64_at_least(min: i64) -> Arc<dyn Validator> {
    Arc::new(Int64Range {
        min: Some(min),
        max: None,
    })
}

/// Integer must be at most `max`
#[must_use]
pub fn int64_at_most(max: i64) -> Arc<dyn Validator> {
    Arc::new(Int64Range {
        min: None,
        max: Some(max),
    })
}

#[derive(Debug)]
struct Each {
    inner: Arc<dyn Validator>,
}

impl Validator for Each {
    fn description(&self) -> String {
        format!("each element: {}", self.inner.description())
    }

    fn validate(&self, path: &AttributePath, value: &Value, diagnostics: &mut Diagnostics) {
        match value {
            Value::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    if !item.is_null() {
                        self.inner.validate(&path.index(i), item, diagnostics);
                    }
                }
            }
            Value::Object(entries) => {
                for (key, item) in entries {
                    if !item.is_null() {
                        self.inner.validate(&path.key(key), item, diagnostics);
                    }
                }
            }
            _ => {}
        }
    }

    fn check_definition(&self) -> Option<String> {
        self.inner.check_definition()
    }
}

/// Applies `inner` to every element of a list or every value of a map
#[must_use]
pub fn each(inner: Arc<dyn Validator>) -> Arc<dyn Validator> {
    Arc::new(Each { inner })
}

//! Attribute paths used to point diagnostics at configuration values

use std::fmt;

use serde::Serialize;

/// One step in an [`AttributePath`]
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PathStep {
    /// Named attribute of an object
    Attribute(String),
    /// Element of a list
    Index(usize),
    /// Value of a map
    Key(String),
}

/// Location of a value inside a configuration or state object
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct AttributePath {
    steps: Vec<PathStep>,
}

impl AttributePath {
    /// Empty path pointing at the root object
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns a new path descending into the named attribute
    #[must_use]
    pub fn attribute(&self, name: impl Into<String>) -> Self {
        self.with(PathStep::Attribute(name.into()))
    }

    /// Returns a new path descending into a list element
    #[must_use]
    pub fn index(&self, index: usize) -> Self {
        self.with(PathStep::Index(index))
    }

    /// Returns a new path descending into a map value
    #[must_use]
    pub fn key(&self, key: impl Into<String>) -> Self {
        self.with(PathStep::Key(key.into()))
    }

    /// Steps from the root
    #[must_use]
    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    /// True for the root path
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.steps.is_empty()
    }

    fn with(&self, step: PathStep) -> Self {
        let mut steps = self.steps.clone();
        steps.push(step);
        Self { steps }
    }
}

impl fmt::Display for AttributePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            match step {
                PathStep::Attribute(name) if i == 0 => write!(f, "{name}")?,
                PathStep::Attribute(name) => write!(f, ".{name}")?,
                PathStep::Index(index) => write!(f, "[{index}]")?,
                PathStep::Key(key) => write!(f, "[{key:?}]")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_nested_steps() {
        let path = AttributePath::root()
            .attribute("spec")
            .attribute("dns_names")
            .index(0);
        assert_eq!(path.to_string(), "spec.dns_names[0]");

        let path = AttributePath::root()
            .attribute("metadata")
            .attribute("labels")
            .key("app");
        assert_eq!(path.to_string(), r#"metadata.labels["app"]"#);
    }

    #[test]
    fn root_is_empty() {
        assert!(AttributePath::root().is_root());
        assert_eq!(AttributePath::root().to_string(), "");
    }
}

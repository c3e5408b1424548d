//! Describes the attributes a resource accepts and checks a [`ResourceData`] against them

use reqwest::Url;
use serde::Serialize;
use serde_json::Value;

use crate::error::ValidationError;
use crate::resource::data::ResourceData;

/// Validates the value of a string attribute
pub type StringValidator = fn(&'static str, &str) -> Result<(), ValidationError>;

/// Type of an attribute value
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeType {
    /// JSON string
    String,
    /// JSON boolean
    Bool,
}

impl AttributeType {
    /// Returns `true` if `value` is of this type (`null` always matches)
    fn accepts(self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string() || value.is_null(),
            Self::Bool => value.is_boolean() || value.is_null(),
        }
    }

    /// Name used in error messages
    const fn name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Bool => "boolean",
        }
    }
}

/// Who provides the value of an attribute
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeMode {
    /// Must be set in the configuration
    Required,
    /// May be set in the configuration, otherwise read back from gitlab
    OptionalComputed,
    /// Only read back from gitlab
    Computed,
}

/// A single attribute definition
#[derive(Clone, Debug, Serialize)]
pub struct Attribute {
    /// Attribute name
    pub name: &'static str,
    /// Value type
    #[serde(rename = "type")]
    pub kind: AttributeType,
    /// Required, optional or computed
    pub mode: AttributeMode,
    /// Changing the value means destroying and creating the resource again
    pub force_new: bool,
    /// The value must not be displayed
    pub sensitive: bool,
    /// Extra check run on string values
    #[serde(skip)]
    pub validate: Option<StringValidator>,
}

impl Attribute {
    /// Creates a new attribute, not force-new, not sensitive and without validator
    pub const fn new(name: &'static str, kind: AttributeType, mode: AttributeMode) -> Self {
        Self {
            name,
            kind,
            mode,
            force_new: false,
            sensitive: false,
            validate: None,
        }
    }

    /// Marks the attribute as force-new
    #[must_use]
    pub const fn force_new(mut self) -> Self {
        self.force_new = true;
        self
    }

    /// Marks the attribute as sensitive
    #[must_use]
    pub const fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    /// Adds a validator
    #[must_use]
    pub const fn validate_with(mut self, validator: StringValidator) -> Self {
        self.validate = Some(validator);
        self
    }
}

/// Complete schema of a resource
#[derive(Clone, Debug, Default, Serialize)]
pub struct Schema {
    /// Attribute definitions, in declaration order
    pub attributes: Vec<Attribute>,
}

impl Schema {
    /// Creates an empty schema
    pub const fn new() -> Self {
        Self {
            attributes: Vec::new(),
        }
    }

    /// Adds an attribute definition
    #[must_use]
    pub fn add_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Returns the definition of `name`
    pub fn get(&self, name: &str) -> Option<&Attribute> {
        self.attributes
            .iter()
            .find(|attribute| attribute.name == name)
    }

    /// Checks `data` against the schema
    ///
    /// Computed attributes are accepted, `data` may come from a previous read
    pub fn validate(&self, data: &ResourceData) -> Result<(), ValidationError> {
        for (name, value) in &data.attributes {
            let attribute = self
                .get(name)
                .ok_or_else(|| ValidationError::UnknownAttribute(name.clone()))?;
            if !attribute.kind.accepts(value) {
                return Err(ValidationError::UnexpectedType {
                    name: attribute.name,
                    expected: attribute.kind.name(),
                });
            }
        }

        for attribute in &self.attributes {
            if attribute.mode == AttributeMode::Required
                && (!data.is_set(attribute.name)
                    || (attribute.kind == AttributeType::String
                        && data.get_str(attribute.name).is_empty()))
            {
                return Err(ValidationError::MissingAttribute(attribute.name));
            }

            if let Some(validator) = attribute.validate.filter(|_| data.is_set(attribute.name)) {
                validator(attribute.name, data.get_str(attribute.name))?;
            }
        }

        Ok(())
    }

    /// Names of the configurable attributes whose value changed between `old` and `new`
    pub fn changed_attributes(&self, old: &ResourceData, new: &ResourceData) -> Vec<&'static str> {
        let computed: Vec<&str> = self
            .attributes
            .iter()
            .filter(|attribute| attribute.mode == AttributeMode::Computed)
            .map(|attribute| attribute.name)
            .collect();

        old.differing_attributes(new, &computed)
            .iter()
            .filter_map(|name| self.get(name))
            .map(|attribute| attribute.name)
            .collect()
    }

    /// Returns `true` if going from `old` to `new` changes a force-new attribute
    pub fn requires_replacement(&self, old: &ResourceData, new: &ResourceData) -> bool {
        self.changed_attributes(old, new)
            .into_iter()
            .any(|name| self.get(name).is_some_and(|attribute| attribute.force_new))
    }
}

/// Accepts absolute `http` and `https` URLs with a host
pub fn validate_url(name: &'static str, value: &str) -> Result<(), ValidationError> {
    let url = Url::parse(value).map_err(|err| ValidationError::InvalidValue {
        name,
        reason: format!("'{value}' is not a valid URL: {err}"),
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ValidationError::InvalidValue {
            name,
            reason: format!("'{value}' must use the http or https scheme"),
        });
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(ValidationError::InvalidValue {
            name,
            reason: format!("'{value}' has no host"),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{Attribute, AttributeMode, AttributeType, Schema, validate_url};
    use crate::error::ValidationError;
    use crate::resource::data::ResourceData;

    /// A small schema covering every attribute flavor
    fn schema() -> Schema {
        Schema::new()
            .add_attribute(
                Attribute::new("project", AttributeType::String, AttributeMode::Required)
                    .force_new(),
            )
            .add_attribute(
                Attribute::new("url", AttributeType::String, AttributeMode::Required)
                    .validate_with(validate_url),
            )
            .add_attribute(Attribute::new(
                "push_events",
                AttributeType::Bool,
                AttributeMode::OptionalComputed,
            ))
            .add_attribute(Attribute::new(
                "title",
                AttributeType::String,
                AttributeMode::Computed,
            ))
    }

    /// A configuration accepted by [`schema`]
    fn valid_data() -> ResourceData {
        let mut data = ResourceData::default();
        data.set("project", "42");
        data.set("url", "https://jenkins.example.com");
        data
    }

    #[test]
    fn accepts_valid_data() {
        let mut data = valid_data();
        assert_eq!(schema().validate(&data), Ok(()));

        data.set("push_events", true);
        data.set("title", "Jenkins");
        assert_eq!(schema().validate(&data), Ok(()));
    }

    #[test]
    fn rejects_missing_or_empty_required_attributes() {
        let mut data = valid_data();
        data.attributes.remove("project");
        assert_eq!(
            schema().validate(&data),
            Err(ValidationError::MissingAttribute("project"))
        );

        data.set("project", "");
        assert_eq!(
            schema().validate(&data),
            Err(ValidationError::MissingAttribute("project"))
        );
    }

    #[test]
    fn rejects_unknown_attributes_and_wrong_types() {
        let mut data = valid_data();
        data.set("push_events", "true");
        assert_eq!(
            schema().validate(&data),
            Err(ValidationError::UnexpectedType {
                name: "push_events",
                expected: "boolean"
            })
        );

        let mut data = valid_data();
        data.set("issues", true);
        assert_eq!(
            schema().validate(&data),
            Err(ValidationError::UnknownAttribute("issues".to_owned()))
        );
    }

    #[test]
    fn url_validator() {
        assert!(validate_url("url", "https://jenkins.example.com").is_ok());
        assert!(validate_url("url", "http://10.0.0.1:8080/jenkins").is_ok());

        for bad_url in ["jenkins.example.com", "ftp://jenkins.example.com", "https://", ""] {
            assert!(
                matches!(
                    validate_url("url", bad_url),
                    Err(ValidationError::InvalidValue { name: "url", .. })
                ),
                "{bad_url} should be rejected"
            );
        }
    }

    #[test]
    fn changes_and_replacement() {
        let old = valid_data();

        let mut new = valid_data();
        new.set("title", "Jenkins");
        assert!(schema().changed_attributes(&old, &new).is_empty());

        new.set("url", "https://other.example.com");
        assert_eq!(schema().changed_attributes(&old, &new), vec!["url"]);
        assert!(!schema().requires_replacement(&old, &new));

        new.set("project", "43");
        assert_eq!(
            schema().changed_attributes(&old, &new),
            vec!["project", "url"]
        );
        assert!(schema().requires_replacement(&old, &new));
    }
}

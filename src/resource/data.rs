//! Defines [`ResourceData`], the configuration of a resource and the state we keep about it

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Identifier and attributes of a managed resource
///
/// An empty `id` means the resource doesn't exist (anymore)
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct ResourceData {
    /// Resource identifier
    #[serde(default)]
    pub id: String,
    /// Attribute values, only scalars are used
    #[serde(default)]
    pub attributes: BTreeMap<String, Value>,
}

impl ResourceData {
    /// Creates an empty [`ResourceData`] with the given `id`
    pub fn with_id(id: &str) -> Self {
        Self {
            id: id.to_owned(),
            attributes: BTreeMap::new(),
        }
    }

    /// Returns the string value of `name`, or `""` when unset
    pub fn get_str(&self, name: &str) -> &str {
        self.attributes
            .get(name)
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    /// Returns the boolean value of `name`, or `false` when unset
    pub fn get_bool(&self, name: &str) -> bool {
        self.attributes
            .get(name)
            .and_then(Value::as_bool)
            .unwrap_or_default()
    }

    /// Returns `true` if `name` holds a value
    pub fn is_set(&self, name: &str) -> bool {
        self.attributes
            .get(name)
            .is_some_and(|value| !value.is_null())
    }

    /// Sets `name` to `value`
    pub fn set<V: Into<Value>>(&mut self, name: &str, value: V) {
        self.attributes.insert(name.to_owned(), value.into());
    }

    /// Sets the resource identifier, an empty string removes the resource
    pub fn set_id(&mut self, id: &str) {
        id.clone_into(&mut self.id);
    }

    /// Returns `true` once the resource has been removed
    pub fn is_removed(&self) -> bool {
        self.id.is_empty()
    }

    /// Names of the attributes whose value differs from `other`, skipping `ignore`
    ///
    /// A missing attribute is compared as `null`
    pub fn differing_attributes(&self, other: &Self, ignore: &[&str]) -> Vec<String> {
        let mut names: Vec<&String> = self
            .attributes
            .keys()
            .chain(other.attributes.keys())
            .collect();
        names.sort_unstable();
        names.dedup();

        names
            .into_iter()
            .filter(|name| !ignore.contains(&name.as_str()))
            .filter(|name| {
                self.attributes.get(*name).unwrap_or(&Value::Null)
                    != other.attributes.get(*name).unwrap_or(&Value::Null)
            })
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::ResourceData;

    #[test]
    /// Unset attributes read as zero values
    fn unset_attributes_are_zero_values() {
        let data = ResourceData::with_id("42");

        assert_eq!(data.get_str("url"), "");
        assert!(!data.get_bool("push_events"));
        assert!(!data.is_set("url"));
        assert!(!data.is_removed());
    }

    #[test]
    /// Values of the wrong type read as zero values too
    fn wrong_types_are_zero_values() {
        let mut data = ResourceData::default();
        data.set("url", true);
        data.set("push_events", "yes");

        assert_eq!(data.get_str("url"), "");
        assert!(!data.get_bool("push_events"));
        assert!(data.is_removed());
    }

    #[test]
    /// Check which attributes are reported as different
    fn differing_attributes_skips_ignored_ones() {
        let mut left = ResourceData::with_id("42");
        left.set("project", "42");
        left.set("password", "secret");
        left.set("push_events", true);

        let mut right = ResourceData::with_id("42");
        right.set("project", "42");
        right.set("push_events", false);
        right.set("title", "Jenkins");

        assert_eq!(
            left.differing_attributes(&right, &["password"]),
            vec!["push_events".to_owned(), "title".to_owned()]
        );
        assert!(left.differing_attributes(&left, &[]).is_empty());
    }

    #[test]
    /// The JSON document exchanged with the CLI
    fn deserialize_from_json() {
        let data: ResourceData = serde_json::from_str(
            r#"{"id": "group/project", "attributes": {"url": "https://jenkins.example.com", "push_events": true}}"#,
        )
        .unwrap();

        assert_eq!(data.id, "group/project");
        assert_eq!(data.get_str("url"), "https://jenkins.example.com");
        assert!(data.get_bool("push_events"));

        let empty: ResourceData = serde_json::from_str("{}").unwrap();
        assert!(empty.is_removed());
        assert!(empty.attributes.is_empty());
    }
}

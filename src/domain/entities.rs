//! Domain entities: guide entries and the registry that holds them

use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a guide entry.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntryId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for EntryId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for EntryId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// One help topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuideEntry {
    pub id: EntryId,
    /// Localization key of the display label
    pub name: String,
    /// Resource path of the rich-text body
    pub text: String,
    /// Child entries, in display order
    #[serde(default)]
    pub children: Vec<EntryId>,
    /// Ordering key, only consulted for roots
    #[serde(default)]
    pub priority: i32,
    #[serde(default)]
    pub rule_entry: bool,
    #[serde(default)]
    pub filter_enabled: bool,
}

impl GuideEntry {
    pub fn new(id: impl Into<EntryId>, name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            text: text.into(),
            children: Vec::new(),
            priority: 0,
            rule_entry: false,
            filter_enabled: false,
        }
    }

    pub fn with_children<I, S>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<EntryId>,
    {
        self.children = children.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn rule_entry(mut self) -> Self {
        self.rule_entry = true;
        self
    }

    pub fn filter_enabled(mut self) -> Self {
        self.filter_enabled = true;
        self
    }
}

/// Complete set of guide entries, keyed by id.
///
/// Ordered by id so that derived roots with equal priority come out in a
/// stable order.
pub type GuideRegistry = BTreeMap<EntryId, GuideEntry>;

/// Build a registry from a list of entries. Later entries replace earlier ones.
pub fn registry_from<I>(entries: I) -> GuideRegistry
where
    I: IntoIterator<Item = GuideEntry>,
{
    entries.into_iter().map(|e| (e.id.clone(), e)).collect()
}

/// On-disk shape of a guide definition file: `[[guide]]` tables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GuideDefinitionFile {
    #[serde(default, rename = "guide")]
    pub guides: Vec<GuideEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_definition_file_when_parsing_then_applies_defaults() {
        let content = r#"
[[guide]]
id = "Engineering"
name = "guide-entry-engineering"
text = "/Guides/Engineering.txt"
children = ["Power", "Atmos"]

[[guide]]
id = "Power"
name = "guide-entry-power"
text = "/Guides/Power.txt"
priority = 3
filter_enabled = true
"#;
        let file: GuideDefinitionFile = toml::from_str(content).unwrap();
        assert_eq!(file.guides.len(), 2);

        let engineering = &file.guides[0];
        assert_eq!(engineering.children, vec![EntryId::from("Power"), EntryId::from("Atmos")]);
        assert_eq!(engineering.priority, 0);
        assert!(!engineering.rule_entry);

        let power = &file.guides[1];
        assert_eq!(power.priority, 3);
        assert!(power.filter_enabled);
    }

    #[test]
    fn given_registry_when_looking_up_by_str_then_finds_entry() {
        let registry = registry_from([GuideEntry::new("A", "a", "/a.txt")]);
        assert!(registry.contains_key("A"));
        assert!(!registry.contains_key("B"));
    }
}

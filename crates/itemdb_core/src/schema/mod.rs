//! items.xml attribute schemas.
//!
//! Each supported server dialect ("tfs-1.4", "canary", ...) carries its own
//! immutable attribute schema: which keys items.xml may use, how they are
//! typed and grouped, and how the file itself is shaped (encoding, whether
//! `fromid`/`toid` ranges may be written).
//!
//! Schemas are compiled-in constants. Callers select one by name through
//! [`get`] and pass the reference around explicitly; there is no mutable
//! "current schema" state anywhere in the workspace.

mod dialects;

use std::collections::HashMap;
use std::sync::LazyLock;

/// Value type of an items.xml attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeValueType {
    /// Free-form string.
    String,
    /// Numeric value.
    Number,
    /// Boolean (0/1).
    Boolean,
    /// One of a fixed set of named values.
    Mixed,
}

/// Where an attribute is written in the XML.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AttributePlacement {
    /// As an attribute on the `<item>` tag itself.
    Tag,
    /// As a nested `<attribute key value>` element.
    #[default]
    Nested,
}

/// Text encoding of the items.xml file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XmlEncoding {
    /// UTF-8.
    Utf8,
    /// ISO-8859-1, used by the pre-1.0 dialects.
    Latin1,
}

impl XmlEncoding {
    /// The encoding name as written in the XML declaration.
    #[must_use]
    pub const fn header_name(self) -> &'static str {
        match self {
            Self::Utf8 => "UTF-8",
            Self::Latin1 => "ISO-8859-1",
        }
    }
}

/// One attribute definition in a dialect schema.
#[derive(Debug, Clone)]
pub struct ItemAttribute {
    /// Attribute key as it appears in items.xml.
    pub key: &'static str,
    /// Value type.
    pub value_type: AttributeValueType,
    /// Display grouping (purely informational).
    pub category: &'static str,
    /// Tag or nested placement.
    pub placement: AttributePlacement,
    /// Explicit write-order priority; lower writes first.
    pub order: Option<u32>,
    /// Allowed values for `Mixed` attributes.
    pub values: Option<&'static [&'static str]>,
    /// Child attribute definitions (one level of nesting).
    pub children: Option<Vec<ItemAttribute>>,
}

impl ItemAttribute {
    /// Creates a nested attribute definition.
    #[must_use]
    pub fn new(key: &'static str, value_type: AttributeValueType, category: &'static str) -> Self {
        Self {
            key,
            value_type,
            category,
            placement: AttributePlacement::Nested,
            order: None,
            values: None,
            children: None,
        }
    }

    /// Places this attribute on the `<item>` tag.
    #[must_use]
    pub fn tag(mut self) -> Self {
        self.placement = AttributePlacement::Tag;
        self
    }

    /// Sets the explicit write-order priority.
    #[must_use]
    pub fn order(mut self, order: u32) -> Self {
        self.order = Some(order);
        self
    }

    /// Restricts the attribute to a fixed value set.
    #[must_use]
    pub fn values(mut self, values: &'static [&'static str]) -> Self {
        self.values = Some(values);
        self
    }

    /// Attaches child attribute definitions.
    #[must_use]
    pub fn children(mut self, children: Vec<ItemAttribute>) -> Self {
        self.children = Some(children);
        self
    }
}

/// The attribute schema of one server dialect.
#[derive(Debug, Clone)]
pub struct AttributeSchema {
    /// Stable dialect name used for selection, e.g. `tfs-1.4`.
    pub server: &'static str,
    /// Human-readable name.
    pub display_name: &'static str,
    /// Whether the writer may merge consecutive identical items into one
    /// `fromid`/`toid` element.
    pub supports_from_to_id: bool,
    /// items.xml text encoding.
    pub encoding: XmlEncoding,
    /// Attribute definitions in display order.
    pub attributes: Vec<ItemAttribute>,
}

impl AttributeSchema {
    /// Categories in definition order, de-duplicated.
    #[must_use]
    pub fn categories(&self) -> Vec<&'static str> {
        let mut seen = Vec::new();
        for attr in &self.attributes {
            if !seen.contains(&attr.category) {
                seen.push(attr.category);
            }
        }
        seen
    }

    /// Attributes belonging to one category, in definition order.
    #[must_use]
    pub fn attributes_in_category(&self, category: &str) -> Vec<&ItemAttribute> {
        self.attributes
            .iter()
            .filter(|a| a.category == category)
            .collect()
    }

    /// All attribute keys, depth-first: each top-level key followed by its
    /// child keys.
    #[must_use]
    pub fn flattened_keys(&self) -> Vec<&'static str> {
        let mut keys = Vec::new();
        for attr in &self.attributes {
            keys.push(attr.key);
            if let Some(children) = &attr.children {
                for child in children {
                    keys.push(child.key);
                }
            }
        }
        keys
    }

    /// Keys of attributes written on the `<item>` tag.
    #[must_use]
    pub fn tag_keys(&self) -> Vec<&'static str> {
        self.attributes
            .iter()
            .filter(|a| a.placement == AttributePlacement::Tag)
            .map(|a| a.key)
            .collect()
    }

    /// Map of key to explicit write-order priority.
    ///
    /// Only attributes with an explicit order appear; everything else is
    /// sorted alphabetically after them by the XML writer.
    #[must_use]
    pub fn priority_map(&self) -> HashMap<&'static str, u32> {
        self.attributes
            .iter()
            .filter_map(|a| a.order.map(|o| (a.key, o)))
            .collect()
    }

    /// Case-insensitive substring search over top-level keys.
    #[must_use]
    pub fn search(&self, needle: &str) -> Vec<&ItemAttribute> {
        let needle = needle.to_ascii_lowercase();
        self.attributes
            .iter()
            .filter(|a| a.key.to_ascii_lowercase().contains(&needle))
            .collect()
    }

    /// True if `key` matches some flattened key, ignoring ASCII case.
    #[must_use]
    pub fn knows_key(&self, key: &str) -> bool {
        self.flattened_keys()
            .iter()
            .any(|k| k.eq_ignore_ascii_case(key))
    }
}

static SCHEMAS: LazyLock<Vec<AttributeSchema>> = LazyLock::new(dialects::build_all);

/// Looks up a dialect schema by name.
///
/// Unknown names return `None`; that is not an error.
#[must_use]
pub fn get(name: &str) -> Option<&'static AttributeSchema> {
    SCHEMAS.iter().find(|s| s.server == name)
}

/// Names of all known dialects, in definition order.
#[must_use]
pub fn names() -> Vec<&'static str> {
    SCHEMAS.iter().map(|s| s.server).collect()
}

/// All known dialect schemas.
#[must_use]
pub fn all() -> &'static [AttributeSchema] {
    &SCHEMAS
}

//! Codec options.

/// Options for reading items.xml.
#[derive(Debug, Clone)]
pub struct XmlReadOptions {
    /// Tag attributes (besides id/fromid/toid) the caller considers known.
    /// Anything else lands in the read report's `missing_tag_attributes`.
    pub known_tag_attributes: Vec<String>,
}

impl Default for XmlReadOptions {
    fn default() -> Self {
        Self {
            known_tag_attributes: ["name", "article", "plural", "editorsuffix"]
                .map(String::from)
                .to_vec(),
        }
    }
}

/// Options for writing items.xml.
#[derive(Debug, Clone)]
pub struct XmlWriteOptions {
    /// Keys written as attributes on the `<item>` tag, in emission order.
    /// Empty values are suppressed, except `name` which is kept once present.
    pub tag_attribute_order: Vec<String>,
}

impl Default for XmlWriteOptions {
    fn default() -> Self {
        Self {
            tag_attribute_order: ["article", "name", "plural", "editorsuffix"]
                .map(String::from)
                .to_vec(),
        }
    }
}

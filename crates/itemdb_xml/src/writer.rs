//! items.xml emission.

use crate::options::XmlWriteOptions;
use itemdb_core::schema::AttributeSchema;
use itemdb_core::{ServerItem, ServerItemList, XmlAttributeValue};
use std::fmt::Write;

/// Writes the item list's `xml_attributes` as an items.xml document.
///
/// Output is deterministic. Consecutive items (ascending ids, no gaps)
/// whose attribute sets are exactly equal merge into one `fromid`/`toid`
/// element, unless the schema disables range writing.
#[must_use]
pub fn write_items_xml(
    list: &ServerItemList,
    schema: &AttributeSchema,
    options: &XmlWriteOptions,
) -> String {
    let mut out = format!(
        "<?xml version=\"1.0\" encoding=\"{}\"?>\n<items>\n",
        schema.encoding.header_name()
    );

    let priority = schema.priority_map();
    let candidates: Vec<&ServerItem> = list
        .items()
        .filter(|item| !item.xml_attributes.is_empty())
        .collect();

    let mut index = 0;
    while index < candidates.len() {
        let first = candidates[index];
        let mut last = index;
        if schema.supports_from_to_id {
            while last + 1 < candidates.len()
                && candidates[last + 1].id == candidates[last].id + 1
                && candidates[last + 1].xml_attributes == first.xml_attributes
            {
                last += 1;
            }
        }
        write_element(
            &mut out,
            first,
            candidates[last].id,
            &priority,
            options,
        );
        index = last + 1;
    }

    out.push_str("</items>\n");
    out
}

fn write_element(
    out: &mut String,
    item: &ServerItem,
    to_id: u16,
    priority: &std::collections::HashMap<&'static str, u32>,
    options: &XmlWriteOptions,
) {
    out.push_str("\t<item ");
    if item.id == to_id {
        let _ = write!(out, "id=\"{}\"", item.id);
    } else {
        let _ = write!(out, "fromid=\"{}\" toid=\"{}\"", item.id, to_id);
    }

    for key in &options.tag_attribute_order {
        if let Some(XmlAttributeValue::Leaf(value)) = item.xml_attributes.get(key) {
            // Empty tag values are suppressed, except the name.
            if value.is_empty() && key != "name" {
                continue;
            }
            let _ = write!(out, " {}=\"{}\"", key, escape_xml(value));
        }
    }

    let mut nested: Vec<(&String, &XmlAttributeValue)> = item
        .xml_attributes
        .iter()
        .filter(|(key, value)| {
            !(options.tag_attribute_order.contains(*key)
                && matches!(value, XmlAttributeValue::Leaf(_)))
        })
        .collect();
    nested.sort_by(|(a, _), (b, _)| {
        let pa = priority.get(a.as_str()).copied().unwrap_or(u32::MAX);
        let pb = priority.get(b.as_str()).copied().unwrap_or(u32::MAX);
        pa.cmp(&pb).then_with(|| a.cmp(b))
    });

    if nested.is_empty() {
        out.push_str("/>\n");
        return;
    }

    out.push_str(">\n");
    for (key, value) in nested {
        match value {
            XmlAttributeValue::Leaf(leaf) => {
                let _ = writeln!(
                    out,
                    "\t\t<attribute key=\"{}\" value=\"{}\"/>",
                    escape_xml(key),
                    escape_xml(leaf)
                );
            }
            XmlAttributeValue::Nested {
                parent_value,
                children,
            } => {
                let _ = write!(out, "\t\t<attribute key=\"{}\"", escape_xml(key));
                if let Some(parent) = parent_value {
                    let _ = write!(out, " value=\"{}\"", escape_xml(parent));
                }
                out.push_str(">\n");
                // BTreeMap iteration keeps the children alphabetical.
                for (child_key, child_value) in children {
                    let _ = writeln!(
                        out,
                        "\t\t\t<attribute key=\"{}\" value=\"{}\"/>",
                        escape_xml(child_key),
                        escape_xml(child_value)
                    );
                }
                out.push_str("\t\t</attribute>\n");
            }
        }
    }
    out.push_str("\t</item>\n");
}

/// Escapes the four characters items.xml consumers require.
fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

//! items.xml parsing.

use crate::error::{XmlError, XmlResult};
use crate::options::XmlReadOptions;
use itemdb_core::schema::AttributeSchema;
use itemdb_core::{ServerItemList, XmlAttributeValue};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::BTreeMap;

/// Outcome of a successful items.xml read.
///
/// The diagnostic lists are advisory: unknown keys never fail the read,
/// they are collected here (sorted, de-duplicated) for the caller to report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlReadReport {
    /// Number of store items that received attributes.
    pub items_applied: usize,
    /// Nested attribute keys absent from the active schema.
    pub missing_attributes: Vec<String>,
    /// Tag attributes absent from the known-tag set.
    pub missing_tag_attributes: Vec<String>,
}

/// One parsed `<attribute>` element before schema checks.
#[derive(Debug, Default)]
struct RawAttribute {
    key: Option<String>,
    value: Option<String>,
    children: Vec<RawAttribute>,
}

/// One parsed `<item>` element before application.
#[derive(Debug, Default)]
struct RawItem {
    id: Option<String>,
    from_id: Option<String>,
    to_id: Option<String>,
    tag_attrs: Vec<(String, String)>,
    attributes: Vec<RawAttribute>,
}

/// Reads items.xml content into the item list's `xml_attributes`.
///
/// Each `<item>` element addresses either one `id` or an inclusive
/// `fromid`/`toid` range; ids absent from the store are silently skipped.
///
/// # Errors
///
/// Fails only on structurally malformed XML. Unknown keys are reported in
/// the returned [`XmlReadReport`] instead.
pub fn read_items_xml(
    xml: &str,
    list: &mut ServerItemList,
    schema: &AttributeSchema,
    options: &XmlReadOptions,
) -> XmlResult<XmlReadReport> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut report = XmlReadReport::default();
    let mut missing_attrs: Vec<String> = Vec::new();
    let mut missing_tags: Vec<String> = Vec::new();

    loop {
        match read_event(&mut reader)? {
            Event::Start(e) if e.local_name().as_ref() == b"item" => {
                let raw = parse_item(&mut reader, &e, false)?;
                apply_item(
                    &raw,
                    list,
                    schema,
                    options,
                    &mut report,
                    &mut missing_attrs,
                    &mut missing_tags,
                )?;
            }
            Event::Empty(e) if e.local_name().as_ref() == b"item" => {
                let raw = parse_item(&mut reader, &e, true)?;
                apply_item(
                    &raw,
                    list,
                    schema,
                    options,
                    &mut report,
                    &mut missing_attrs,
                    &mut missing_tags,
                )?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    report.missing_attributes = sort_dedup_ci(missing_attrs);
    report.missing_tag_attributes = sort_dedup_ci(missing_tags);
    Ok(report)
}

fn read_event<'a>(reader: &mut Reader<&'a [u8]>) -> XmlResult<Event<'a>> {
    reader
        .read_event()
        .map_err(|e| XmlError::malformed(e.to_string()))
}

fn element_attributes(start: &BytesStart<'_>) -> XmlResult<Vec<(String, String)>> {
    let mut attrs = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| XmlError::malformed(e.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| XmlError::malformed(e.to_string()))?
            .into_owned();
        attrs.push((key, value));
    }
    Ok(attrs)
}

fn parse_item(
    reader: &mut Reader<&[u8]>,
    start: &BytesStart<'_>,
    is_empty: bool,
) -> XmlResult<RawItem> {
    let mut item = RawItem::default();
    for (key, value) in element_attributes(start)? {
        match key.as_str() {
            "id" => item.id = Some(value),
            "fromid" => item.from_id = Some(value),
            "toid" => item.to_id = Some(value),
            _ => item.tag_attrs.push((key, value)),
        }
    }
    if is_empty {
        return Ok(item);
    }
    loop {
        match read_event(reader)? {
            Event::Start(e) if e.local_name().as_ref() == b"attribute" => {
                let parsed = parse_attribute(reader, &e, false)?;
                item.attributes.push(parsed);
            }
            Event::Empty(e) if e.local_name().as_ref() == b"attribute" => {
                let parsed = parse_attribute(reader, &e, true)?;
                item.attributes.push(parsed);
            }
            Event::Start(_) => skip_element(reader)?,
            Event::End(e) if e.local_name().as_ref() == b"item" => break,
            Event::Eof => return Err(XmlError::malformed("unterminated <item> element")),
            _ => {}
        }
    }
    Ok(item)
}

fn parse_attribute(
    reader: &mut Reader<&[u8]>,
    start: &BytesStart<'_>,
    is_empty: bool,
) -> XmlResult<RawAttribute> {
    let mut attribute = RawAttribute::default();
    for (key, value) in element_attributes(start)? {
        match key.as_str() {
            "key" => attribute.key = Some(value),
            "value" => attribute.value = Some(value),
            _ => {}
        }
    }
    if is_empty {
        return Ok(attribute);
    }
    loop {
        match read_event(reader)? {
            Event::Start(e) if e.local_name().as_ref() == b"attribute" => {
                let child = parse_attribute(reader, &e, false)?;
                attribute.children.push(child);
            }
            Event::Empty(e) if e.local_name().as_ref() == b"attribute" => {
                let child = parse_attribute(reader, &e, true)?;
                attribute.children.push(child);
            }
            Event::Start(_) => skip_element(reader)?,
            Event::End(e) if e.local_name().as_ref() == b"attribute" => break,
            Event::Eof => return Err(XmlError::malformed("unterminated <attribute> element")),
            _ => {}
        }
    }
    Ok(attribute)
}

/// Skips over an already-opened element, including nested children.
fn skip_element(reader: &mut Reader<&[u8]>) -> XmlResult<()> {
    let mut depth = 1usize;
    loop {
        match read_event(reader)? {
            Event::Start(_) => depth += 1,
            Event::End(_) => {
                depth -= 1;
                if depth == 0 {
                    return Ok(());
                }
            }
            Event::Eof => return Err(XmlError::malformed("unterminated element")),
            _ => {}
        }
    }
}

fn parse_id(text: &str, what: &str) -> XmlResult<u16> {
    text.trim()
        .parse()
        .map_err(|_| XmlError::malformed(format!("invalid {what}: {text:?}")))
}

fn apply_item(
    raw: &RawItem,
    list: &mut ServerItemList,
    schema: &AttributeSchema,
    options: &XmlReadOptions,
    report: &mut XmlReadReport,
    missing_attrs: &mut Vec<String>,
    missing_tags: &mut Vec<String>,
) -> XmlResult<()> {
    let (first, last) = match (&raw.id, &raw.from_id, &raw.to_id) {
        (Some(id), _, _) => {
            let id = parse_id(id, "id")?;
            (id, id)
        }
        (None, Some(from), Some(to)) => (parse_id(from, "fromid")?, parse_id(to, "toid")?),
        _ => return Err(XmlError::malformed("item element without id or fromid/toid")),
    };

    let mut attributes: BTreeMap<String, XmlAttributeValue> = BTreeMap::new();

    for (key, value) in &raw.tag_attrs {
        if !options.known_tag_attributes.contains(key) {
            missing_tags.push(key.clone());
        }
        attributes.insert(key.clone(), XmlAttributeValue::Leaf(value.clone()));
    }

    for attribute in &raw.attributes {
        let Some(key) = &attribute.key else {
            return Err(XmlError::malformed("attribute element without key"));
        };
        if !schema.knows_key(key) {
            missing_attrs.push(key.clone());
        }
        let value = if attribute.children.is_empty() {
            XmlAttributeValue::Leaf(attribute.value.clone().unwrap_or_default())
        } else {
            let mut children = BTreeMap::new();
            for child in &attribute.children {
                let Some(child_key) = &child.key else {
                    return Err(XmlError::malformed("attribute element without key"));
                };
                if !schema.knows_key(child_key) {
                    missing_attrs.push(child_key.clone());
                }
                children.insert(child_key.clone(), child.value.clone().unwrap_or_default());
            }
            XmlAttributeValue::Nested {
                parent_value: attribute.value.clone(),
                children,
            }
        };
        attributes.insert(key.clone(), value);
    }

    for id in first..=last {
        // Ids the store does not know are silently skipped, not an error.
        if let Some(item) = list.get_by_id_mut(id) {
            for (key, value) in &attributes {
                item.xml_attributes.insert(key.clone(), value.clone());
            }
            report.items_applied += 1;
        }
    }
    Ok(())
}

/// Sorts and de-duplicates ignoring ASCII case, keeping the first-seen form.
fn sort_dedup_ci(mut keys: Vec<String>) -> Vec<String> {
    keys.sort_by(|a, b| a.to_ascii_lowercase().cmp(&b.to_ascii_lowercase()));
    keys.dedup_by(|a, b| a.eq_ignore_ascii_case(b));
    keys
}

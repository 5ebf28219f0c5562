//! Writing a bound tree back out as markup

use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use serde::{Deserialize, Serialize};

use crate::schema::{FieldType, Structure};
use crate::{Error, Node, Result};

/// Namespace declared on the root element.
///
/// With a prefix the root is written as `<prefix:root xmlns:prefix="uri">`;
/// without one as `<root xmlns="uri">`. Child elements are never prefixed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct XmlNamespace {
    #[serde(default)]
    pub prefix: String,
    #[serde(default)]
    pub uri: String,
}

impl XmlNamespace {
    pub fn new(prefix: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            uri: uri.into(),
        }
    }
}

/// Fixed text surrounding the tree when it is written.
#[derive(Debug, Clone, Copy)]
pub struct SerializeOptions<'a> {
    pub root_tag: &'a str,
    pub namespace: &'a XmlNamespace,
    /// Written verbatim, one per line, between the declaration and the root.
    pub prepend_lines: &'a [String],
}

/// Render a tree as markup.
///
/// Fields come out in schema order with four-space indentation; absent
/// scalars and empty nested fields are omitted.
pub fn serialize(
    node: &Node,
    structure: &Structure,
    options: &SerializeOptions<'_>,
) -> Result<String> {
    let mut out = String::from("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
    for line in options.prepend_lines {
        out.push_str(line);
        out.push('\n');
    }

    let namespace = options.namespace;
    let (root_name, xmlns) = if namespace.prefix.is_empty() {
        (options.root_tag.to_string(), "xmlns".to_string())
    } else {
        (
            format!("{}:{}", namespace.prefix, options.root_tag),
            format!("xmlns:{}", namespace.prefix),
        )
    };

    let mut start = BytesStart::new(root_name.as_str());
    if !namespace.uri.is_empty() {
        start.push_attribute((xmlns.as_str(), namespace.uri.as_str()));
    }

    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 4);
    write_element(&mut writer, node, structure, &structure.root, start, &root_name)?;

    let body = String::from_utf8(writer.into_inner()).map_err(Error::serialize)?;
    out.push_str(&body);
    out.push('\n');
    Ok(out)
}

fn write_element(
    writer: &mut Writer<Vec<u8>>,
    node: &Node,
    structure: &Structure,
    kind: &str,
    mut start: BytesStart<'_>,
    name: &str,
) -> Result<()> {
    let schema = structure.kind(kind)?;

    for field in schema.fields.iter().filter(|f| f.attribute) {
        if let Some(value) = node.value(&field.name) {
            start.push_attribute((field.name.as_str(), value));
        }
    }

    let has_content = schema.fields.iter().filter(|f| !f.attribute).any(|f| {
        node.value(&f.name).is_some() || !node.children(&f.name).is_empty()
    });
    if !has_content {
        return emit(writer, Event::Empty(start));
    }

    emit(writer, Event::Start(start))?;
    for field in schema.fields.iter().filter(|f| !f.attribute) {
        match &field.ty {
            FieldType::Struct(nested_kind) => {
                for child in node.children(&field.name) {
                    write_element(
                        writer,
                        child,
                        structure,
                        nested_kind,
                        BytesStart::new(field.name.as_str()),
                        &field.name,
                    )?;
                }
            }
            _ => {
                if let Some(value) = node.value(&field.name) {
                    emit(writer, Event::Start(BytesStart::new(field.name.as_str())))?;
                    emit(writer, Event::Text(BytesText::new(value)))?;
                    emit(writer, Event::End(BytesEnd::new(field.name.as_str())))?;
                }
            }
        }
    }
    emit(writer, Event::End(BytesEnd::new(name)))
}

fn emit(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<()> {
    writer.write_event(event).map_err(Error::serialize)
}

//! Markup reading and schema binding
//!
//! Reading happens in two passes: the markup is first read into a plain
//! element tree, which is then bound against the [`Structure`] to produce
//! a [`Node`] tree. Binding fails on anything the schema does not
//! describe; presence and value checks are left to [`crate::validate`].

use std::collections::BTreeSet;

use quick_xml::Reader;
use quick_xml::encoding::Decoder;
use quick_xml::events::{BytesStart, Event};

use crate::binding::NodeFactory;
use crate::schema::{FieldType, Structure};
use crate::{Error, Node, Result};

/// Parse markup into a tree bound to `structure`.
///
/// The root element's local name must equal `root_tag`. Namespace
/// prefixes are ignored on element and attribute names, as are namespace
/// declarations and prefixed attributes such as `xsi:schemaLocation`.
/// Scalars with empty text are treated as absent.
///
/// `source` is raw markup; its encoding is taken from a byte order mark or
/// the XML declaration and defaults to UTF-8. Bytes that do not decode are
/// reported as [`Error::Xml`].
pub fn parse<F>(
    source: impl AsRef<[u8]>,
    structure: &Structure,
    root_tag: &str,
    factory: &F,
) -> Result<Node>
where
    F: NodeFactory<Node>,
{
    let root = read_elements(source.as_ref())?;
    if root.name != root_tag {
        return Err(Error::RootMismatch {
            expected: root_tag.to_string(),
            found: root.name,
        });
    }
    bind(&root, structure, &structure.root, factory, root_tag)
}

#[derive(Debug, Default)]
struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    text: String,
    children: Vec<Element>,
}

fn read_elements(source: &[u8]) -> Result<Element> {
    let mut reader = Reader::from_reader(source);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let position = reader.buffer_position() as u64;
        let event = match reader.read_event_into(&mut buf) {
            Ok(event) => event,
            Err(e) => return Err(Error::xml(position, e)),
        };
        let decoder = reader.decoder();

        match event {
            Event::Start(start) => stack.push(element_from(&start, decoder, position)?),
            Event::Empty(start) => {
                let element = element_from(&start, decoder, position)?;
                attach(&mut stack, &mut root, element, position)?;
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| Error::xml(position, "closing tag without opening tag"))?;
                attach(&mut stack, &mut root, element, position)?;
            }
            Event::Text(text) => {
                let text = text.unescape().map_err(|e| Error::xml(position, e))?;
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&text);
                }
            }
            Event::CData(data) => {
                let text = decoder.decode(&data).map_err(|e| Error::xml(position, e))?;
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&text);
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if let Some(open) = stack.last() {
        return Err(Error::xml(
            reader.buffer_position() as u64,
            format!("element <{}> is never closed", open.name),
        ));
    }
    root.ok_or_else(|| Error::xml(0, "document has no root element"))
}

fn element_from(start: &BytesStart<'_>, decoder: Decoder, position: u64) -> Result<Element> {
    let decode = |bytes: &[u8]| -> Result<String> {
        decoder
            .decode(bytes)
            .map(|name| name.into_owned())
            .map_err(|e| Error::xml(position, e))
    };

    let name = decode(start.local_name().as_ref())?;
    let mut attributes = Vec::new();

    for attr in start.attributes() {
        let attr = attr.map_err(|e| Error::xml(position, e))?;
        if attr.key.as_ref().starts_with(b"xmlns") || attr.key.prefix().is_some() {
            continue;
        }
        let key = decode(attr.key.local_name().as_ref())?;
        let value = attr
            .decode_and_unescape_value(decoder)
            .map_err(|e| Error::xml(position, e))?
            .into_owned();
        attributes.push((key, value));
    }

    Ok(Element {
        name,
        attributes,
        ..Element::default()
    })
}

fn attach(
    stack: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
    position: u64,
) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
        return Ok(());
    }
    if root.is_some() {
        return Err(Error::xml(position, "document has more than one root element"));
    }
    *root = Some(element);
    Ok(())
}

fn bind<F>(
    element: &Element,
    structure: &Structure,
    kind: &str,
    factory: &F,
    path: &str,
) -> Result<Node>
where
    F: NodeFactory<Node>,
{
    let schema = structure.kind(kind)?;
    let mut node = factory.create(kind);

    for (name, value) in &element.attributes {
        let field = schema
            .get(name)
            .filter(|f| f.attribute)
            .ok_or_else(|| Error::UnexpectedAttribute {
                path: path.to_string(),
                name: name.clone(),
            })?;
        if !value.is_empty() {
            node.set_value(field.name.clone(), value.clone());
        }
    }

    let mut seen_scalars = BTreeSet::new();
    for child in &element.children {
        let field = schema
            .get(&child.name)
            .filter(|f| !f.attribute)
            .ok_or_else(|| Error::UnexpectedElement {
                path: path.to_string(),
                name: child.name.clone(),
            })?;

        match &field.ty {
            FieldType::Struct(nested_kind) => {
                let index = node.children(&field.name).len();
                let child_path = if field.cardinality.is_many() {
                    format!("{path}/{}[{index}]", field.name)
                } else if index > 0 {
                    return Err(Error::TooMany {
                        path: path.to_string(),
                        field: field.name.clone(),
                        count: index + 1,
                    });
                } else {
                    format!("{path}/{}", field.name)
                };
                let bound = bind(child, structure, nested_kind, factory, &child_path)?;
                node.push_child(field.name.clone(), bound);
            }
            _ => {
                if let Some(nested) = child.children.first() {
                    return Err(Error::UnexpectedElement {
                        path: format!("{path}/{}", field.name),
                        name: nested.name.clone(),
                    });
                }
                if !seen_scalars.insert(field.name.as_str()) {
                    return Err(Error::TooMany {
                        path: path.to_string(),
                        field: field.name.clone(),
                        count: 2,
                    });
                }
                if !child.text.is_empty() {
                    node.set_value(field.name.clone(), child.text.clone());
                }
            }
        }
    }

    Ok(node)
}

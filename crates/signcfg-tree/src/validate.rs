//! Structural validation of a bound tree

use crate::schema::{Cardinality, FieldType, Structure};
use crate::{Error, Node, Result};

/// Validate a tree against `structure`, starting at its root kind.
///
/// `path` names the root in error messages (usually the root tag).
pub fn validate(node: &Node, structure: &Structure, path: &str) -> Result<()> {
    validate_kind(node, structure, &structure.root, path)
}

/// Validate a subtree against a specific kind.
pub fn validate_kind(node: &Node, structure: &Structure, kind: &str, path: &str) -> Result<()> {
    let schema = structure.kind(kind)?;

    for name in node.value_names() {
        if !schema.get(name).is_some_and(|f| f.is_scalar()) {
            return Err(Error::UnknownField {
                path: path.to_string(),
                name: name.to_string(),
            });
        }
    }
    for name in node.child_names() {
        if schema.get(name).is_none_or(|f| f.is_scalar()) {
            return Err(Error::UnknownField {
                path: path.to_string(),
                name: name.to_string(),
            });
        }
    }

    for field in &schema.fields {
        match &field.ty {
            FieldType::Struct(nested_kind) => {
                let children = node.children(&field.name);
                if field.cardinality == Cardinality::Required && children.is_empty() {
                    return Err(Error::MissingField {
                        path: path.to_string(),
                        field: field.name.clone(),
                    });
                }
                if !field.cardinality.is_many() && children.len() > 1 {
                    return Err(Error::TooMany {
                        path: path.to_string(),
                        field: field.name.clone(),
                        count: children.len(),
                    });
                }
                for (index, child) in children.iter().enumerate() {
                    let child_path = if field.cardinality.is_many() {
                        format!("{path}/{}[{index}]", field.name)
                    } else {
                        format!("{path}/{}", field.name)
                    };
                    validate_kind(child, structure, nested_kind, &child_path)?;
                }
            }
            ty => match node.value(&field.name) {
                None if field.cardinality == Cardinality::Required => {
                    return Err(Error::MissingField {
                        path: path.to_string(),
                        field: field.name.clone(),
                    });
                }
                Some(value) if !ty.accepts(value) => {
                    return Err(Error::InvalidValue {
                        path: path.to_string(),
                        field: field.name.clone(),
                        expected: ty.to_string(),
                        value: value.to_string(),
                    });
                }
                _ => {}
            },
        }
    }

    Ok(())
}

//! Schema description for attribute trees
//!
//! A [`Structure`] is the single source of truth for binding markup into a
//! tree, validating the tree, writing it back out and copying fields into
//! other representations. It is plain data and deserializes from profile
//! files:
//!
//! ```toml
//! root = "secimage"
//!
//! [[kinds.metadata.fields]]
//! name = "chipset"
//! type = "string"
//! cardinality = "required"
//!
//! [[kinds.images_list.fields]]
//! name = "image"
//! type = { struct = "image" }
//! cardinality = "many"
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Complete schema: the root kind plus every kind reachable from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Structure {
    /// Kind of the root node.
    pub root: String,
    /// Field layout per kind.
    #[serde(default)]
    pub kinds: BTreeMap<String, NodeSchema>,
}

impl Structure {
    /// Create a structure with the given root kind and no kinds yet.
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            kinds: BTreeMap::new(),
        }
    }

    /// Add (or replace) the layout of a kind.
    pub fn with_kind(mut self, kind: impl Into<String>, schema: NodeSchema) -> Self {
        self.kinds.insert(kind.into(), schema);
        self
    }

    /// Look up the layout of a kind.
    pub fn kind(&self, kind: &str) -> Result<&NodeSchema> {
        self.kinds.get(kind).ok_or_else(|| Error::UnknownKind {
            kind: kind.to_string(),
        })
    }

    /// Check that the structure is self-consistent.
    ///
    /// The root kind must exist, every nested kind reference must resolve,
    /// repetition is only allowed for nested kinds and only scalars may
    /// live in attributes.
    pub fn check(&self) -> Result<()> {
        self.kind(&self.root)?;
        for (kind, schema) in &self.kinds {
            for field in &schema.fields {
                match &field.ty {
                    FieldType::Struct(nested) => {
                        self.kind(nested)?;
                        if field.attribute {
                            return Err(Error::UnexpectedAttribute {
                                path: kind.clone(),
                                name: field.name.clone(),
                            });
                        }
                    }
                    _ if field.cardinality == Cardinality::Many => {
                        return Err(Error::TooMany {
                            path: kind.clone(),
                            field: field.name.clone(),
                            count: 2,
                        });
                    }
                    _ => {}
                }
            }
        }
        Ok(())
    }
}

/// Ordered field layout of one kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSchema {
    #[serde(default)]
    pub fields: Vec<FieldSchema>,
}

impl NodeSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field; fields are written out in the order they are added.
    pub fn field(mut self, field: FieldSchema) -> Self {
        self.fields.push(field);
        self
    }

    /// Find a field by name.
    pub fn get(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// One field of a kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSchema {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: FieldType,
    #[serde(default)]
    pub cardinality: Cardinality,
    /// Scalar stored as an attribute of the parent element rather than a
    /// child element.
    #[serde(default)]
    pub attribute: bool,
}

impl FieldSchema {
    pub fn required(name: impl Into<String>, ty: FieldType) -> Self {
        Self {
            name: name.into(),
            ty,
            cardinality: Cardinality::Required,
            attribute: false,
        }
    }

    pub fn optional(name: impl Into<String>, ty: FieldType) -> Self {
        Self {
            name: name.into(),
            ty,
            cardinality: Cardinality::Optional,
            attribute: false,
        }
    }

    /// A repeated nested kind.
    pub fn many(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: FieldType::Struct(kind.into()),
            cardinality: Cardinality::Many,
            attribute: false,
        }
    }

    pub fn as_attribute(mut self) -> Self {
        self.attribute = true;
        self
    }

    pub fn is_scalar(&self) -> bool {
        !matches!(self.ty, FieldType::Struct(_))
    }
}

/// Value type of a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    String,
    Bool,
    Integer,
    Hex,
    Choice(Vec<String>),
    /// Nested node of the named kind.
    Struct(String),
}

impl FieldType {
    /// Whether a scalar value conforms to this type.
    ///
    /// Nested kinds accept no scalar value.
    pub fn accepts(&self, value: &str) -> bool {
        match self {
            FieldType::String => true,
            FieldType::Bool => matches!(value, "true" | "false" | "1" | "0"),
            FieldType::Integer => {
                let digits = value.strip_prefix('-').unwrap_or(value);
                !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
            }
            FieldType::Hex => value
                .strip_prefix("0x")
                .or_else(|| value.strip_prefix("0X"))
                .is_some_and(|digits| {
                    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_hexdigit())
                }),
            FieldType::Choice(values) => values.iter().any(|v| v == value),
            FieldType::Struct(_) => false,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::String => f.write_str("string"),
            FieldType::Bool => f.write_str("boolean"),
            FieldType::Integer => f.write_str("decimal integer"),
            FieldType::Hex => f.write_str("0x-prefixed hex"),
            FieldType::Choice(values) => write!(f, "one of [{}]", values.join(", ")),
            FieldType::Struct(kind) => write!(f, "<{kind}> block"),
        }
    }
}

/// How many times a field may occur.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cardinality {
    Required,
    #[default]
    Optional,
    Many,
}

impl Cardinality {
    pub fn is_many(self) -> bool {
        self == Cardinality::Many
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_requires_prefix_and_digits() {
        assert!(FieldType::Hex.accepts("0x0008B0E1"));
        assert!(FieldType::Hex.accepts("0X1f"));
        assert!(!FieldType::Hex.accepts("0x"));
        assert!(!FieldType::Hex.accepts("1234"));
        assert!(!FieldType::Hex.accepts("0xZZ"));
    }

    #[test]
    fn integer_accepts_sign() {
        assert!(FieldType::Integer.accepts("2048"));
        assert!(FieldType::Integer.accepts("-1"));
        assert!(!FieldType::Integer.accepts("-"));
        assert!(!FieldType::Integer.accepts("0x10"));
    }

    #[test]
    fn choice_is_exact() {
        let ty = FieldType::Choice(vec!["sha256".into(), "sha384".into()]);
        assert!(ty.accepts("sha384"));
        assert!(!ty.accepts("SHA384"));
    }

    #[test]
    fn check_rejects_dangling_kind() {
        let structure = Structure::new("root").with_kind(
            "root",
            NodeSchema::new().field(FieldSchema::optional(
                "x",
                FieldType::Struct("missing".into()),
            )),
        );
        assert!(matches!(
            structure.check(),
            Err(Error::UnknownKind { kind }) if kind == "missing"
        ));
    }

    #[test]
    fn check_rejects_repeated_scalar() {
        let mut field = FieldSchema::optional("x", FieldType::String);
        field.cardinality = Cardinality::Many;
        let structure = Structure::new("root").with_kind("root", NodeSchema::new().field(field));
        assert!(matches!(structure.check(), Err(Error::TooMany { .. })));
    }

    #[test]
    fn deserializes_from_toml() {
        let text = r#"
root = "secimage"

[[kinds.secimage.fields]]
name = "images_list"
type = { struct = "images_list" }
cardinality = "required"

[[kinds.images_list.fields]]
name = "image"
type = { struct = "image" }
cardinality = "many"

[[kinds.image.fields]]
name = "sign_id"
type = "string"
cardinality = "required"
attribute = true

[[kinds.image.fields]]
name = "hash_algorithm"
type = { choice = ["sha256", "sha384"] }
"#;
        let structure: Structure = toml::from_str(text).unwrap();
        structure.check().unwrap();

        let image = structure.kind("image").unwrap();
        assert!(image.get("sign_id").unwrap().attribute);
        assert_eq!(
            image.get("hash_algorithm").unwrap().cardinality,
            Cardinality::Optional
        );
    }
}

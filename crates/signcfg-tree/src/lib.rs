//! Schema-driven attribute trees
//!
//! A [`Structure`] describes the fields of every node kind. The same
//! description drives every operation in this crate:
//!
//! - [`parse`] reads markup into a [`Node`] tree
//! - [`validate`] checks presence, cardinality and scalar types
//! - [`serialize`] writes the tree back out
//! - [`copy_fields`] moves values between any two [`Record`]
//!   representations, creating nested nodes through a [`NodeFactory`]

pub mod binding;
pub mod error;
pub mod node;
pub mod parse;
pub mod schema;
pub mod serialize;
pub mod transfer;
pub mod validate;

pub use binding::{ClassName, DocumentFactory, NodeFactory};
pub use error::{Error, Result};
pub use node::{Node, Record};
pub use parse::parse;
pub use schema::{Cardinality, FieldSchema, FieldType, NodeSchema, Structure};
pub use serialize::{SerializeOptions, XmlNamespace, serialize};
pub use transfer::copy_fields;
pub use validate::{validate, validate_kind};

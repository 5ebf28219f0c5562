//! Domain-object representation of a config
//!
//! [`ConfigObject`] is what config-generation tooling works with: a plain,
//! serializable tree whose kinds follow the domain class naming
//! (`Cfg_Secimage`, `Cfg_Image`, ...). Documents copy into and out of it
//! through the shared structure description.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use signcfg_tree::{ClassName, NodeFactory, Record};

use crate::parser::CfgParser;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigObject {
    pub kind: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub values: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub children: BTreeMap<String, Vec<ConfigObject>>,
}

impl ConfigObject {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            ..Self::default()
        }
    }

    /// Empty root object of the type `parser` expects.
    pub fn root(parser: &CfgParser) -> Self {
        Self::new(parser.object_kind())
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn set_value(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn child(&self, name: &str) -> Option<&ConfigObject> {
        self.children.get(name).and_then(|c| c.first())
    }

    pub fn child_mut(&mut self, name: &str) -> Option<&mut ConfigObject> {
        self.children.get_mut(name).and_then(|c| c.first_mut())
    }

    pub fn children(&self, name: &str) -> &[ConfigObject] {
        self.children.get(name).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl Record for ConfigObject {
    fn kind(&self) -> &str {
        &self.kind
    }

    fn scalar(&self, field: &str) -> Option<&str> {
        self.value(field)
    }

    fn set_scalar(&mut self, field: &str, value: Option<String>) {
        match value {
            Some(value) => {
                self.values.insert(field.to_string(), value);
            }
            None => {
                self.values.remove(field);
            }
        }
    }

    fn nested(&self, field: &str) -> &[Self] {
        self.children(field)
    }

    fn take_nested(&mut self, field: &str) -> Vec<Self> {
        self.children.remove(field).unwrap_or_default()
    }

    fn set_nested(&mut self, field: &str, nodes: Vec<Self>) {
        if nodes.is_empty() {
            self.children.remove(field);
        } else {
            self.children.insert(field.to_string(), nodes);
        }
    }
}

/// Builds domain objects named by the domain class naming.
#[derive(Debug, Clone)]
pub struct ObjectFactory {
    naming: ClassName,
}

impl ObjectFactory {
    pub fn new(naming: ClassName) -> Self {
        Self { naming }
    }
}

impl NodeFactory<ConfigObject> for ObjectFactory {
    fn create(&self, kind: &str) -> ConfigObject {
        ConfigObject::new(self.naming.apply(kind))
    }
}

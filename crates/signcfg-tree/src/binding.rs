//! Node construction by kind
//!
//! Every place that needs a fresh nested node asks a [`NodeFactory`] for
//! one. Which representation comes back (document node, domain object) is
//! decided by the factory handed in at the call site.

use serde::{Deserialize, Serialize};

use crate::Node;

/// Capability to construct an empty node of a schema kind.
pub trait NodeFactory<R> {
    fn create(&self, kind: &str) -> R;
}

/// Naming scheme mapping a schema kind to a binding class name.
///
/// `ClassName { prefix: "complex_", capitalize: false }` maps
/// `images_list` to `complex_images_list`;
/// `ClassName { prefix: "Cfg_", capitalize: true }` maps it to
/// `Cfg_Images_list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassName {
    #[serde(default)]
    pub prefix: String,
    #[serde(default)]
    pub capitalize: bool,
}

impl ClassName {
    pub fn new(prefix: impl Into<String>, capitalize: bool) -> Self {
        Self {
            prefix: prefix.into(),
            capitalize,
        }
    }

    pub fn apply(&self, kind: &str) -> String {
        if !self.capitalize {
            return format!("{}{}", self.prefix, kind);
        }
        let mut chars = kind.chars();
        match chars.next() {
            Some(first) => format!(
                "{}{}{}",
                self.prefix,
                first.to_uppercase(),
                chars.as_str().to_lowercase()
            ),
            None => self.prefix.clone(),
        }
    }
}

/// Builds document [`Node`]s named by a [`ClassName`] scheme.
#[derive(Debug, Clone)]
pub struct DocumentFactory {
    naming: ClassName,
}

impl DocumentFactory {
    pub fn new(naming: ClassName) -> Self {
        Self { naming }
    }

    pub fn naming(&self) -> &ClassName {
        &self.naming
    }
}

impl NodeFactory<Node> for DocumentFactory {
    fn create(&self, kind: &str) -> Node {
        Node::new(self.naming.apply(kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_name_prefix_only() {
        let naming = ClassName::new("complex_", false);
        assert_eq!(naming.apply("images_list"), "complex_images_list");
    }

    #[test]
    fn class_name_capitalized() {
        let naming = ClassName::new("Cfg_", true);
        assert_eq!(naming.apply("secimage"), "Cfg_Secimage");
        assert_eq!(naming.apply("images_list"), "Cfg_Images_list");
        assert_eq!(naming.apply("MetaData"), "Cfg_Metadata");
    }

    #[test]
    fn document_factory_names_nodes() {
        let factory = DocumentFactory::new(ClassName::new("complex_", false));
        assert_eq!(factory.create("image").kind(), "complex_image");
    }
}

//! Attribute tree nodes and the record abstraction used for field transfer

use std::collections::BTreeMap;

/// A node of a bound document.
///
/// Scalars and nested nodes are keyed by field name. Single nested fields
/// are stored as sequences of at most one node, so singular and repeated
/// fields share one representation; the schema decides which is which.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Node {
    kind: String,
    values: BTreeMap<String, String>,
    children: BTreeMap<String, Vec<Node>>,
}

impl Node {
    /// Create an empty node of the given binding kind.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            ..Self::default()
        }
    }

    /// Binding kind (class name) of this node.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn set_value(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn remove_value(&mut self, name: &str) -> Option<String> {
        self.values.remove(name)
    }

    /// First nested node stored under `name`.
    pub fn child(&self, name: &str) -> Option<&Node> {
        self.children(name).first()
    }

    pub fn child_mut(&mut self, name: &str) -> Option<&mut Node> {
        self.children.get_mut(name).and_then(|nodes| nodes.first_mut())
    }

    /// All nested nodes stored under `name`, in document order.
    pub fn children(&self, name: &str) -> &[Node] {
        self.children.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn children_mut(&mut self, name: &str) -> &mut [Node] {
        match self.children.get_mut(name) {
            Some(nodes) => nodes.as_mut_slice(),
            None => &mut [],
        }
    }

    /// First nested node under `name`, inserting one from `create` if
    /// there is none yet.
    pub fn child_or_insert_with(
        &mut self,
        name: impl Into<String>,
        create: impl FnOnce() -> Node,
    ) -> &mut Node {
        let nodes = self.children.entry(name.into()).or_default();
        if nodes.is_empty() {
            nodes.push(create());
        }
        &mut nodes[0]
    }

    pub fn push_child(&mut self, name: impl Into<String>, node: Node) {
        self.children.entry(name.into()).or_default().push(node);
    }

    /// Replace everything stored under `name`.
    pub fn set_children(&mut self, name: impl Into<String>, nodes: Vec<Node>) {
        let name = name.into();
        if nodes.is_empty() {
            self.children.remove(&name);
        } else {
            self.children.insert(name, nodes);
        }
    }

    /// Names of all scalar values present on this node.
    pub fn value_names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Names of all nested fields holding at least one node.
    pub fn child_names(&self) -> impl Iterator<Item = &str> {
        self.children
            .iter()
            .filter(|(_, nodes)| !nodes.is_empty())
            .map(|(name, _)| name.as_str())
    }
}

/// Uniform field access for anything the transfer walker copies between.
///
/// Implemented by the document tree ([`Node`]) and by domain-object
/// representations. The walker only ever goes through this trait, so both
/// sides stay ignorant of each other.
pub trait Record: Sized {
    fn kind(&self) -> &str;

    fn scalar(&self, field: &str) -> Option<&str>;

    /// Set or (with `None`) clear a scalar.
    fn set_scalar(&mut self, field: &str, value: Option<String>);

    fn nested(&self, field: &str) -> &[Self];

    /// Remove and return everything stored under `field`.
    fn take_nested(&mut self, field: &str) -> Vec<Self>;

    /// Replace everything stored under `field`; an empty vector clears it.
    fn set_nested(&mut self, field: &str, nodes: Vec<Self>);
}

impl Record for Node {
    fn kind(&self) -> &str {
        &self.kind
    }

    fn scalar(&self, field: &str) -> Option<&str> {
        self.value(field)
    }

    fn set_scalar(&mut self, field: &str, value: Option<String>) {
        match value {
            Some(value) => self.set_value(field, value),
            None => {
                self.remove_value(field);
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
        self.set_children(field, nodes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn child_or_insert_with_keeps_existing_child() {
        let mut node = Node::new("root");
        node.child_or_insert_with("block", || Node::new("first"))
            .set_value("a", "1");
        node.child_or_insert_with("block", || Node::new("second"))
            .set_value("b", "2");

        let block = node.child("block").unwrap();
        assert_eq!(block.kind(), "first");
        assert_eq!(node.children("block").len(), 1);
        assert_eq!(block.value("a"), Some("1"));
        assert_eq!(block.value("b"), Some("2"));
    }

    #[test]
    fn empty_child_lists_are_not_named() {
        let mut node = Node::new("root");
        node.push_child("a", Node::new("x"));
        node.set_children("b", Vec::new());
        assert_eq!(node.child_names().collect::<Vec<_>>(), vec!["a"]);
    }
}

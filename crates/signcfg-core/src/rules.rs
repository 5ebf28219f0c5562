//! Document-level business rules
//!
//! Rules check interdependencies between properties that the structural
//! schema cannot express. They are evaluated once per image against that
//! image's effective properties: the root `general_properties`, overlaid
//! by the image's `general_properties_overrides`, plus the image's own
//! scalar fields (`sign_id`, `name`, ...).
//!
//! ```toml
//! [[rules]]
//! kind = "requires"
//! field = "key_size"
//! requires = "exponent"
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};
use signcfg_tree::Node;

use crate::defines::tags;
use crate::{Error, Result};

/// One business rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Rule {
    /// A present value must match the regular expression.
    Pattern { field: String, pattern: String },
    /// If `field` is present, `requires` must be present too.
    Requires { field: String, requires: String },
    /// `field` and `excludes` must not both be present.
    Excludes { field: String, excludes: String },
    /// `field` must be present whenever `when` equals `equals`.
    RequiredWhen {
        field: String,
        when: String,
        equals: String,
    },
}

/// Ordered rule list as it appears in a profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleSet {
    pub rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Compile patterns so evaluation cannot fail on a bad expression.
    pub fn compile(&self) -> Result<RuleEngine> {
        let rules = self
            .rules
            .iter()
            .map(|rule| {
                let pattern = match rule {
                    Rule::Pattern { pattern, .. } => Some(Regex::new(pattern).map_err(|e| {
                        Error::invalid_profile(format!("rule pattern '{pattern}': {e}"))
                    })?),
                    _ => None,
                };
                Ok(CompiledRule {
                    rule: rule.clone(),
                    pattern,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(RuleEngine { rules })
    }
}

#[derive(Debug, Clone)]
struct CompiledRule {
    rule: Rule,
    pattern: Option<Regex>,
}

/// Compiled rules, ready to evaluate against documents.
#[derive(Debug, Clone, Default)]
pub struct RuleEngine {
    rules: Vec<CompiledRule>,
}

impl RuleEngine {
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Evaluate every rule against every image of `root`.
    ///
    /// The first violation wins; `path` only labels the error.
    pub fn validate(&self, root: &Node, path: &Path) -> Result<()> {
        if self.rules.is_empty() {
            return Ok(());
        }

        let general = root.child(tags::GENERAL_PROPERTIES);
        let images = root
            .child(tags::IMAGES_LIST)
            .map(|list| list.children(tags::IMAGE))
            .unwrap_or(&[]);

        for image in images {
            let view = effective_properties(general, image);
            let sign_id = image.value(tags::SIGN_ID).unwrap_or("<unnamed>");
            for compiled in &self.rules {
                if let Some(message) = compiled.check(&view) {
                    return Err(Error::RuleViolation {
                        path: path.to_path_buf(),
                        message: format!("image '{sign_id}': {message}"),
                    });
                }
            }
        }
        Ok(())
    }
}

impl CompiledRule {
    /// Violation message, if the rule does not hold for `view`.
    fn check(&self, view: &BTreeMap<&str, &str>) -> Option<String> {
        match &self.rule {
            Rule::Pattern { field, pattern } => {
                let value = view.get(field.as_str())?;
                let regex = self.pattern.as_ref()?;
                (!regex.is_match(value))
                    .then(|| format!("{field} '{value}' does not match pattern '{pattern}'"))
            }
            Rule::Requires { field, requires } => (view.contains_key(field.as_str())
                && !view.contains_key(requires.as_str()))
            .then(|| format!("{field} is set but {requires} is missing")),
            Rule::Excludes { field, excludes } => (view.contains_key(field.as_str())
                && view.contains_key(excludes.as_str()))
            .then(|| format!("{field} and {excludes} cannot both be set")),
            Rule::RequiredWhen {
                field,
                when,
                equals,
            } => (view.get(when.as_str()) == Some(&equals.as_str())
                && !view.contains_key(field.as_str()))
            .then(|| format!("{field} is required when {when} is '{equals}'")),
        }
    }
}

fn effective_properties<'a>(
    general: Option<&'a Node>,
    image: &'a Node,
) -> BTreeMap<&'a str, &'a str> {
    let mut view = BTreeMap::new();
    let overrides = image.child(tags::GENERAL_PROPERTIES_OVERRIDES);
    for block in [general, overrides].into_iter().flatten() {
        for name in block.value_names() {
            if let Some(value) = block.value(name) {
                view.insert(name, value);
            }
        }
    }
    for name in image.value_names() {
        if let Some(value) = image.value(name) {
            view.insert(name, value);
        }
    }
    view
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(sign_id: &str, overrides: &[(&str, &str)]) -> Node {
        let mut image = Node::new("complex_image");
        image.set_value(tags::SIGN_ID, sign_id);
        if !overrides.is_empty() {
            let mut block = Node::new("complex_general_properties");
            for (k, v) in overrides {
                block.set_value(*k, *v);
            }
            image.push_child(tags::GENERAL_PROPERTIES_OVERRIDES, block);
        }
        image
    }

    fn root(general: &[(&str, &str)], images: Vec<Node>) -> Node {
        let mut props = Node::new("complex_general_properties");
        for (k, v) in general {
            props.set_value(*k, *v);
        }
        let mut list = Node::new("complex_images_list");
        for image in images {
            list.push_child(tags::IMAGE, image);
        }
        let mut root = Node::new("complex_secimage");
        root.push_child(tags::GENERAL_PROPERTIES, props);
        root.push_child(tags::IMAGES_LIST, list);
        root
    }

    fn engine(rules: Vec<Rule>) -> RuleEngine {
        RuleSet::new(rules).compile().unwrap()
    }

    #[test]
    fn overrides_shadow_general_properties() {
        let rules = engine(vec![Rule::RequiredWhen {
            field: "ecdsa_curve".into(),
            when: "dsa_type".into(),
            equals: "ecdsa".into(),
        }]);
        let doc = root(
            &[("dsa_type", "rsa")],
            vec![image("sbl1", &[]), image("tz", &[("dsa_type", "ecdsa")])],
        );

        let err = rules.validate(&doc, Path::new("x.xml")).unwrap_err();
        match err {
            Error::RuleViolation { message, .. } => {
                assert!(message.starts_with("image 'tz'"), "{message}");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn requires_and_excludes() {
        let rules = engine(vec![
            Rule::Requires {
                field: "key_size".into(),
                requires: "exponent".into(),
            },
            Rule::Excludes {
                field: "rsa_padding".into(),
                excludes: "ecdsa_curve".into(),
            },
        ]);

        let ok = root(&[("key_size", "2048"), ("exponent", "65537")], vec![image("a", &[])]);
        rules.validate(&ok, Path::new("x.xml")).unwrap();

        let missing = root(&[("key_size", "2048")], vec![image("a", &[])]);
        assert!(rules.validate(&missing, Path::new("x.xml")).is_err());

        let both = root(
            &[("rsa_padding", "pss")],
            vec![image("a", &[("ecdsa_curve", "secp384r1")])],
        );
        assert!(rules.validate(&both, Path::new("x.xml")).is_err());
    }

    #[test]
    fn pattern_applies_to_image_fields() {
        let rules = engine(vec![Rule::Pattern {
            field: "sign_id".into(),
            pattern: "^[a-z0-9_]+$".into(),
        }]);
        let doc = root(&[], vec![image("sbl1", &[]), image("Bad Id", &[])]);

        assert!(rules.validate(&doc, Path::new("x.xml")).is_err());
    }

    #[test]
    fn bad_pattern_fails_compilation() {
        let result = RuleSet::new(vec![Rule::Pattern {
            field: "sign_id".into(),
            pattern: "[".into(),
        }])
        .compile();
        assert!(matches!(result, Err(Error::InvalidProfile { .. })));
    }
}

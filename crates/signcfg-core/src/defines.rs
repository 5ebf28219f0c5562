//! Naming conventions, layout constants and the fixed document shape

use regex::Regex;
use serde::{Deserialize, Serialize};
use signcfg_tree::{ClassName, Structure, XmlNamespace};

use crate::{Error, Result};

/// Element and attribute names the core reads directly.
///
/// Everything else in a document is only ever touched through the
/// structure description.
pub mod tags {
    pub const METADATA: &str = "metadata";
    pub const CHIPSET: &str = "chipset";
    pub const VERSION: &str = "version";
    pub const GENERAL_PROPERTIES: &str = "general_properties";
    pub const GENERAL_PROPERTIES_OVERRIDES: &str = "general_properties_overrides";
    pub const IMAGES_LIST: &str = "images_list";
    pub const IMAGE: &str = "image";
    pub const SIGN_ID: &str = "sign_id";
    pub const NAME: &str = "name";
}

/// Immutable constants describing one config family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Defines {
    /// First-level subdirectory of a config root holding the chipset dirs.
    pub config_dir_basename: String,
    /// Pattern candidate file names must match from their first character.
    pub xml_name_regex: String,
    /// Local name of the document root element.
    pub xml_root: String,
    pub xml_namespace: XmlNamespace,
    /// Lines written between the markup declaration and the root element.
    #[serde(default)]
    pub xml_prepend_lines: Vec<String>,
    pub class_naming: ClassNaming,
    pub structure: Structure,
}

/// Class naming for the two binding targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassNaming {
    /// Document-binding nodes.
    pub document: ClassName,
    /// Domain objects.
    pub object: ClassName,
}

/// Compiled file naming convention.
#[derive(Debug, Clone)]
pub struct NamingConvention {
    pattern: Regex,
}

impl NamingConvention {
    pub fn new(pattern: &str) -> Result<Self> {
        let pattern = Regex::new(pattern).map_err(Error::invalid_profile)?;
        Ok(Self { pattern })
    }

    /// Whether a file name follows the convention.
    ///
    /// The pattern has to match starting at the first character of the
    /// name but may stop short of its end, so `\w+_secimage\.xml` also
    /// accepts `a_secimage.xml.orig`.
    pub fn matches(&self, file_name: &str) -> bool {
        self.pattern
            .find(file_name)
            .is_some_and(|m| m.start() == 0)
    }

    pub fn as_str(&self) -> &str {
        self.pattern.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("sdm845_secimage.xml", true)]
    #[case("a_secimage.xml.bak", true)]
    #[case("secimage.xml", false)]
    #[case("old-sdm845_secimage.xml", false)]
    #[case(".sdm845_secimage.xml", false)]
    #[case("sdm845_secimage.json", false)]
    fn naming_is_anchored_at_start_only(#[case] name: &str, #[case] expected: bool) {
        let naming = NamingConvention::new(r"\w+_secimage\.xml").unwrap();
        assert_eq!(naming.matches(name), expected, "{name}");
    }

    #[test]
    fn invalid_pattern_is_a_profile_error() {
        assert!(matches!(
            NamingConvention::new("(unclosed"),
            Err(Error::InvalidProfile { .. })
        ));
    }
}

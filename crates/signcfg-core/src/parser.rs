//! Parser bundle: expected version, defines and rules
//!
//! A [`CfgParser`] is shared by every document and directory scan of one
//! config family. It is built from a [`Profile`], either the built-in
//! secimage profile or one read from a TOML, JSON or YAML file.

use serde::{Deserialize, Serialize};
use signcfg_fs::{ConfigStore, NormalizedPath};
use signcfg_tree::DocumentFactory;

use crate::defines::{Defines, NamingConvention};
use crate::object::ObjectFactory;
use crate::rules::{RuleEngine, RuleSet};
use crate::{Error, Result, secimage};

/// Serializable description of a config family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Version string documents must declare, compared exactly.
    pub version: String,
    pub defines: Defines,
    #[serde(default)]
    pub rules: RuleSet,
}

/// Checked, compiled profile.
#[derive(Debug, Clone)]
pub struct CfgParser {
    profile: Profile,
    naming: NamingConvention,
    rules: RuleEngine,
}

impl CfgParser {
    pub fn new(profile: Profile) -> Result<Self> {
        profile
            .defines
            .structure
            .check()
            .map_err(Error::invalid_profile)?;
        if profile.defines.structure.root != profile.defines.xml_root {
            return Err(Error::invalid_profile(format!(
                "structure root '{}' differs from root tag '{}'",
                profile.defines.structure.root, profile.defines.xml_root
            )));
        }
        let naming = NamingConvention::new(&profile.defines.xml_name_regex)?;
        let rules = profile.rules.compile()?;

        Ok(Self {
            profile,
            naming,
            rules,
        })
    }

    /// The built-in secimage parser.
    pub fn secimage() -> Result<Self> {
        Self::new(secimage::profile())
    }

    /// Read a profile file; the format follows the extension.
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        let profile: Profile = ConfigStore::new().load(path)?;
        tracing::debug!(path = %path, version = %profile.version, "loaded parser profile");
        Self::new(profile)
    }

    pub fn version(&self) -> &str {
        &self.profile.version
    }

    pub fn defines(&self) -> &Defines {
        &self.profile.defines
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn naming(&self) -> &NamingConvention {
        &self.naming
    }

    pub fn rules(&self) -> &RuleEngine {
        &self.rules
    }

    /// Factory for document-binding nodes.
    pub fn document_factory(&self) -> DocumentFactory {
        DocumentFactory::new(self.profile.defines.class_naming.document.clone())
    }

    /// Factory for domain objects.
    pub fn object_factory(&self) -> ObjectFactory {
        ObjectFactory::new(self.profile.defines.class_naming.object.clone())
    }

    /// Class name a root domain object must carry.
    pub fn object_kind(&self) -> String {
        self.profile
            .defines
            .class_naming
            .object
            .apply(&self.profile.defines.structure.root)
    }
}

//! Config root scanning
//!
//! Layout on disk is `<root>/<configs>/<chipset>/<file>`. Each chipset
//! directory contributes at most one document: the first file, in lexical
//! order, whose name follows the naming convention and whose declared
//! chipset equals the directory name. Anything else is logged to the
//! diagnostic sink and skipped.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use signcfg_fs::{NormalizedPath, io};

use crate::diagnostics::{DiagnosticSink, default_sink};
use crate::document::{ConfigDocument, LoadOptions};
use crate::parser::CfgParser;
use crate::{Error, Result};

/// Derived, read-only properties of a [`ConfigDirectory`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectoryProperty {
    ConfigPaths,
    Configs,
    Chipsets,
}

impl DirectoryProperty {
    pub fn as_str(self) -> &'static str {
        match self {
            DirectoryProperty::ConfigPaths => "config_paths",
            DirectoryProperty::Configs => "configs",
            DirectoryProperty::Chipsets => "chipsets",
        }
    }
}

impl fmt::Display for DirectoryProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DirectoryProperty {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "config_paths" => Ok(DirectoryProperty::ConfigPaths),
            "configs" => Ok(DirectoryProperty::Configs),
            "chipsets" => Ok(DirectoryProperty::Chipsets),
            other => Err(Error::not_found(format!("Unknown directory property: {other}"))),
        }
    }
}

/// A config root's `configs` folder.
#[derive(Clone)]
pub struct ConfigDirectory {
    config_dir: NormalizedPath,
    parser: Arc<CfgParser>,
    sink: Arc<dyn DiagnosticSink>,
}

impl fmt::Debug for ConfigDirectory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigDirectory")
            .field("config_dir", &self.config_dir)
            .finish_non_exhaustive()
    }
}

impl ConfigDirectory {
    pub fn new(root: impl Into<NormalizedPath>, parser: Arc<CfgParser>) -> Result<Self> {
        Self::with_sink(root, parser, default_sink())
    }

    pub fn with_sink(
        root: impl Into<NormalizedPath>,
        parser: Arc<CfgParser>,
        sink: Arc<dyn DiagnosticSink>,
    ) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(Error::not_found(format!("Config root {root} does not exist")));
        }

        let basename = &parser.defines().config_dir_basename;
        let config_dir = root.join(basename);
        if !config_dir.is_dir() {
            return Err(Error::not_found(format!(
                "Config root {root} is missing the {basename} directory"
            )));
        }

        Ok(Self {
            config_dir,
            parser,
            sink,
        })
    }

    pub fn config_dir(&self) -> &NormalizedPath {
        &self.config_dir
    }

    /// One config path per chipset directory that has a matching file.
    ///
    /// Recomputed from disk on every call.
    pub fn config_paths(&self) -> Result<Vec<NormalizedPath>> {
        Ok(self
            .scan()?
            .into_iter()
            .map(|document| document.path().clone())
            .collect())
    }

    /// The documents behind [`ConfigDirectory::config_paths`].
    pub fn configs(&self) -> Result<Vec<ConfigDocument>> {
        self.scan()
    }

    /// Declared chipset of every config, in scan order.
    pub fn chipsets(&self) -> Result<Vec<String>> {
        Ok(self
            .scan()?
            .iter()
            .map(|document| document.chipset().to_string())
            .collect())
    }

    /// Derived properties cannot be assigned.
    pub fn set_property(&mut self, property: DirectoryProperty, _values: &[String]) -> Result<()> {
        Err(Error::Immutable { property })
    }

    /// Directory a chipset's config lives in; nothing is checked on disk.
    pub fn get_chipset_dir(&self, chipset: &str) -> NormalizedPath {
        self.config_dir.join(chipset)
    }

    pub fn create_chipset_dir(&self, chipset: &str) -> Result<NormalizedPath> {
        let dir = self.get_chipset_dir(chipset);
        io::create_dir(&dir).map_err(|source| Error::CreateFailed {
            chipset: chipset.to_string(),
            source,
        })?;
        self.sink.info(&format!("Created chipset directory {dir}"));
        Ok(dir)
    }

    pub fn get_chipset_config_path(&self, chipset: &str) -> Result<NormalizedPath> {
        let dir = self.get_chipset_dir(chipset);
        if !dir.is_dir() {
            return Err(Error::not_found(format!(
                "Chipset directory {dir} does not exist"
            )));
        }
        self.find_in_chipset_dir(&dir, chipset)?
            .map(|document| document.path().clone())
            .ok_or_else(|| {
                Error::not_found(format!("Config for chipset {chipset} not found in {dir}"))
            })
    }

    fn scan(&self) -> Result<Vec<ConfigDocument>> {
        let mut names = io::list_entries(&self.config_dir)?;
        names.sort();

        let mut documents = Vec::new();
        for chipset in names {
            let dir = self.config_dir.join(&chipset);
            if !dir.is_dir() {
                continue;
            }
            match self.find_in_chipset_dir(&dir, &chipset) {
                Ok(Some(document)) => documents.push(document),
                Ok(None) => self
                    .sink
                    .debug(&format!("No config found for chipset {chipset} in {dir}")),
                Err(e) => self.sink.warn(&format!("Skipping chipset directory {dir}: {e}")),
            }
        }
        Ok(documents)
    }

    /// First document in `dir` that follows the naming convention and
    /// declares `chipset`.
    fn find_in_chipset_dir(
        &self,
        dir: &NormalizedPath,
        chipset: &str,
    ) -> Result<Option<ConfigDocument>> {
        let mut names = io::list_entries(dir)?;
        names.sort();

        let mut found: Option<ConfigDocument> = None;
        for name in names {
            if !self.parser.naming().matches(&name) {
                continue;
            }
            let path = dir.join(&name);
            if !path.is_file() {
                continue;
            }

            let options = LoadOptions {
                sink: Some(Arc::clone(&self.sink)),
                ..LoadOptions::default()
            };
            let loaded =
                ConfigDocument::load_with(path.clone(), Arc::clone(&self.parser), options);
            let document = match loaded {
                Ok(document) => document,
                Err(e) => {
                    self.sink.warn(&format!("Skipping {path}: {e}"));
                    continue;
                }
            };

            if document.chipset() != chipset {
                self.sink.warn(&format!(
                    "Skipping {path}: declares chipset {} but is in the directory for {chipset}",
                    document.chipset()
                ));
                continue;
            }

            if let Some(first) = &found {
                self.sink.warn(&format!(
                    "Skipping {path}: chipset {chipset} already provided by {}",
                    first.path()
                ));
                continue;
            }
            found = Some(document);
        }
        Ok(found)
    }
}

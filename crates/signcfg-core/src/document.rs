//! One loaded and validated config document

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use signcfg_fs::{NormalizedPath, io};
use signcfg_tree::{FieldType, Node, NodeFactory, SerializeOptions, Structure, copy_fields};

use crate::defines::tags;
use crate::diagnostics::{DiagnosticSink, default_sink};
use crate::object::ConfigObject;
use crate::overrides::Overrides;
use crate::parser::CfgParser;
use crate::{Error, Result};

/// Optional inputs to [`ConfigDocument::load_with`].
#[derive(Clone, Default)]
pub struct LoadOptions {
    /// Broadcast onto general properties and every image's override block.
    pub overrides: Overrides,
    /// Carried untouched for signing collaborators.
    pub signing_overrides: Overrides,
    pub sink: Option<Arc<dyn DiagnosticSink>>,
}

/// A config document that passed every validation step.
///
/// Construction either yields a fully validated document or fails; there
/// is no partially loaded state. Callers that mutate the tree through
/// [`ConfigDocument::config_data_mut`] can re-check it with
/// [`ConfigDocument::validate`].
#[derive(Clone)]
pub struct ConfigDocument {
    path: NormalizedPath,
    parser: Arc<CfgParser>,
    root: Node,
    overrides: Overrides,
    signing_overrides: Overrides,
    sink: Arc<dyn DiagnosticSink>,
}

impl fmt::Debug for ConfigDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigDocument")
            .field("path", &self.path)
            .field("root", &self.root)
            .field("overrides", &self.overrides)
            .field("signing_overrides", &self.signing_overrides)
            .finish_non_exhaustive()
    }
}

impl ConfigDocument {
    pub fn load(path: impl Into<NormalizedPath>, parser: Arc<CfgParser>) -> Result<Self> {
        Self::load_with(path, parser, LoadOptions::default())
    }

    /// Parse, apply overrides, then validate.
    pub fn load_with(
        path: impl Into<NormalizedPath>,
        parser: Arc<CfgParser>,
        options: LoadOptions,
    ) -> Result<Self> {
        let path = path.into();
        let sink = options.sink.unwrap_or_else(default_sink);

        let markup = io::read_bytes(&path)?;
        let defines = parser.defines();
        let mut root = signcfg_tree::parse(
            &markup,
            &defines.structure,
            &defines.xml_root,
            &parser.document_factory(),
        )
        .map_err(|source| Error::ParseFailed {
            path: path.to_native(),
            source,
        })?;

        let applied = apply_overrides(&mut root, &options.overrides, &parser)?;
        if applied > 0 {
            sink.debug(&format!("Applied {applied} override(s) to {path}"));
        }

        let document = Self {
            path,
            parser,
            root,
            overrides: options.overrides,
            signing_overrides: options.signing_overrides,
            sink,
        };
        document.validate()?;
        document.sink.debug(&format!(
            "Loaded config {} for chipset {}",
            document.path,
            document.chipset()
        ));
        Ok(document)
    }

    /// Run every document check; the first failure wins.
    ///
    /// Order: structure, rules, version, non-empty image list, unique
    /// sign ids.
    pub fn validate(&self) -> Result<()> {
        let defines = self.parser.defines();
        let native = self.path.to_native();

        signcfg_tree::validate(&self.root, &defines.structure, &defines.xml_root).map_err(
            |source| Error::InvalidStructure {
                path: native.clone(),
                source,
            },
        )?;

        self.parser.rules().validate(&self.root, &native)?;

        if self.version() != self.parser.version() {
            return Err(Error::VersionMismatch {
                expected: self.parser.version().to_string(),
                found: self.version().to_string(),
            });
        }

        if self.images().is_empty() {
            return Err(Error::EmptyConfig { path: native });
        }

        let duplicates = duplicate_values(self.sign_id_list());
        if !duplicates.is_empty() {
            return Err(Error::DuplicateSignId {
                sign_ids: duplicates,
            });
        }
        Ok(())
    }

    /// Write the tree to `path`, replacing any existing file.
    pub fn generate(&self, path: impl Into<NormalizedPath>) -> Result<()> {
        let path = path.into();
        let defines = self.parser.defines();
        let options = SerializeOptions {
            root_tag: &defines.xml_root,
            namespace: &defines.xml_namespace,
            prepend_lines: &defines.xml_prepend_lines,
        };
        let text = signcfg_tree::serialize(&self.root, &defines.structure, &options)?;
        io::write_text(&path, &text)?;
        self.sink.debug(&format!("Generated config {path}"));
        Ok(())
    }

    /// Copy every described field from `obj` into the document.
    pub fn transfer_from_obj(&mut self, obj: &ConfigObject) -> Result<()> {
        self.check_object(obj)?;
        let structure = &self.parser.defines().structure;
        copy_fields(
            obj,
            &mut self.root,
            structure,
            &structure.root,
            &self.parser.document_factory(),
        )?;
        Ok(())
    }

    /// Copy every described field from the document into `obj`.
    pub fn transfer_to_obj(&self, obj: &mut ConfigObject) -> Result<()> {
        self.check_object(obj)?;
        let structure = &self.parser.defines().structure;
        copy_fields(
            &self.root,
            obj,
            structure,
            &structure.root,
            &self.parser.object_factory(),
        )?;
        Ok(())
    }

    fn check_object(&self, obj: &ConfigObject) -> Result<()> {
        let expected = self.parser.object_kind();
        if obj.kind() != expected {
            return Err(Error::TypeMismatch {
                expected,
                found: obj.kind().to_string(),
            });
        }
        Ok(())
    }

    pub fn path(&self) -> &NormalizedPath {
        &self.path
    }

    pub fn parser(&self) -> &Arc<CfgParser> {
        &self.parser
    }

    pub fn chipset(&self) -> &str {
        self.metadata(tags::CHIPSET)
    }

    pub fn version(&self) -> &str {
        self.metadata(tags::VERSION)
    }

    fn metadata(&self, field: &str) -> &str {
        self.root
            .child(tags::METADATA)
            .and_then(|m| m.value(field))
            .unwrap_or_default()
    }

    /// Image entries in document order.
    pub fn images(&self) -> &[Node] {
        self.root
            .child(tags::IMAGES_LIST)
            .map(|list| list.children(tags::IMAGE))
            .unwrap_or(&[])
    }

    /// Sign ids of all images, in document order.
    pub fn sign_id_list(&self) -> Vec<&str> {
        self.images()
            .iter()
            .filter_map(|image| image.value(tags::SIGN_ID))
            .collect()
    }

    pub fn config_data(&self) -> &Node {
        &self.root
    }

    pub fn config_data_mut(&mut self) -> &mut Node {
        &mut self.root
    }

    pub fn overrides(&self) -> &Overrides {
        &self.overrides
    }

    pub fn signing_overrides(&self) -> &Overrides {
        &self.signing_overrides
    }

    /// Sign id of the one image whose name matches, ignoring case.
    pub fn get_sign_id_for_image_name(&self, image_name: &str) -> Result<&str> {
        let wanted = image_name.to_lowercase();
        let matches: Vec<&str> = self
            .images()
            .iter()
            .filter(|image| {
                image
                    .value(tags::NAME)
                    .is_some_and(|name| name.to_lowercase() == wanted)
            })
            .filter_map(|image| image.value(tags::SIGN_ID))
            .collect();

        match matches.as_slice() {
            [] => Err(Error::not_found(format!(
                "Sign id not found for image name: {image_name}"
            ))),
            [sign_id] => Ok(*sign_id),
            _ => Err(Error::AmbiguousMatch {
                image_name: image_name.to_string(),
                sign_ids: matches.iter().map(|s| s.to_string()).collect(),
            }),
        }
    }

    /// Image entry with the given sign id.
    pub fn get_config_for_sign_id(&self, sign_id: &str) -> Result<&Node> {
        self.images()
            .iter()
            .find(|image| image.value(tags::SIGN_ID) == Some(sign_id))
            .ok_or_else(|| Error::not_found(format!("Config not found for sign id: {sign_id}")))
    }
}

/// Values occurring more than once, each reported once, in the order
/// they are first repeated.
pub fn duplicate_values<'a>(values: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    let mut duplicates = Vec::new();
    for value in values {
        if !seen.insert(value) && reported.insert(value) {
            duplicates.push(value.to_string());
        }
    }
    duplicates
}

/// Broadcast concrete override values onto the general properties and
/// onto every image's override block, creating missing blocks.
///
/// Returns the number of values applied.
fn apply_overrides(root: &mut Node, overrides: &Overrides, parser: &CfgParser) -> Result<usize> {
    let values: Vec<(&str, &str)> = overrides.with_values().collect();
    if values.is_empty() {
        return Ok(0);
    }

    let structure = &parser.defines().structure;
    let factory = parser.document_factory();
    let general_kind = nested_kind(structure, &structure.root, tags::GENERAL_PROPERTIES)?;
    let image_kind = nested_kind(structure, &structure.root, tags::IMAGES_LIST)
        .and_then(|list| nested_kind(structure, list, tags::IMAGE))?;
    let block_kind = nested_kind(structure, image_kind, tags::GENERAL_PROPERTIES_OVERRIDES)?;

    let general =
        root.child_or_insert_with(tags::GENERAL_PROPERTIES, || factory.create(general_kind));
    for (tag, value) in &values {
        general.set_value(*tag, *value);
    }

    if let Some(list) = root.child_mut(tags::IMAGES_LIST) {
        for image in list.children_mut(tags::IMAGE) {
            let block = image.child_or_insert_with(tags::GENERAL_PROPERTIES_OVERRIDES, || {
                factory.create(block_kind)
            });
            for (tag, value) in &values {
                block.set_value(*tag, *value);
            }
        }
    }
    Ok(values.len())
}

/// Kind of the nested field `field` of `kind`.
fn nested_kind<'s>(structure: &'s Structure, kind: &str, field: &str) -> Result<&'s str> {
    match structure.kind(kind)?.get(field).map(|f| &f.ty) {
        Some(FieldType::Struct(nested)) => Ok(nested.as_str()),
        _ => Err(signcfg_tree::Error::UnknownField {
            path: kind.to_string(),
            name: field.to_string(),
        }
        .into()),
    }
}

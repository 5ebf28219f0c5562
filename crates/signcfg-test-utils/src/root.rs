//! [`ConfigRoot`] builder for directory-scan scenarios.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A temporary config root with a `configs` folder.
///
/// # Example
///
/// ```rust,no_run
/// use signcfg_test_utils::{ConfigRoot, SampleConfig};
///
/// let root = ConfigRoot::new();
/// root.write_config("sdm845", "sdm845_secimage.xml", &SampleConfig::new("sdm845").render());
/// ```
pub struct ConfigRoot {
    temp_dir: TempDir,
}

impl Default for ConfigRoot {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigRoot {
    /// Temporary root containing an empty `configs` folder.
    pub fn new() -> Self {
        let root = Self::bare();
        fs::create_dir_all(root.configs_dir()).unwrap();
        root
    }

    /// Temporary root without the `configs` folder.
    pub fn bare() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn configs_dir(&self) -> PathBuf {
        self.path().join("configs")
    }

    /// Create `configs/<chipset>` and return it.
    pub fn chipset_dir(&self, chipset: &str) -> PathBuf {
        let dir = self.configs_dir().join(chipset);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    /// Write `configs/<chipset>/<file_name>` and return its path.
    pub fn write_config(&self, chipset: &str, file_name: &str, content: &str) -> PathBuf {
        let path = self.chipset_dir(chipset).join(file_name);
        fs::write(&path, content).unwrap();
        path
    }

    /// Write a file directly under the root.
    pub fn write_file(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }
}

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use datavail_types::ReferenceData;

use crate::{ReferenceError, ReferenceSource};

const FILE_PREFIX: &str = "dd-";
const FILE_SUFFIX: &str = ".json";

/// File name holding the reference dataset for `version`.
pub fn reference_file_name(version: &str) -> String {
    format!("{FILE_PREFIX}{version}{FILE_SUFFIX}")
}

fn is_valid_version(version: &str) -> bool {
    !version.is_empty()
        && !version.contains("..")
        && version
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
}

/// Reads `dd-<version>.json` files from a directory.
#[derive(Debug, Clone)]
pub struct DirectoryReference {
    root: PathBuf,
}

impl DirectoryReference {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, version: &str) -> PathBuf {
        self.root.join(reference_file_name(version))
    }

    /// Versions with a reference file in the directory, sorted.
    pub fn available_versions(&self) -> Result<Vec<String>, ReferenceError> {
        let entries = fs::read_dir(&self.root).map_err(|source| ReferenceError::Io {
            path: self.root.clone(),
            source,
        })?;
        let mut versions: Vec<String> = entries
            .filter_map(Result::ok)
            .filter_map(|entry| {
                let name = entry.file_name().into_string().ok()?;
                let version = name.strip_prefix(FILE_PREFIX)?.strip_suffix(FILE_SUFFIX)?;
                is_valid_version(version).then(|| version.to_string())
            })
            .collect();
        versions.sort();
        Ok(versions)
    }
}

impl ReferenceSource for DirectoryReference {
    fn load(&self, version: &str) -> Result<Arc<ReferenceData>, ReferenceError> {
        if !is_valid_version(version) {
            return Err(ReferenceError::InvalidVersion(version.to_string()));
        }
        let path = self.path_for(version);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(ReferenceError::UnknownVersion(version.to_string()));
            }
            Err(source) => return Err(ReferenceError::Io { path, source }),
        };
        let data: ReferenceData = serde_json::from_str(&content)
            .map_err(|source| ReferenceError::Parse { path: path.clone(), source })?;
        debug!(
            path = %path.display(),
            fields = data.fields.len(),
            lookups = data.lookups.len(),
            "loaded reference metadata"
        );
        Ok(Arc::new(data))
    }
}

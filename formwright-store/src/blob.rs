//! Keyed blob persistence.
//!
//! Stores hold their whole collection under a single key and rewrite it after
//! every mutation. A [`BlobStore`] only moves bytes; encoding is chosen by its
//! [`StorageFormat`].

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use ulid::Ulid;

use crate::error::Result;

/// Key holding the ordered list of templates.
pub const TEMPLATES_KEY: &str = "form-templates";

/// Key holding the ordered list of form submissions.
pub const SUBMISSIONS_KEY: &str = "form-submissions";

/// Encoding used for persisted collections.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageFormat {
    #[default]
    Json,
    Yaml,
}

impl StorageFormat {
    /// File extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }

    pub fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>> {
        Ok(match self {
            Self::Json => serde_json::to_vec_pretty(value)?,
            Self::Yaml => serde_yaml_ng::to_string(value)?.into_bytes(),
        })
    }

    pub fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T> {
        Ok(match self {
            Self::Json => serde_json::from_slice(bytes)?,
            Self::Yaml => serde_yaml_ng::from_reader(bytes)?,
        })
    }
}

/// A generic keyed byte store.
///
/// `read` returns `None` for a key that was never written. A failed `write`
/// must leave the previously stored bytes readable.
pub trait BlobStore {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>>;

    fn write(&mut self, key: &str, bytes: &[u8]) -> Result<()>;

    fn format(&self) -> StorageFormat;
}

/// Load the list stored under `key`. A missing key is an empty list.
pub fn load_list<S, T>(store: &S, key: &str) -> Result<Vec<T>>
where
    S: BlobStore + ?Sized,
    T: DeserializeOwned,
{
    match store.read(key)? {
        Some(bytes) => store.format().decode(&bytes),
        None => {
            trace!(key, "no stored blob, starting empty");
            Ok(Vec::new())
        }
    }
}

/// Encode `items` and store them under `key`.
pub fn save_list<S, T>(store: &mut S, key: &str, items: &[T]) -> Result<()>
where
    S: BlobStore + ?Sized,
    T: Serialize,
{
    let bytes = store.format().encode(items)?;
    store.write(key, &bytes)
}

/// In-process blob store. Nothing survives the value being dropped.
#[derive(Debug, Clone, Default)]
pub struct MemoryBlobStore {
    blobs: HashMap<String, Vec<u8>>,
    format: StorageFormat,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_format(mut self, format: StorageFormat) -> Self {
        self.format = format;
        self
    }
}

impl BlobStore for MemoryBlobStore {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.blobs.get(key).cloned())
    }

    fn write(&mut self, key: &str, bytes: &[u8]) -> Result<()> {
        self.blobs.insert(key.to_string(), bytes.to_vec());
        Ok(())
    }

    fn format(&self) -> StorageFormat {
        self.format
    }
}

/// One file per key under a root directory.
///
/// ```text
/// data/
///   form-templates.json
///   form-submissions.json
/// ```
#[derive(Debug, Clone)]
pub struct FileBlobStore {
    root: PathBuf,
    format: StorageFormat,
}

impl FileBlobStore {
    pub fn new(root: impl Into<PathBuf>, format: StorageFormat) -> Self {
        Self {
            root: root.into(),
            format,
        }
    }

    /// The root directory path.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file backing `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.root
            .join(format!("{key}.{}", self.format.extension()))
    }
}

impl BlobStore for FileBlobStore {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path_for(key);
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&mut self, key: &str, bytes: &[u8]) -> Result<()> {
        fs::create_dir_all(&self.root)?;
        let path = self.path_for(key);
        atomic_write(&path, bytes)?;
        debug!(path = %path.display(), bytes = bytes.len(), "wrote blob");
        Ok(())
    }

    fn format(&self) -> StorageFormat {
        self.format
    }
}

/// Write to a temp file then rename for atomic persistence.
fn atomic_write(path: &Path, data: &[u8]) -> Result<()> {
    let dir = path
        .parent()
        .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::InvalidInput, "no parent dir"))?;
    let tmp = dir.join(format!(".tmp_{}", Ulid::new()));
    if let Err(e) = fs::write(&tmp, data) {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }
    fs::rename(&tmp, path)?;
    Ok(())
}

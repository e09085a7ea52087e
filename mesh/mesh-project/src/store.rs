//! A directory of named JSON records.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use crate::error::{ProjectError, ProjectResult};

/// Placeholder project record: an empty JSON object.
pub type ProjectData = serde_json::Map<String, serde_json::Value>;

/// File name for a project: trimmed, lowercased, spaces replaced by `_`,
/// with a `.json` extension.
///
/// # Errors
///
/// [`ProjectError::MissingName`] for a blank name,
/// [`ProjectError::InvalidName`] for names containing a path separator or
/// `..`.
///
/// # Example
///
/// ```
/// use mesh_project::project_file_name;
///
/// assert_eq!(project_file_name("My Robot").unwrap(), "my_robot.json");
/// assert!(project_file_name("  ").is_err());
/// assert!(project_file_name("../x").is_err());
/// ```
pub fn project_file_name(name: &str) -> ProjectResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ProjectError::MissingName);
    }
    if trimmed.contains(['/', '\\']) || trimmed.contains("..") {
        return Err(ProjectError::invalid_name(trimmed));
    }
    Ok(format!("{}.json", trimmed.to_lowercase().replace(' ', "_")))
}

/// The projects directory.
#[derive(Debug, Clone)]
pub struct ProjectStore {
    root: PathBuf,
}

impl ProjectStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn open(root: impl Into<PathBuf>) -> ProjectResult<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        debug!(root = %root.display(), "Opened project store");
        Ok(Self { root })
    }

    /// Store directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path a project name maps to.
    ///
    /// # Errors
    ///
    /// Any error from [`project_file_name`].
    pub fn path_for(&self, name: &str) -> ProjectResult<PathBuf> {
        Ok(self.root.join(project_file_name(name)?))
    }

    /// Write `data` as pretty JSON (4-space indent) under `name`.
    ///
    /// The record is written to a temporary file in the store and renamed
    /// over any existing record, so readers never see a partial file.
    ///
    /// # Errors
    ///
    /// Name errors, serialization errors, or I/O errors.
    pub fn save<T: Serialize + ?Sized>(&self, name: &str, data: &T) -> ProjectResult<PathBuf> {
        let path = self.path_for(name)?;
        let json = to_json_4(data)?;

        let mut file = tempfile::Builder::new()
            .prefix(".project-")
            .suffix(".tmp")
            .tempfile_in(&self.root)?;
        file.write_all(json.as_bytes())?;
        file.flush()?;
        file.persist(&path).map_err(|e| ProjectError::Persist {
            path: path.clone(),
            source: e.error,
        })?;

        info!(name, path = %path.display(), bytes = json.len(), "Saved project");
        Ok(path)
    }

    /// Read the record saved under `name`.
    ///
    /// # Errors
    ///
    /// [`ProjectError::NotFound`] if no record exists, otherwise I/O or JSON
    /// errors.
    pub fn load(&self, name: &str) -> ProjectResult<serde_json::Value> {
        let path = self.path_for(name)?;
        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ProjectError::NotFound { path });
            }
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&text)?)
    }

    /// File stems of all saved records, sorted.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be read.
    pub fn list(&self) -> ProjectResult<Vec<String>> {
        let mut names = Vec::new();
        for entry in std::fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().is_some_and(|e| e == "json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    names.push(stem.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }
}

fn to_json_4<T: Serialize + ?Sized>(data: &T) -> ProjectResult<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    data.serialize(&mut ser)?;
    // serde_json only emits valid UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

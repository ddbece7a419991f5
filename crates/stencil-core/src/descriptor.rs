//! The project descriptor (`package.json`) and its rename mutation

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name of the descriptor inside a scaffolded project.
pub const DESCRIPTOR_FILE: &str = "package.json";

/// The slice of a package descriptor the pipeline touches. Fields the
/// pipeline does not understand ride along in `rest` and are written back
/// unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PackageJson {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<BTreeMap<String, String>>,

    #[serde(
        rename = "devDependencies",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub dev_dependencies: Option<BTreeMap<String, String>>,

    #[serde(
        rename = "peerDependencies",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub peer_dependencies: Option<BTreeMap<String, String>>,

    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

impl PackageJson {
    /// True when any of the three dependency maps has at least one entry.
    pub fn has_any_dependency(&self) -> bool {
        [
            &self.dependencies,
            &self.dev_dependencies,
            &self.peer_dependencies,
        ]
        .into_iter()
        .any(|deps| deps.as_ref().is_some_and(|map| !map.is_empty()))
    }
}

#[derive(Debug, Error)]
pub enum DescriptorError {
    #[error("no {DESCRIPTOR_FILE} found at {path}")]
    Missing { path: PathBuf },

    #[error("failed to access {path}: {source}")]
    Io { path: PathBuf, source: io::Error },

    #[error("{path} is not a valid package descriptor: {source}")]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// The descriptor name for a project: everything after the last path
/// separator, so `scope/app` scaffolds a package named `app`.
pub fn derive_name(project_name: &str) -> &str {
    project_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(project_name)
}

/// Read the descriptor from a scaffolded project directory.
pub fn read(project_dir: &Path) -> Result<PackageJson, DescriptorError> {
    let path = project_dir.join(DESCRIPTOR_FILE);
    let raw = std::fs::read_to_string(&path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => DescriptorError::Missing { path: path.clone() },
        _ => DescriptorError::Io {
            path: path.clone(),
            source,
        },
    })?;
    serde_json::from_str(&raw).map_err(|source| DescriptorError::Malformed { path, source })
}

/// Overwrite the descriptor's `name` with the name derived from
/// `project_name`, leaving every other field as it was. One read, one
/// 2-space-indented write.
pub fn rename(project_dir: &Path, project_name: &str) -> Result<(), DescriptorError> {
    let mut descriptor = read(project_dir)?;
    descriptor.name = Some(derive_name(project_name).to_string());
    write(project_dir, &descriptor)
}

fn write(project_dir: &Path, descriptor: &PackageJson) -> Result<(), DescriptorError> {
    let path = project_dir.join(DESCRIPTOR_FILE);
    let mut raw =
        serde_json::to_string_pretty(descriptor).map_err(|source| DescriptorError::Malformed {
            path: path.clone(),
            source,
        })?;
    raw.push('\n');
    std::fs::write(&path, raw).map_err(|source| DescriptorError::Io { path, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn project_with_descriptor(raw: &str) -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(DESCRIPTOR_FILE), raw).unwrap();
        dir
    }

    #[test]
    fn derives_name_after_last_separator() {
        assert_eq!(derive_name("demo"), "demo");
        assert_eq!(derive_name("scope/app"), "app");
        assert_eq!(derive_name("a/b/c"), "c");
        assert_eq!(derive_name(r"nested\tool"), "tool");
    }

    #[test]
    fn name_derivation_is_idempotent() {
        for name in ["demo", "scope/app", "a/b/c"] {
            let once = derive_name(name);
            assert_eq!(derive_name(once), once);
        }
    }

    #[test]
    fn rename_overwrites_only_the_name_field() {
        let dir = project_with_descriptor(
            r#"{
  "name": "old-name",
  "version": "2.1.0",
  "scripts": { "build": "tsc" },
  "dependencies": { "left-pad": "1.0.0" }
}"#,
        );

        rename(dir.path(), "scope/app").unwrap();

        let descriptor = read(dir.path()).unwrap();
        assert_eq!(descriptor.name.as_deref(), Some("app"));
        assert_eq!(
            descriptor.dependencies.unwrap().get("left-pad").unwrap(),
            "1.0.0"
        );
        assert_eq!(descriptor.rest["version"], "2.1.0");
        assert_eq!(descriptor.rest["scripts"]["build"], "tsc");
    }

    #[test]
    fn rename_writes_two_space_indentation() {
        let dir = project_with_descriptor(r#"{"name":"old","version":"1.0.0"}"#);

        rename(dir.path(), "demo").unwrap();

        let raw = std::fs::read_to_string(dir.path().join(DESCRIPTOR_FILE)).unwrap();
        assert!(raw.contains("  \"name\": \"demo\""));
        assert!(raw.ends_with('\n'));
    }

    #[test]
    fn missing_descriptor_is_reported() {
        let dir = tempfile::tempdir().unwrap();

        assert!(matches!(
            rename(dir.path(), "demo"),
            Err(DescriptorError::Missing { .. })
        ));
    }

    #[test]
    fn unparsable_descriptor_is_reported() {
        let dir = project_with_descriptor("{broken");

        assert!(matches!(
            rename(dir.path(), "demo"),
            Err(DescriptorError::Malformed { .. })
        ));
    }

    #[test]
    fn dependency_presence_covers_all_three_maps() {
        let none: PackageJson = serde_json::from_str(r#"{"name":"a"}"#).unwrap();
        assert!(!none.has_any_dependency());

        let empty: PackageJson =
            serde_json::from_str(r#"{"dependencies":{},"devDependencies":{}}"#).unwrap();
        assert!(!empty.has_any_dependency());

        for field in ["dependencies", "devDependencies", "peerDependencies"] {
            let raw = format!(r#"{{"{field}":{{"left-pad":"1.0.0"}}}}"#);
            let descriptor: PackageJson = serde_json::from_str(&raw).unwrap();
            assert!(descriptor.has_any_dependency(), "{field} should count");
        }
    }
}

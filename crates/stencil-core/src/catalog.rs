//! Template registry loading and lookup
//!
//! The registry is a static JSON file in one of two shapes: a flat list of
//! templates, or lists keyed by a template type. Both are read once per run,
//! unvalidated beyond their shape - URLs in particular are checked by the
//! pipeline, not here.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable overriding the registry location.
pub const TEMPLATES_ENV: &str = "STENCIL_TEMPLATES";

/// Registry file looked up in the working directory when nothing else is
/// configured.
pub const DEFAULT_REGISTRY: &str = "templates.json";

/// A named, described pointer to a remote source repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub name: String,

    /// Source repository location. Absence is a valid state the pipeline
    /// detects before cloning.
    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub description: String,
}

impl Template {
    /// The clone URL, with the empty string normalized to absent.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref().filter(|url| !url.is_empty())
    }
}

/// The registry's two accepted shapes behind one uniform accessor, so the
/// pipeline's gate logic stays shape-independent.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TemplateRegistry {
    Flat(Vec<Template>),
    Grouped(BTreeMap<String, Vec<Template>>),
}

impl TemplateRegistry {
    /// Type keys when the registry is grouped, `None` when it is flat.
    pub fn type_names(&self) -> Option<Vec<&str>> {
        match self {
            TemplateRegistry::Flat(_) => None,
            TemplateRegistry::Grouped(groups) => {
                Some(groups.keys().map(String::as_str).collect())
            }
        }
    }

    /// Templates under an optional type key. A flat registry ignores the
    /// key; an unknown key yields an empty list.
    pub fn templates_for(&self, type_name: Option<&str>) -> &[Template] {
        match (self, type_name) {
            (TemplateRegistry::Flat(templates), _) => templates,
            (TemplateRegistry::Grouped(groups), Some(key)) => {
                groups.get(key).map(Vec::as_slice).unwrap_or(&[])
            }
            (TemplateRegistry::Grouped(_), None) => &[],
        }
    }
}

/// Exact-match lookup; the first occurrence wins on duplicate names.
pub fn find_by_name<'a>(templates: &'a [Template], name: &str) -> Option<&'a Template> {
    templates.iter().find(|template| template.name == name)
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("template registry not found at {path}: {source}")]
    Missing { path: PathBuf, source: io::Error },

    #[error("template registry at {path} is malformed: {source}")]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Loads the process-external template registry.
pub struct TemplateCatalog {
    path: PathBuf,
}

impl TemplateCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Resolve the registry location: explicit override, then the
    /// `STENCIL_TEMPLATES` environment variable, then `templates.json` in
    /// the working directory.
    pub fn resolve(override_path: Option<PathBuf>) -> Self {
        let path = override_path
            .or_else(|| std::env::var_os(TEMPLATES_ENV).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_REGISTRY));
        Self::new(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the registry. No caching; one read per run.
    pub fn load(&self) -> Result<TemplateRegistry, CatalogError> {
        let raw = std::fs::read_to_string(&self.path).map_err(|source| CatalogError::Missing {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| CatalogError::Malformed {
            path: self.path.clone(),
            source,
        })
    }
}

//! Pinfile loading and validation
//!
//! The pinfile (`wheelhouse.toml`) pins every dependency to an exact
//! version and source locator. It is the hand-off point from resolution:
//! this module turns pins into build tasks without doing any version
//! solving of its own.

use crate::config::schema::{Config, IndexConfig};
use crate::error::{DomainError, WheelhouseError, WheelhouseResult};
use crate::wheels::{normalize_name, BuildTask};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// File name looked up in the project directory
pub const PINFILE_NAME: &str = "wheelhouse.toml";

fn default_wheel_dir() -> PathBuf {
    PathBuf::from("wheelhouse")
}

#[derive(Debug, Clone, Deserialize)]
struct PinfileDoc {
    /// Wheel cache directory, relative to the pinfile
    #[serde(default = "default_wheel_dir")]
    wheel_dir: PathBuf,

    /// Project-level index settings, overriding the global config
    index: Option<IndexConfig>,

    #[serde(default, rename = "wheel")]
    wheels: Vec<WheelPin>,
}

/// One pinned package entry from the pinfile
#[derive(Debug, Clone, Deserialize)]
pub struct WheelPin {
    /// Package name as published (separators not yet normalized)
    pub name: String,

    /// Exact version string
    pub version: String,

    /// Source locator handed to the build tool (sdist URL, local path, VCS ref)
    pub source: String,
}

impl WheelPin {
    /// Requirement identity used in diagnostics, e.g. `flask==1.0.2`
    pub fn requirement(&self) -> String {
        format!("{}=={}", self.name, self.version)
    }
}

/// A loaded pinfile: the provider of build tasks and cache location
#[derive(Debug)]
pub struct Pinfile {
    path: PathBuf,
    base_dir: PathBuf,
    doc: PinfileDoc,
}

impl Pinfile {
    /// Load the pinfile from a project directory
    pub async fn from_directory(dir: &Path) -> WheelhouseResult<Self> {
        let path = dir.join(PINFILE_NAME);
        if !path.exists() {
            return Err(WheelhouseError::PinfileNotFound(path));
        }
        Self::from_file(path).await
    }

    /// Load a pinfile from an explicit path
    pub async fn from_file(path: impl Into<PathBuf>) -> WheelhouseResult<Self> {
        let path = path.into();
        let content = fs::read_to_string(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                WheelhouseError::PinfileNotFound(path.clone())
            } else {
                WheelhouseError::io(format!("reading pinfile {}", path.display()), e)
            }
        })?;

        let doc: PinfileDoc =
            toml::from_str(&content).map_err(|e| WheelhouseError::PinfileInvalid {
                path: path.clone(),
                reason: e.to_string(),
            })?;

        let base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        debug!(
            "Loaded pinfile {} with {} pin(s)",
            path.display(),
            doc.wheels.len()
        );

        Ok(Self {
            path,
            base_dir,
            doc,
        })
    }

    /// Directory wheels are stored in and pruned from
    pub fn wheel_dir(&self) -> PathBuf {
        if self.doc.wheel_dir.is_absolute() {
            self.doc.wheel_dir.clone()
        } else {
            self.base_dir.join(&self.doc.wheel_dir)
        }
    }

    /// Path this pinfile was loaded from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw pin entries in file order
    pub fn pins(&self) -> &[WheelPin] {
        &self.doc.wheels
    }

    /// Index configuration, falling back to the global config
    pub fn index<'a>(&'a self, global: &'a Config) -> &'a IndexConfig {
        self.doc.index.as_ref().unwrap_or(&global.index)
    }

    /// Validate the pins and produce build tasks in file order.
    ///
    /// A pin whose version is not exact raises `UnsupportedConstraint`;
    /// two pins that resolve to the same normalized name with different
    /// versions raise `IncompatibleRequirements`.
    pub fn wheels_to_build(&self) -> WheelhouseResult<Vec<BuildTask>> {
        let mut seen: HashMap<String, &WheelPin> = HashMap::new();
        let mut tasks = Vec::with_capacity(self.doc.wheels.len());

        for pin in &self.doc.wheels {
            if !is_exact_version(&pin.version) {
                return Err(DomainError::UnsupportedConstraint {
                    message: format!("Exact version pin required for {}", pin.name),
                    constraint: format!("{} {}", pin.name, pin.version),
                }
                .into());
            }

            let key = normalize_name(&pin.name);
            if let Some(previous) = seen.get(key.as_str()) {
                if previous.version != pin.version {
                    return Err(DomainError::IncompatibleRequirements {
                        first: previous.requirement(),
                        second: pin.requirement(),
                    }
                    .into());
                }
                return Err(WheelhouseError::PinfileInvalid {
                    path: self.path.clone(),
                    reason: format!("duplicate pin for {}", pin.name),
                });
            }
            seen.insert(key, pin);

            tasks.push(BuildTask {
                name: pin.name.clone(),
                version: pin.version.clone(),
                source: pin.source.clone(),
            });
        }

        Ok(tasks)
    }
}

/// An exact version has no range operators, wildcards or separators that
/// would make it a constraint expression
fn is_exact_version(version: &str) -> bool {
    !version.is_empty() && !version.contains(['*', '<', '>', '=', '!', '~', ' ', ','])
}

//! Build manifest persistence
//!
//! The manifest records the state of the last successful build: a hash of
//! the effective options and a fingerprint for every icon that was present.
//! It lives at `<output>/.manifest.json`.

use crate::cache::fingerprint::FileFingerprint;
use crate::error::{StrokeError, StrokeResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Current manifest schema version. Any other version is ignored.
pub const MANIFEST_VERSION: u32 = 1;

/// File name of the manifest inside the output directory
pub const MANIFEST_FILE_NAME: &str = ".manifest.json";

/// Persisted state of the last successful build
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    /// Schema version
    pub version: u32,

    /// Hash of the effective build options
    pub options_hash: String,

    /// Fingerprint of every icon, keyed by relative path
    pub files: BTreeMap<String, FileFingerprint>,
}

impl Manifest {
    /// Create a manifest at the current schema version
    pub fn new(options_hash: String, files: BTreeMap<String, FileFingerprint>) -> Self {
        Self {
            version: MANIFEST_VERSION,
            options_hash,
            files,
        }
    }

    /// Manifest location for an output directory
    pub fn path_in(output_dir: &Path) -> PathBuf {
        output_dir.join(MANIFEST_FILE_NAME)
    }

    /// Load the manifest at `path`.
    ///
    /// Returns `Ok(None)` when there is no usable prior state: the file is
    /// missing, unreadable as text, not valid JSON, or written by another
    /// schema version. Only permission errors are reported.
    pub async fn load(path: &Path) -> StrokeResult<Option<Self>> {
        let content = match fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::PermissionDenied => {
                return Err(StrokeError::io(
                    format!("reading manifest {}", path.display()),
                    e,
                ));
            }
            Err(e) => {
                debug!("No manifest at {}: {}", path.display(), e);
                return Ok(None);
            }
        };

        let value: serde_json::Value = match serde_json::from_str(&content) {
            Ok(value) => value,
            Err(e) => {
                debug!("Ignoring malformed manifest {}: {}", path.display(), e);
                return Ok(None);
            }
        };

        let version = value.get("version").and_then(|v| v.as_u64());
        if version != Some(u64::from(MANIFEST_VERSION)) {
            debug!(
                "Ignoring manifest {} with version {:?} (expected {})",
                path.display(),
                version,
                MANIFEST_VERSION
            );
            return Ok(None);
        }

        match serde_json::from_value(value) {
            Ok(manifest) => Ok(Some(manifest)),
            Err(e) => {
                debug!("Ignoring unreadable manifest {}: {}", path.display(), e);
                Ok(None)
            }
        }
    }

    /// Write the manifest as pretty-printed JSON.
    ///
    /// The content goes to a sibling temp file first and is renamed over
    /// the target, so readers never see a half-written manifest.
    pub async fn save(&self, path: &Path) -> StrokeResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| StrokeError::io(format!("creating {}", parent.display()), e))?;
        }

        let content = serde_json::to_string_pretty(self)?;
        let tmp = path.with_extension("json.tmp");

        fs::write(&tmp, content)
            .await
            .map_err(|e| StrokeError::io(format!("writing manifest {}", tmp.display()), e))?;
        fs::rename(&tmp, path)
            .await
            .map_err(|e| StrokeError::io(format!("replacing manifest {}", path.display()), e))?;

        info!("Manifest saved ({} icon(s))", self.files.len());
        Ok(())
    }
}

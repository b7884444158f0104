//! File fingerprints and configuration hashing
//!
//! A fingerprint is a cheap identity snapshot (size + mtime) of one icon
//! source. Two fingerprints with the same size and mtime describe an
//! unchanged file. Strict mode adds a SHA256 content digest for setups where
//! mtimes cannot be trusted.

use crate::error::{StrokeError, StrokeResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::fs;
use tracing::{debug, warn};

/// File extension of icon sources (matched case-insensitively)
pub const ICON_EXTENSION: &str = ".svg";

/// How file identity is established
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FingerprintMode {
    /// Size + modification time only
    #[default]
    Metadata,
    /// Size + modification time + SHA256 of the contents
    Content,
}

/// Identity snapshot of one source SVG
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileFingerprint {
    /// Path relative to the input directory
    pub rel: String,

    /// File size in bytes
    pub size: u64,

    /// Modification time in milliseconds since the epoch
    pub mtime_ms: f64,

    /// SHA256 of the file contents (strict mode only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_hash: Option<String>,
}

impl FileFingerprint {
    /// Whether `self` describes the same file state as `previous`.
    ///
    /// The relative path is not part of the comparison; callers match
    /// entries by key before asking.
    pub fn matches(&self, previous: &FileFingerprint) -> bool {
        self.size == previous.size
            && self.mtime_ms == previous.mtime_ms
            && self.content_hash == previous.content_hash
    }
}

/// Stat a file and build its fingerprint
pub async fn fingerprint(
    abs_path: &Path,
    rel: &str,
    mode: FingerprintMode,
) -> StrokeResult<FileFingerprint> {
    let meta = fs::metadata(abs_path)
        .await
        .map_err(|e| StrokeError::io(format!("stat icon {}", abs_path.display()), e))?;

    let modified = meta
        .modified()
        .map_err(|e| StrokeError::io(format!("reading mtime of {}", abs_path.display()), e))?;

    let content_hash = match mode {
        FingerprintMode::Metadata => None,
        FingerprintMode::Content => Some(hash_file_contents(abs_path).await?),
    };

    Ok(FileFingerprint {
        rel: rel.to_string(),
        size: meta.len(),
        mtime_ms: system_time_ms(modified),
        content_hash,
    })
}

/// Convert a timestamp to fractional milliseconds since the epoch
fn system_time_ms(time: SystemTime) -> f64 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(d) => d.as_secs() as f64 * 1000.0 + f64::from(d.subsec_nanos()) / 1_000_000.0,
        Err(e) => {
            let d = e.duration();
            -(d.as_secs() as f64 * 1000.0 + f64::from(d.subsec_nanos()) / 1_000_000.0)
        }
    }
}

/// Hash a file's contents using SHA256
async fn hash_file_contents(path: &Path) -> StrokeResult<String> {
    let contents = fs::read(path)
        .await
        .map_err(|e| StrokeError::io(format!("reading icon {}", path.display()), e))?;

    let mut hasher = Sha256::new();
    hasher.update(&contents);
    Ok(hex::encode(hasher.finalize()))
}

/// Hash the effective build configuration.
///
/// The value is converted to JSON with object keys sorted recursively
/// before hashing, so logically equal configurations always produce the
/// same digest regardless of field or map ordering.
pub fn hash_configuration<T: Serialize>(options: &T) -> StrokeResult<String> {
    let value = canonicalize(serde_json::to_value(options)?);
    let json = serde_json::to_string(&value)?;

    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    Ok(hex::encode(hasher.finalize()))
}

/// Rebuild a JSON value with every object's keys in sorted order
fn canonicalize(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, canonicalize(v)))
                    .collect(),
            )
        }
        Value::Array(items) => Value::Array(items.into_iter().map(canonicalize).collect()),
        other => other,
    }
}

/// List the icon sources directly inside `dir`.
///
/// Only regular files whose name ends in `.svg` (any case) are returned;
/// directories, symlinks and special files are skipped. The result is
/// sorted by name.
pub async fn list_input_files(dir: &Path) -> StrokeResult<Vec<String>> {
    let mut entries = fs::read_dir(dir)
        .await
        .map_err(|e| StrokeError::io(format!("reading icon directory {}", dir.display()), e))?;

    let mut files = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| StrokeError::io(format!("reading entry in {}", dir.display()), e))?
    {
        let file_type = entry
            .file_type()
            .await
            .map_err(|e| StrokeError::io(format!("stat {}", entry.path().display()), e))?;
        if !file_type.is_file() {
            continue;
        }

        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            warn!("Skipping non UTF-8 file name: {}", entry.path().display());
            continue;
        };

        if name.to_lowercase().ends_with(ICON_EXTENSION) {
            files.push(name);
        }
    }

    files.sort();
    debug!("Found {} icon(s) in {}", files.len(), dir.display());
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use filetime::{set_file_mtime, FileTime};
    use serde_json::json;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[tokio::test]
    async fn fingerprint_reads_size_and_mtime() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.svg");
        std::fs::write(&path, vec![b'x'; 100]).unwrap();
        set_file_mtime(&path, FileTime::from_unix_time(1_700_000_000, 500_000_000)).unwrap();

        let fp = fingerprint(&path, "a.svg", FingerprintMode::Metadata)
            .await
            .unwrap();

        assert_eq!(fp.rel, "a.svg");
        assert_eq!(fp.size, 100);
        assert_eq!(fp.mtime_ms, 1_700_000_000_500.0);
        assert!(fp.content_hash.is_none());
    }

    #[tokio::test]
    async fn fingerprint_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let result = fingerprint(
            &dir.path().join("gone.svg"),
            "gone.svg",
            FingerprintMode::Metadata,
        )
        .await;
        assert!(matches!(result, Err(StrokeError::Io { .. })));
    }

    #[tokio::test]
    async fn content_mode_records_digest() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.svg");
        std::fs::write(&path, "<svg/>").unwrap();

        let fp = fingerprint(&path, "a.svg", FingerprintMode::Content)
            .await
            .unwrap();
        let hash = fp.content_hash.unwrap();
        assert_eq!(hash.len(), 64);
    }

    #[test]
    fn matches_ignores_relative_path() {
        let a = FileFingerprint {
            rel: "a.svg".into(),
            size: 10,
            mtime_ms: 1.5,
            content_hash: None,
        };
        let b = FileFingerprint {
            rel: "b.svg".into(),
            ..a.clone()
        };
        assert!(a.matches(&b));

        let resized = FileFingerprint { size: 11, ..a.clone() };
        assert!(!resized.matches(&a));

        let touched = FileFingerprint {
            mtime_ms: 2.0,
            ..a.clone()
        };
        assert!(!touched.matches(&a));
    }

    #[test]
    fn fingerprint_serializes_with_manifest_field_names() {
        let fp = FileFingerprint {
            rel: "a.svg".into(),
            size: 100,
            mtime_ms: 1234.5,
            content_hash: None,
        };
        let value = serde_json::to_value(&fp).unwrap();
        assert_eq!(value, json!({"rel": "a.svg", "size": 100, "mtimeMs": 1234.5}));
    }

    #[test]
    fn configuration_hash_ignores_key_order() {
        let mut first = HashMap::new();
        let mut second = HashMap::new();
        for (k, v) in [("name", "icons"), ("prefix", "i"), ("selector", "icon"), ("tag", "i")] {
            first.insert(k.to_string(), v.to_string());
        }
        for (k, v) in [("tag", "i"), ("selector", "icon"), ("prefix", "i"), ("name", "icons")] {
            second.insert(k.to_string(), v.to_string());
        }

        assert_eq!(
            hash_configuration(&first).unwrap(),
            hash_configuration(&second).unwrap()
        );
    }

    #[test]
    fn configuration_hash_sorts_nested_objects() {
        let a = json!({"font": {"name": "x", "tag": "i"}, "fixer": [{"b": 1, "a": 2}]});
        let b = json!({"fixer": [{"a": 2, "b": 1}], "font": {"tag": "i", "name": "x"}});
        assert_eq!(hash_configuration(&a).unwrap(), hash_configuration(&b).unwrap());
    }

    #[test]
    fn configuration_hash_changes_with_values() {
        let a = hash_configuration(&json!({"prefix": "i"})).unwrap();
        let b = hash_configuration(&json!({"prefix": "icon"})).unwrap();
        assert_ne!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[tokio::test]
    async fn list_only_svg_regular_files() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("b.svg"), "").unwrap();
        std::fs::write(dir.path().join("A.SVG"), "").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "").unwrap();
        std::fs::create_dir(dir.path().join("nested.svg")).unwrap();

        let files = list_input_files(dir.path()).await.unwrap();
        assert_eq!(files, vec!["A.SVG".to_string(), "b.svg".to_string()]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn list_skips_symlinks() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("real.svg"), "").unwrap();
        std::os::unix::fs::symlink(dir.path().join("real.svg"), dir.path().join("link.svg"))
            .unwrap();

        let files = list_input_files(dir.path()).await.unwrap();
        assert_eq!(files, vec!["real.svg".to_string()]);
    }

    #[tokio::test]
    async fn list_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let result = list_input_files(&dir.path().join("missing")).await;
        assert!(result.is_err());
    }
}

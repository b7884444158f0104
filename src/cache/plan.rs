//! Change planning
//!
//! Compares the icons currently on disk with the previous manifest and
//! produces the set of files that changed, the set that disappeared, and
//! whether the build options differ from the last successful build.

use crate::cache::fingerprint::{
    fingerprint, hash_configuration, list_input_files, FileFingerprint, FingerprintMode,
};
use crate::cache::manifest::Manifest;
use crate::error::StrokeResult;
use futures_util::future::try_join_all;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// Outcome of comparing the input directory against the previous manifest
#[derive(Debug, Clone)]
pub struct ChangePlan {
    /// Manifest to commit if this build succeeds
    pub next_manifest: Manifest,

    /// Icons that are new or whose fingerprint differs
    pub changed_files: Vec<String>,

    /// Icons recorded previously but no longer present
    pub deleted_files: Vec<String>,

    /// Options hash differs, or there was no previous manifest
    pub options_changed: bool,

    /// A usable previous manifest was found
    pub prior_manifest_existed: bool,
}

impl ChangePlan {
    /// True when nothing changed since the last successful build
    pub fn is_up_to_date(&self) -> bool {
        self.changed_files.is_empty() && self.deleted_files.is_empty() && !self.options_changed
    }

    /// Every icon present now, in listing order
    pub fn all_files(&self) -> Vec<String> {
        self.next_manifest.files.keys().cloned().collect()
    }
}

/// Compute the change plan for `input_dir`.
///
/// Files are fingerprinted concurrently; results are collected in listing
/// order so the plan does not depend on completion order.
pub async fn plan<T: Serialize>(
    input_dir: &Path,
    previous: Option<&Manifest>,
    effective_options: &T,
    mode: FingerprintMode,
) -> StrokeResult<ChangePlan> {
    let names = list_input_files(input_dir).await?;

    let fingerprints: Vec<FileFingerprint> = try_join_all(
        names
            .iter()
            .map(|name| fingerprint_entry(input_dir, name, mode)),
    )
    .await?;

    let mut changed_files = Vec::new();
    let mut files = BTreeMap::new();
    for fp in fingerprints {
        let unchanged = previous
            .and_then(|m| m.files.get(&fp.rel))
            .is_some_and(|prev| fp.matches(prev));
        if !unchanged {
            changed_files.push(fp.rel.clone());
        }
        files.insert(fp.rel.clone(), fp);
    }

    let deleted_files: Vec<String> = previous
        .map(|m| {
            m.files
                .keys()
                .filter(|rel| !files.contains_key(*rel))
                .cloned()
                .collect()
        })
        .unwrap_or_default();

    let options_hash = hash_configuration(effective_options)?;
    let options_changed = previous.map_or(true, |m| m.options_hash != options_hash);

    debug!(
        "Plan: {} changed, {} deleted, options changed: {}",
        changed_files.len(),
        deleted_files.len(),
        options_changed
    );

    Ok(ChangePlan {
        next_manifest: Manifest::new(options_hash, files),
        changed_files,
        deleted_files,
        options_changed,
        prior_manifest_existed: previous.is_some(),
    })
}

async fn fingerprint_entry(
    input_dir: &Path,
    name: &str,
    mode: FingerprintMode,
) -> StrokeResult<FileFingerprint> {
    fingerprint(&input_dir.join(name), name, mode).await
}

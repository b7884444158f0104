//! Incremental build cache
//!
//! Decides how much work a build has to do by comparing the icons on disk
//! with the manifest of the last successful build.
//!
//! # Identity
//!
//! - Icons are identified by size + mtime (optionally + SHA256 in strict mode)
//! - Options are identified by a SHA256 of their canonical JSON form
//! - A manifest with a different schema version counts as missing
//!
//! # Outcomes
//!
//! | Changed | Deleted | Options changed | Result |
//! |---------|---------|-----------------|--------|
//! | none | none | no | Up to date, nothing runs |
//! | any | any | no | Re-clean changed icons, regenerate fonts |
//! | any | any | yes | Re-clean every icon, regenerate fonts |

pub mod fingerprint;
pub mod manifest;
pub mod plan;

pub use fingerprint::{
    fingerprint, hash_configuration, list_input_files, FileFingerprint, FingerprintMode,
    ICON_EXTENSION,
};
pub use manifest::{Manifest, MANIFEST_FILE_NAME, MANIFEST_VERSION};
pub use plan::{plan, ChangePlan};

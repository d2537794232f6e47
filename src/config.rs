//! Signer configuration and build constants.
//!
//! The signer configuration is the document shared with the backend signing
//! service; the only field the build cares about is the origin whitelist.
//! Artifact names and trusted extension IDs are fixed at build time and live
//! here as named constants.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{BuildError, BuildResult};

/// Companion extensions trusted to message the KeyWire extension directly.
/// Always written verbatim into `externally_connectable.ids`.
pub const ALLOWED_EXTENSION_IDS: [&str; 2] = [
    "ceofpjbglmlkjkfdmnppicmiedhkaeed",
    "kjbdcmnepbhgllmkcoaogcfnjdmdklkb",
];

/// Display name used for beta channel builds.
pub const BETA_NAME: &str = "KeyWire Bridge (beta)";

/// Filename the firmware image is staged under.
pub const FIRMWARE_IMAGE_NAME: &str = "firmware.bin.hex";

/// Filename of the signed configuration blob, in both source and staging.
pub const SIGNED_CONFIG_NAME: &str = "config_signed.bin";

/// Filename of the release index, in both source and staging.
pub const RELEASE_INDEX_NAME: &str = "releases.json";

/// URL written into the staged release index, relative to the extension root.
pub const STAGED_FIRMWARE_URL: &str = "/data/firmware.bin.hex";

/// Signer configuration document.
#[derive(Debug, Clone, Deserialize)]
pub struct SignerConfig {
    /// Allowed origins, as restricted regex strings.
    pub whitelist_urls: Vec<String>,
}

impl SignerConfig {
    /// Load the signer configuration from a JSON file.
    pub fn load(path: &Path) -> BuildResult<Self> {
        let contents = fs::read_to_string(path).map_err(|e| BuildError::ConfigLoad {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        serde_json::from_str(&contents).map_err(|e| BuildError::ConfigLoad {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

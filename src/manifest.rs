//! Extension manifest assembly.
//!
//! Takes the manifest template (everything except connectivity), injects the
//! `externally_connectable` section derived from the signer whitelist, and
//! applies the beta channel overrides when requested.

use std::fs;
use std::path::Path;

use serde_json::{json, Map, Value};

use crate::config::{ALLOWED_EXTENSION_IDS, BETA_NAME};
use crate::error::{BuildError, BuildResult};

/// Load the manifest template from a JSON file.
pub fn load_template(path: &Path) -> BuildResult<Map<String, Value>> {
    let contents = fs::read_to_string(path).map_err(|e| BuildError::ConfigLoad {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    serde_json::from_str(&contents).map_err(|e| BuildError::ConfigLoad {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Enrich a manifest template with the connectivity section.
///
/// `matches` is the translated whitelist; the trusted extension IDs are
/// attached verbatim. With `beta` set, the display name is replaced by the
/// beta variant and the signing `key` is removed if present.
pub fn assemble(
    mut manifest: Map<String, Value>,
    matches: Vec<String>,
    beta: bool,
) -> Map<String, Value> {
    manifest.insert(
        "externally_connectable".to_string(),
        json!({
            "matches": matches,
            "ids": ALLOWED_EXTENSION_IDS,
        }),
    );

    if beta {
        manifest.insert("name".to_string(), Value::String(BETA_NAME.to_string()));
        manifest.remove("key");
    }

    manifest
}

/// Write the final manifest, fully overwriting any previous content.
///
/// Output is pretty-printed for human review. The parent directory is
/// created if missing.
pub fn write(manifest: &Map<String, Value>, path: &Path) -> BuildResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| BuildError::OutputWrite {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    }

    let contents = serde_json::to_string_pretty(manifest).map_err(|e| BuildError::OutputWrite {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    fs::write(path, contents).map_err(|e| BuildError::OutputWrite {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

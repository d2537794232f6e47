//! Firmware release staging.
//!
//! The firmware directory holds the published binaries and a release index
//! ordered newest-first. Staging copies the current release and the signed
//! configuration blob into the extension staging tree, then writes a
//! single-entry index whose `url` points at the staged copy.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::{
    FIRMWARE_IMAGE_NAME, RELEASE_INDEX_NAME, SIGNED_CONFIG_NAME, STAGED_FIRMWARE_URL,
};
use crate::error::{BuildError, BuildResult};

/// One published firmware release.
///
/// Only `url` is interpreted; whatever else the index carries (version,
/// release date, changelog) is passed through untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseEntry {
    pub url: String,

    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

/// Load the release index. The first entry is the current release.
pub fn load_release_index(path: &Path) -> BuildResult<Vec<ReleaseEntry>> {
    let contents = fs::read_to_string(path).map_err(|e| BuildError::ConfigLoad {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    serde_json::from_str(&contents).map_err(|e| BuildError::ConfigLoad {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Stage the current firmware release into `staging_dir`.
///
/// Copies the binary named by the current entry's `url` tail and the signed
/// configuration blob, overwriting staged copies from earlier runs, then
/// writes the rewritten single-entry release index. Returns the rewritten
/// entry.
pub fn stage_release(
    index_path: &Path,
    firmware_dir: &Path,
    signed_config: &Path,
    staging_dir: &Path,
) -> BuildResult<ReleaseEntry> {
    let releases = load_release_index(index_path)?;

    let mut current = releases
        .into_iter()
        .next()
        .ok_or_else(|| BuildError::ConfigLoad {
            path: index_path.to_path_buf(),
            message: "release index is empty".to_string(),
        })?;

    let firmware_src = firmware_dir.join(firmware_filename(&current.url));

    // Check both sources before touching the staging directory, so a failed
    // run leaves no partial output.
    if !firmware_src.is_file() {
        return Err(BuildError::MissingArtifact(firmware_src));
    }
    if !signed_config.is_file() {
        return Err(BuildError::MissingArtifact(signed_config.to_path_buf()));
    }

    fs::create_dir_all(staging_dir).map_err(|e| BuildError::OutputWrite {
        path: staging_dir.to_path_buf(),
        message: e.to_string(),
    })?;

    copy_artifact(&firmware_src, &staging_dir.join(FIRMWARE_IMAGE_NAME))?;
    copy_artifact(signed_config, &staging_dir.join(SIGNED_CONFIG_NAME))?;

    current.url = STAGED_FIRMWARE_URL.to_string();

    let index_out = staging_dir.join(RELEASE_INDEX_NAME);
    let contents =
        serde_json::to_string_pretty(&[&current]).map_err(|e| BuildError::OutputWrite {
            path: index_out.clone(),
            message: e.to_string(),
        })?;

    fs::write(&index_out, contents).map_err(|e| BuildError::OutputWrite {
        path: index_out,
        message: e.to_string(),
    })?;

    Ok(current)
}

/// The firmware filename is the tail of the release URL.
fn firmware_filename(url: &str) -> &str {
    match url.rfind('/') {
        Some(idx) => &url[idx + 1..],
        None => url,
    }
}

fn copy_artifact(src: &Path, dst: &Path) -> BuildResult<()> {
    fs::copy(src, dst).map_err(|e| BuildError::OutputWrite {
        path: dst.to_path_buf(),
        message: e.to_string(),
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    struct Fixture {
        _temp_dir: TempDir,
        index_path: std::path::PathBuf,
        firmware_dir: std::path::PathBuf,
        signed_config: std::path::PathBuf,
        staging_dir: std::path::PathBuf,
    }

    fn fixture(index: Value) -> Fixture {
        let temp_dir = TempDir::new().unwrap();
        let firmware_dir = temp_dir.path().join("data/firmware");
        fs::create_dir_all(&firmware_dir).unwrap();

        let index_path = firmware_dir.join(RELEASE_INDEX_NAME);
        fs::write(&index_path, serde_json::to_string_pretty(&index).unwrap()).unwrap();

        let signed_config = temp_dir.path().join("data").join(SIGNED_CONFIG_NAME);
        fs::write(&signed_config, b"signed-config").unwrap();

        let staging_dir = temp_dir.path().join("extension/data");

        Fixture {
            index_path,
            firmware_dir,
            signed_config,
            staging_dir,
            _temp_dir: temp_dir,
        }
    }

    fn two_release_index() -> Value {
        json!([
            {
                "url": "https://releases.keywire.io/fw/firmware-v3.bin",
                "version": [3, 0, 0],
                "notes": "current"
            },
            {
                "url": "https://releases.keywire.io/fw/firmware-v2.bin",
                "version": [2, 1, 0]
            }
        ])
    }

    #[test]
    fn test_stages_current_release() {
        let fx = fixture(two_release_index());
        fs::write(fx.firmware_dir.join("firmware-v3.bin"), b"v3-image").unwrap();

        let staged = stage_release(
            &fx.index_path,
            &fx.firmware_dir,
            &fx.signed_config,
            &fx.staging_dir,
        )
        .unwrap();

        assert_eq!(staged.url, STAGED_FIRMWARE_URL);
        assert_eq!(
            fs::read(fx.staging_dir.join(FIRMWARE_IMAGE_NAME)).unwrap(),
            b"v3-image"
        );
        assert_eq!(
            fs::read(fx.staging_dir.join(SIGNED_CONFIG_NAME)).unwrap(),
            b"signed-config"
        );
    }

    #[test]
    fn test_staged_index_has_single_rewritten_entry() {
        let fx = fixture(two_release_index());
        fs::write(fx.firmware_dir.join("firmware-v3.bin"), b"v3-image").unwrap();

        stage_release(
            &fx.index_path,
            &fx.firmware_dir,
            &fx.signed_config,
            &fx.staging_dir,
        )
        .unwrap();

        let staged_index =
            load_release_index(&fx.staging_dir.join(RELEASE_INDEX_NAME)).unwrap();
        assert_eq!(staged_index.len(), 1);
        assert_eq!(staged_index[0].url, STAGED_FIRMWARE_URL);

        // Uninterpreted fields survive the rewrite.
        assert_eq!(staged_index[0].rest["version"], json!([3, 0, 0]));
        assert_eq!(staged_index[0].rest["notes"], json!("current"));
    }

    #[test]
    fn test_rerun_is_idempotent() {
        let fx = fixture(two_release_index());
        fs::write(fx.firmware_dir.join("firmware-v3.bin"), b"v3-image").unwrap();

        for _ in 0..2 {
            stage_release(
                &fx.index_path,
                &fx.firmware_dir,
                &fx.signed_config,
                &fx.staging_dir,
            )
            .unwrap();
        }

        let staged_index =
            load_release_index(&fx.staging_dir.join(RELEASE_INDEX_NAME)).unwrap();
        assert_eq!(staged_index.len(), 1);
        assert_eq!(
            fs::read(fx.staging_dir.join(FIRMWARE_IMAGE_NAME)).unwrap(),
            b"v3-image"
        );
    }

    #[test]
    fn test_missing_firmware_binary() {
        let fx = fixture(two_release_index());
        // firmware-v3.bin intentionally absent

        let result = stage_release(
            &fx.index_path,
            &fx.firmware_dir,
            &fx.signed_config,
            &fx.staging_dir,
        );

        assert!(matches!(result, Err(BuildError::MissingArtifact(_))));
        assert!(!fx.staging_dir.exists());
    }

    #[test]
    fn test_missing_signed_config() {
        let fx = fixture(two_release_index());
        fs::write(fx.firmware_dir.join("firmware-v3.bin"), b"v3-image").unwrap();
        fs::remove_file(&fx.signed_config).unwrap();

        let result = stage_release(
            &fx.index_path,
            &fx.firmware_dir,
            &fx.signed_config,
            &fx.staging_dir,
        );

        assert!(matches!(result, Err(BuildError::MissingArtifact(_))));
        assert!(!fx.staging_dir.exists());
    }

    #[test]
    fn test_empty_release_index() {
        let fx = fixture(json!([]));

        let result = stage_release(
            &fx.index_path,
            &fx.firmware_dir,
            &fx.signed_config,
            &fx.staging_dir,
        );

        assert!(matches!(result, Err(BuildError::ConfigLoad { .. })));
    }

    #[test]
    fn test_firmware_filename_from_url_tail() {
        assert_eq!(
            firmware_filename("https://releases.keywire.io/fw/firmware-v3.bin"),
            "firmware-v3.bin"
        );
        assert_eq!(firmware_filename("firmware-v3.bin"), "firmware-v3.bin");
    }
}

//! Firmware command for `keywire-build firmware`.
//!
//! Stages the current firmware release and its signed configuration for
//! bundling into the extension.

use std::path::Path;

use anyhow::Result;
use console::style;

use crate::config::{FIRMWARE_IMAGE_NAME, RELEASE_INDEX_NAME};
use crate::firmware;

/// Stage the current firmware release.
pub fn run_firmware(firmware_dir: &Path, signed_config: &Path, staging_dir: &Path) -> Result<()> {
    let index_path = firmware_dir.join(RELEASE_INDEX_NAME);

    let staged = firmware::stage_release(&index_path, firmware_dir, signed_config, staging_dir)?;

    println!(
        "{} {} {}",
        style("✓").green().bold(),
        style("Staged firmware release as").cyan(),
        style(staging_dir.join(FIRMWARE_IMAGE_NAME).display().to_string()).dim()
    );
    println!(
        "{} {} {}",
        style("✓").green().bold(),
        style("Wrote release index").cyan(),
        style(format!(
            "{} (url: {})",
            staging_dir.join(RELEASE_INDEX_NAME).display(),
            staged.url
        ))
        .dim()
    );

    Ok(())
}

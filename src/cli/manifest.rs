//! Manifest command for `keywire-build manifest`.
//!
//! Translates the signer whitelist into match patterns and writes the
//! enriched extension manifest.

use std::path::Path;

use anyhow::Result;
use console::style;

use crate::config::SignerConfig;
use crate::{manifest, patterns};

/// Generate the extension manifest.
pub fn run_manifest(
    config_path: &Path,
    template_path: &Path,
    out_path: &Path,
    beta: bool,
) -> Result<()> {
    let config = SignerConfig::load(config_path)?;

    let matches = patterns::translate_whitelist(&config.whitelist_urls);
    let dropped = config.whitelist_urls.len() - matches.len();

    println!(
        "{} {}",
        style("✓").green().bold(),
        style(format!("Translated {} whitelist entries", matches.len())).cyan()
    );
    if dropped > 0 {
        println!(
            "{} {}",
            style("!").yellow().bold(),
            style(format!("Dropped {} unusable entries", dropped)).dim()
        );
    }

    let template = manifest::load_template(template_path)?;

    if beta {
        println!(
            "{} {}",
            style("→").cyan(),
            style("Applying beta channel overrides").dim()
        );
    }

    let enriched = manifest::assemble(template, matches, beta);
    manifest::write(&enriched, out_path)?;

    println!(
        "{} {} {}",
        style("✓").green().bold(),
        style("Wrote manifest").cyan(),
        style(out_path.display().to_string()).dim()
    );

    Ok(())
}

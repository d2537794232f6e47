//! Patterns command for `keywire-build patterns`.
//!
//! Prints the translated match pattern list for inspection without touching
//! the output tree.

use std::path::Path;

use anyhow::Result;

use crate::config::SignerConfig;
use crate::patterns;

/// Print the translated whitelist as indented JSON.
pub fn run_patterns(config_path: &Path) -> Result<()> {
    let config = SignerConfig::load(config_path)?;
    let matches = patterns::translate_whitelist(&config.whitelist_urls);

    println!("{}", serde_json::to_string_pretty(&matches)?);

    Ok(())
}

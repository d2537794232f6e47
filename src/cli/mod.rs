//! CLI commands for keywire-build.
//!
//! Each subcommand is one standalone build step: manifest generation,
//! firmware staging, or pattern inspection.

pub mod firmware;
pub mod manifest;
pub mod patterns;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "keywire-build")]
#[command(about = "Build-time asset generator for the KeyWire browser extension", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate the extension manifest from the signer whitelist
    Manifest {
        /// Path to the signer configuration
        #[arg(long, default_value = "signer/config.json")]
        config: PathBuf,

        /// Path to the manifest template
        #[arg(long, default_value = "manifest_no_matches.json")]
        template: PathBuf,

        /// Output path for the generated manifest
        #[arg(long, default_value = "extension/manifest.json")]
        out: PathBuf,

        /// Build the beta channel variant (also enabled by KEYWIRE_BETA)
        #[arg(long)]
        beta: bool,
    },

    /// Stage the current firmware release for bundling
    Firmware {
        /// Directory containing firmware binaries and the release index
        #[arg(long, default_value = "data/firmware")]
        firmware_dir: PathBuf,

        /// Path to the signed configuration blob
        #[arg(long, default_value = "data/config_signed.bin")]
        signed_config: PathBuf,

        /// Staging directory for bundled artifacts
        #[arg(long, default_value = "extension/data")]
        staging_dir: PathBuf,
    },

    /// Print the translated match pattern list as JSON
    Patterns {
        /// Path to the signer configuration
        #[arg(long, default_value = "signer/config.json")]
        config: PathBuf,
    },
}

/// Parse arguments and run the selected build step.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Manifest {
            config,
            template,
            out,
            beta,
        } => {
            // Resolved once here; the assembler itself never reads the
            // environment.
            let beta = beta || std::env::var("KEYWIRE_BETA").is_ok();
            manifest::run_manifest(&config, &template, &out, beta)
        }
        Commands::Firmware {
            firmware_dir,
            signed_config,
            staging_dir,
        } => firmware::run_firmware(&firmware_dir, &signed_config, &staging_dir),
        Commands::Patterns { config } => patterns::run_patterns(&config),
    }
}

//! keywire-build binary entry point.
//!
//! Each subcommand is an independent, run-to-completion build step invoked
//! from the extension packaging scripts.

mod cli;
mod config;
mod error;
mod firmware;
mod manifest;
mod patterns;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

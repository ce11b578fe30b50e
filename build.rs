//! Build script for sporldeck.
//!
//! Copies the `.env.example` configuration template into the user's local
//! data directory, next to the `.env` file the CLI loads at startup.

use std::{env, fs, path::PathBuf};

/// Copies `.env.example` from the crate root into the local data directory.
///
/// # Destination
///
/// - Linux: `~/.local/share/sporldeck/.env.example`
/// - macOS: `~/Library/Application Support/sporldeck/.env.example`
/// - Windows: `%LOCALAPPDATA%/sporldeck/.env.example`
///
/// # Errors
///
/// Only an unreadable `CARGO_MANIFEST_DIR` fails the build. A missing
/// template, or a data directory that cannot be created or written, is
/// reported as a `cargo:warning` and the build continues.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=.env.example");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let env_example_path = manifest_dir.join(".env.example");

    if !env_example_path.is_file() {
        println!(
            "cargo:warning=.env.example not found at {}",
            env_example_path.display()
        );
        return Ok(());
    }

    let mut out_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push("sporldeck");

    if let Err(e) = fs::create_dir_all(&out_dir) {
        println!(
            "cargo:warning=could not create {}: {}",
            out_dir.display(),
            e
        );
        return Ok(());
    }

    let target = out_dir.join(".env.example");
    if let Err(e) = fs::copy(&env_example_path, &target) {
        println!("cargo:warning=could not copy .env.example to {}: {}", target.display(), e);
    }

    Ok(())
}

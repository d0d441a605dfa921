use std::path::PathBuf;

use clap::Parser;

/// Validate an Office Add-in manifest against the remote verification service.
#[derive(Debug, Parser)]
#[command(name = "adc", version, about)]
pub struct Cli {
    /// Path to the add-in manifest XML file
    pub manifest: PathBuf,
}

//! `rolegate config`: sample generation and validation

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use rolegate_config::{ConfigLoader, RolegateConfig};

pub fn generate(output: Option<PathBuf>) -> Result<()> {
    let sample = RolegateConfig::generate_sample();
    match output {
        Some(path) => {
            std::fs::write(&path, sample).context(format!("Failed to write {:?}", path))?;
            println!("Sample configuration written to {:?}", path);
        }
        None => print!("{}", sample),
    }
    Ok(())
}

pub fn validate(file: &Path) -> Result<()> {
    ConfigLoader::new()
        .from_file(file)
        .context(format!("Configuration {:?} is invalid", file))?;
    println!("Configuration {:?} is valid", file);
    Ok(())
}

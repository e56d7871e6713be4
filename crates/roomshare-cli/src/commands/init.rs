use std::path::Path;

use anyhow::{Result, bail};
use roomshare_core::RoomshareConfig;

use super::settings::{DEFAULT_CONFIG, DEFAULT_INPUT};

/// Write a scaffold `roomshare.toml` into `path`. Refuses to overwrite.
pub fn init(path: &str) -> Result<()> {
    let output = Path::new(path).join(DEFAULT_CONFIG);
    if output.exists() {
        bail!("{} already exists", output.display());
    }

    let config = RoomshareConfig::scaffold(DEFAULT_INPUT);
    std::fs::write(&output, config.to_toml_string()?)?;
    println!("✓ Generated {}", output.display());
    Ok(())
}

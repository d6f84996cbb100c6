use std::path::Path;

use anyhow::bail;
use desk_core::OptimizerConfig;

/// Write a default desk.toml, refusing to clobber an existing file.
pub fn init(path: &str) -> anyhow::Result<()> {
    let output = Path::new(path);
    if output.exists() {
        bail!("{} already exists", output.display());
    }

    std::fs::write(output, OptimizerConfig::default().to_toml_string()?)?;
    println!("✓ Generated {}", output.display());
    Ok(())
}

use std::path::Path;

use agran_kernel::config::KernelConfig;

use crate::error::SimError;

/// Parse and validate a kernel configuration from TOML text.
pub fn parse(text: &str, path: &Path) -> Result<KernelConfig, SimError> {
    let config: KernelConfig = toml::from_str(text).map_err(|source| SimError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })?;
    config.validate()?;
    Ok(config)
}

/// Load the configuration file, or the defaults when none is given.
pub fn load(path: Option<&Path>) -> Result<KernelConfig, SimError> {
    let Some(path) = path else {
        return Ok(KernelConfig::default());
    };
    let text = std::fs::read_to_string(path).map_err(|source| SimError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config = parse(&text, path)?;
    log::info!("loaded configuration from {}", path.display());
    Ok(config)
}

use anyhow::{Context, Result};
use cubist_core::GenerationParameters;
use std::{fs, io, path::Path};
use tracing::{debug, warn};

/// Parameter file picked up from the working directory when `--config` is absent.
pub const DEFAULT_PARAMS_PATH: &str = "cubist.toml";

/// Load parameters from a TOML file, failing on any read or parse error.
pub fn load_params(path: &Path) -> Result<GenerationParameters> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read parameters from {}", path.display()))?;
    toml::from_str(&contents)
        .with_context(|| format!("Failed to parse parameters in {}", path.display()))
}

/// Load parameters, falling back to defaults when the file is missing or invalid.
pub fn load_params_or_default(path: &Path) -> GenerationParameters {
    match fs::read_to_string(path) {
        Ok(contents) => match toml::from_str::<GenerationParameters>(&contents) {
            Ok(params) => params,
            Err(err) => {
                warn!("Failed to parse {}: {err}. Using defaults", path.display());
                GenerationParameters::default()
            }
        },
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!("No parameter file at {}. Using defaults", path.display());
            GenerationParameters::default()
        }
        Err(err) => {
            warn!("Failed to read {}: {err}. Using defaults", path.display());
            GenerationParameters::default()
        }
    }
}

/// Write parameters as pretty TOML, creating parent directories as needed.
pub fn save_params(params: &GenerationParameters, path: &Path) -> Result<()> {
    let toml = toml::to_string_pretty(params)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
    }
    fs::write(path, toml).with_context(|| format!("Failed to write {}", path.display()))
}

//! Configuration handling for generator packages.
//! A generator may carry `gpig.json`, `gpig.yml` or `gpig.yaml` next to its
//! templates; every setting has a default, so the file is optional.

use crate::constants::{
    CONFIG_FILES, DEFAULT_SCRATCH_NAME, DEFAULT_TABLE_SOURCE_PATH, DEFAULT_TEMPLATE_DIR,
    ASSETS_DIR,
};
use crate::error::{GpigError, GpigResult};
use crate::params::{ParameterId, ParameterSet};
use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Template directory inside a generator package
    pub template_dir: String,
    /// Parent of the scratch workspace, relative to the host project root
    pub scratch_parent: PathBuf,
    /// Base name of the scratch workspace
    pub scratch_name: String,
    /// Path of the repository table source inside the generated package
    pub table_source_path: String,
    /// Copy non-template files verbatim instead of skipping them
    pub copy_opaque: bool,
    /// Extra glob patterns excluded from the template tree
    pub ignore: Vec<String>,
    /// Parameter defaults keyed by identifier (`PkgName`, `PkgVer`, ...)
    pub defaults: IndexMap<String, String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            template_dir: DEFAULT_TEMPLATE_DIR.to_string(),
            scratch_parent: PathBuf::from(ASSETS_DIR),
            scratch_name: DEFAULT_SCRATCH_NAME.to_string(),
            table_source_path: DEFAULT_TABLE_SOURCE_PATH.to_string(),
            copy_opaque: false,
            ignore: Vec::new(),
            defaults: ParameterId::ALL
                .into_iter()
                .map(|id| (id.identifier().to_string(), id.fallback_default().to_string()))
                .collect(),
        }
    }
}

impl GeneratorConfig {
    /// Default values for every parameter; configured values win over the
    /// built-in ones.
    ///
    /// # Errors
    /// * `GpigError::ConfigError` if a default names an unknown parameter
    pub fn parameter_defaults(&self) -> GpigResult<ParameterSet> {
        let mut params = ParameterSet::new();
        for id in ParameterId::ALL {
            params.set(id, id.fallback_default());
        }
        for (key, value) in &self.defaults {
            let id = ParameterId::from_identifier(key).ok_or_else(|| {
                GpigError::ConfigError(format!("unknown parameter '{}' in defaults", key))
            })?;
            params.set(id, value.as_str());
        }
        Ok(params)
    }
}

/// Loads the first configuration file present in `generator_dir`.
///
/// # Returns
/// * `GpigResult<Option<String>>` - Contents of the file, `None` if there is none
pub fn load_config<P: AsRef<Path>>(generator_dir: P, config_files: &[&str]) -> GpigResult<Option<String>> {
    for file in config_files {
        let config_path = generator_dir.as_ref().join(file);
        if config_path.exists() {
            debug!("Loading configuration from {}", config_path.display());
            return Ok(Some(std::fs::read_to_string(&config_path)?));
        }
    }
    Ok(None)
}

/// Parses configuration content, trying JSON first and YAML second.
///
/// # Errors
/// * `GpigError::ConfigError` if the content is neither valid JSON nor valid YAML
///   for the configuration schema
pub fn parse_config(content: &str) -> GpigResult<GeneratorConfig> {
    match serde_json::from_str(content) {
        Ok(config) => Ok(config),
        Err(_) => serde_yaml::from_str(content)
            .map_err(|e| GpigError::ConfigError(format!("Invalid configuration format: {}", e))),
    }
}

/// Returns the generator configuration for `generator_dir`, or the defaults
/// when it has no configuration file.
pub fn get_config<P: AsRef<Path>>(generator_dir: P) -> GpigResult<GeneratorConfig> {
    match load_config(generator_dir, &CONFIG_FILES)? {
        Some(content) => parse_config(&content),
        None => {
            debug!("No configuration file found, using defaults");
            Ok(GeneratorConfig::default())
        }
    }
}

use anyhow::{Context, Result};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::Serialize;
use std::path::Path;

use super::smart_load;
use super::types::SweepConfig;

// Embed the default config at compile time
const DEFAULT_CONFIG: &str = include_str!("../../default-config.toml");

/// Config files picked up from the working directory, lowest priority first
const LOCAL_CONFIG_FILES: &[&str] = &["porosity.toml", "porosity.json", "porosity.yaml", "porosity.yml"];

pub struct PorosityConfig {
    figment: Figment,
}

impl PorosityConfig {
    pub fn load() -> Result<Self> {
        Self::load_with_overrides(None, None::<()>)
    }

    /// Layered load: defaults, local files, custom file, env, then CLI overrides
    pub fn load_with_overrides<T: Serialize>(custom_config: Option<&str>, cli_overrides: Option<T>) -> Result<Self> {
        tracing::trace!("CONFIG LOAD: Starting");

        let mut figment = Figment::new().merge(Toml::string(DEFAULT_CONFIG));

        for file in LOCAL_CONFIG_FILES {
            figment = figment.merge(smart_load::auto(file));
        }

        if let Some(custom_path) = custom_config {
            if !Path::new(custom_path).is_file() {
                anyhow::bail!("Configuration file not found: {}", custom_path);
            }
            figment = figment.merge(smart_load::auto(custom_path));
        }

        // POROSITY_SWEEP__OUTPUT_DIR -> sweep.output_dir
        figment = figment.merge(Env::prefixed("POROSITY_").split("__"));

        if let Some(overrides) = cli_overrides {
            tracing::trace!("CONFIG LOAD: Applying CLI overrides");
            figment = figment.merge(Serialized::defaults(overrides));
        }

        Ok(PorosityConfig { figment })
    }

    /// Extract and validate the `[sweep]` section
    pub fn sweep(&self) -> Result<SweepConfig> {
        let sweep: SweepConfig = self
            .figment
            .extract_inner("sweep")
            .context("Invalid [sweep] configuration")?;
        sweep.validate()?;
        Ok(sweep)
    }

    /// Get a nested object/section as JSON
    pub fn get_section(&self, path: &str) -> Result<serde_json::Value> {
        Ok(self.figment.extract_inner(path)?)
    }

    /// Get the full merged configuration as a structured value
    pub fn get_full_config(&self) -> Result<serde_json::Value> {
        Ok(self.figment.extract()?)
    }
}

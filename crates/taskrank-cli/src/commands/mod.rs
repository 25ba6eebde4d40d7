pub mod analyze;
pub mod config;
pub mod session;
pub mod strategies;
pub mod suggest;

use std::path::Path;

use taskrank_core::{AnalysisError, Config, ConfigError, OutputFormat, ScoringClient};

/// Resolved settings shared by the commands that talk to the service.
pub struct Context {
    pub config: Config,
    pub format: OutputFormat,
}

impl Context {
    /// Load the config file and apply command-line overrides on top.
    pub fn load(
        path: &Path,
        api_base: Option<String>,
        format: Option<OutputFormat>,
    ) -> Result<Self, ConfigError> {
        let mut config = Config::load_from(path)?;
        if let Some(base) = api_base {
            config.api.base_url = base;
        }
        let format = format.unwrap_or(config.output.format);
        Ok(Self { config, format })
    }

    pub fn client(&self) -> Result<ScoringClient, AnalysisError> {
        ScoringClient::new(&self.config.api.base_url)
    }
}

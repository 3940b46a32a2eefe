use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Tuning knobs for the formatting heuristics.
///
/// Every field has a default, so an empty configuration is always valid.
#[derive(Debug, Deserialize, Clone)]
pub struct FormatterConfig {
    /// Minimum consecutive ingredient-like lines required before the
    /// header-less fallback accepts an ingredient section
    #[serde(default = "default_min_ingredient_run")]
    pub min_ingredient_run: usize,
    /// Minimum consecutive step-like lines required before the header-less
    /// fallback accepts a step section
    #[serde(default = "default_min_step_run")]
    pub min_step_run: usize,
    /// Unnumbered steps shorter than this merge into the preceding step
    #[serde(default = "default_short_step_threshold")]
    pub short_step_threshold: usize,
    /// Whether to use line bounding boxes for ingredient detection when the
    /// OCR engine provides them
    #[serde(default = "default_spatial_layout")]
    pub spatial_layout: bool,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            min_ingredient_run: default_min_ingredient_run(),
            min_step_run: default_min_step_run(),
            short_step_threshold: default_short_step_threshold(),
            spatial_layout: default_spatial_layout(),
        }
    }
}

// Default value functions
fn default_min_ingredient_run() -> usize {
    3
}

fn default_min_step_run() -> usize {
    2
}

fn default_short_step_threshold() -> usize {
    20
}

fn default_spatial_layout() -> bool {
    true
}

impl FormatterConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with COOKBOOK__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: COOKBOOK__SHORT_STEP_THRESHOLD
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            // Optional config file (can be missing)
            .add_source(File::with_name("config").required(false))
            .add_source(
                Environment::with_prefix("COOKBOOK")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

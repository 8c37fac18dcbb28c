//! Shared configuration loader for the quire Markdown tools.
//!
//! `defaults/quire.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`QuireConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use quire_markdown::inspect::InspectFormat;
use quire_markdown::{ConversionOptions, TransformerRegistry};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/quire.default.toml");

/// Top-level configuration consumed by quire applications.
#[derive(Debug, Clone, Deserialize)]
pub struct QuireConfig {
    pub import: ImportConfig,
    pub export: ExportConfig,
    pub rules: RulesConfig,
    pub inspect: InspectConfig,
}

impl QuireConfig {
    /// The playground registry, tuned by the `[rules]` tables.
    pub fn registry(&self) -> TransformerRegistry {
        TransformerRegistry::playground_with(self.rules.image.max_width)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImportConfig {
    pub normalize_list_indentation: bool,
    pub preserve_new_lines: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    pub normalize_list_indentation: bool,
}

impl From<&QuireConfig> for ConversionOptions {
    fn from(config: &QuireConfig) -> Self {
        ConversionOptions {
            normalize_on_import: config.import.normalize_list_indentation,
            normalize_on_export: config.export.normalize_list_indentation,
            preserve_new_lines: config.import.preserve_new_lines,
        }
    }
}

/// Per-rule knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct RulesConfig {
    pub image: ImageRuleConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageRuleConfig {
    pub max_width: u32,
}

/// Controls `quire import` output.
#[derive(Debug, Clone, Deserialize)]
pub struct InspectConfig {
    pub format: InspectFormatConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum InspectFormatConfig {
    #[serde(rename = "treeviz")]
    Treeviz,
    #[serde(rename = "json")]
    Json,
}

impl From<InspectFormatConfig> for InspectFormat {
    fn from(format: InspectFormatConfig) -> Self {
        match format {
            InspectFormatConfig::Treeviz => InspectFormat::Treeviz,
            InspectFormatConfig::Json => InspectFormat::Json,
        }
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<QuireConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<QuireConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert!(config.import.normalize_list_indentation);
        assert!(!config.import.preserve_new_lines);
        assert!(!config.export.normalize_list_indentation);
        assert_eq!(config.rules.image.max_width, 800);
        assert_eq!(config.inspect.format, InspectFormatConfig::Treeviz);
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("inspect.format", "json")
            .expect("override to apply")
            .set_override("rules.image.max_width", 640i64)
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.inspect.format, InspectFormatConfig::Json);
        assert_eq!(InspectFormat::from(config.inspect.format), InspectFormat::Json);
        assert_eq!(config.rules.image.max_width, 640);
    }

    #[test]
    fn missing_required_file_is_an_error() {
        let result = Loader::new().with_file("does/not/exist.toml").build();
        assert!(result.is_err());
    }

    #[test]
    fn config_converts_to_conversion_options() {
        let config = Loader::new()
            .set_override("export.normalize_list_indentation", true)
            .expect("override to apply")
            .build()
            .expect("config to build");
        let options = ConversionOptions::from(&config);
        assert_eq!(
            options,
            ConversionOptions {
                normalize_on_import: true,
                normalize_on_export: true,
                preserve_new_lines: false,
            }
        );
    }

    #[test]
    fn registry_uses_configured_image_width() {
        let config = load_defaults().expect("defaults to deserialize");
        let registry = config.registry();
        assert!(registry.has("image"));
        assert_eq!(registry.len(), TransformerRegistry::playground().len());
    }
}

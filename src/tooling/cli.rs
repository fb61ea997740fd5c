//! CLI Tooling
//!
//! Resolves configuration the same way the front end does and prints the
//! result, so declared sources can be checked from a shell or CI job.

use crate::config::{LoaderSettings, SettingsLoader};
use crate::error::ConfigError;
use crate::loader::ConfigLoader;
use crate::locale::SharedLanguageSelector;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Map Config CLI - resolve and inspect per-language map configuration
#[derive(Parser)]
#[command(name = "map-config")]
#[command(about = "Resolve per-language map configuration merged over defaults")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Settings file path (layered over the global settings file)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Overrides for the declared source, shared by loading commands.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Inline JSON config or URL template (overrides settings)
    #[arg(long)]
    pub source: Option<String>,

    /// JSON array of language codes (overrides settings)
    #[arg(long)]
    pub languages: Option<String>,

    /// Defaults file, JSON or TOML (overrides settings)
    #[arg(long)]
    pub defaults: Option<PathBuf>,

    /// Base URL or directory that relative templates resolve against
    #[arg(long)]
    pub base_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load configuration and print it for one language
    Resolve {
        #[command(flatten)]
        source: SourceArgs,
        /// Language tag to resolve (region suffixes are ignored)
        #[arg(long, default_value = "en")]
        language: String,
        /// Output format (json or text)
        #[arg(long, default_value = "json")]
        format: String,
    },
    /// Load configuration and list languages in resolution order
    Languages {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Print effective loader settings as TOML
    Settings,
}

/// CLI context: effective settings for one invocation.
pub struct CliContext {
    settings: LoaderSettings,
}

impl CliContext {
    /// Create a new CLI context from the settings file (if any) and CLI log overrides.
    pub fn new(cli: &Cli) -> Result<Self, ConfigError> {
        let mut settings = match &cli.config {
            Some(path) => SettingsLoader::load_from_file(path)?,
            None => SettingsLoader::load()?,
        };
        if let Some(level) = &cli.log_level {
            settings.logging.level = level.clone();
        }
        if let Some(format) = &cli.log_format {
            settings.logging.format = format.clone();
        }
        if let Some(output) = &cli.log_output {
            settings.logging.output = output.clone();
        }
        if let Some(file) = &cli.log_file {
            settings.logging.file = Some(file.clone());
        }
        Ok(Self { settings })
    }

    pub fn from_settings(settings: LoaderSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &LoaderSettings {
        &self.settings
    }

    /// Execute a CLI command
    pub fn execute(&self, command: &Commands) -> Result<String, ConfigError> {
        match command {
            Commands::Resolve {
                source,
                language,
                format,
            } => {
                let loader = self.load(source, language)?;
                let lang = loader.current_language();
                let config = loader.current_strict()?;
                match format.as_str() {
                    "json" => serde_json::to_string_pretty(config.as_ref())
                        .map_err(|e| ConfigError::parse("resolved config", e)),
                    "text" => {
                        let body = serde_json::to_string_pretty(config.as_ref())
                            .map_err(|e| ConfigError::parse("resolved config", e))?;
                        Ok(format!("language: {}\n{}", lang, body))
                    }
                    other => Err(ConfigError::Settings(format!(
                        "Invalid output format: {} (must be 'json' or 'text')",
                        other
                    ))),
                }
            }
            Commands::Languages { source } => {
                let loader = self.load(source, "en")?;
                Ok(loader.store().languages().join("\n"))
            }
            Commands::Settings => toml::to_string_pretty(&self.settings)
                .map_err(|e| ConfigError::Settings(format!("Failed to render settings: {}", e))),
        }
    }

    /// Settings with the command's source overrides applied.
    pub fn effective_settings(&self, overrides: &SourceArgs) -> LoaderSettings {
        let mut settings = self.settings.clone();
        if overrides.source.is_some() {
            settings.source = overrides.source.clone();
        }
        if overrides.languages.is_some() {
            settings.languages = overrides.languages.clone();
        }
        if overrides.defaults.is_some() {
            settings.defaults_path = overrides.defaults.clone();
        }
        if overrides.base_url.is_some() {
            settings.http.base_url = overrides.base_url.clone();
        }
        settings
    }

    /// Run initialization to completion, failing if it rejected.
    fn load(&self, overrides: &SourceArgs, language: &str) -> Result<ConfigLoader, ConfigError> {
        let settings = self.effective_settings(overrides);
        let selector = Arc::new(SharedLanguageSelector::new(language));
        let loader = ConfigLoader::from_settings(&settings, selector)?;
        let rt = tokio::runtime::Runtime::new()
            .map_err(|e| ConfigError::Settings(format!("Failed to create runtime: {}", e)))?;
        let report = rt.block_on(loader.ready(Vec::new()));
        if let Some(err) = report.init_error {
            return Err(err);
        }
        info!(languages = ?loader.store().languages(), "Configuration loaded");
        Ok(loader)
    }
}

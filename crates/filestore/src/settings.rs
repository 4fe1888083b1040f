//! Layered configuration for the filestore binary and embedding services.
//!
//! Sources, later overriding earlier:
//! - Bundled defaults (include_str! from filestore.toml)
//! - `~/.config/filestore/filestore.toml`
//! - `./filestore.toml`
//! - An explicit file passed to [`FilestoreConfig::load_with`]
//! - `FILESTORE_*` environment variables

use config::{Config, Environment, File, FileFormat};
use filestore_core::StorageDefinition;
use filestore_error::{ConfigError, FilestoreError, FilestoreResult};
use filestore_storage::{HttpFetcher, StorageContext};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, instrument};

const DEFAULT_CONFIG: &str = include_str!("../../../filestore.toml");

/// Top-level filestore configuration.
///
/// # Example
///
/// ```no_run
/// use filestore::FilestoreConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = FilestoreConfig::load()?;
/// let context = config.storage_context()?;
/// println!("default storage: {}", config.default_definition()?.describe());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FilestoreConfig {
    /// Definition used when a caller names none, in encoded form
    #[serde(default = "default_storage")]
    pub default_storage: String,

    /// Root for TEMPFOLDER storage (system temp dir when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temp_dir: Option<PathBuf>,

    /// Timeout for URL downloads, in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_timeout_secs: Option<u64>,
}

fn default_storage() -> String {
    "JSON".to_string()
}

impl Default for FilestoreConfig {
    fn default() -> Self {
        Self {
            default_storage: default_storage(),
            temp_dir: None,
            http_timeout_secs: None,
        }
    }
}

impl FilestoreConfig {
    /// Load configuration from a single file, without defaults or overrides.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the file cannot be read or parsed,
    /// or if `default_storage` is not a valid definition.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> FilestoreResult<Self> {
        debug!("Loading configuration from file");

        let config: Self = Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                FilestoreError::from(ConfigError::new(format!(
                    "Failed to read configuration from {}: {}",
                    path.as_ref().display(),
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                FilestoreError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;
        config.validated()
    }

    /// Load the layered configuration.
    ///
    /// # Errors
    ///
    /// See [`FilestoreConfig::load_with`].
    pub fn load() -> FilestoreResult<Self> {
        Self::load_with(None)
    }

    /// Load the layered configuration, with `path` as an extra required
    /// file ranked above the user files and below the environment.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a source cannot be read or parsed,
    /// or if `default_storage` is not a valid definition.
    #[instrument]
    pub fn load_with(path: Option<&Path>) -> FilestoreResult<Self> {
        debug!("Loading configuration with precedence: env > explicit > current dir > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/filestore/filestore.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("filestore").required(false));

        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }

        builder = builder.add_source(Environment::with_prefix("FILESTORE").try_parsing(true));

        let config: Self = builder
            .build()
            .map_err(|e| {
                FilestoreError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                FilestoreError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;
        config.validated()
    }

    /// The decoded default storage definition.
    ///
    /// # Errors
    ///
    /// Returns a configuration error naming the offending value.
    pub fn default_definition(&self) -> FilestoreResult<StorageDefinition> {
        StorageDefinition::decode(&self.default_storage).map_err(|e| {
            ConfigError::new(format!(
                "default_storage {:?} is not a valid storage definition: {}",
                self.default_storage, e
            ))
            .into()
        })
    }

    /// Collaborators for the backends this configuration can reach.
    ///
    /// Carries an HTTP fetcher for URL storage and the TEMPFOLDER root
    /// override. Remote document stores, repositories and drives are
    /// attached by the embedding service.
    ///
    /// # Errors
    ///
    /// Returns a backend error if the HTTP client cannot be built.
    pub fn storage_context(&self) -> FilestoreResult<StorageContext> {
        let fetcher = HttpFetcher::new(self.http_timeout_secs.map(Duration::from_secs))?;
        let context = StorageContext::new().with_url_fetcher(fetcher);
        Ok(match &self.temp_dir {
            Some(dir) => context.with_temp_dir(dir),
            None => context,
        })
    }

    fn validated(self) -> FilestoreResult<Self> {
        let definition = self.default_definition()?;
        debug!(default_storage = %definition.describe(), "Configuration loaded");
        Ok(self)
    }
}

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

const DEFAULT_CONFIG_FILES: &[&str] = &[
    "lightbnb.toml",
    "config/lightbnb.toml",
    "crates/config/lightbnb.toml",
    "../lightbnb.toml",
    "../config/lightbnb.toml",
    "../crates/config/lightbnb.toml",
];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://lightbnb.db".to_string(),
            max_connections: 10,
        }
    }
}

/// Row caps applied when a caller does not pass an explicit limit.
///
/// ```
/// use lightbnb_config::SearchConfig;
///
/// assert_eq!(SearchConfig::default().default_limit, 10);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "SearchConfig::default_limit")]
    pub default_limit: i64,
}

impl SearchConfig {
    const fn default_limit() -> i64 {
        10
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_limit: Self::default_limit(),
        }
    }
}

/// Load the application configuration by combining defaults, files, and environment overrides.
///
/// ```
/// use lightbnb_config::load;
///
/// std::env::remove_var("LIGHTBNB_CONFIG");
///
/// let config = load().expect("configuration should load with defaults");
/// assert!(!config.database.url.is_empty());
/// ```
pub fn load() -> anyhow::Result<AppConfig> {
    let defaults = AppConfig::default();

    let mut builder = config::Config::builder()
        .set_default("database.url", defaults.database.url.clone())
        .context("invalid default for database.url")?
        .set_default(
            "database.max_connections",
            i64::from(defaults.database.max_connections),
        )
        .context("invalid default for database.max_connections")?
        .set_default("search.default_limit", defaults.search.default_limit)
        .context("invalid default for search.default_limit")?;

    let environment_overrides = config::Environment::with_prefix("LIGHTBNB").separator("__");

    let mut config_file_attached = false;

    if let Ok(path) = std::env::var("LIGHTBNB_CONFIG") {
        builder = builder.add_source(config::File::from(PathBuf::from(&path)));
        config_file_attached = true;
        debug!(path, "loading configuration via LIGHTBNB_CONFIG");
    } else if let Ok(cwd) = std::env::current_dir() {
        let fallback = DEFAULT_CONFIG_FILES
            .iter()
            .map(|candidate| cwd.join(candidate))
            .find(|path| path.exists());

        if let Some(path) = fallback {
            debug!(path = %path.display(), "loading configuration file");
            builder = builder.add_source(config::File::from(path));
            config_file_attached = true;
        }
    }

    if !config_file_attached {
        debug!("no configuration file found, relying on defaults and environment overrides");
    }

    builder = builder.add_source(environment_overrides);

    let cfg = builder.build().context("unable to build configuration")?;

    let mut config = cfg
        .try_deserialize::<AppConfig>()
        .context("invalid configuration")?;

    if config.search.default_limit < 1 {
        config.search.default_limit = SearchConfig::default_limit();
    }

    debug!(?config, "loaded lightbnb configuration");
    Ok(config)
}

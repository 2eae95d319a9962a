//! The `config` module loads settings for the subject and for logging.
//!
//! Values are layered: built-in defaults, then an optional `config/default`
//! file (any format the `config` crate understands), then environment
//! variables prefixed with `OBSERVER_`, using `__` between nested keys
//! (for example `OBSERVER_SUBJECT__PRUNE_EMPTY_TOPICS=true`).

mod settings;

use crate::config::settings::PartialSettings;
use config::{Config, ConfigError, Environment, File};

pub use settings::{LoggingSettings, Settings, SubjectSettings};

const DEFAULT_CONFIG_PATH: &str = "config/default";

/// Loads the configuration from the default file and environment variables.
pub fn load_config() -> Result<Settings, ConfigError> {
    load_config_from(DEFAULT_CONFIG_PATH)
}

/// Loads the configuration from `path` (extension optional, file optional)
/// and environment variables, merged over `Settings::default()`.
pub fn load_config_from(path: &str) -> Result<Settings, ConfigError> {
    let builder = Config::builder()
        .add_source(File::with_name(path).required(false))
        .add_source(
            Environment::with_prefix("OBSERVER")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

    let config = builder.build()?;

    // Try to deserialize what is available
    let partial: PartialSettings = config.try_deserialize()?;
    let default = Settings::default();

    Ok(Settings {
        subject: SubjectSettings {
            prune_empty_topics: partial
                .subject
                .as_ref()
                .and_then(|s| s.prune_empty_topics)
                .unwrap_or(default.subject.prune_empty_topics),
        },
        logging: LoggingSettings {
            level: partial
                .logging
                .as_ref()
                .and_then(|l| l.level.clone())
                .unwrap_or(default.logging.level),
        },
    })
}

#[cfg(test)]
mod tests;

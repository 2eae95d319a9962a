use serde::Deserialize;

/// Top-level configuration settings for the application.
///
/// Includes settings for the subject and for logging.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct Settings {
    pub subject: SubjectSettings,
    pub logging: LoggingSettings,
}

/// Behaviour switches for a `Subject`.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub struct SubjectSettings {
    /// Drop a topic entry once its last subscription is removed. When unset,
    /// an emptied topic stays known and `notify` reports zero dispatches
    /// instead of `TopicNotFound`.
    pub prune_empty_topics: bool,
}

/// Configuration settings for logging.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct LoggingSettings {
    pub level: String,
}

/// Partial configuration settings loaded from files or environment.
///
/// Allows partial specification of settings. Missing values can be filled using defaults.
#[derive(Debug, Deserialize)]
pub struct PartialSettings {
    pub subject: Option<PartialSubjectSettings>,
    pub logging: Option<PartialLoggingSettings>,
}

#[derive(Debug, Deserialize)]
pub struct PartialSubjectSettings {
    pub prune_empty_topics: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct PartialLoggingSettings {
    pub level: Option<String>,
}

/// Provides default values for `Settings`.
impl Default for Settings {
    fn default() -> Self {
        Self {
            subject: SubjectSettings::default(),
            logging: LoggingSettings {
                level: "info".to_string(),
            },
        }
    }
}

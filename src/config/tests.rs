use super::{Settings, load_config_from};
use serial_test::serial;
use std::fs;
use tempfile::TempDir;

const PRUNE_VAR: &str = "OBSERVER_SUBJECT__PRUNE_EMPTY_TOPICS";
const LEVEL_VAR: &str = "OBSERVER_LOGGING__LEVEL";

#[test]
fn test_default_settings() {
    let settings = Settings::default();
    assert!(!settings.subject.prune_empty_topics);
    assert_eq!(settings.logging.level, "info");
}

#[test]
#[serial]
fn missing_file_yields_defaults() {
    let tmp = TempDir::new().expect("create tempdir");
    let path = tmp.path().join("absent");

    temp_env::with_vars_unset([PRUNE_VAR, LEVEL_VAR], || {
        let cfg = load_config_from(path.to_str().expect("utf8 path")).expect("load_config failed");
        assert_eq!(cfg, Settings::default());
    });
}

#[test]
#[serial]
fn load_config_from_file_overrides_defaults() {
    let tmp = TempDir::new().expect("create tempdir");
    let toml = r#"
        [subject]
        prune_empty_topics = true

        [logging]
        level = "debug"
    "#;
    fs::write(tmp.path().join("default.toml"), toml).expect("write config file");
    let path = tmp.path().join("default");

    temp_env::with_vars_unset([PRUNE_VAR, LEVEL_VAR], || {
        let cfg = load_config_from(path.to_str().expect("utf8 path")).expect("load_config failed");
        assert!(cfg.subject.prune_empty_topics);
        assert_eq!(cfg.logging.level, "debug");
    });
}

#[test]
#[serial]
fn partial_file_keeps_remaining_defaults() {
    let tmp = TempDir::new().expect("create tempdir");
    fs::write(tmp.path().join("default.toml"), "[logging]\nlevel = \"warn\"\n")
        .expect("write config file");
    let path = tmp.path().join("default");

    temp_env::with_vars_unset([PRUNE_VAR, LEVEL_VAR], || {
        let cfg = load_config_from(path.to_str().expect("utf8 path")).expect("load_config failed");
        assert!(!cfg.subject.prune_empty_topics);
        assert_eq!(cfg.logging.level, "warn");
    });
}

#[test]
#[serial]
fn environment_overrides_file() {
    let tmp = TempDir::new().expect("create tempdir");
    fs::write(
        tmp.path().join("default.toml"),
        "[subject]\nprune_empty_topics = false\n",
    )
    .expect("write config file");
    let path = tmp.path().join("default");

    temp_env::with_vars(
        [(PRUNE_VAR, Some("true")), (LEVEL_VAR, Some("trace"))],
        || {
            let cfg =
                load_config_from(path.to_str().expect("utf8 path")).expect("load_config failed");
            assert!(cfg.subject.prune_empty_topics);
            assert_eq!(cfg.logging.level, "trace");
        },
    );
}

//! Integration tests for TOML configuration loading.
//!
//! Uses `figment::Jail` for sandboxed files and env vars.

use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use orgdb_config::{ConfigError, OrgDbConfig};
use pretty_assertions::assert_eq;

#[test]
fn loads_all_sections_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[database]
path = "data/directory.db"

[general]
default_limit = 10
default_actor = "editor@example.org"

[history]
max_attempts = 6
base_delay_ms = 5
max_delay_ms = 80
"#,
        )?;

        let config: OrgDbConfig = Figment::from(Serialized::defaults(OrgDbConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.database.path, "data/directory.db");
        assert_eq!(config.general.default_limit, 10);
        assert_eq!(config.general.default_actor, "editor@example.org");
        assert_eq!(config.history.max_attempts, 6);
        assert_eq!(config.history.base_delay_ms, 5);
        assert_eq!(config.history.max_delay_ms, 80);
        Ok(())
    });
}

#[test]
fn partial_toml_keeps_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", "[general]\ndefault_limit = 5\n")?;

        let config: OrgDbConfig = Figment::from(Serialized::defaults(OrgDbConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.general.default_limit, 5);
        assert_eq!(config.general.default_actor, "anonymous");
        assert_eq!(config.database.path, ".orgdb/orgdb.db");
        assert_eq!(config.history.max_attempts, 4);
        Ok(())
    });
}

#[test]
fn project_config_is_discovered() {
    Jail::expect_with(|jail| {
        jail.create_dir(".orgdb")?;
        jail.create_file(".orgdb/config.toml", "[database]\npath = \"project.db\"\n")?;

        let config = OrgDbConfig::from_figment(&OrgDbConfig::figment_in(jail.directory()))
            .expect("config loads");
        assert_eq!(config.database.path, "project.db");
        Ok(())
    });
}

#[test]
fn invalid_history_settings_are_rejected() {
    Jail::expect_with(|jail| {
        jail.create_dir(".orgdb")?;
        jail.create_file(".orgdb/config.toml", "[history]\nmax_attempts = 0\n")?;

        let err = OrgDbConfig::from_figment(&OrgDbConfig::figment_in(jail.directory()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
        Ok(())
    });
}

#[test]
fn malformed_toml_is_a_figment_error() {
    Jail::expect_with(|jail| {
        jail.create_dir(".orgdb")?;
        jail.create_file(".orgdb/config.toml", "[general]\ndefault_limit = \"lots\"\n")?;

        let err = OrgDbConfig::from_figment(&OrgDbConfig::figment_in(jail.directory()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Figment(_)));
        Ok(())
    });
}

use anyhow::Context;
use orgdb_config::OrgDbConfig;
use orgdb_core::errors::CoreError;
use orgdb_db::service::DirectoryService;

use crate::cli::GlobalFlags;

/// Shared state for command handlers.
pub struct AppContext {
    pub service: DirectoryService,
    pub config: OrgDbConfig,
    /// Who mutations are attributed to.
    pub actor: String,
}

/// Load layered config (`.env`, TOML files, `ORGDB_*` env) and apply the
/// `--db` override.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<OrgDbConfig> {
    let mut config = OrgDbConfig::load_with_dotenv().context("failed to load orgdb config")?;
    if let Some(path) = &flags.db {
        config.database.path.clone_from(path);
    }
    Ok(config)
}

impl AppContext {
    /// Open the directory database described by `config`.
    pub async fn init(config: OrgDbConfig, flags: &GlobalFlags) -> anyhow::Result<Self> {
        let service = DirectoryService::from_config(&config)
            .await
            .context("failed to open directory database")?;
        let actor = resolve_actor(flags.actor.as_deref(), &config.general.default_actor)?;
        tracing::debug!(db = %config.database.path, %actor, "app context ready");

        Ok(Self {
            service,
            config,
            actor,
        })
    }
}

fn resolve_actor(flag: Option<&str>, fallback: &str) -> anyhow::Result<String> {
    let actor = flag.unwrap_or(fallback).trim();
    if actor.is_empty() {
        return Err(CoreError::Validation(
            "no actor: pass --actor or set general.default_actor".into(),
        )
        .into());
    }
    Ok(actor.to_string())
}

#[cfg(test)]
impl AppContext {
    pub async fn in_memory() -> Self {
        let mut config = OrgDbConfig::default();
        config.database.path = ":memory:".into();
        let service = DirectoryService::from_config(&config)
            .await
            .expect("in-memory db should open");
        Self {
            service,
            config,
            actor: "tester@example.org".into(),
        }
    }
}

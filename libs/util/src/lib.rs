use std::{
    env,
    path::{Path, PathBuf},
    str::FromStr,
};

use anyhow::Context;
use toml::{map::Map, Value};

pub const SECRETS_FILE: &str = "Secrets.toml";

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DATABASE_URL: &str = "postgres://localhost/blogging-platform";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_PUBLIC_DIR: &str = "public";

/// Process configuration, read once at startup.
///
/// Every key is taken from the environment first, then from
/// [`SECRETS_FILE`] in the working directory, then falls back to a default.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub database_max_connections: u32,
    pub public_dir: PathBuf,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let secrets = load_env(Path::new(SECRETS_FILE))?;

        Self::from_lookup(|key| {
            env::var(key).ok().or_else(|| secret(&secrets, key))
        })
    }

    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> anyhow::Result<Self> {
        Ok(Self {
            port: parse_or(&lookup, "PORT", DEFAULT_PORT)?,
            database_url: lookup("DATABASE_URL")
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            database_max_connections: parse_or(
                &lookup,
                "DATABASE_MAX_CONNECTIONS",
                DEFAULT_MAX_CONNECTIONS,
            )?,
            public_dir: lookup("PUBLIC_DIR")
                .unwrap_or_else(|| DEFAULT_PUBLIC_DIR.to_string())
                .into(),
        })
    }
}

fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .with_context(|| format!("failed to parse {key}={value:?}")),
        None => Ok(default),
    }
}

fn secret(secrets: &Map<String, Value>, key: &str) -> Option<String> {
    match secrets.get(key)? {
        Value::String(value) => Some(value.clone()),
        other => Some(other.to_string()),
    }
}

/// Reads a flat TOML secrets file. A missing file yields an empty table.
pub fn load_env(path: &Path) -> anyhow::Result<Map<String, Value>> {
    if !path.exists() {
        return Ok(Map::new());
    }

    let secrets = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    toml::from_str::<Map<String, Value>>(&secrets)
        .with_context(|| format!("failed to parse {}", path.display()))
}

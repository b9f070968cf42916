use figment::{providers::{Env, Format, Toml}, Figment};
use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};

const DEFAULT_DATABASE_FILE: &str = ".tasker.sqlite";

#[derive(Deserialize, Debug, Default)]
pub struct Config {
    /// Database file used when `--database` is not given
    #[serde(default)]
    pub database_path: Option<PathBuf>,
    /// Log level used when `--log-level` is not given
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub log_level: Option<String>,
}

impl Config {
    pub fn new() -> Result<Self, figment::Error> {
        Self::from_figment(
            Figment::new()
                .merge(Toml::file("tasker.toml"))
                .merge(Env::prefixed("TASKER_")),
        )
    }

    pub fn from_figment(figment: Figment) -> Result<Self, figment::Error> {
        figment.extract()
    }

    /// Resolves the database file: command line, then configuration, then
    /// `~/.tasker.sqlite`.
    pub fn database_path(&self, cli_override: Option<&Path>) -> PathBuf {
        cli_override
            .map(Path::to_path_buf)
            .or_else(|| self.database_path.clone())
            .unwrap_or_else(default_database_path)
    }
}

// Environment values such as `TASKER_LOG_LEVEL=1` arrive as numbers; keep
// them as text and let the logging setup decide whether they mean anything.
fn scalar_as_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Text(String),
        Integer(i64),
        Unsigned(u64),
        Float(f64),
        Flag(bool),
    }

    Ok(Option::<Scalar>::deserialize(deserializer)?.map(|value| match value {
        Scalar::Text(s) => s,
        Scalar::Integer(n) => n.to_string(),
        Scalar::Unsigned(n) => n.to_string(),
        Scalar::Float(n) => n.to_string(),
        Scalar::Flag(b) => b.to_string(),
    }))
}

fn default_database_path() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(DEFAULT_DATABASE_FILE))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_toml(toml: &str) -> Result<Config, figment::Error> {
        Config::from_figment(Figment::new().merge(Toml::string(toml)))
    }

    #[test]
    fn test_cli_path_wins() {
        let config = Config {
            database_path: Some(PathBuf::from("configured.sqlite")),
            log_level: None,
        };
        assert_eq!(
            config.database_path(Some(Path::new("flag.sqlite"))),
            PathBuf::from("flag.sqlite")
        );
        assert_eq!(config.database_path(None), PathBuf::from("configured.sqlite"));
    }

    #[test]
    fn test_default_path() {
        let path = Config::default().database_path(None);
        assert!(path.ends_with(DEFAULT_DATABASE_FILE));
    }

    #[test]
    fn test_numeric_log_level_keeps_database_path() {
        let config = from_toml("database_path = \"/tmp/tasks.sqlite\"\nlog_level = 1").unwrap();
        assert_eq!(config.log_level.as_deref(), Some("1"));
        assert_eq!(config.database_path(None), PathBuf::from("/tmp/tasks.sqlite"));
    }

    #[test]
    fn test_missing_log_level() {
        let config = from_toml("database_path = \"tasks.sqlite\"").unwrap();
        assert_eq!(config.log_level, None);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        assert!(from_toml("database_path = [").is_err());
    }
}

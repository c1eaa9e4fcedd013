//! Process configuration: credentials, command prefix, where the commands settings live and
//! which database file to use. Loaded once at startup from a TOML file; any error is fatal.

use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Path used when no `--config` flag is given.
pub const DEFAULT_CONFIG_FILE: &str = "config/config.toml";
/// Path of the commands settings document when the process configuration does not name one.
pub const DEFAULT_SETTINGS_FILE: &str = "config/commands_settings.json";
/// Environment variable overriding the configured bot token.
pub const TOKEN_ENV_VAR: &str = "DISCORD_TOKEN";

/// Errors raised while loading the process configuration or the commands settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unable to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid commands settings document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No bot token: set credentials.bot_token or the DISCORD_TOKEN variable")]
    MissingToken,

    #[error("The command prefix must not be empty")]
    EmptyPrefix,

    #[error("Unsupported database driver \"{0}\", only \"sqlite\" is available")]
    UnsupportedDriver(String),

    #[error("Account source \"{0}\" is declared more than once")]
    DuplicateSource(String),

    #[error("Alias \"{alias}\" of \"{source_name}\" collides with account source \"{other}\"")]
    AliasCollision {
        alias: String,
        source_name: String,
        other: String,
    },

    #[error("Server \"{server}\" is declared more than once for \"{source_name}\"")]
    DuplicateServer { server: String, source_name: String },

    #[error("Role \"{0}\" is declared more than once")]
    DuplicateRole(String),

    #[error("Unexpected argument \"{0}\". Usage: haruhichan [--config <path>]")]
    UnexpectedArgument(String),

    #[error("--config needs a path. Usage: haruhichan [--config <path>]")]
    MissingConfigPath,
}

/// Picks the configuration file from the command line: `--config <path>` or
/// `--config=<path>`, falling back to [`DEFAULT_CONFIG_FILE`].
pub fn config_path_from_args(
    mut args: impl Iterator<Item = String>,
) -> Result<PathBuf, ConfigError> {
    let mut path = None;
    while let Some(arg) = args.next() {
        if arg == "--config" {
            let value = args.next().ok_or(ConfigError::MissingConfigPath)?;
            path = Some(PathBuf::from(value));
        } else if let Some(value) = arg.strip_prefix("--config=") {
            if value.is_empty() {
                return Err(ConfigError::MissingConfigPath);
            }
            path = Some(PathBuf::from(value));
        } else {
            return Err(ConfigError::UnexpectedArgument(arg));
        }
    }
    Ok(path.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE)))
}

/// Reads a whole file, keeping the path in the error.
pub(crate) fn read_file(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(default)]
    credentials: RawCredentials,
    chat: ChatConfig,
    #[serde(default)]
    commands: CommandsConfig,
    database: DatabaseConfig,
}

#[derive(Debug, Default, Deserialize)]
struct RawCredentials {
    bot_token: Option<String>,
}

/// `[chat]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatConfig {
    pub command_prefix: String,
}

/// `[commands]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct CommandsConfig {
    #[serde(default = "default_settings_file")]
    pub settings_file: PathBuf,
}

impl Default for CommandsConfig {
    fn default() -> Self {
        Self {
            settings_file: default_settings_file(),
        }
    }
}

fn default_settings_file() -> PathBuf {
    PathBuf::from(DEFAULT_SETTINGS_FILE)
}

/// `[database]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_driver")]
    pub driver: String,
    pub path: PathBuf,
}

fn default_driver() -> String {
    "sqlite".to_string()
}

/// Fully resolved process configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub bot_token: String,
    pub chat: ChatConfig,
    pub commands: CommandsConfig,
    pub database: DatabaseConfig,
}

impl Config {
    /// Loads the configuration file, letting `DISCORD_TOKEN` override the file's token.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        info!("Loading configuration from {}", path.display());
        let content = read_file(path)?;
        Self::from_toml_str(&content, env::var(TOKEN_ENV_VAR).ok())
    }

    /// Parses and checks a configuration document. `env_token` wins over the file's token.
    pub fn from_toml_str(content: &str, env_token: Option<String>) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(content)?;

        let bot_token = resolve_token(raw.credentials.bot_token, env_token)?;

        if raw.chat.command_prefix.trim().is_empty() {
            return Err(ConfigError::EmptyPrefix);
        }

        if !raw.database.driver.eq_ignore_ascii_case("sqlite") {
            return Err(ConfigError::UnsupportedDriver(raw.database.driver));
        }

        debug!(
            prefix = %raw.chat.command_prefix,
            settings = %raw.commands.settings_file.display(),
            database = %raw.database.path.display(),
            "Configuration parsed"
        );

        Ok(Self {
            bot_token,
            chat: raw.chat,
            commands: raw.commands,
            database: raw.database,
        })
    }
}

fn resolve_token(
    file_token: Option<String>,
    env_token: Option<String>,
) -> Result<String, ConfigError> {
    env_token
        .into_iter()
        .chain(file_token)
        .map(|token| token.trim().to_string())
        .find(|token| !token.is_empty())
        .ok_or(ConfigError::MissingToken)
}

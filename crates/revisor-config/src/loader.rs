//! Configuration loader.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::ConfigError;
use crate::schema::Config;

/// Azure OpenAI API key.
pub const ENV_API_KEY: &str = "AZURE_OPENAI_KEY";
/// Azure OpenAI endpoint base URL.
pub const ENV_ENDPOINT: &str = "AZURE_OPENAI_ENDPOINT";
/// Default deployment identifier.
pub const ENV_DEPLOYMENT: &str = "AZURE_OPENAI_DEPLOYMENT";
/// API version override.
pub const ENV_API_VERSION: &str = "AZURE_OPENAI_API_VERSION";
/// Shared secret. `TOKEN_ID` is accepted as well.
pub const ENV_TOKEN_ID: &str = "token_id";

const ENV_TOKEN_ID_UPPER: &str = "TOKEN_ID";

/// Configuration file read when no path is given.
pub const DEFAULT_CONFIG_PATH: &str = "config/revisor.toml";

static ENV_VAR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"));

/// Configuration loader with environment variable substitution.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        let content = fs::read_to_string(path)?;
        Self::load_str(&content)
    }

    /// Load configuration from a string.
    pub fn load_str(content: &str) -> Result<Config, ConfigError> {
        let expanded = Self::expand_env_vars(content)?;
        let config: Config = toml::from_str(&expanded)?;
        Ok(config)
    }

    /// Load configuration, then overlay the process environment.
    ///
    /// An explicit `path` must exist. Without one, [`DEFAULT_CONFIG_PATH`]
    /// is read when present and defaults are used otherwise.
    pub fn load_with_env(path: Option<&Path>) -> Result<Config, ConfigError> {
        let mut config = match path {
            Some(path) => Self::load(path)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_PATH);
                if default_path.exists() {
                    Self::load(default_path)?
                } else {
                    Config::default()
                }
            }
        };
        Self::apply_env(&mut config);
        Ok(config)
    }

    /// Overlay the process environment onto `config`.
    pub fn apply_env(config: &mut Config) {
        Self::apply_env_with(config, |name| std::env::var(name).ok());
    }

    /// Overlay variables from `lookup` onto `config`.
    ///
    /// Set, non-empty variables win over file values.
    pub fn apply_env_with<F>(config: &mut Config, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(key) = get(ENV_API_KEY) {
            config.azure.api_key = Some(key);
        }
        if let Some(endpoint) = get(ENV_ENDPOINT) {
            config.azure.endpoint = Some(endpoint);
        }
        if let Some(deployment) = get(ENV_DEPLOYMENT) {
            config.azure.deployment = Some(deployment);
        }
        if let Some(version) = get(ENV_API_VERSION) {
            config.azure.api_version = version;
        }
        if let Some(token) = get(ENV_TOKEN_ID).or_else(|| get(ENV_TOKEN_ID_UPPER)) {
            config.auth.token_id = Some(token);
        }

        Self::normalize(config);
    }

    /// Empty strings in optional fields mean "unset".
    fn normalize(config: &mut Config) {
        for field in [
            &mut config.azure.api_key,
            &mut config.azure.endpoint,
            &mut config.azure.deployment,
            &mut config.auth.token_id,
        ] {
            if field.as_deref().is_some_and(|v| v.trim().is_empty()) {
                *field = None;
            }
        }
    }

    /// Expand environment variables in the format `${VAR}`.
    fn expand_env_vars(content: &str) -> Result<String, ConfigError> {
        Self::expand_vars_with(content, |name| std::env::var(name).ok())
    }

    fn expand_vars_with<F>(content: &str, lookup: F) -> Result<String, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut result = content.to_string();

        for cap in ENV_VAR_PATTERN.captures_iter(content) {
            let var_name = &cap[1];
            let var_value =
                lookup(var_name).ok_or_else(|| ConfigError::EnvVarNotSet(var_name.to_string()))?;
            result = result.replace(&cap[0], &var_value);
        }

        Ok(result)
    }

    /// Expand shell-style paths (e.g., `~/.revisor/logs`).
    pub fn expand_path(path: &str) -> String {
        shellexpand::tilde(path).to_string()
    }
}

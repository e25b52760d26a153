use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::resolution::ResolutionConfig;
use super::schemes::SchemeConfig;
use super::server::ServerConfig;
use crate::alias::{scheme_name, ROOT_ALIAS, SCHEME_SEPARATOR};
use crate::page::BranchAction;

const LOCAL_CONFIG_PATH: &str = "djdns.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/djdns/config.toml";

/// Main configuration structure for DJDNS
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Listener configuration (bind address, port)
    #[serde(default)]
    pub server: ServerConfig,

    /// Deadline and delegation limits
    #[serde(default)]
    pub resolution: ResolutionConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// Alias name → scheme URI; must contain `<ROOT>`
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,

    /// Scheme name → page served for that scheme
    #[serde(default)]
    pub schemes: BTreeMap<String, SchemeConfig>,
}

impl Default for Config {
    /// An empty root page: every query succeeds with no answers.
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            resolution: ResolutionConfig::default(),
            logging: LoggingConfig::default(),
            aliases: BTreeMap::from([(ROOT_ALIAS.to_string(), "root://".to_string())]),
            schemes: BTreeMap::from([("root".to_string(), SchemeConfig::default())]),
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. djdns.toml in current directory
    /// 3. /etc/djdns/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new(LOCAL_CONFIG_PATH).exists() {
            Self::from_file(LOCAL_CONFIG_PATH)?
        } else if std::path::Path::new(SYSTEM_CONFIG_PATH).exists() {
            Self::from_file(SYSTEM_CONFIG_PATH)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.dns_port {
            self.server.dns_port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        if let Some(timeout_ms) = overrides.timeout_ms {
            self.resolution.timeout_ms = timeout_ms;
        }
    }

    /// Validate configuration
    ///
    /// Every alias and every branch target must lead to a defined scheme, so
    /// a running server never meets a dangling reference it could have been
    /// told about at startup.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.dns_port == 0 {
            return Err(ConfigError::Validation("DNS port cannot be 0".to_string()));
        }

        if self.resolution.timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "Resolution timeout cannot be 0".to_string(),
            ));
        }

        if self.resolution.max_depth == 0 {
            return Err(ConfigError::Validation(
                "Delegation depth limit cannot be 0".to_string(),
            ));
        }

        if !self.aliases.contains_key(ROOT_ALIAS) {
            return Err(ConfigError::Validation(format!(
                "No {} alias configured",
                ROOT_ALIAS
            )));
        }

        for (alias, uri) in &self.aliases {
            self.check_uri(uri)
                .map_err(|reason| ConfigError::Validation(format!("Alias '{}': {}", alias, reason)))?;
        }

        for (scheme, scheme_config) in &self.schemes {
            for branch in &scheme_config.branches {
                let BranchAction::Targets(targets) = &branch.action else {
                    continue;
                };
                for target in targets {
                    self.check_target(target).map_err(|reason| {
                        ConfigError::Validation(format!(
                            "Scheme '{}', branch '{}': {}",
                            scheme, branch.selector, reason
                        ))
                    })?;
                }
            }
        }

        Ok(())
    }

    fn check_target(&self, target: &str) -> Result<(), String> {
        if target.contains(SCHEME_SEPARATOR) {
            return self.check_uri(target);
        }
        match self.aliases.get(target) {
            Some(_) => Ok(()),
            None => Err(format!("unknown alias '{}'", target)),
        }
    }

    fn check_uri(&self, uri: &str) -> Result<(), String> {
        let scheme = scheme_name(uri).map_err(|e| e.to_string())?;
        if self.schemes.contains_key(scheme) {
            Ok(())
        } else {
            Err(format!("undefined scheme '{}'", scheme))
        }
    }

    /// Get the path to the configuration file being used
    pub fn get_config_path() -> Option<String> {
        if std::path::Path::new(LOCAL_CONFIG_PATH).exists() {
            Some(LOCAL_CONFIG_PATH.to_string())
        } else if std::path::Path::new(SYSTEM_CONFIG_PATH).exists() {
            Some(SYSTEM_CONFIG_PATH.to_string())
        } else {
            None
        }
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub dns_port: Option<u16>,
    pub bind_address: Option<String>,
    pub log_level: Option<String>,
    pub timeout_ms: Option<u64>,
}

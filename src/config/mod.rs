use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::warn;

use crate::infrastructure::runtime::PollPolicy;
use crate::infrastructure::stacks::ProviderConfig;

pub const MAINNET_API: &str = "https://api.mainnet.hiro.so";
pub const TESTNET_API: &str = "https://api.testnet.hiro.so";
pub const DEFAULT_CONTRACT_ADDRESS: &str = "SP2QNSNKR3NRDWNTX0Q7R4T8WGBJ8RE8RA516AKZP";
pub const DEFAULT_CONTRACT_NAME: &str = "counter";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    #[default]
    Mainnet,
    Testnet,
}

impl Network {
    pub fn default_api(&self) -> &'static str {
        match self {
            Network::Mainnet => MAINNET_API,
            Network::Testnet => TESTNET_API,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PollConfig {
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            max_attempts: default_max_attempts(),
        }
    }
}

fn default_interval_secs() -> u64 {
    5
}

fn default_max_attempts() -> u32 {
    24
}

fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub network: Network,

    /// Overrides the network's default API
    pub api_url: Option<String>,

    pub contract_address: Option<String>,

    pub contract_name: Option<String>,

    /// Read-only call sender; defaults to the contract address
    pub sender: Option<String>,

    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default)]
    pub poll: PollConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            network: Network::default(),
            api_url: None,
            contract_address: None,
            contract_name: None,
            sender: None,
            request_timeout_secs: default_timeout_secs(),
            poll: PollConfig::default(),
        }
    }
}

impl Config {
    pub fn api_url(&self) -> String {
        self.api_url
            .clone()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| self.network.default_api().to_string())
    }

    pub fn contract_address(&self) -> String {
        self.contract_address
            .clone()
            .unwrap_or_else(|| DEFAULT_CONTRACT_ADDRESS.to_string())
    }

    pub fn contract_name(&self) -> String {
        self.contract_name
            .clone()
            .unwrap_or_else(|| DEFAULT_CONTRACT_NAME.to_string())
    }

    /// Apply `<address>.<name>` from the command line
    pub fn set_contract_id(&mut self, contract_id: &str) -> anyhow::Result<()> {
        let (address, name) = contract_id
            .split_once('.')
            .filter(|(a, n)| !a.is_empty() && !n.is_empty())
            .ok_or_else(|| anyhow::anyhow!("Expected <address>.<name>, got {contract_id:?}"))?;
        self.contract_address = Some(address.to_string());
        self.contract_name = Some(name.to_string());
        Ok(())
    }

    pub fn provider_config(&self) -> ProviderConfig {
        let contract_address = self.contract_address();
        ProviderConfig {
            api_url: self.api_url(),
            sender: self.sender.clone().unwrap_or_else(|| contract_address.clone()),
            contract_address,
            contract_name: self.contract_name(),
            timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }

    pub fn poll_policy(&self) -> PollPolicy {
        PollPolicy {
            interval: Duration::from_secs(self.poll.interval_secs),
            max_attempts: self.poll.max_attempts.max(1),
        }
    }
}

pub fn load() -> Config {
    let Some(path) = config_path() else {
        return Config::default();
    };
    load_from(&path)
}

pub fn load_from(path: &Path) -> Config {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(_) => return Config::default(),
    };
    match toml::from_str::<Config>(&content) {
        Ok(config) => config,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "ignoring invalid config file");
            Config::default()
        }
    }
}

pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("STX_COUNTER_CONFIG").map(PathBuf::from) {
        return Some(path);
    }
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from) {
        return Some(xdg.join("stx-counter").join("config.toml"));
    }
    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        return Some(home.join(".config").join("stx-counter").join("config.toml"));
    }

    directories::ProjectDirs::from("io", "stx-counter", "stx-counter")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api_url(), MAINNET_API);
        let provider = config.provider_config();
        assert_eq!(provider.contract_id(), format!("{DEFAULT_CONTRACT_ADDRESS}.counter"));
        assert_eq!(provider.sender, DEFAULT_CONTRACT_ADDRESS);
        assert_eq!(config.poll_policy(), PollPolicy::default());
    }

    #[test]
    fn test_parse_toml() {
        let config: Config = toml::from_str(
            r#"
            network = "testnet"
            contract_address = "ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM"
            request_timeout_secs = 3

            [poll]
            interval_secs = 2
            "#,
        )
        .unwrap();
        assert_eq!(config.api_url(), TESTNET_API);
        assert_eq!(config.contract_name(), DEFAULT_CONTRACT_NAME);
        assert_eq!(config.poll.max_attempts, 24);
        assert_eq!(config.poll_policy().interval, Duration::from_secs(2));
        assert_eq!(config.provider_config().timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_api_url_override() {
        let config: Config = toml::from_str(r#"api_url = "http://localhost:3999""#).unwrap();
        assert_eq!(config.api_url(), "http://localhost:3999");
    }

    #[test]
    fn test_set_contract_id() {
        let mut config = Config::default();
        config.set_contract_id("ST000.my-counter").unwrap();
        assert_eq!(config.contract_address(), "ST000");
        assert_eq!(config.contract_name(), "my-counter");
        assert!(config.set_contract_id("no-dot").is_err());
        assert!(config.set_contract_id(".name").is_err());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = load_from(Path::new("/nonexistent/stx-counter/config.toml"));
        assert_eq!(config.network, Network::Mainnet);
    }

    #[test]
    fn test_zero_attempts_clamped() {
        let config: Config = toml::from_str("[poll]\nmax_attempts = 0").unwrap();
        assert_eq!(config.poll_policy().max_attempts, 1);
    }
}

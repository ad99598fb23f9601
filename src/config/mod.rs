// Configuration loading and management.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const PROD: &str = "prod";
pub const DEV: &str = "dev";
pub const DEBUG: &str = "debug";
pub const TEST: &str = "test";

const DEFAULT_NAME: &str = "activity-directory";
const DEFAULT_PORT: &str = "8000";
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(5);
const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    #[serde(rename = "directory")]
    pub directory: SettingsBox,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SettingsBox {
    pub env: String,
    pub logs: Option<Logs>,
    pub api: Option<Api>,
    pub seed: Option<Seed>,
    pub k8s: Option<K8S>,
    pub metrics: Option<Metrics>,
    pub shutdown: Option<Shutdown>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Logs {
    pub level: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Api {
    pub name: Option<String>,
    pub port: Option<String>,
    #[serde(default, with = "humantime_serde")]
    pub timeout: Option<Duration>,
}

/// Where the initial activity set comes from.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Seed {
    /// External YAML seed file. The embedded reference seed is used when unset.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Probe {
    #[serde(default, with = "humantime_serde")]
    pub timeout: Option<Duration>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct K8S {
    pub probe: Probe,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Metrics {
    pub enabled: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Shutdown {
    #[serde(default, with = "humantime_serde")]
    pub timeout: Option<Duration>,
}

// Config trait
pub trait ConfigTrait {
    fn logs(&self) -> Option<&Logs>;
    fn is_prod(&self) -> bool;
    fn is_debug(&self) -> bool;
    fn is_dev(&self) -> bool;
    fn is_test(&self) -> bool;
    fn api(&self) -> Option<&Api>;
    fn seed(&self) -> Option<&Seed>;
    fn k8s(&self) -> Option<&K8S>;
    fn metrics_enabled(&self) -> bool;
    fn request_timeout(&self) -> Duration;
    fn probe_timeout(&self) -> Duration;
    fn shutdown_timeout(&self) -> Duration;
}

// Config type alias for convenience
pub type Config = Settings;

impl ConfigTrait for Config {
    fn logs(&self) -> Option<&Logs> {
        self.directory.logs.as_ref()
    }

    fn is_prod(&self) -> bool {
        self.directory.env == PROD
    }

    fn is_debug(&self) -> bool {
        self.directory.env == DEBUG
    }

    fn is_dev(&self) -> bool {
        self.directory.env == DEV
    }

    fn is_test(&self) -> bool {
        self.directory.env == TEST
    }

    fn api(&self) -> Option<&Api> {
        self.directory.api.as_ref()
    }

    fn seed(&self) -> Option<&Seed> {
        self.directory.seed.as_ref()
    }

    fn k8s(&self) -> Option<&K8S> {
        self.directory.k8s.as_ref()
    }

    fn metrics_enabled(&self) -> bool {
        self.directory
            .metrics
            .as_ref()
            .map(|m| m.enabled)
            .unwrap_or(true)
    }

    fn request_timeout(&self) -> Duration {
        self.api()
            .and_then(|api| api.timeout)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT)
    }

    fn probe_timeout(&self) -> Duration {
        self.k8s()
            .and_then(|k8s| k8s.probe.timeout)
            .unwrap_or(DEFAULT_PROBE_TIMEOUT)
    }

    fn shutdown_timeout(&self) -> Duration {
        self.directory
            .shutdown
            .as_ref()
            .and_then(|s| s.timeout)
            .unwrap_or(DEFAULT_SHUTDOWN_TIMEOUT)
    }
}

impl Default for Config {
    /// Built-in configuration used when no config file is present.
    fn default() -> Self {
        Self {
            directory: SettingsBox {
                env: DEV.to_string(),
                logs: Some(Logs {
                    level: Some("info".to_string()),
                }),
                api: Some(Api {
                    name: Some(DEFAULT_NAME.to_string()),
                    port: Some(DEFAULT_PORT.to_string()),
                    timeout: Some(DEFAULT_REQUEST_TIMEOUT),
                }),
                seed: None,
                k8s: None,
                metrics: Some(Metrics { enabled: true }),
                shutdown: None,
            },
        }
    }
}

impl Config {
    /// Loads configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        // Resolve absolute path
        let abs_path = path
            .canonicalize()
            .with_context(|| format!("failed to resolve absolute config filepath: {:?}", path))?;

        let data = std::fs::read_to_string(&abs_path)
            .with_context(|| format!("read config yaml file {:?}", abs_path))?;

        Self::parse(&data).with_context(|| format!("unmarshal yaml from {:?}", abs_path))
    }

    /// Parses and validates configuration from YAML text.
    pub fn parse(data: &str) -> Result<Self> {
        let cfg: Settings = serde_yaml::from_str(data)?;

        match cfg.directory.env.as_str() {
            PROD | DEV | DEBUG | TEST => {}
            other => anyhow::bail!("unknown env {:?} (expected prod, dev, debug or test)", other),
        }

        if let Some(port) = cfg.api().and_then(|api| api.port.as_deref()) {
            port.trim_start_matches(':')
                .parse::<u16>()
                .with_context(|| format!("invalid api.port {:?}", port))?;
        }

        Ok(cfg)
    }
}

mod test_config;
pub use test_config::new_test_config;

use crate::error::{Result, TauError};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILENAME: &str = "config.json";
const PROFILES_FILENAME: &str = "profiles.json";
const SESSION_FILENAME: &str = "session.json";
const DEFAULT_DREAM_URL: &str = "http://127.0.0.1:1421";
const DEFAULT_SEER_PROBE: &str = "https://seer.tau.{fqdn}";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Overrides the config directory, mostly for tests.
pub const HOME_ENV: &str = "TAU_HOME";

/// Where tau keeps its files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TauPaths {
    pub root: PathBuf,
}

impl TauPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `$TAU_HOME` if set, else the platform config directory.
    pub fn resolve() -> Result<Self> {
        if let Some(home) = std::env::var_os(HOME_ENV).filter(|h| !h.is_empty()) {
            return Ok(Self::new(home));
        }
        let dirs = ProjectDirs::from("com", "taubyte", "tau")
            .ok_or_else(|| TauError::Config("could not determine config directory".into()))?;
        Ok(Self::new(dirs.config_dir()))
    }

    pub fn profiles(&self) -> PathBuf {
        self.root.join(PROFILES_FILENAME)
    }

    pub fn session(&self) -> PathBuf {
        self.root.join(SESSION_FILENAME)
    }

    pub fn config(&self) -> PathBuf {
        self.root.join(CONFIG_FILENAME)
    }
}

/// Client settings, stored in config.json
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TauConfig {
    /// Base URL of the ephemeral cloud's status service
    #[serde(default = "default_dream_url")]
    pub dream_url: String,

    /// URL probed to validate an FQDN; `{fqdn}` is replaced by the value
    #[serde(default = "default_seer_probe")]
    pub seer_probe: String,

    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_dream_url() -> String {
    DEFAULT_DREAM_URL.to_string()
}

fn default_seer_probe() -> String {
    DEFAULT_SEER_PROBE.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for TauConfig {
    fn default() -> Self {
        Self {
            dream_url: default_dream_url(),
            seer_probe: default_seer_probe(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl TauConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: TauConfig = serde_json::from_str(&content)?;
        if !config.seer_probe.contains("{fqdn}") {
            return Err(TauError::Config(format!(
                "seer_probe `{}` has no {{fqdn}} placeholder",
                config.seer_probe
            )));
        }
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content)?;
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

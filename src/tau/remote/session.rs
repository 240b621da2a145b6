use super::{RuntimeEnv, SessionState};
use crate::error::{Result, TauError};
use crate::model::NetworkType;
use std::fs;
use std::path::{Path, PathBuf};

/// Runtime environment backed by a `session.json` file, so the profile and
/// network resolved by one invocation are visible to the next.
pub struct FileSession {
    path: PathBuf,
}

impl FileSession {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn update(&mut self, change: impl FnOnce(&mut SessionState)) -> Result<()> {
        let mut state = self.current()?;
        change(&mut state);
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(TauError::Io)?;
        }
        let content = serde_json::to_string_pretty(&state).map_err(TauError::Serialization)?;
        fs::write(&self.path, content).map_err(TauError::Io)?;
        Ok(())
    }
}

impl RuntimeEnv for FileSession {
    fn current(&self) -> Result<SessionState> {
        if !self.path.exists() {
            return Ok(SessionState::default());
        }
        let content = fs::read_to_string(&self.path).map_err(TauError::Io)?;
        let state = serde_json::from_str(&content).map_err(TauError::Serialization)?;
        Ok(state)
    }

    fn set_selected_profile(&mut self, name: &str) -> Result<()> {
        tracing::debug!(profile = name, "recording selected profile");
        self.update(|state| {
            if state.profile.as_deref() != Some(name) {
                state.network_type = None;
                state.network_url = None;
            }
            state.profile = Some(name.to_string());
        })
    }

    fn set_selected_network(&mut self, network_type: NetworkType) -> Result<()> {
        self.update(|state| state.network_type = Some(network_type))
    }

    fn set_network_url(&mut self, url: &str) -> Result<()> {
        tracing::debug!(network = url, "recording network");
        self.update(|state| state.network_url = Some(url.to_string()))
    }

    fn clear(&mut self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path).map_err(TauError::Io)?;
        }
        Ok(())
    }
}

use super::{get_from, insert_into, list_of, remove_from, ProfileList, ProfileMap, ProfileStore};
use crate::error::{Result, TauError};
use crate::model::Profile;
use once_cell::unsync::OnceCell;
use std::fs;
use std::path::{Path, PathBuf};

pub struct FileProfileStore {
    path: PathBuf,
    profiles: OnceCell<ProfileMap>,
}

impl FileProfileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            profiles: OnceCell::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the store, creating an empty one on first use.
    fn load(&self) -> Result<ProfileMap> {
        if !self.path.exists() {
            tracing::info!(path = %self.path.display(), "creating profile store");
            let empty = ProfileMap::new();
            self.save(&empty)?;
            return Ok(empty);
        }

        let content = fs::read_to_string(&self.path).map_err(TauError::Io)?;
        let mut profiles: ProfileMap =
            serde_json::from_str(&content).map_err(TauError::Serialization)?;
        for (name, profile) in profiles.iter_mut() {
            profile.name = name.clone();
        }
        tracing::debug!(count = profiles.len(), "loaded profile store");
        Ok(profiles)
    }

    fn save(&self, profiles: &ProfileMap) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(TauError::Io)?;
            }
        }
        let content = serde_json::to_string_pretty(profiles).map_err(TauError::Serialization)?;
        fs::write(&self.path, content).map_err(TauError::Io)?;
        Ok(())
    }

    fn loaded(&self) -> Result<&ProfileMap> {
        self.profiles.get_or_try_init(|| self.load())
    }

    fn loaded_mut(&mut self) -> Result<&mut ProfileMap> {
        if self.profiles.get().is_none() {
            let profiles = self.load()?;
            let _ = self.profiles.set(profiles);
        }
        self.profiles
            .get_mut()
            .ok_or_else(|| TauError::Store("profile store is not loaded".to_string()))
    }

    fn write_through(&self) -> Result<()> {
        let profiles = self.loaded()?;
        self.save(profiles)
    }
}

impl ProfileStore for FileProfileStore {
    fn get(&self, name: &str) -> Result<Profile> {
        get_from(self.loaded()?, name)
    }

    fn set(&mut self, name: &str, profile: Profile) -> Result<()> {
        insert_into(self.loaded_mut()?, name, profile);
        tracing::debug!(profile = name, "saving profile");
        self.write_through()
    }

    fn all(&self) -> Result<ProfileList> {
        Ok(list_of(self.loaded()?))
    }

    fn remove(&mut self, name: &str) -> Result<Profile> {
        let removed = remove_from(self.loaded_mut()?, name)?;
        self.write_through()?;
        Ok(removed)
    }
}

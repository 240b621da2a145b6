use super::{get_from, insert_into, list_of, remove_from, ProfileList, ProfileMap, ProfileStore};
use crate::error::Result;
use crate::model::Profile;

/// Profile store without persistence, for tests.
#[derive(Debug, Default, Clone)]
pub struct InMemoryProfileStore {
    profiles: ProfileMap,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profile(mut self, profile: Profile) -> Self {
        let name = profile.name.clone();
        insert_into(&mut self.profiles, &name, profile);
        self
    }
}

impl ProfileStore for InMemoryProfileStore {
    fn get(&self, name: &str) -> Result<Profile> {
        get_from(&self.profiles, name)
    }

    fn set(&mut self, name: &str, profile: Profile) -> Result<()> {
        insert_into(&mut self.profiles, name, profile);
        Ok(())
    }

    fn all(&self) -> Result<ProfileList> {
        Ok(list_of(&self.profiles))
    }

    fn remove(&mut self, name: &str) -> Result<Profile> {
        remove_from(&mut self.profiles, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TauError;

    #[test]
    fn empty_store_has_no_default() {
        let store = InMemoryProfileStore::new();
        assert_eq!(store.all().unwrap(), ProfileList::default());
        assert!(store.profiles().unwrap().is_empty());
    }

    #[test]
    fn profiles_come_back_in_name_order() {
        let store = InMemoryProfileStore::new()
            .with_profile(Profile::new("b", "github", "t"))
            .with_profile(Profile::new("a", "github", "t"));
        let names: Vec<String> = store
            .profiles()
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn remove_missing_profile_is_not_found() {
        let mut store = InMemoryProfileStore::new();
        assert!(matches!(
            store.remove("ghost"),
            Err(TauError::NotFound { kind: "profile", .. })
        ));
    }
}

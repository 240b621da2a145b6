//! Scripted prompts and fake collaborators for exercising commands without a
//! terminal or network. Every fake is cheap to clone and clones share their
//! recorded calls, so a test can keep a handle after boxing one into a
//! [`Session`].

use crate::commands::Session;
use crate::error::{Result, TauError};
use crate::model::{NetworkType, Profile};
use crate::remote::{
    CloudClient, EphemeralCloud, FqdnValidator, RemoteError, RuntimeEnv, SessionState,
    UniverseStatus,
};
use crate::select::Prompter;
use crate::store::memory::InMemoryProfileStore;
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

#[derive(Debug, Clone)]
pub enum Answer {
    Pick(usize),
    Text(String),
    Abort,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
    Select {
        prompt: String,
        items: Vec<String>,
        default: Option<usize>,
    },
    Input {
        prompt: String,
        default: Option<String>,
    },
    Secret {
        prompt: String,
    },
}

/// Replays canned answers and records every prompt shown.
/// Running out of answers panics, which makes "never prompts" easy to assert.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPrompter {
    answers: Rc<RefCell<VecDeque<Answer>>>,
    log: Rc<RefCell<Vec<Prompt>>>,
}

impl ScriptedPrompter {
    pub fn new(answers: Vec<Answer>) -> Self {
        Self {
            answers: Rc::new(RefCell::new(answers.into())),
            log: Rc::default(),
        }
    }

    pub fn prompts(&self) -> Vec<Prompt> {
        self.log.borrow().clone()
    }

    pub fn selections(&self) -> Vec<Vec<String>> {
        self.prompts()
            .into_iter()
            .filter_map(|p| match p {
                Prompt::Select { items, .. } => Some(items),
                _ => None,
            })
            .collect()
    }

    pub fn defaults(&self) -> Vec<Option<usize>> {
        self.prompts()
            .into_iter()
            .filter_map(|p| match p {
                Prompt::Select { default, .. } => Some(default),
                _ => None,
            })
            .collect()
    }

    pub fn input_defaults(&self) -> Vec<Option<String>> {
        self.prompts()
            .into_iter()
            .filter_map(|p| match p {
                Prompt::Input { default, .. } => Some(default),
                _ => None,
            })
            .collect()
    }

    fn next(&self, prompt: Prompt) -> Answer {
        self.log.borrow_mut().push(prompt.clone());
        self.answers
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected prompt: {prompt:?}"))
    }
}

impl Prompter for ScriptedPrompter {
    fn select(&self, prompt: &str, items: &[String], default: Option<usize>) -> Result<usize> {
        match self.next(Prompt::Select {
            prompt: prompt.to_string(),
            items: items.to_vec(),
            default,
        }) {
            Answer::Pick(index) => Ok(index),
            Answer::Abort => Err(TauError::PromptAborted("cancelled".into())),
            Answer::Text(text) => panic!("select `{prompt}` answered with text `{text}`"),
        }
    }

    fn input(&self, prompt: &str, default: Option<&str>) -> Result<String> {
        match self.next(Prompt::Input {
            prompt: prompt.to_string(),
            default: default.map(str::to_string),
        }) {
            Answer::Text(text) => Ok(text),
            Answer::Abort => Err(TauError::PromptAborted("cancelled".into())),
            Answer::Pick(index) => panic!("input `{prompt}` answered with pick {index}"),
        }
    }

    fn secret(&self, prompt: &str) -> Result<String> {
        match self.next(Prompt::Secret {
            prompt: prompt.to_string(),
        }) {
            Answer::Text(text) => Ok(text),
            Answer::Abort => Err(TauError::PromptAborted("cancelled".into())),
            Answer::Pick(index) => panic!("secret `{prompt}` answered with pick {index}"),
        }
    }
}

/// Ephemeral cloud with a fixed set of live universes.
#[derive(Debug, Clone, Default)]
pub struct FakeCloud {
    universes: Option<Vec<String>>,
    client_fails: bool,
    calls: Rc<Cell<usize>>,
}

impl FakeCloud {
    pub fn live(universes: &[&str]) -> Self {
        Self {
            universes: Some(universes.iter().map(|u| u.to_string()).collect()),
            ..Self::default()
        }
    }

    /// Client creation works, but no instance answers status calls.
    pub fn offline() -> Self {
        Self::default()
    }

    pub fn unreachable() -> Self {
        Self {
            client_fails: true,
            ..Self::default()
        }
    }

    /// Number of client and status calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl EphemeralCloud for FakeCloud {
    fn client(&self) -> std::result::Result<Box<dyn CloudClient>, RemoteError> {
        self.calls.set(self.calls.get() + 1);
        if self.client_fails {
            return Err(RemoteError::Unavailable("cannot reach ephemeral cloud".into()));
        }
        Ok(Box::new(self.clone()))
    }
}

impl CloudClient for FakeCloud {
    fn status(&self) -> std::result::Result<HashMap<String, UniverseStatus>, RemoteError> {
        self.calls.set(self.calls.get() + 1);
        match &self.universes {
            Some(names) => Ok(names
                .iter()
                .map(|name| (name.clone(), serde_json::json!({ "nodes": 1 })))
                .collect()),
            None => Err(RemoteError::Unavailable("no instance running".into())),
        }
    }
}

/// Accepts every FQDN except the rejected ones and records what it saw.
#[derive(Debug, Clone, Default)]
pub struct FakeValidator {
    rejected: Vec<String>,
    seen: Rc<RefCell<Vec<String>>>,
}

impl FakeValidator {
    pub fn rejecting(fqdns: &[&str]) -> Self {
        Self {
            rejected: fqdns.iter().map(|f| f.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn seen(&self) -> Vec<String> {
        self.seen.borrow().clone()
    }
}

impl FqdnValidator for FakeValidator {
    fn validate(&self, fqdn: &str) -> std::result::Result<(), RemoteError> {
        self.seen.borrow_mut().push(fqdn.to_string());
        if self.rejected.iter().any(|r| r == fqdn) {
            return Err(RemoteError::Invalid(format!("`{}` is not a tau network", fqdn)));
        }
        Ok(())
    }
}

/// Runtime environment held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryEnv {
    state: Rc<RefCell<SessionState>>,
}

impl MemoryEnv {
    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }
}

impl RuntimeEnv for MemoryEnv {
    fn current(&self) -> Result<SessionState> {
        Ok(self.state())
    }

    fn set_selected_profile(&mut self, name: &str) -> Result<()> {
        let mut state = self.state.borrow_mut();
        if state.profile.as_deref() != Some(name) {
            state.network_type = None;
            state.network_url = None;
        }
        state.profile = Some(name.to_string());
        Ok(())
    }

    fn set_selected_network(&mut self, network_type: NetworkType) -> Result<()> {
        self.state.borrow_mut().network_type = Some(network_type);
        Ok(())
    }

    fn set_network_url(&mut self, url: &str) -> Result<()> {
        self.state.borrow_mut().network_url = Some(url.to_string());
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        *self.state.borrow_mut() = SessionState::default();
        Ok(())
    }
}

pub fn profile(name: &str, default: bool) -> Profile {
    let mut profile = Profile::new(name, "github", format!("token-{}", name));
    profile.default = default;
    profile
}

/// Builds a [`Session`] over fakes while keeping handles to them.
#[derive(Debug, Clone, Default)]
pub struct TestSession {
    pub store: InMemoryProfileStore,
    pub prompter: ScriptedPrompter,
    pub cloud: FakeCloud,
    pub validator: FakeValidator,
    pub env: MemoryEnv,
}

impl TestSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.store = self.store.with_profile(profile);
        self
    }

    pub fn answers(mut self, answers: Vec<Answer>) -> Self {
        self.prompter = ScriptedPrompter::new(answers);
        self
    }

    pub fn cloud(mut self, cloud: FakeCloud) -> Self {
        self.cloud = cloud;
        self
    }

    pub fn validator(mut self, validator: FakeValidator) -> Self {
        self.validator = validator;
        self
    }

    pub fn build(&self) -> Session {
        Session {
            store: Box::new(self.store.clone()),
            prompter: Box::new(self.prompter.clone()),
            cloud: Box::new(self.cloud.clone()),
            validator: Box::new(self.validator.clone()),
            env: Box::new(self.env.clone()),
        }
    }
}

//! # Selection Resolution
//!
//! Every "pick one value" decision in tau (which profile, which universe, which
//! FQDN) follows the same precedence:
//!
//! 1. An explicit flag value wins. For a closed domain it must be one of the
//!    candidates, for an open domain it must pass validation. A bad explicit
//!    value is an error, never a reason to fall back to prompting.
//! 2. With `auto_pick_single`, a lone candidate and no prior value is taken
//!    without asking.
//! 3. Otherwise the user is prompted, with the prior value highlighted.
//!
//! Callers persist the result themselves, and only after resolution succeeded.

use crate::error::{Result, TauError};

/// The interactive prompt layer.
pub trait Prompter {
    /// Asks the user to pick one of `items`, returning its index.
    fn select(&self, prompt: &str, items: &[String], default: Option<usize>) -> Result<usize>;

    /// Asks for a free-form value.
    fn input(&self, prompt: &str, default: Option<&str>) -> Result<String>;

    /// Asks for a value without echoing it.
    fn secret(&self, prompt: &str) -> Result<String>;
}

/// Validation for open domains, e.g. FQDNs.
pub type Validate<'a> = &'a dyn Fn(&str) -> Result<()>;

/// One resolution. Lives only for the duration of a single call.
#[derive(Debug, Clone)]
pub struct SelectionRequest<'a> {
    kind: &'static str,
    prompt: &'a str,
    explicit: Option<String>,
    candidates: Vec<String>,
    prior: Option<String>,
    auto_pick_single: bool,
}

impl<'a> SelectionRequest<'a> {
    /// `kind` names the value in errors ("profile", "universe").
    pub fn new(kind: &'static str, prompt: &'a str) -> Self {
        Self {
            kind,
            prompt,
            explicit: None,
            candidates: Vec::new(),
            prior: None,
            auto_pick_single: false,
        }
    }

    pub fn explicit(mut self, value: Option<String>) -> Self {
        self.explicit = value;
        self
    }

    pub fn candidates(mut self, candidates: Vec<String>) -> Self {
        self.candidates = candidates;
        self
    }

    /// The previously chosen value. Empty strings count as no prior.
    pub fn prior(mut self, prior: Option<String>) -> Self {
        self.prior = prior.filter(|p| !p.is_empty());
        self
    }

    pub fn auto_pick_single(mut self) -> Self {
        self.auto_pick_single = true;
        self
    }

    /// Resolves against the closed candidate set.
    pub fn resolve(mut self, prompter: &dyn Prompter) -> Result<String> {
        if let Some(value) = self.explicit {
            if self.candidates.contains(&value) {
                tracing::debug!(kind = self.kind, %value, "selected from flag");
                return Ok(value);
            }
            return Err(TauError::not_found(self.kind, value, &self.candidates));
        }

        if self.candidates.is_empty() {
            return Err(TauError::NoCandidates(self.kind));
        }

        if self.auto_pick_single && self.candidates.len() == 1 && self.prior.is_none() {
            let value = self.candidates.remove(0);
            tracing::debug!(kind = self.kind, %value, "picked the only candidate");
            return Ok(value);
        }

        let default = self
            .prior
            .as_ref()
            .and_then(|prior| self.candidates.iter().position(|c| c == prior));
        let index = prompter.select(self.prompt, &self.candidates, default)?;
        let value = self.candidates.get(index).cloned().ok_or_else(|| {
            TauError::PromptAborted(format!("selection {} is out of range", index))
        })?;
        tracing::debug!(kind = self.kind, %value, "selected from prompt");
        Ok(value)
    }

    /// Resolves an open domain: the explicit or typed value must pass `validate`.
    pub fn resolve_open(self, prompter: &dyn Prompter, validate: Validate<'_>) -> Result<String> {
        let value = match self.explicit {
            Some(value) => value,
            None => prompter.input(self.prompt, self.prior.as_deref())?,
        };
        validate(&value)?;
        tracing::debug!(kind = self.kind, %value, "validated value");
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::RemoteError;
    use crate::test_utils::{Answer, ScriptedPrompter};

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn explicit_value_in_candidates_skips_prompt() {
        let prompter = ScriptedPrompter::new(vec![]);
        let value = SelectionRequest::new("profile", "Profile")
            .explicit(Some("b".into()))
            .candidates(names(&["a", "b"]))
            .resolve(&prompter)
            .unwrap();
        assert_eq!(value, "b");
        assert!(prompter.prompts().is_empty());
    }

    #[test]
    fn explicit_value_outside_candidates_fails_without_prompting() {
        let prompter = ScriptedPrompter::new(vec![]);
        let err = SelectionRequest::new("profile", "Profile")
            .explicit(Some("c".into()))
            .candidates(names(&["a", "b"]))
            .resolve(&prompter)
            .unwrap_err();
        match err {
            TauError::NotFound { kind, value, known } => {
                assert_eq!(kind, "profile");
                assert_eq!(value, "c");
                assert_eq!(known, names(&["a", "b"]));
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
        assert!(prompter.prompts().is_empty());
    }

    #[test]
    fn prompt_highlights_prior() {
        let prompter = ScriptedPrompter::new(vec![Answer::Pick(0)]);
        let value = SelectionRequest::new("profile", "Profile")
            .candidates(names(&["a", "b", "c"]))
            .prior(Some("c".into()))
            .resolve(&prompter)
            .unwrap();
        assert_eq!(value, "a");
        assert_eq!(prompter.defaults(), vec![Some(2)]);
    }

    #[test]
    fn single_candidate_prompts_unless_auto_pick() {
        let prompter = ScriptedPrompter::new(vec![Answer::Pick(0)]);
        SelectionRequest::new("provider", "Provider")
            .candidates(names(&["github"]))
            .resolve(&prompter)
            .unwrap();
        assert_eq!(prompter.prompts().len(), 1);

        let prompter = ScriptedPrompter::new(vec![]);
        let value = SelectionRequest::new("provider", "Provider")
            .candidates(names(&["github"]))
            .auto_pick_single()
            .resolve(&prompter)
            .unwrap();
        assert_eq!(value, "github");
        assert!(prompter.prompts().is_empty());
    }

    #[test]
    fn auto_pick_still_prompts_when_prior_exists() {
        let prompter = ScriptedPrompter::new(vec![Answer::Pick(0)]);
        SelectionRequest::new("provider", "Provider")
            .candidates(names(&["github"]))
            .prior(Some("github".into()))
            .auto_pick_single()
            .resolve(&prompter)
            .unwrap();
        assert_eq!(prompter.prompts().len(), 1);
    }

    #[test]
    fn empty_prior_is_ignored() {
        let prompter = ScriptedPrompter::new(vec![Answer::Pick(1)]);
        SelectionRequest::new("profile", "Profile")
            .candidates(names(&["a", "b"]))
            .prior(Some(String::new()))
            .resolve(&prompter)
            .unwrap();
        assert_eq!(prompter.defaults(), vec![None]);
    }

    #[test]
    fn no_candidates_is_an_error() {
        let prompter = ScriptedPrompter::new(vec![]);
        let err = SelectionRequest::new("universe", "Universe")
            .resolve(&prompter)
            .unwrap_err();
        assert!(matches!(err, TauError::NoCandidates("universe")));
    }

    #[test]
    fn aborted_prompt_propagates() {
        let prompter = ScriptedPrompter::new(vec![Answer::Abort]);
        let err = SelectionRequest::new("profile", "Profile")
            .candidates(names(&["a", "b"]))
            .resolve(&prompter)
            .unwrap_err();
        assert!(matches!(err, TauError::PromptAborted(_)));
    }

    fn reject_bad(value: &str) -> Result<()> {
        if value.starts_with("bad") {
            Err(TauError::ValidationFailed {
                value: value.to_string(),
                source: RemoteError::Invalid("rejected".into()),
            })
        } else {
            Ok(())
        }
    }

    #[test]
    fn open_domain_validates_explicit_value() {
        let prompter = ScriptedPrompter::new(vec![]);
        let err = SelectionRequest::new("fqdn", "FQDN")
            .explicit(Some("bad.example.org".into()))
            .resolve_open(&prompter, &reject_bad)
            .unwrap_err();
        assert!(matches!(err, TauError::ValidationFailed { .. }));
        assert!(prompter.prompts().is_empty());
    }

    #[test]
    fn open_domain_prompts_with_prior_as_default() {
        let prompter = ScriptedPrompter::new(vec![Answer::Text("good.example.org".into())]);
        let value = SelectionRequest::new("fqdn", "FQDN")
            .prior(Some("old.example.org".into()))
            .resolve_open(&prompter, &reject_bad)
            .unwrap();
        assert_eq!(value, "good.example.org");
        assert_eq!(prompter.input_defaults(), vec![Some("old.example.org".to_string())]);
    }
}

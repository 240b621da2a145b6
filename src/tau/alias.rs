//! Plural aliases for `list` sub-commands.
//!
//! `tau list networks` should work as well as `tau list network`. The rules are
//! checked in order: uncountable names get nothing, irregular names get their
//! listed plurals, everything else gets a trailing `s`.

/// Resource names that already read as plural.
pub const UNCOUNTABLE: &[&str] = &["messaging", "smartops"];

/// Resource names whose plural is not `name + "s"`.
pub const IRREGULAR: &[(&str, &[&str])] = &[
    ("library", &["libraries"]),
    ("application", &["apps", "applications"]),
];

pub fn pluralize(resource: &str) -> Vec<String> {
    if UNCOUNTABLE.iter().any(|name| *name == resource) {
        return Vec::new();
    }

    if let Some((_, plurals)) = IRREGULAR.iter().find(|(name, _)| *name == resource) {
        return plurals.iter().map(|p| p.to_string()).collect();
    }

    vec![format!("{}s", resource)]
}

use crate::errors::DomainError;
use std::collections::HashMap;

/// Alias naming the entry point of every resolution.
pub const ROOT_ALIAS: &str = "<ROOT>";

pub const SCHEME_SEPARATOR: &str = "://";

/// Alias name → scheme URI. Built once at startup and only read afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasTable {
    aliases: HashMap<String, String>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_alias(mut self, name: impl Into<String>, uri: impl Into<String>) -> Self {
        self.aliases.insert(name.into(), uri.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.aliases.get(name).map(String::as_str)
    }

    pub fn root(&self) -> Option<&str> {
        self.get(ROOT_ALIAS)
    }

    /// Turns a branch target into a scheme URI. Targets containing `://` are
    /// already URIs; anything else is looked up as an alias name.
    pub fn resolve_target<'a>(&'a self, target: &'a str) -> Result<&'a str, DomainError> {
        if target.contains(SCHEME_SEPARATOR) {
            return Ok(target);
        }
        self.get(target)
            .ok_or_else(|| DomainError::UnknownAlias(target.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.aliases.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

impl From<HashMap<String, String>> for AliasTable {
    fn from(aliases: HashMap<String, String>) -> Self {
        Self { aliases }
    }
}

impl FromIterator<(String, String)> for AliasTable {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            aliases: iter.into_iter().collect(),
        }
    }
}

/// Scheme name of a `<scheme>://...` URI.
pub fn scheme_name(uri: &str) -> Result<&str, DomainError> {
    match uri.split_once(SCHEME_SEPARATOR) {
        Some((scheme, _)) if !scheme.is_empty() => Ok(scheme),
        _ => Err(DomainError::InvalidTarget(uri.to_string())),
    }
}

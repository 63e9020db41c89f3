use std::borrow::Borrow;
use std::fmt;

/// Delimiter wrapping a configuration-parameter token, e.g. `%db_host%`.
const PARAM_DELIMITER: char = '%';

/// Identifier naming a registered service or a constructible type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ServiceId(String);

impl ServiceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ServiceId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ServiceId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for ServiceId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Identifier naming a configuration parameter. Disjoint from [`ServiceId`]:
/// the two resolution paths never consult each other's namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParameterId(String);

impl ParameterId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParameterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ParameterId {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for ParameterId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl Borrow<str> for ParameterId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// A raw identifier string split into the two resolution namespaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identifier {
    Service(ServiceId),
    Parameter(ParameterId),
}

impl Identifier {
    /// Parses a raw identifier. `%name%` (the delimiter at both ends, name
    /// non-empty) is a parameter token; everything else names a service.
    pub fn parse(raw: &str) -> Self {
        match strip_token(raw) {
            Some(name) => Identifier::Parameter(ParameterId::new(name)),
            None => Identifier::Service(ServiceId::new(raw)),
        }
    }
}

fn strip_token(raw: &str) -> Option<&str> {
    if raw.len() >= 3 && raw.starts_with(PARAM_DELIMITER) && raw.ends_with(PARAM_DELIMITER) {
        Some(&raw[1..raw.len() - 1])
    } else {
        None
    }
}

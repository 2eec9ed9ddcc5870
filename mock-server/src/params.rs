//! Query-string access for API handlers.

use std::str::FromStr;

use serde_json::{json, Value};

/// An application-level failure, reported inside a normal JSON envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub code: u16,
    pub message: String,
}

impl Failure {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: 400,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            code: 404,
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self {
            code: 409,
            message: message.into(),
        }
    }

    pub fn to_json(&self) -> Value {
        json!({ "meta": { "success": 0, "code": self.code, "error": self.message } })
    }
}

/// Which zone a hostname or record call is about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Domain(String),
    Group(String),
}

impl Target {
    pub fn name(&self) -> &str {
        match self {
            Self::Domain(name) | Self::Group(name) => name,
        }
    }
}

/// Decoded query pairs in arrival order; keys may repeat.
#[derive(Debug, Clone, Default)]
pub struct Params(Vec<(String, String)>);

impl Params {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self(pairs)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn all(&self, key: &str) -> Vec<String> {
        self.0
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
            .collect()
    }

    pub fn require(&self, key: &str) -> Result<&str, Failure> {
        self.get(key)
            .ok_or_else(|| Failure::bad_request(format!("Required argument '{key}' is missing")))
    }

    pub fn flag(&self, key: &str) -> bool {
        self.get(key).is_some_and(|v| v.eq_ignore_ascii_case("true"))
    }

    pub fn number<T: FromStr>(&self, key: &str) -> Result<Option<T>, Failure> {
        match self.get(key) {
            None => Ok(None),
            Some(raw) => raw
                .parse()
                .map(Some)
                .map_err(|_| Failure::bad_request(format!("Argument '{key}' must be a number"))),
        }
    }

    pub fn require_number<T: FromStr>(&self, key: &str) -> Result<T, Failure> {
        self.number(key)?
            .ok_or_else(|| Failure::bad_request(format!("Required argument '{key}' is missing")))
    }

    /// `domain=` wins over `group=` when both are present.
    pub fn target(&self) -> Result<Target, Failure> {
        if let Some(domain) = self.get("domain") {
            Ok(Target::Domain(domain.to_string()))
        } else if let Some(group) = self.get("group") {
            Ok(Target::Group(group.to_string()))
        } else {
            Err(Failure::bad_request("Either 'domain' or 'group' is required"))
        }
    }

    pub fn require_confirm(&self) -> Result<(), Failure> {
        if self.flag("confirm") {
            Ok(())
        } else {
            Err(Failure::bad_request("This operation requires confirm=true"))
        }
    }
}

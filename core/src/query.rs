//! Path + query string assembly for management API endpoints.
//!
//! Every endpoint lives at `/api/<name>/` and takes `AUTH_TOKEN` as its first
//! parameter. Values are percent-encoded once here; the token arrives already
//! encoded from [`ClientConfig`](crate::config::ClientConfig).

use std::fmt;

use crate::types::RecordTarget;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    buf: String,
}

impl Query {
    pub fn new(endpoint: &str, encoded_token: &str) -> Self {
        Self {
            buf: format!("/api/{endpoint}/?AUTH_TOKEN={encoded_token}"),
        }
    }

    /// Append a required parameter. An empty value still emits `key=`.
    #[must_use]
    pub fn push(mut self, key: &str, value: &str) -> Self {
        self.buf.push('&');
        self.buf.push_str(key);
        self.buf.push('=');
        self.buf.push_str(&urlencoding::encode(value));
        self
    }

    /// Append an optional parameter.
    ///
    /// `None` and the upstream `"null"` sentinel (any letter case) leave the
    /// key out entirely.
    #[must_use]
    pub fn push_opt(self, key: &str, value: Option<&str>) -> Self {
        match value {
            Some(v) if !is_null_sentinel(v) => self.push(key, v),
            _ => self,
        }
    }

    #[must_use]
    pub fn push_display(self, key: &str, value: impl fmt::Display) -> Self {
        self.push(key, &value.to_string())
    }

    #[must_use]
    pub fn push_display_opt<T: fmt::Display>(self, key: &str, value: Option<T>) -> Self {
        match value {
            Some(v) => self.push_display(key, v),
            None => self,
        }
    }

    /// Emit `key=true` when `set`, nothing otherwise.
    #[must_use]
    pub fn push_flag(self, key: &str, set: bool) -> Self {
        if set {
            self.push(key, "true")
        } else {
            self
        }
    }

    /// Repeat `key` once per value.
    #[must_use]
    pub fn push_all<S: AsRef<str>>(self, key: &str, values: &[S]) -> Self {
        values
            .iter()
            .fold(self, |query, value| query.push(key, value.as_ref()))
    }

    /// `domain=<name>` or `group=<name>`.
    #[must_use]
    pub fn push_target(self, target: &RecordTarget) -> Self {
        match target {
            RecordTarget::Domain(name) => self.push("domain", name),
            RecordTarget::Group(name) => self.push("group", name),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    pub fn into_string(self) -> String {
        self.buf
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.buf)
    }
}

fn is_null_sentinel(value: &str) -> bool {
    value.eq_ignore_ascii_case("null")
}

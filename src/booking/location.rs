//! Navigation locations and the booking path scheme.
//!
//! The wizard lives under a base path (default `/booking`). The segment after
//! the base path is the step token: `/booking/2` carries `"2"`, while
//! `/booking` and `/booking/` carry no token at all.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::booking::step::BookingStep;
use crate::config::BookingConfig;

/// A location as supplied by the navigation primitive
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Location {
    path: String,
}

impl Location {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// Full location string, including any query or fragment
    pub fn as_str(&self) -> &str {
        &self.path
    }

    /// Path component with query string and fragment removed
    pub fn path(&self) -> &str {
        let end = self.path.find(['?', '#']).unwrap_or(self.path.len());
        &self.path[..end]
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

impl From<&str> for Location {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<String> for Location {
    fn from(path: String) -> Self {
        Self::new(path)
    }
}

/// A path scheme the flow cannot be left from
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BookingPathsError {
    #[error("exit path '{exit}' lies inside the booking flow at '{entry}'")]
    ExitInsideFlow { exit: String, entry: String },
}

/// Path scheme for the booking flow
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingPaths {
    base: String,
    exit: String,
}

impl Default for BookingPaths {
    fn default() -> Self {
        Self::new("/booking", "/")
    }
}

impl BookingPaths {
    /// Create a path scheme. A trailing slash on the base path is ignored.
    pub fn new(base: impl Into<String>, exit: impl Into<String>) -> Self {
        let base = base.into();
        let trimmed = base.trim_end_matches('/');
        let base = if trimmed.is_empty() {
            "/".to_string()
        } else {
            trimmed.to_string()
        };
        Self {
            base,
            exit: exit.into(),
        }
    }

    pub fn from_config(config: &BookingConfig) -> Self {
        let paths = Self::new(config.base_path.clone(), config.exit_path.clone());
        if let Err(err) = paths.validate() {
            tracing::warn!(%err, "booking paths cannot exit the flow");
        }
        paths
    }

    /// Retreat from the first step pushes the exit path, so it must resolve
    /// outside the flow.
    pub fn validate(&self) -> Result<(), BookingPathsError> {
        if self.contains(&Location::new(self.exit.as_str())) {
            return Err(BookingPathsError::ExitInsideFlow {
                exit: self.exit.clone(),
                entry: self.base.clone(),
            });
        }
        Ok(())
    }

    /// Entry path of the flow (no step segment)
    pub fn entry(&self) -> &str {
        &self.base
    }

    /// Where the flow sends the user when they leave it
    pub fn exit(&self) -> &str {
        &self.exit
    }

    /// Path that encodes a step
    pub fn step_path(&self, step: BookingStep) -> String {
        if self.base == "/" {
            format!("/{}", step.number())
        } else {
            format!("{}/{}", self.base, step.number())
        }
    }

    /// Whether the location is inside the booking flow
    pub fn contains(&self, location: &Location) -> bool {
        self.remainder(location.path()).is_some()
    }

    /// Extract the raw step token from a location.
    ///
    /// Returns `None` both for locations outside the flow and for the bare
    /// entry path; use [`BookingPaths::contains`] to tell them apart.
    pub fn step_token<'a>(&self, location: &'a Location) -> Option<&'a str> {
        self.remainder(location.path())
            .map(|rest| rest.strip_suffix('/').unwrap_or(rest))
            .filter(|token| !token.is_empty())
    }

    /// Path after the base, without the separating slash
    fn remainder<'a>(&self, path: &'a str) -> Option<&'a str> {
        if self.base == "/" {
            return path.strip_prefix('/');
        }
        let rest = path.strip_prefix(self.base.as_str())?;
        if rest.is_empty() {
            Some(rest)
        } else {
            rest.strip_prefix('/')
        }
    }
}

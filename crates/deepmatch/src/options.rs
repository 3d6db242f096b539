//! Comparison options.
//!
//! [`CompareOptions`] selects the semantics of a comparison and, for the
//! partial subset, how records are walked. Options can be built in code,
//! deserialized with serde, or read from the environment:
//!
//! | Variable | Values |
//! |----------|--------|
//! | `DEEPMATCH_SEMANTICS` | `equal`, `contains-all`, `contains-some` |
//! | `DEEPMATCH_RECORD_KEYING` | `positional`, `named` |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DeepMatchError, Result};

/// Environment variable naming the semantics.
pub const SEMANTICS_VAR: &str = "DEEPMATCH_SEMANTICS";

/// Environment variable naming the record keying.
pub const RECORD_KEYING_VAR: &str = "DEEPMATCH_RECORD_KEYING";

/// Which comparison to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Semantics {
    /// Full structural equality.
    #[default]
    Equal,
    /// The subject contains all of the filter.
    ContainsAll,
    /// The subject contains some of the filter.
    ContainsSome,
}

impl Semantics {
    /// Returns the display name of these semantics.
    pub fn as_str(self) -> &'static str {
        match self {
            Semantics::Equal => "equal",
            Semantics::ContainsAll => "contains-all",
            Semantics::ContainsSome => "contains-some",
        }
    }
}

impl fmt::Display for Semantics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Semantics {
    type Err = DeepMatchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "equal" | "equals" => Ok(Semantics::Equal),
            "contains-all" | "strict-subset" => Ok(Semantics::ContainsAll),
            "contains-some" | "partial-subset" => Ok(Semantics::ContainsSome),
            _ => Err(DeepMatchError::UnknownSemantics(s.to_string())),
        }
    }
}

/// How the partial subset walks generic records.
///
/// `Positional` reads the filter's key count and then looks up the keys
/// `"0"`, `"1"`, ... on both sides, so records without numeric keys compare
/// as matching absences. `Named` looks up each of the filter's own keys on
/// the subject, like the other semantics do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecordKeying {
    #[default]
    Positional,
    Named,
}

impl RecordKeying {
    /// Returns the display name of this keying.
    pub fn as_str(self) -> &'static str {
        match self {
            RecordKeying::Positional => "positional",
            RecordKeying::Named => "named",
        }
    }
}

impl fmt::Display for RecordKeying {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RecordKeying {
    type Err = DeepMatchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "positional" => Ok(RecordKeying::Positional),
            "named" => Ok(RecordKeying::Named),
            _ => Err(DeepMatchError::UnknownRecordKeying(s.to_string())),
        }
    }
}

/// Options for [`compare_with`](crate::compare_with).
///
/// ```
/// use deepmatch::{compare_with, CompareOptions, RecordKeying, Semantics, Value};
///
/// let options = CompareOptions::new(Semantics::ContainsSome)
///     .with_record_keying(RecordKeying::Named);
///
/// let subject = Value::record([("a", Value::from(1)), ("b", Value::from(2))]);
/// let filter = Value::record([("b", Value::from(2)), ("c", Value::from(3))]);
/// assert!(compare_with(&options, &subject, &filter));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CompareOptions {
    /// Which comparison to run.
    pub semantics: Semantics,
    /// Record walk used by [`Semantics::ContainsSome`].
    pub record_keying: RecordKeying,
}

impl CompareOptions {
    /// Creates options for the given semantics with default keying.
    pub fn new(semantics: Semantics) -> Self {
        CompareOptions {
            semantics,
            ..CompareOptions::default()
        }
    }

    /// Sets the record keying.
    pub fn with_record_keying(mut self, record_keying: RecordKeying) -> Self {
        self.record_keying = record_keying;
        self
    }

    /// Reads options from the process environment.
    ///
    /// Unset variables keep their defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_env_reader(|name| std::env::var(name).ok())
    }

    /// Reads options through the given variable lookup.
    ///
    /// ```
    /// use deepmatch::{CompareOptions, Semantics};
    ///
    /// let options = CompareOptions::from_env_reader(|name| match name {
    ///     "DEEPMATCH_SEMANTICS" => Some("contains-all".to_string()),
    ///     _ => None,
    /// })
    /// .unwrap();
    /// assert_eq!(options.semantics, Semantics::ContainsAll);
    /// ```
    pub fn from_env_reader<F>(var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut options = CompareOptions::default();
        if let Some(value) = var(SEMANTICS_VAR) {
            options.semantics = value.parse()?;
        }
        if let Some(value) = var(RECORD_KEYING_VAR) {
            options.record_keying = value.parse()?;
        }
        Ok(options)
    }
}

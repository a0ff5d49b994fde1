//! Fixture loading and management.

use serde::{Deserialize, Serialize};

/// One argument of a fixture case, as it appears in JSON
/// (e.g. `{"int": 42}`, `{"str": "hi"}`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArgSpec {
    Int(i64),
    Uint(u64),
    Float(f64),
    Char(char),
    Str(String),
    /// A C null pointer passed where a string is expected.
    NullStr,
    Ptr(u64),
}

/// A single fixture test case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureCase {
    /// Case identifier.
    pub name: String,
    /// C/POSIX spec section reference.
    pub spec_section: String,
    /// The format string under test.
    pub format: String,
    /// Arguments, in order.
    #[serde(default)]
    pub args: Vec<ArgSpec>,
    /// Expected rendered output. For error cases, `error:` followed by a
    /// substring of the expected message.
    pub expected: String,
    /// Expected return count; omitted means "length of `expected`".
    #[serde(default)]
    pub expected_count: Option<i64>,
    /// Bounded-sink capacity; omitted means unbounded.
    #[serde(default)]
    pub limit: Option<usize>,
}

/// A collection of fixture cases for a conversion family.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureSet {
    /// Schema version.
    pub version: String,
    /// Conversion family name (e.g. "pformat/integer").
    pub family: String,
    /// Individual test cases.
    pub cases: Vec<FixtureCase>,
}

impl FixtureSet {
    /// Load fixture set from JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize fixture set to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load fixture set from a file path.
    pub fn from_file(path: &std::path::Path) -> Result<Self, crate::runner::HarnessError> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&content)?)
    }
}

//! Typed shapes of everything exchanged with the backend.
//!
//! Responses are validated here, on receipt, so the formatter and the
//! editor cache only ever see well-formed values.
use crate::language::Language;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

pub type ProblemId = u64;

/// Test payloads are pre-serialized by the judge, but older backends send
/// raw JSON values. Both end up as display text.
fn json_text<'de, D: Deserializer<'de>>(de: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(de)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        v => v.to_string(),
    })
}
/// Absent, `null` and empty strings are all "not present".
fn optional_text<'de, D: Deserializer<'de>>(de: D) -> Result<Option<String>, D::Error> {
    Ok(match Option::<Value>::deserialize(de)? {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.is_empty() => None,
        Some(Value::String(s)) => Some(s),
        Some(v) => Some(v.to_string()),
    })
}
fn optional_seconds<'de, D: Deserializer<'de>>(de: D) -> Result<Option<f64>, D::Error> {
    Ok(Option::<f64>::deserialize(de)?.filter(|t| t.is_finite()))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestOutcome {
    #[serde(default, deserialize_with = "json_text")]
    pub input: String,
    #[serde(default, deserialize_with = "json_text")]
    pub expected_output: String,
    #[serde(default, deserialize_with = "optional_text")]
    pub actual_output: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub error: Option<String>,
    #[serde(default, deserialize_with = "optional_seconds")]
    pub execution_time: Option<f64>,
    #[serde(default)]
    pub passed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JudgeResult {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub total_tests: u32,
    #[serde(default)]
    pub passed_tests: u32,
    #[serde(default, deserialize_with = "optional_seconds")]
    pub execution_time: Option<f64>,
    #[serde(default)]
    pub test_results: Vec<TestOutcome>,
}
impl JudgeResult {
    pub fn failed(&self) -> u32 {
        self.total_tests.saturating_sub(self.passed_tests)
    }
    pub fn all_passed(&self) -> bool {
        self.passed_tests == self.total_tests
    }
    /// Lowest-indexed failing case, with its 1-based position.
    pub fn first_failure(&self) -> Option<(usize, &TestOutcome)> {
        self.test_results
            .iter()
            .enumerate()
            .find(|(_, t)| !t.passed)
            .map(|(i, t)| (i + 1, t))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RunRequest<'a> {
    pub problem_id: ProblemId,
    pub code: &'a str,
    pub language: Language,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Template {
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AcceptedSubmission {
    pub code: String,
    pub language: Language,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Problem {
    pub id: ProblemId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub difficulty: String,
}

impl Problem {
    /// Case-insensitive search over title and description. An empty query
    /// matches everything.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        query.is_empty()
            || self.title.to_lowercase().contains(&query)
            || self.description.to_lowercase().contains(&query)
    }
}

/// The list endpoint answers either a bare array or a page object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ProblemPage {
    List(Vec<Problem>),
    Page { problems: Vec<Problem> },
}
impl ProblemPage {
    pub(crate) fn into_problems(self) -> Vec<Problem> {
        match self {
            ProblemPage::List(v) | ProblemPage::Page { problems: v } => v,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TestCase {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub input_data: Value,
    #[serde(default)]
    pub expected_output: Value,
    #[serde(default)]
    pub explanation: Option<String>,
    #[serde(default)]
    pub is_hidden: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Tag {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Constraint {
    pub id: u64,
    #[serde(default)]
    pub problem_id: Option<ProblemId>,
    pub description: String,
    #[serde(default)]
    pub order: Option<i64>,
}

/// Payload of the OAuth success redirect, persisted as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default, deserialize_with = "optional_text")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct UserStats(pub Map<String, Value>);

//! Scenario files: a list, a config and a script of interactions, optionally
//! with the expected outcome.
//!
//! ```json
//! {
//!   "name": "move first to end",
//!   "items": [{ "id": "1", "text": "Buy milk" }, { "id": "2", "text": "Walk dog" }],
//!   "events": [
//!     { "event": "drag_start", "id": "1" },
//!     { "event": "drag_over_end" },
//!     { "event": "drop" }
//!   ],
//!   "expect": { "order": ["2", "1"], "submissions": ["todo-ids=2,1"] }
//! }
//! ```
//!
//! `expect` only has to name the snapshot fields a scenario cares about.

use std::fmt;

use listwire::headless::{HeadlessRuntime, ScriptError, ScriptEvent, Snapshot};
use listwire::memory::{ItemSpec, MemoryList};
use listwire::{ConfigError, ControllerConfig};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub config: ControllerConfig,
    #[serde(default)]
    pub items: Vec<ItemSpec>,
    #[serde(default)]
    pub events: Vec<ScriptEvent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expect: Option<Value>,
}

#[derive(Debug)]
pub enum ScenarioError {
    Json(serde_json::Error),
    Config(ConfigError),
    /// Event number `step` (zero-based) could not be applied.
    Step { step: usize, error: ScriptError },
}

impl fmt::Display for ScenarioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScenarioError::Json(error) => write!(f, "invalid scenario: {error}"),
            ScenarioError::Config(error) => write!(f, "{error}"),
            ScenarioError::Step { step, error } => write!(f, "event #{step}: {error}"),
        }
    }
}

impl std::error::Error for ScenarioError {}

impl From<serde_json::Error> for ScenarioError {
    fn from(error: serde_json::Error) -> Self {
        ScenarioError::Json(error)
    }
}

impl From<ConfigError> for ScenarioError {
    fn from(error: ConfigError) -> Self {
        ScenarioError::Config(error)
    }
}

impl Scenario {
    pub fn parse(json: &str) -> Result<Self, ScenarioError> {
        let scenario: Self = serde_json::from_str(json)?;
        scenario.config.validate()?;
        Ok(scenario)
    }

    pub fn run(&self) -> Result<Snapshot, ScenarioError> {
        let list = MemoryList::new(self.items.iter().cloned());
        let mut runtime = HeadlessRuntime::new(self.config.clone(), list);
        for (step, event) in self.events.iter().enumerate() {
            runtime
                .dispatch(event)
                .map_err(|error| ScenarioError::Step { step, error })?;
        }
        Ok(runtime.snapshot())
    }
}

/// Fields of `expected` that differ from `actual`, as `(field, expected, actual)`.
///
/// An object compares field by field so a scenario can pin just part of the
/// snapshot; anything else must match as a whole.
pub fn mismatches(expected: &Value, actual: &Value) -> Vec<(String, Value, Value)> {
    match expected {
        Value::Object(fields) => fields
            .iter()
            .filter_map(|(field, expected)| {
                let actual = actual.get(field).cloned().unwrap_or(Value::Null);
                (*expected != actual).then(|| (field.clone(), expected.clone(), actual))
            })
            .collect(),
        _ if expected == actual => Vec::new(),
        _ => vec![(String::from("snapshot"), expected.clone(), actual.clone())],
    }
}

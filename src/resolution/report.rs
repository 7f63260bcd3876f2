use std::fmt;

use serde::Serialize;

use super::task::ResolutionTask;

/// What happened to a single resolution task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TaskStatus {
    /// The fetched node was spliced in under `name`.
    Resolved { name: String },
    /// The locator did not split into a host and a fragment path.
    MalformedLocator,
    FetchFailed { message: String },
    /// The fetched content was neither JSON nor YAML.
    ParseFailed { message: String },
    /// No child named `segment` existed while walking the fragment path. An
    /// empty `segment` means the fragment path had no segments at all.
    NavigationMiss { segment: String },
    /// The addressed node could not be read as a model or parameter.
    ConversionFailed { message: String },
    /// No reference parameter in the operation has the short name `name`.
    NoMatchingParameter { name: String },
    /// The site no longer holds the reference the task was created for.
    SiteMissing,
}

impl TaskStatus {
    pub fn is_resolved(&self) -> bool {
        matches!(self, TaskStatus::Resolved { .. })
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskStatus::Resolved { name } => write!(f, "resolved as {name}"),
            TaskStatus::MalformedLocator => write!(f, "malformed locator"),
            TaskStatus::FetchFailed { message } => write!(f, "fetch failed: {message}"),
            TaskStatus::ParseFailed { message } => write!(f, "unparseable content: {message}"),
            TaskStatus::NavigationMiss { segment } if segment.is_empty() => {
                write!(f, "fragment path has no segments")
            }
            TaskStatus::NavigationMiss { segment } => write!(f, "no node named '{segment}'"),
            TaskStatus::ConversionFailed { message } => write!(f, "conversion failed: {message}"),
            TaskStatus::NoMatchingParameter { name } => {
                write!(f, "no reference parameter named '{name}'")
            }
            TaskStatus::SiteMissing => write!(f, "reference site no longer exists"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskOutcome {
    pub task: ResolutionTask,
    pub status: TaskStatus,
}

/// Diagnostics for one resolution pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolutionReport {
    pub outcomes: Vec<TaskOutcome>,
    pub total: usize,
    pub resolved_count: usize,
}

impl ResolutionReport {
    pub fn new(outcomes: Vec<TaskOutcome>) -> Self {
        let total = outcomes.len();
        let resolved_count = outcomes.iter().filter(|o| o.status.is_resolved()).count();
        Self {
            outcomes,
            total,
            resolved_count,
        }
    }

    /// Outcomes of the tasks that were abandoned.
    pub fn failures(&self) -> impl Iterator<Item = &TaskOutcome> {
        self.outcomes.iter().filter(|o| !o.status.is_resolved())
    }

    /// Looks up the outcome recorded for `locator`, if any.
    pub fn outcome_for(&self, locator: &str) -> Option<&TaskOutcome> {
        self.outcomes.iter().find(|o| o.task.locator == locator)
    }
}

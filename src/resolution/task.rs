use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use crate::types::HttpMethod;

/// Stable address of a reference node and the parent that owns it.
///
/// Sites are addressed by name and position rather than by pointer, so a
/// task stays valid while the document is mutated by earlier tasks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReferenceSite {
    /// A reference model stored directly as a named definition.
    Definition { definition: String },
    /// The reference `items` of an array definition.
    DefinitionItems { definition: String },
    /// A reference property of an object definition.
    ObjectProperty { definition: String, property: String },
    /// The reference `items` of an array property of an object definition.
    PropertyItems { definition: String, property: String },
    /// The reference `additionalProperties` of a map property.
    PropertyValues { definition: String, property: String },
    /// The reference schema of the body parameter at `index`.
    BodySchema {
        path: String,
        method: HttpMethod,
        index: usize,
    },
    /// The reference parameters of an operation that share the task locator.
    OperationParameters { path: String, method: HttpMethod },
    /// The reference schema of a response.
    ResponseSchema {
        path: String,
        method: HttpMethod,
        status: String,
    },
}

impl ReferenceSite {
    /// Inline targets replace the referencing node outright; every other site
    /// rewrites a locator and registers a definition.
    pub fn scope(&self) -> Scope {
        match self {
            ReferenceSite::OperationParameters { .. } => Scope::InlineTarget,
            _ => Scope::DirectReference,
        }
    }
}

impl fmt::Display for ReferenceSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceSite::Definition { definition } => write!(f, "definition {definition}"),
            ReferenceSite::DefinitionItems { definition } => {
                write!(f, "definition {definition} items")
            }
            ReferenceSite::ObjectProperty {
                definition,
                property,
            } => write!(f, "definition {definition} property {property}"),
            ReferenceSite::PropertyItems {
                definition,
                property,
            } => write!(f, "definition {definition} property {property} items"),
            ReferenceSite::PropertyValues {
                definition,
                property,
            } => write!(f, "definition {definition} property {property} values"),
            ReferenceSite::BodySchema {
                path,
                method,
                index,
            } => write!(f, "{} {path} parameter {index} schema", method.as_str()),
            ReferenceSite::OperationParameters { path, method } => {
                write!(f, "{} {path} parameters", method.as_str())
            }
            ReferenceSite::ResponseSchema {
                path,
                method,
                status,
            } => write!(f, "{} {path} response {status} schema", method.as_str()),
        }
    }
}

/// Whether a task rewrites a locator or replaces the referencing node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Scope {
    DirectReference,
    InlineTarget,
}

/// A unit of work: fetch `locator`, navigate, convert, splice at `site`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ResolutionTask {
    pub site: ReferenceSite,
    pub scope: Scope,
    pub locator: String,
}

impl ResolutionTask {
    pub fn new(site: ReferenceSite, locator: impl Into<String>) -> Self {
        Self {
            scope: site.scope(),
            site,
            locator: locator.into(),
        }
    }
}

/// Deduplicating collection of resolution tasks.
///
/// Structurally equal tasks collapse to one. Iteration follows discovery
/// order, which makes last-write-wins on colliding definition names
/// deterministic.
#[derive(Debug, Default)]
pub struct TaskRegistry {
    order: Vec<ResolutionTask>,
    seen: HashSet<ResolutionTask>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a task, returning `false` if an equal task is already queued.
    pub fn insert(&mut self, task: ResolutionTask) -> bool {
        if !self.seen.insert(task.clone()) {
            return false;
        }
        self.order.push(task);
        true
    }

    pub fn contains(&self, task: &ResolutionTask) -> bool {
        self.seen.contains(task)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResolutionTask> {
        self.order.iter()
    }

    /// Removes and returns every task in discovery order.
    pub fn drain(&mut self) -> Vec<ResolutionTask> {
        self.seen.clear();
        std::mem::take(&mut self.order)
    }
}

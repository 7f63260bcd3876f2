/// Remote reference resolution.
///
/// Detectors walk a [`Document`](crate::types::Document) for references whose
/// locator points at remote content and queue a task per reference site; the
/// [`SwaggerResolver`] then fetches, navigates, converts and splices each one.
mod detect;
mod locator;
mod report;
mod resolver;
mod task;

pub use detect::{detect_model_refs, detect_operation_refs, is_external};
pub use locator::{HostKind, Locator};
pub use report::{ResolutionReport, TaskOutcome, TaskStatus};
pub use resolver::SwaggerResolver;
pub use task::{ReferenceSite, ResolutionTask, Scope, TaskRegistry};

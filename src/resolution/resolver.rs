use std::collections::HashMap;
use std::rc::Rc;

use serde_json::Value;
use tracing::{debug, info, trace, warn};

use crate::config::{NonHttpHostPolicy, ResolverOptions};
use crate::fetch::{parse_content, HttpFetcher, RemoteFetcher};
use crate::types::*;

use super::detect;
use super::locator::{HostKind, Locator};
use super::report::{ResolutionReport, TaskOutcome, TaskStatus};
use super::task::{ReferenceSite, ResolutionTask, TaskRegistry};

/// Parsed remote content, or the status every task on that host gets.
type CachedContent = Result<Rc<Value>, TaskStatus>;

/// Makes a document self-contained by fetching the remote content its
/// references point at and splicing it back in.
///
/// A pass runs in two phases: both detectors fill the task registry, then
/// [`apply_resolutions`](Self::apply_resolutions) drains it. Each task is
/// resolved independently; a failed task leaves its reference untouched and
/// is reported in the returned [`ResolutionReport`].
pub struct SwaggerResolver {
    options: ResolverOptions,
    fetcher: Box<dyn RemoteFetcher>,
    registry: TaskRegistry,
}

impl SwaggerResolver {
    /// Creates a resolver that fetches remote content over HTTP.
    pub fn new(options: ResolverOptions) -> Self {
        let fetcher = HttpFetcher::new(&options);
        Self::with_fetcher(options, fetcher)
    }

    /// Creates a resolver backed by a custom fetcher.
    pub fn with_fetcher(options: ResolverOptions, fetcher: impl RemoteFetcher + 'static) -> Self {
        Self {
            options,
            fetcher: Box::new(fetcher),
            registry: TaskRegistry::new(),
        }
    }

    pub fn options(&self) -> &ResolverOptions {
        &self.options
    }

    /// Tasks queued but not yet applied.
    pub fn registry(&self) -> &TaskRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut TaskRegistry {
        &mut self.registry
    }

    /// Runs both detectors and applies every resulting task.
    ///
    /// Never fails: per-task failures are recorded in the report and the
    /// corresponding references are left as they were.
    pub fn resolve(
        &mut self,
        doc: &mut Document,
        auths: &[AuthorizationValue],
    ) -> ResolutionReport {
        self.detect_model_refs(doc);
        self.detect_operation_refs(doc);
        self.apply_resolutions(doc, auths)
    }

    pub fn detect_model_refs(&mut self, doc: &Document) -> usize {
        detect::detect_model_refs(doc, &self.options, &mut self.registry)
    }

    pub fn detect_operation_refs(&mut self, doc: &Document) -> usize {
        detect::detect_operation_refs(doc, &self.options, &mut self.registry)
    }

    /// Drains the registry, resolving each task in discovery order.
    ///
    /// When two tasks register a definition under the same resolved name, the
    /// one processed later wins.
    pub fn apply_resolutions(
        &mut self,
        doc: &mut Document,
        auths: &[AuthorizationValue],
    ) -> ResolutionReport {
        let tasks = self.registry.drain();
        let mut cache: HashMap<String, CachedContent> = HashMap::new();
        let mut outcomes = Vec::with_capacity(tasks.len());

        for task in tasks {
            let status = self.resolve_task(doc, &task, auths, &mut cache);
            match &status {
                TaskStatus::Resolved { name } => {
                    debug!(site = %task.site, locator = %task.locator, name = %name, "resolved reference");
                }
                TaskStatus::NavigationMiss { segment } => {
                    debug!(site = %task.site, locator = %task.locator, segment = %segment, "fragment path not found");
                }
                other => {
                    warn!(site = %task.site, locator = %task.locator, status = ?other, "abandoned resolution task");
                }
            }
            outcomes.push(TaskOutcome { task, status });
        }

        let report = ResolutionReport::new(outcomes);
        info!(
            total = report.total,
            resolved = report.resolved_count,
            "resolution pass complete"
        );
        report
    }

    fn resolve_task(
        &self,
        doc: &mut Document,
        task: &ResolutionTask,
        auths: &[AuthorizationValue],
        cache: &mut HashMap<String, CachedContent>,
    ) -> TaskStatus {
        let Some(locator) = Locator::parse(&task.locator) else {
            return TaskStatus::MalformedLocator;
        };

        let tree = match self.load_content(doc, &locator, auths, cache) {
            Ok(tree) => tree,
            Err(status) => return status,
        };

        let (node, name) = match navigate(&tree, &locator) {
            Ok(found) => found,
            Err(status) => return status,
        };

        match &task.site {
            ReferenceSite::OperationParameters { path, method } => {
                let parameter: Parameter = match serde_json::from_value(node.clone()) {
                    Ok(p) => p,
                    Err(e) => {
                        return TaskStatus::ConversionFailed {
                            message: e.to_string(),
                        }
                    }
                };
                let Some(operation) = doc
                    .paths
                    .get_mut(path)
                    .and_then(|entry| entry.operation_mut(*method))
                else {
                    return TaskStatus::SiteMissing;
                };
                replace_parameters(operation, &task.locator, &name, &parameter)
            }
            site => {
                let model: Model = match serde_json::from_value(node.clone()) {
                    Ok(m) => m,
                    Err(e) => {
                        return TaskStatus::ConversionFailed {
                            message: e.to_string(),
                        }
                    }
                };
                match reference_slot(doc, site) {
                    Some(reference) if *reference == task.locator => {
                        *reference = name.clone();
                    }
                    _ => return TaskStatus::SiteMissing,
                }
                doc.add_definition(name.clone(), model);
                TaskStatus::Resolved { name }
            }
        }
    }

    /// Produces the tree a locator's fragment path is walked against.
    fn load_content(
        &self,
        doc: &Document,
        locator: &Locator<'_>,
        auths: &[AuthorizationValue],
        cache: &mut HashMap<String, CachedContent>,
    ) -> CachedContent {
        match locator.host_kind(&self.options.self_host) {
            HostKind::Http => {
                if !self.options.cache_remote_content {
                    return self.fetch_remote(locator.host, auths);
                }
                cache
                    .entry(locator.host.to_string())
                    .or_insert_with(|| self.fetch_remote(locator.host, auths))
                    .clone()
            }
            HostKind::SelfDocument => serialize_self(doc),
            HostKind::Other => match self.options.non_http_hosts {
                NonHttpHostPolicy::SelfDocument => serialize_self(doc),
                NonHttpHostPolicy::Reject => Err(TaskStatus::FetchFailed {
                    message: format!("unsupported locator host '{}'", locator.host),
                }),
            },
        }
    }

    fn fetch_remote(&self, host: &str, auths: &[AuthorizationValue]) -> CachedContent {
        let contents = self
            .fetcher
            .fetch(host, auths)
            .map_err(|e| TaskStatus::FetchFailed {
                message: e.to_string(),
            })?;
        parse_content(&contents)
            .map(Rc::new)
            .map_err(|e| TaskStatus::ParseFailed {
                message: e.to_string(),
            })
    }
}

/// Serializes the document to its canonical text and parses it back, standing
/// in for a fetch of locators that point at the document itself.
fn serialize_self(doc: &Document) -> CachedContent {
    let contents = doc.to_json().map_err(|e| TaskStatus::FetchFailed {
        message: e.to_string(),
    })?;
    parse_content(&contents)
        .map(Rc::new)
        .map_err(|e| TaskStatus::ParseFailed {
            message: e.to_string(),
        })
}

/// Walks the fragment path, returning the addressed node and the last matched
/// segment (the resolved name).
fn navigate<'v>(tree: &'v Value, locator: &Locator<'_>) -> Result<(&'v Value, String), TaskStatus> {
    let mut node = tree;
    let mut name = None;

    for segment in locator.segments() {
        trace!(segment, "getting part");
        match node.get(segment) {
            Some(child) => {
                node = child;
                name = Some(segment);
            }
            None => {
                return Err(TaskStatus::NavigationMiss {
                    segment: segment.to_string(),
                })
            }
        }
    }

    match name {
        Some(name) => Ok((node, name.to_string())),
        None => Err(TaskStatus::NavigationMiss {
            segment: String::new(),
        }),
    }
}

/// Replaces every reference parameter that points at `locator` and whose
/// short name is `name`. Parameters referencing other locators, local ones
/// included, are left alone.
fn replace_parameters(
    operation: &mut Operation,
    locator: &str,
    name: &str,
    parameter: &Parameter,
) -> TaskStatus {
    let mut replaced = 0;
    for slot in operation.parameters.iter_mut() {
        let matches = matches!(
            slot,
            Parameter::Reference(r) if r.reference == locator && r.simple_ref() == name
        );
        if matches {
            *slot = parameter.clone();
            replaced += 1;
        }
    }

    if replaced == 0 {
        TaskStatus::NoMatchingParameter {
            name: name.to_string(),
        }
    } else {
        TaskStatus::Resolved {
            name: name.to_string(),
        }
    }
}

/// Locates the locator string held by the reference node at `site`.
fn reference_slot<'d>(doc: &'d mut Document, site: &ReferenceSite) -> Option<&'d mut String> {
    match site {
        ReferenceSite::Definition { definition } => match doc.definitions.get_mut(definition)? {
            Model::Reference(r) => Some(&mut r.reference),
            _ => None,
        },
        ReferenceSite::DefinitionItems { definition } => {
            match doc.definitions.get_mut(definition)? {
                Model::Array(array) => property_ref(&mut array.items),
                _ => None,
            }
        }
        ReferenceSite::ObjectProperty {
            definition,
            property,
        } => property_ref(object_property(doc, definition, property)?),
        ReferenceSite::PropertyItems {
            definition,
            property,
        } => match object_property(doc, definition, property)? {
            Property::Array(array) => property_ref(&mut array.items),
            _ => None,
        },
        ReferenceSite::PropertyValues {
            definition,
            property,
        } => match object_property(doc, definition, property)? {
            Property::Map(map) => property_ref(&mut map.additional_properties),
            _ => None,
        },
        ReferenceSite::BodySchema {
            path,
            method,
            index,
        } => {
            let operation = doc.paths.get_mut(path)?.operation_mut(*method)?;
            match operation.parameters.get_mut(*index)? {
                Parameter::Body(body) => match &mut body.schema {
                    Model::Reference(r) => Some(&mut r.reference),
                    _ => None,
                },
                _ => None,
            }
        }
        ReferenceSite::ResponseSchema {
            path,
            method,
            status,
        } => {
            let operation = doc.paths.get_mut(path)?.operation_mut(*method)?;
            property_ref(operation.responses.get_mut(status)?.schema.as_mut()?)
        }
        ReferenceSite::OperationParameters { .. } => None,
    }
}

fn object_property<'d>(
    doc: &'d mut Document,
    definition: &str,
    property: &str,
) -> Option<&'d mut Property> {
    match doc.definitions.get_mut(definition)? {
        Model::Object(object) => object.properties.get_mut(property),
        _ => None,
    }
}

fn property_ref(property: &mut Property) -> Option<&mut String> {
    match property {
        Property::Reference(r) => Some(&mut r.reference),
        _ => None,
    }
}

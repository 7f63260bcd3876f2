use tracing::debug;

use crate::config::ResolverOptions;
use crate::types::{Document, Model, Parameter, Property};

use super::locator::{HostKind, Locator};
use super::task::{ReferenceSite, ResolutionTask, TaskRegistry};

/// Returns `true` if `reference` is a well-formed locator whose host should be
/// fetched.
///
/// HTTP(S) hosts always qualify; the self sentinel only when
/// `include_self_references` is set.
pub fn is_external(reference: &str, options: &ResolverOptions) -> bool {
    let Some(locator) = Locator::parse(reference) else {
        return false;
    };
    match locator.host_kind(&options.self_host) {
        HostKind::Http => true,
        HostKind::SelfDocument => options.include_self_references,
        HostKind::Other => false,
    }
}

/// Queues a task for every external reference reachable from the named
/// definitions. Returns the number of new tasks.
pub fn detect_model_refs(
    doc: &Document,
    options: &ResolverOptions,
    registry: &mut TaskRegistry,
) -> usize {
    let mut added = 0;
    let mut queue = |site: ReferenceSite, reference: &str| {
        if is_external(reference, options) {
            debug!(%site, reference, "added reference");
            if registry.insert(ResolutionTask::new(site, reference)) {
                added += 1;
            }
        }
    };

    for (name, model) in &doc.definitions {
        match model {
            Model::Reference(r) => queue(
                ReferenceSite::Definition {
                    definition: name.clone(),
                },
                &r.reference,
            ),
            Model::Array(array) => {
                if let Property::Reference(r) = &array.items {
                    queue(
                        ReferenceSite::DefinitionItems {
                            definition: name.clone(),
                        },
                        &r.reference,
                    );
                }
            }
            Model::Object(object) => {
                for (prop_name, property) in &object.properties {
                    match property {
                        Property::Reference(r) => queue(
                            ReferenceSite::ObjectProperty {
                                definition: name.clone(),
                                property: prop_name.clone(),
                            },
                            &r.reference,
                        ),
                        Property::Array(array) => {
                            if let Property::Reference(r) = array.items.as_ref() {
                                queue(
                                    ReferenceSite::PropertyItems {
                                        definition: name.clone(),
                                        property: prop_name.clone(),
                                    },
                                    &r.reference,
                                );
                            }
                        }
                        Property::Map(map) => {
                            if let Property::Reference(r) = map.additional_properties.as_ref() {
                                queue(
                                    ReferenceSite::PropertyValues {
                                        definition: name.clone(),
                                        property: prop_name.clone(),
                                    },
                                    &r.reference,
                                );
                            }
                        }
                        Property::Other(_) => {}
                    }
                }
            }
        }
    }

    added
}

/// Queues a task for every external body schema, reference parameter and
/// response schema in the document's operations. Returns the number of new
/// tasks.
pub fn detect_operation_refs(
    doc: &Document,
    options: &ResolverOptions,
    registry: &mut TaskRegistry,
) -> usize {
    let mut added = 0;

    for (path, entry) in &doc.paths {
        debug!(path = %path, "scanning path");
        for (method, operation) in entry.operations() {
            for (index, parameter) in operation.parameters.iter().enumerate() {
                let (site, reference) = match parameter {
                    Parameter::Body(body) => match &body.schema {
                        Model::Reference(r) => (
                            ReferenceSite::BodySchema {
                                path: path.clone(),
                                method,
                                index,
                            },
                            &r.reference,
                        ),
                        _ => continue,
                    },
                    Parameter::Reference(r) => (
                        ReferenceSite::OperationParameters {
                            path: path.clone(),
                            method,
                        },
                        &r.reference,
                    ),
                    Parameter::Other(_) => continue,
                };
                if is_external(reference, options) {
                    debug!(%site, reference = %reference, "added reference");
                    if registry.insert(ResolutionTask::new(site, reference.as_str())) {
                        added += 1;
                    }
                }
            }

            for (status, response) in &operation.responses {
                let Some(Property::Reference(r)) = &response.schema else {
                    continue;
                };
                if is_external(&r.reference, options) {
                    let site = ReferenceSite::ResponseSchema {
                        path: path.clone(),
                        method,
                        status: status.clone(),
                    };
                    debug!(%site, reference = %r.reference, "added reference");
                    if registry.insert(ResolutionTask::new(site, r.reference.as_str())) {
                        added += 1;
                    }
                }
            }
        }
    }

    added
}

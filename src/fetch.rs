use std::time::Duration;

use serde_json::Value;
use tracing::debug;
use ureq::Agent;

use crate::config::ResolverOptions;
use crate::errors::{ResolverError, Result};
use crate::types::{AuthorizationKind, AuthorizationValue};

/// Retrieves the raw text behind a remote locator host.
///
/// Implementations must report failures as errors; the resolver treats any
/// error as a failure of the single task that requested the content.
pub trait RemoteFetcher {
    fn fetch(&self, url: &str, auths: &[AuthorizationValue]) -> Result<String>;
}

impl<F> RemoteFetcher for F
where
    F: Fn(&str, &[AuthorizationValue]) -> Result<String>,
{
    fn fetch(&self, url: &str, auths: &[AuthorizationValue]) -> Result<String> {
        self(url, auths)
    }
}

/// Blocking HTTP(S) fetcher.
///
/// Header authorizations become request headers, query authorizations are
/// appended to the query string. Non-2xx statuses are errors.
pub struct HttpFetcher {
    agent: Agent,
    user_agent: String,
}

impl HttpFetcher {
    pub fn new(options: &ResolverOptions) -> Self {
        let config = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(options.timeout_secs)))
            .build();

        Self {
            agent: Agent::new_with_config(config),
            user_agent: options.user_agent.clone(),
        }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new(&ResolverOptions::default())
    }
}

impl RemoteFetcher for HttpFetcher {
    fn fetch(&self, url: &str, auths: &[AuthorizationValue]) -> Result<String> {
        let mut request = self
            .agent
            .get(url)
            .header("User-Agent", self.user_agent.as_str());

        for auth in auths {
            request = match auth.kind {
                AuthorizationKind::Header => {
                    request.header(auth.key_name.as_str(), auth.value.as_str())
                }
                AuthorizationKind::Query => request.query(&auth.key_name, &auth.value),
            };
        }

        debug!(url, auth_count = auths.len(), "fetching remote content");

        let mut response = request.call().map_err(|e| ResolverError::Fetch {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        response
            .body_mut()
            .read_to_string()
            .map_err(|e| ResolverError::Fetch {
                url: url.to_string(),
                message: format!("failed to read response body: {e}"),
            })
    }
}

/// Parses fetched text into a generic tree.
///
/// JSON is tried first, then YAML. A YAML document whose root is a bare
/// scalar is rejected, since no fragment path could ever address into it.
pub fn parse_content(content: &str) -> Result<Value> {
    let json_err = match serde_json::from_str::<Value>(content) {
        Ok(tree) => return Ok(tree),
        Err(e) => e,
    };

    let yaml: serde_yaml::Value = serde_yaml::from_str(content).map_err(|e| ResolverError::Parse {
        message: format!("content is neither JSON ({json_err}) nor YAML ({e})"),
    })?;

    let tree = serde_json::to_value(yaml)?;
    match tree {
        Value::Object(_) | Value::Array(_) => Ok(tree),
        _ => Err(ResolverError::Parse {
            message: format!("content is not a JSON or YAML document: {json_err}"),
        }),
    }
}

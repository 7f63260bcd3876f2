use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{ResolverError, Result};

/// Host used by locators that point back into the document being resolved.
pub const DEFAULT_SELF_HOST: &str = "self";

/// How to treat a locator host that is neither HTTP(S) nor the self sentinel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NonHttpHostPolicy {
    /// Fail the task without fetching anything.
    #[default]
    Reject,
    /// Resolve against the serialized form of the current document.
    SelfDocument,
}

/// Options controlling a resolution pass.
///
/// Every field has a default, so a partial (or missing) configuration file is
/// valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverOptions {
    /// Global timeout for a single remote fetch, in seconds.
    pub timeout_secs: u64,
    /// `User-Agent` header sent with remote fetches.
    pub user_agent: String,
    /// Locator host that denotes the document itself.
    pub self_host: String,
    /// Whether the detectors also queue locators addressed to `self_host`.
    pub include_self_references: bool,
    pub non_http_hosts: NonHttpHostPolicy,
    /// Reuse parsed remote content for every task that targets the same host.
    pub cache_remote_content: bool,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: format!("swagger-resolver/{}", env!("CARGO_PKG_VERSION")),
            self_host: DEFAULT_SELF_HOST.to_string(),
            include_self_references: false,
            non_http_hosts: NonHttpHostPolicy::Reject,
            cache_remote_content: true,
        }
    }
}

/// Loads resolver options from a JSON file.
///
/// A missing file yields the default options.
pub fn load_options(path: &Path) -> Result<ResolverOptions> {
    if !path.exists() {
        return Ok(ResolverOptions::default());
    }

    let contents = fs::read_to_string(path).map_err(|e| ResolverError::Config {
        message: format!("failed to read options file '{}': {}", path.display(), e),
    })?;

    let options: ResolverOptions =
        serde_json::from_str(&contents).map_err(|e| ResolverError::Config {
            message: format!("failed to parse options file '{}': {}", path.display(), e),
        })?;

    Ok(options)
}

/// Saves resolver options to disk using an atomic write.
pub fn save_options(path: &Path, options: &ResolverOptions) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| ResolverError::Config {
                message: format!(
                    "failed to create options directory '{}': {}",
                    parent.display(),
                    e
                ),
            })?;
        }
    }

    let tmp_path = path.with_extension("tmp");

    let json = serde_json::to_string_pretty(options).map_err(|e| ResolverError::Config {
        message: format!("failed to serialize options: {}", e),
    })?;

    fs::write(&tmp_path, &json).map_err(|e| ResolverError::Config {
        message: format!(
            "failed to write temporary options file '{}': {}",
            tmp_path.display(),
            e
        ),
    })?;

    fs::rename(&tmp_path, path).map_err(|e| ResolverError::Config {
        message: format!(
            "failed to rename temporary options file '{}' to '{}': {}",
            tmp_path.display(),
            path.display(),
            e
        ),
    })?;

    Ok(())
}

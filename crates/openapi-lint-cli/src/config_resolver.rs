//! Policy file resolution with global fallback.
//!
//! Resolves the policy file path using a deterministic priority order:
//!
//! 1. `--policyfile` flag (explicit path)
//! 2. `{cwd}/openapi-lint.policy.json`, `.openapi-lint.policy.json` or
//!    `openapi-lint.policy.toml`
//! 3. `~/.openapi-lint/policy.json` (global fallback)
//! 4. No policy found → built-in default

use anyhow::{Context, Result};
use openapi_lint::{default_policy_config, PolicyConfig, POLICY_FILE_NAMES};
use std::path::{Path, PathBuf};

/// Where the policy was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicySource {
    /// Explicitly specified via `--policyfile`.
    Explicit(PathBuf),
    /// Found in the working directory.
    Project(PathBuf),
    /// Loaded from the global config directory (`~/.openapi-lint/`).
    Global(PathBuf),
    /// No policy file found; the built-in default is used.
    Default,
}

impl PolicySource {
    /// Returns the resolved path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Loads the policy configuration from this source.
    pub fn load(&self) -> Result<PolicyConfig> {
        match self.path() {
            Some(p) => {
                if matches!(self, Self::Global(_)) {
                    tracing::info!("Using global policy: {}", p.display());
                }
                PolicyConfig::from_file(p)
                    .with_context(|| format!("Failed to load policy: {}", p.display()))
            }
            None => {
                tracing::info!("No policy file found, using the built-in default");
                Ok(default_policy_config())
            }
        }
    }
}

/// Project-level policy file names, checked in order.
pub const PROJECT_POLICY_NAMES: &[&str] = POLICY_FILE_NAMES;

/// Policy file name within the global config directory.
const GLOBAL_POLICY_NAME: &str = "policy.json";

/// Resolves the policy file path.
///
/// See module-level docs for resolution order.
#[must_use]
pub fn resolve(project_dir: &Path, explicit: Option<&Path>) -> PolicySource {
    resolve_inner(project_dir, explicit, global_config_dir())
}

/// Testable core: accepts `global_dir` as parameter to avoid env var races.
fn resolve_inner(
    project_dir: &Path,
    explicit: Option<&Path>,
    global_dir: Option<PathBuf>,
) -> PolicySource {
    if let Some(p) = explicit {
        return PolicySource::Explicit(p.to_path_buf());
    }

    for name in PROJECT_POLICY_NAMES {
        let candidate = project_dir.join(name);
        if candidate.exists() {
            tracing::debug!("Found project policy: {}", candidate.display());
            return PolicySource::Project(candidate);
        }
    }

    if let Some(dir) = global_dir {
        let candidate = dir.join(GLOBAL_POLICY_NAME);
        if candidate.exists() {
            tracing::debug!("Found global policy: {}", candidate.display());
            return PolicySource::Global(candidate);
        }
    }

    PolicySource::Default
}

/// Returns the global config directory path.
///
/// Resolution: `$OPENAPI_LINT_CONFIG_DIR` > `~/.openapi-lint/`
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var("OPENAPI_LINT_CONFIG_DIR") {
        return Some(PathBuf::from(dir));
    }
    home::home_dir().map(|h| h.join(".openapi-lint"))
}

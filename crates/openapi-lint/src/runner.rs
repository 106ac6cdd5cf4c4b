//! Glue between a policy configuration, the built-in collections and the
//! files to check.

use openapi_lint_core::utils::case::CaseStyle;
use openapi_lint_core::{Policy, PolicyConfig, PolicyError, RuleCollection, ViolationCollection};
use openapi_lint_rules::{standard_rules, tag_group_rules};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File extensions picked up when an input is a directory.
const SPEC_EXTENSIONS: &[&str] = &["json", "yaml", "yml"];

/// Project policy file names, in discovery order. Directory walks skip
/// them so a project's own policy is never linted as a document.
pub const POLICY_FILE_NAMES: &[&str] = &[
    "openapi-lint.policy.json",
    ".openapi-lint.policy.json",
    "openapi-lint.policy.toml",
];

/// Errors from expanding inputs or running a policy.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum RunnerError {
    /// A directory could not be walked.
    #[error("Failed to walk {path}: {source}")]
    #[diagnostic(code(openapi_lint::runner::walk))]
    Walk {
        /// Directory being walked.
        path: PathBuf,
        /// Underlying error.
        source: walkdir::Error,
    },

    /// Invalid glob pattern.
    #[error("Invalid glob pattern: {0}")]
    #[diagnostic(code(openapi_lint::runner::glob))]
    Glob(#[from] glob::PatternError),

    /// A glob match could not be read.
    #[error("Failed to read glob match: {0}")]
    #[diagnostic(code(openapi_lint::runner::glob))]
    GlobMatch(#[from] glob::GlobError),

    /// The input names nothing that exists.
    #[error("No spec files found for {input}")]
    #[diagnostic(
        code(openapi_lint::runner::no_input),
        help("pass a spec file, a directory of .json/.yaml/.yml files, or a glob pattern")
    )]
    NoInput {
        /// The input as given.
        input: String,
    },

    /// Policy resolution or validation failed.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Policy(#[from] PolicyError),
}

/// Returns the configuration used when no policy file is found.
///
/// Every standard rule is enabled at `error`, except that of each casing
/// family only the `camelcase` variant is kept.
#[must_use]
pub fn default_policy_config() -> PolicyConfig {
    standard_rules()
        .rule_names()
        .into_iter()
        .filter(|name| {
            CaseStyle::ALL
                .iter()
                .filter(|style| **style != CaseStyle::Camel)
                .all(|style| !name.ends_with(style.name()))
        })
        .fold(
            PolicyConfig::new("default")
                .include_standard_rules(true)
                .version("1.0"),
            |config, name| config.rule(name, "error"),
        )
}

/// Resolves `config` against the standard collection and the built-in
/// extension collections.
///
/// # Errors
///
/// Returns an error if the configuration does not resolve.
pub fn builtin_policy(config: &PolicyConfig) -> Result<Policy, PolicyError> {
    let standard = standard_rules();
    let tag_groups = tag_group_rules();
    let extensions: [&dyn RuleCollection; 1] = [&tag_groups];
    config.policy(&standard, &extensions)
}

/// Expands an input argument into spec file paths.
///
/// - an existing file is returned as is
/// - an existing directory is walked recursively, keeping `.json`,
///   `.yaml` and `.yml` files other than [`POLICY_FILE_NAMES`]
/// - anything else is treated as a glob pattern
/// - `http(s)://` URLs are passed through
///
/// Results are sorted.
///
/// # Errors
///
/// Returns an error if a directory cannot be walked, the glob is invalid,
/// or nothing matches.
pub fn expand_inputs(input: &str) -> Result<Vec<String>, RunnerError> {
    if input.starts_with("http://") || input.starts_with("https://") {
        return Ok(vec![input.to_string()]);
    }

    let path = Path::new(input);
    let mut files = if path.is_file() {
        vec![input.to_string()]
    } else if path.is_dir() {
        walk_dir(path)?
    } else {
        let mut matched = Vec::new();
        for entry in glob::glob(input)? {
            let entry = entry?;
            if entry.is_file() {
                matched.push(entry.to_string_lossy().into_owned());
            }
        }
        matched
    };

    if files.is_empty() {
        return Err(RunnerError::NoInput {
            input: input.to_string(),
        });
    }
    files.sort();
    debug!("Expanded {input} into {} files", files.len());
    Ok(files)
}

fn walk_dir(dir: &Path) -> Result<Vec<String>, RunnerError> {
    let mut files = Vec::new();
    for entry in walkdir::WalkDir::new(dir).follow_links(true) {
        let entry = entry.map_err(|e| RunnerError::Walk {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let is_spec = entry
            .path()
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| SPEC_EXTENSIONS.contains(&ext));
        let is_policy = entry
            .file_name()
            .to_str()
            .is_some_and(|name| POLICY_FILE_NAMES.contains(&name));
        if entry.file_type().is_file() && is_spec && !is_policy {
            files.push(entry.path().to_string_lossy().into_owned());
        }
    }
    Ok(files)
}

/// Resolves `config`, expands `input` and validates every file at `floor`.
///
/// # Errors
///
/// Returns an error if any step fails. Violations are never errors.
pub fn lint(
    config: &PolicyConfig,
    input: &str,
    floor: &str,
) -> Result<ViolationCollection, RunnerError> {
    let policy = builtin_policy(config)?;
    let files = expand_inputs(input)?;
    info!("Checking {} files with {} rules", files.len(), policy.len());
    Ok(policy.validate_spec_files(floor, &files)?)
}

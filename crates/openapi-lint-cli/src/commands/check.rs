//! Check command implementation.

use anyhow::{Context, Result};
use openapi_lint::{builtin_policy, expand_inputs};
use std::path::Path;

use super::output::{self, Report};
use crate::config_resolver::PolicySource;
use crate::OutputFormat;

/// Runs the check command.
///
/// Violations are reported but never fail the command; only problems
/// building the policy or loading files do.
pub fn run(
    inputspec: &str,
    severity: &str,
    format: OutputFormat,
    source: &PolicySource,
) -> Result<()> {
    let config = source.load()?;
    let policy = builtin_policy(&config).context("Failed to build policy")?;

    let files = expand_inputs(inputspec)
        .with_context(|| format!("Failed to expand --inputspec {inputspec}"))?;
    let files = without_policy_file(files, source.path());

    tracing::info!(
        "Checking {} file(s) with {} rule(s) at severity {}",
        files.len(),
        policy.len(),
        severity
    );

    let violations = policy
        .validate_spec_files(severity, &files)
        .context("Validation failed")?;

    output::print(
        &Report {
            policy: &policy,
            files: &files,
            violations: &violations,
        },
        format,
    )
}

/// Drops the policy file itself from the expanded inputs.
fn without_policy_file(files: Vec<String>, policy: Option<&Path>) -> Vec<String> {
    let Some(policy) = policy.and_then(|p| p.canonicalize().ok()) else {
        return files;
    };
    files
        .into_iter()
        .filter(|file| {
            let same = Path::new(file).canonicalize().is_ok_and(|f| f == policy);
            if same {
                tracing::debug!("Skipping policy file {file}");
            }
            !same
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_resolved_policy_file_is_not_linted() {
        let dir = tempfile::tempdir().unwrap();
        let spec = dir.path().join("api.json");
        let policy = dir.path().join("rules.json");
        fs::write(&spec, "{}").unwrap();
        fs::write(&policy, "{}").unwrap();

        let files = vec![
            spec.to_string_lossy().into_owned(),
            policy.to_string_lossy().into_owned(),
        ];
        assert_eq!(
            without_policy_file(files.clone(), Some(&policy)),
            vec![spec.to_string_lossy().into_owned()]
        );
        assert_eq!(without_policy_file(files.clone(), None), files);
    }
}

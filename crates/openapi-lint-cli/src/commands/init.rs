//! Init command implementation.

use anyhow::{bail, Context, Result};
use openapi_lint::default_policy_config;
use std::path::Path;

use crate::config_resolver::PROJECT_POLICY_NAMES;

/// Runs the init command, writing the default policy into `dir`.
pub fn run(dir: &Path, force: bool) -> Result<()> {
    let policy_path = dir.join(PROJECT_POLICY_NAMES[0]);

    if policy_path.exists() && !force {
        bail!(
            "Policy file already exists at {}. Use --force to overwrite.",
            policy_path.display()
        );
    }

    let mut content = default_policy_config().to_json_pretty()?;
    content.push('\n');
    std::fs::write(&policy_path, content)
        .with_context(|| format!("Failed to write {}", policy_path.display()))?;

    println!("Created {}", PROJECT_POLICY_NAMES[0]);
    println!("\nNext steps:");
    println!("  1. Edit {} to pick rules and severities", PROJECT_POLICY_NAMES[0]);
    println!("  2. Run: openapi-lint check --inputspec openapi.yaml");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use openapi_lint::PolicyConfig;

    #[test]
    fn writes_default_policy() {
        let tmp = tempfile::tempdir().unwrap();
        run(tmp.path(), false).unwrap();

        let written = PolicyConfig::from_file(&tmp.path().join("openapi-lint.policy.json")).unwrap();
        assert_eq!(written, default_policy_config());
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("openapi-lint.policy.json");
        std::fs::write(&path, "{}").unwrap();

        assert!(run(tmp.path(), false).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");

        run(tmp.path(), true).unwrap();
        assert_ne!(std::fs::read_to_string(&path).unwrap(), "{}");
    }
}

//! Shared output formatting for lint results.

use anyhow::Result;
use openapi_lint::{Policy, Severity, ViolationCollection};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write;

use crate::OutputFormat;

/// Everything a check run produced.
pub struct Report<'a> {
    /// The policy that ran.
    pub policy: &'a Policy,
    /// Files that were checked.
    pub files: &'a [String],
    /// Merged violations.
    pub violations: &'a ViolationCollection,
}

impl Report<'_> {
    fn severity(&self, rule: &str) -> Severity {
        self.policy
            .get(rule)
            .map_or(Severity::Error, |pr| pr.severity)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReport<'a> {
    policy: &'a str,
    files: &'a [String],
    total: usize,
    counts: BTreeMap<String, usize>,
    severities: BTreeMap<&'a str, Severity>,
    violations: &'a ViolationCollection,
}

/// Print lint results in the specified format.
pub fn print(report: &Report, format: OutputFormat) -> Result<()> {
    print!("{}", render(report, format)?);
    Ok(())
}

/// Render lint results in the specified format.
pub fn render(report: &Report, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Text => render_text(report)?,
        OutputFormat::Json => render_json(report)?,
        OutputFormat::Compact => render_compact(report)?,
    })
}

fn paint(severity: Severity) -> String {
    let color = match severity {
        Severity::Error => "\x1b[31m",
        Severity::Warning => "\x1b[33m",
        Severity::Information => "\x1b[34m",
        Severity::Hint | Severity::Disabled => "\x1b[36m",
    };
    format!("{color}{severity}\x1b[0m")
}

fn render_text(report: &Report) -> Result<String> {
    let mut out = String::new();
    for (rule, locations) in report.violations.locations_by_rule() {
        writeln!(out, "{} {rule} ({})", paint(report.severity(&rule)), locations.len())?;
        for location in locations {
            writeln!(out, "  {location}")?;
        }
        writeln!(out)?;
    }

    let total = report.violations.count();
    let color = if total == 0 { "\x1b[32m" } else { "\x1b[33m" };
    writeln!(
        out,
        "{color}Found {total} violation(s) across {} rule(s) in {} file(s)\x1b[0m",
        report.violations.rule_names().len(),
        report.files.len()
    )?;
    Ok(out)
}

fn render_json(report: &Report) -> Result<String> {
    let json = JsonReport {
        policy: report.policy.name(),
        files: report.files,
        total: report.violations.count(),
        counts: report.violations.counts_by_rule(),
        severities: report
            .violations
            .rule_names()
            .into_iter()
            .map(|rule| (rule, report.severity(rule)))
            .collect(),
        violations: report.violations,
    };
    let mut out = serde_json::to_string_pretty(&json)?;
    out.push('\n');
    Ok(out)
}

fn render_compact(report: &Report) -> Result<String> {
    let mut out = String::new();
    for violation in report.violations.iter() {
        writeln!(
            out,
            "{}: {} [{}]{}",
            violation.location,
            report.severity(&violation.rule_name),
            violation.rule_name,
            if violation.value.is_empty() {
                String::new()
            } else {
                format!(" {}", violation.value)
            }
        )?;
    }
    Ok(out)
}

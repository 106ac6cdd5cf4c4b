//! Rendering of fatal errors.
//!
//! Errors carrying a [`miette::Diagnostic`] are drawn with miette's
//! graphical handler so their codes and help text show up. Anything else
//! falls back to the anyhow chain.

use miette::{Diagnostic, GraphicalReportHandler};
use openapi_lint::{ConfigError, LoadError, PolicyError, RunnerError};

/// Formats an error for stderr.
pub fn render(err: &anyhow::Error) -> String {
    let mut contexts = Vec::new();
    let mut diagnostic = None;
    for cause in err.chain() {
        if let Some(d) = as_diagnostic(cause) {
            diagnostic = Some(d);
            break;
        }
        contexts.push(cause.to_string());
    }
    let Some(diagnostic) = diagnostic else {
        return format!("Error: {err:?}");
    };

    let mut out = String::new();
    for context in contexts {
        out.push_str(&format!("Error: {context}\n"));
    }
    if GraphicalReportHandler::new()
        .render_report(&mut out, diagnostic)
        .is_err()
    {
        return format!("Error: {err:?}");
    }
    out
}

fn as_diagnostic<'a>(cause: &'a (dyn std::error::Error + 'static)) -> Option<&'a dyn Diagnostic> {
    if let Some(e) = cause.downcast_ref::<RunnerError>() {
        return Some(e);
    }
    if let Some(e) = cause.downcast_ref::<PolicyError>() {
        return Some(e);
    }
    if let Some(e) = cause.downcast_ref::<ConfigError>() {
        return Some(e);
    }
    cause.downcast_ref::<LoadError>().map(|e| e as &dyn Diagnostic)
}

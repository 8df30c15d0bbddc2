//! Support code for the `logicpy` command-line tool.

use std::path::Path;

use logicpy_foundation::{Error, ErrorContext, ErrorKind};
use tracing_subscriber::{EnvFilter, fmt};

/// Initializes logging to stderr.
///
/// `RUST_LOG` overrides the default filter of `warn`, so resolver advisories
/// are shown unless silenced.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Attaches the source path, and any known position, to an error.
#[must_use]
pub fn locate(error: Error, path: &Path) -> Error {
    let mut context = error
        .context
        .clone()
        .unwrap_or_default()
        .with_source(path.display().to_string());
    if let (None, ErrorKind::Parse { line, column, .. }) = (context.line, &error.kind) {
        context = context.with_position(*line, *column);
    }
    error.with_context(context)
}

/// Renders an error as `path:line:col: message`.
#[must_use]
pub fn describe(error: &Error) -> String {
    match &error.context {
        Some(context) if context.source.is_some() => format!("{context}: {error}"),
        _ => error.to_string(),
    }
}

//! Non-fatal diagnostic reporting.
//!
//! Load problems in the variation layer are degradations, not failures:
//! a missing or malformed file means a page renders with less data, and
//! the caller still gets a usable bag back. Those problems are reported
//! through a [`DiagnosticSink`] instead of an error return. The default
//! sink forwards to the [`log`] facade; tests install a recording sink to
//! assert on exactly what was reported.

/// Receives formatted, human-readable diagnostics from loaders.
pub trait DiagnosticSink {
    fn report(&self, message: &str);
}

/// Default sink: emits each diagnostic as a `log::warn!` record under the
/// `variata` target.
#[derive(Debug, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&self, message: &str) {
        log::warn!(target: "variata", "{message}");
    }
}

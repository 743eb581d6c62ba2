//! Diagnostic sinks for best-effort loading.
//!
//! The loader never fails; everything it recovers from is reported here
//! instead, so tests can assert on warnings without capturing stderr.

/// Receives informational and warning messages from the loader.
pub trait Diagnostics {
    fn warn(&self, message: &str);
    fn info(&self, message: &str);
}

/// Forwards diagnostics to `tracing`.
#[derive(Debug, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn warn(&self, message: &str) {
        tracing::warn!("{message}");
    }

    fn info(&self, message: &str) {
        tracing::info!("{message}");
    }
}

#[cfg(test)]
pub use recording::RecordingDiagnostics;

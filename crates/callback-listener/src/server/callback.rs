//! The `/callback` route handler.

use std::io::Write;

use axum::extract::RawQuery;

use crate::config::defaults;
use crate::error::CallbackError;
use crate::query::{Bracketed, QueryValues};

/// Authorization code values captured from one callback request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedCode {
    values: Vec<String>,
}

impl CapturedCode {
    /// Every value sent under `code`, in order.
    #[must_use]
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Line written to stdout for this callback.
    #[must_use]
    pub fn log_line(&self) -> String {
        format!("callback received {}", Bracketed(&self.values))
    }

    /// Consume the capture, keeping the value echoed back to the browser.
    #[must_use]
    pub fn into_first(mut self) -> String {
        // constructed only from a non-empty sequence
        self.values.swap_remove(0)
    }
}

/// Extract the authorization code values from a decoded query.
pub fn process_callback(query: &QueryValues) -> Result<CapturedCode, CallbackError> {
    let values = query.get(defaults::CODE_PARAM);
    if values.is_empty() {
        return Err(CallbackError::MissingParameter(defaults::CODE_PARAM));
    }
    Ok(CapturedCode { values: values.to_vec() })
}

/// Write the log line for `captured` to `out`.
///
/// Stdout is informational: a failed write (e.g. a closed pipe) is logged
/// and the browser still gets its response.
pub fn report(out: &mut impl Write, captured: &CapturedCode) {
    if let Err(e) = writeln!(out, "{}", captured.log_line()) {
        tracing::warn!(error = %e, "Failed to write callback line to stdout");
    }
}

/// `ANY /callback`
///
/// Prints the received code values and echoes the first one as the body.
/// Responds 400 when the request has no `code` parameter.
pub async fn handle_callback(RawQuery(raw): RawQuery) -> Result<String, CallbackError> {
    let query = QueryValues::parse(raw.as_deref().unwrap_or_default());

    let captured = process_callback(&query).inspect_err(|e| {
        tracing::warn!(error = %e, "Rejected callback");
    })?;

    report(&mut std::io::stdout().lock(), &captured);
    tracing::debug!(values = captured.values().len(), "Authorization code captured");

    Ok(captured.into_first())
}

#![warn(missing_docs)]
//! # solprivacy-app
//!
//! ## Purpose
//! Orchestrates the report pipeline: fetch, contract validation, metric
//! interpretation, and report projection.
//!
//! ## Responsibilities
//! - Gate wallet addresses before any request leaves the client.
//! - Drive the session coordinator so only the newest submission's result is
//!   ever displayed.
//! - Aggregate subsystem failures into [`AppError`] with a single opaque
//!   user-facing notice for transport and service failures.
//!
//! ## Data flow
//! Address -> session ticket -> [`AnalysisClient`] fetch -> contract
//! parse/validate -> metric interpretation -> [`ReportView`] projection ->
//! session completion.
//!
//! ## Ownership and lifetimes
//! The pipeline passes owned snapshots between stages; the session holds the
//! only long-lived state and hands out immutable copies.
//!
//! ## Error model
//! Transport failures and service-reported failures surface to the user as
//! the same opaque analysis-failure notice. Contract violations carry the
//! offending field for diagnostics but render the same notice.

use solprivacy_analysis_contract::{
    AnalysisContractError, PrivacyAnalysis, parse_analysis_response,
};
use solprivacy_client::{AnalysisClient, ClientError};
use solprivacy_metrics::interpret_all;
use solprivacy_session::{AnalysisSession, CompletionOutcome};
use solprivacy_ui::{FAILURE_NOTICE, ReportView, project_report};
use thiserror::Error;

/// Build-time application version loaded from root `VERSION` file.
pub const APP_VERSION: &str = env!("SOLPRIVACY_VERSION");

/// Returns the app version sourced from root `VERSION`.
pub fn app_version() -> &'static str {
    APP_VERSION
}

/// Fetches and validates one analysis result.
///
/// # Errors
/// Returns [`AppError::Client`] for gate/transport/status failures and
/// [`AppError::Contract`] for envelope or invariant violations.
pub fn fetch_analysis(
    client: &AnalysisClient,
    address: &str,
) -> Result<PrivacyAnalysis, AppError> {
    let raw = client.fetch_raw(address)?;
    let analysis = parse_analysis_response(&raw)?;
    Ok(analysis)
}

/// Interprets and projects one validated result into a render-ready report.
pub fn build_report(wallet_address: &str, analysis: &PrivacyAnalysis) -> ReportView {
    let readings = interpret_all(analysis);
    project_report(wallet_address, analysis, &readings)
}

/// Runs one full submission through the session coordinator.
///
/// Returns `Ok(None)` when a newer submission superseded this one while it
/// was in flight; the stale result is discarded without touching displayed
/// state.
///
/// # Errors
/// Propagates fetch and contract errors after marking the session failed.
pub fn analyze_address(
    client: &AnalysisClient,
    session: &mut AnalysisSession,
    address: &str,
) -> Result<Option<ReportView>, AppError> {
    let address = solprivacy_client::validate_wallet_address(address)?;
    let ticket = session.begin(address.clone());
    tracing::info!(sequence = ticket.sequence(), "analysis request submitted");

    let analysis = match fetch_analysis(client, &address) {
        Ok(analysis) => analysis,
        Err(error) => {
            if session.fail(ticket) == CompletionOutcome::Stale {
                tracing::debug!(sequence = ticket.sequence(), "discarding superseded failure");
            }
            return Err(error);
        }
    };

    let report = build_report(&address, &analysis);
    match session.complete(ticket, analysis) {
        CompletionOutcome::Applied => Ok(Some(report)),
        CompletionOutcome::Stale => {
            tracing::debug!(sequence = ticket.sequence(), "discarding superseded result");
            Ok(None)
        }
    }
}

/// Returns the user-facing notice for a failed analysis.
///
/// Transport failures and service-reported failures are deliberately
/// indistinguishable here; contract violations share the same notice while
/// keeping the offending field available through the error itself.
pub fn user_notice(_error: &AppError) -> &'static str {
    FAILURE_NOTICE
}

/// App integration error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Address gate, endpoint policy, transport, or HTTP status failure.
    #[error("client error: {0}")]
    Client(#[from] ClientError),
    /// Envelope decode, service failure, or contract invariant violation.
    #[error("contract error: {0}")]
    Contract(#[from] AnalysisContractError),
}

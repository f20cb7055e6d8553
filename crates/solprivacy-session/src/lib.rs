#![warn(missing_docs)]
//! # solprivacy-session
//!
//! ## Purpose
//! Owns the per-report request lifecycle: which submission is current, what
//! the user last asked for, and which result is displayed.
//!
//! ## Responsibilities
//! - Hand out monotonically increasing request tickets.
//! - Enforce the newest-request-wins policy: completions carrying a stale
//!   ticket are reported as such and never touch displayed state.
//! - Expose immutable snapshots for display code; nothing mutates session
//!   state except the explicit transition methods.
//!
//! ## Data flow
//! User submission -> [`AnalysisSession::begin`] issues a [`RequestTicket`] ->
//! transport/parsing completes -> [`AnalysisSession::complete`] or
//! [`AnalysisSession::fail`] applies or discards the outcome ->
//! [`AnalysisSession::snapshot`] feeds report projection.
//!
//! ## Error model
//! Illegal outcomes are impossible by construction; stale completions are a
//! normal, observable result ([`CompletionOutcome::Stale`]), not an error.

use solprivacy_analysis_contract::PrivacyAnalysis;

/// Opaque handle for one submitted analysis request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    sequence: u64,
}

impl RequestTicket {
    /// Returns the monotonic sequence number backing this ticket.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }
}

/// Result of applying a completion to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// The completion belonged to the newest request and was applied.
    Applied,
    /// A newer request superseded this one; the result was discarded.
    Stale,
}

/// Immutable view of session state for display code.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    /// Whether a request is currently outstanding.
    pub loading: bool,
    /// Last submitted wallet address, when any.
    pub submitted_address: Option<String>,
    /// Currently displayed analysis result, when any.
    pub report: Option<PrivacyAnalysis>,
    /// Whether the newest request ended in failure.
    pub failed: bool,
}

/// Request coordinator with explicit newest-request-wins transitions.
#[derive(Debug, Default)]
pub struct AnalysisSession {
    next_sequence: u64,
    active_sequence: Option<u64>,
    submitted_address: Option<String>,
    report: Option<PrivacyAnalysis>,
    failed: bool,
}

impl AnalysisSession {
    /// Creates an empty session with no displayed report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new submission and returns its ticket.
    ///
    /// Any in-flight request is superseded immediately: its eventual
    /// completion will come back [`CompletionOutcome::Stale`].
    pub fn begin(&mut self, address: impl Into<String>) -> RequestTicket {
        self.next_sequence += 1;
        let sequence = self.next_sequence;
        self.active_sequence = Some(sequence);
        self.submitted_address = Some(address.into());
        self.failed = false;

        RequestTicket { sequence }
    }

    /// Applies a successful completion, replacing the displayed report
    /// wholesale when the ticket is still the newest.
    pub fn complete(
        &mut self,
        ticket: RequestTicket,
        analysis: PrivacyAnalysis,
    ) -> CompletionOutcome {
        if !self.is_newest(ticket) {
            return CompletionOutcome::Stale;
        }

        self.active_sequence = None;
        self.report = Some(analysis);
        self.failed = false;
        CompletionOutcome::Applied
    }

    /// Applies a failed completion when the ticket is still the newest.
    ///
    /// On applied failure, the prior report is discarded so the display never
    /// pairs an old result with a new address.
    pub fn fail(&mut self, ticket: RequestTicket) -> CompletionOutcome {
        if !self.is_newest(ticket) {
            return CompletionOutcome::Stale;
        }

        self.active_sequence = None;
        self.report = None;
        self.failed = true;
        CompletionOutcome::Applied
    }

    /// Returns an immutable snapshot for display code.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            loading: self.active_sequence.is_some(),
            submitted_address: self.submitted_address.clone(),
            report: self.report.clone(),
            failed: self.failed,
        }
    }

    fn is_newest(&self, ticket: RequestTicket) -> bool {
        self.active_sequence == Some(ticket.sequence)
    }
}

#![warn(missing_docs)]
//! # solprivacy-ui
//!
//! ## Purpose
//! Defines the display-facing report model for `solprivacy`.
//!
//! ## Responsibilities
//! - Project a validated analysis result and its metric readings into
//!   render-ready views: score gauge, metric cards, attack panels, and
//!   recommendation rows.
//! - Map risk levels and priorities to display tones.
//! - Clamp every rendered percentage to [0, 100] at the formatting boundary.
//!
//! ## Data flow
//! Session snapshot + metric readings -> [`project_report`] -> owned
//! [`ReportView`] consumed by whatever shell renders it.
//!
//! ## Ownership and lifetimes
//! Views own all their strings so renderers never borrow from session state.
//!
//! ## Error model
//! Projection is total. Out-of-range upstream percentages are clamped rather
//! than rejected; rejection already happened at the contract boundary.

use solprivacy_analysis_contract::{
    DustAttackMetrics, ExchangeFingerprintMetrics, ExchangeKind, PrivacyAnalysis, Priority,
    Recommendation, RiskLevel,
};
use solprivacy_metrics::MetricReading;

/// User-facing notice for any failed analysis, regardless of cause.
pub const FAILURE_NOTICE: &str =
    "Unable to analyze wallet. Please check the address and try again.";

/// Score color band for the composite gauge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    /// Score of 80 or above.
    Good,
    /// Score in [60, 80).
    Caution,
    /// Score below 60.
    Poor,
}

/// Display tone shared by risk badges and priority markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeTone {
    /// Reassuring / success styling.
    Positive,
    /// Caution styling.
    Warning,
    /// Destructive / alert styling.
    Critical,
}

/// Composite score gauge view.
#[derive(Debug, Clone, PartialEq)]
pub struct GaugeView {
    /// Composite privacy score in [0, 100].
    pub score: u8,
    /// Letter grade from the service.
    pub grade: String,
    /// Gauge color band derived from the score.
    pub band: ScoreBand,
    /// Filled fraction of the gauge arc, in [0, 1].
    pub arc_fraction: f64,
    /// Risk badge label, e.g. `MEDIUM RISK`.
    pub risk_label: String,
    /// Risk badge tone.
    pub risk_tone: BadgeTone,
}

/// One metric card ready for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricCardView {
    /// Metric display name.
    pub name: &'static str,
    /// Rendered display value.
    pub value_text: String,
    /// Progress indicator width, clamped to [0, 100].
    pub progress_percent: f64,
    /// Qualitative interpretation line.
    pub interpretation: &'static str,
    /// Explanatory tooltip.
    pub tooltip: &'static str,
}

/// Dust-attack panel view.
#[derive(Debug, Clone, PartialEq)]
pub enum DustPanelView {
    /// Dust activity detected; show the breakdown.
    Detected {
        /// Count of dust transactions received.
        transactions: u64,
        /// Unique sender count, or `N/A` when unresolved.
        unique_senders_text: String,
        /// Vulnerability as a whole-number percent string.
        vulnerability_text: String,
        /// Linking-risk badge label.
        risk_label: String,
        /// Linking-risk badge tone.
        tone: BadgeTone,
    },
    /// No dust activity; all-clear line with positive tone.
    Clear,
}

/// Exchange/KYC exposure panel view.
#[derive(Debug, Clone, PartialEq)]
pub struct ExchangePanelView {
    /// KYC exposure as a one-decimal percent string.
    pub kyc_percent_text: String,
    /// Traceability-risk badge label.
    pub risk_label: String,
    /// Traceability-risk badge tone.
    pub tone: BadgeTone,
    /// Count of detected centralized exchanges.
    pub cex_count: usize,
    /// Count of detected decentralized exchanges.
    pub dex_count: usize,
    /// Detected exchange names, service order preserved.
    pub exchange_names: Vec<String>,
}

/// One recommendation row.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationView {
    /// What to do.
    pub action: String,
    /// Why it helps.
    pub impact: String,
    /// Priority badge label.
    pub priority_label: &'static str,
    /// Priority badge tone.
    pub tone: BadgeTone,
}

/// Complete render-ready report.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportView {
    /// Wallet address the report describes.
    pub wallet_address: String,
    /// Composite score gauge.
    pub gauge: GaugeView,
    /// Eleven metric cards in display order.
    pub metrics: Vec<MetricCardView>,
    /// Dust-attack panel.
    pub dust: DustPanelView,
    /// Exchange-exposure panel.
    pub exchange: ExchangePanelView,
    /// Recommendation rows, service order preserved.
    pub recommendations: Vec<RecommendationView>,
}

/// Clamps a display percentage to [0, 100]; NaN renders as empty (0).
pub fn clamp_percentage(percentage: f64) -> f64 {
    if percentage.is_nan() {
        return 0.0;
    }
    percentage.clamp(0.0, 100.0)
}

/// Maps a composite score to its gauge color band.
pub fn score_band(score: u8) -> ScoreBand {
    if score >= 80 {
        ScoreBand::Good
    } else if score >= 60 {
        ScoreBand::Caution
    } else {
        ScoreBand::Poor
    }
}

/// Maps a risk level to its badge tone.
pub fn risk_tone(level: RiskLevel) -> BadgeTone {
    match level {
        RiskLevel::Minimal | RiskLevel::Low => BadgeTone::Positive,
        RiskLevel::Medium => BadgeTone::Warning,
        RiskLevel::High | RiskLevel::Critical => BadgeTone::Critical,
    }
}

/// Returns the display label for a risk level.
pub fn risk_label(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::Minimal => "MINIMAL",
        RiskLevel::Low => "LOW",
        RiskLevel::Medium => "MEDIUM",
        RiskLevel::High => "HIGH",
        RiskLevel::Critical => "CRITICAL",
    }
}

/// Maps a recommendation priority to its badge tone.
pub fn priority_tone(priority: Priority) -> BadgeTone {
    match priority {
        Priority::High => BadgeTone::Critical,
        Priority::Medium => BadgeTone::Warning,
        Priority::Low => BadgeTone::Positive,
    }
}

fn priority_label(priority: Priority) -> &'static str {
    match priority {
        Priority::High => "HIGH",
        Priority::Medium => "MEDIUM",
        Priority::Low => "LOW",
    }
}

/// Builds the gauge view for one analysis result.
pub fn gauge_view(analysis: &PrivacyAnalysis) -> GaugeView {
    let score = analysis.advanced_privacy_score;
    GaugeView {
        score,
        grade: analysis.grade.clone(),
        band: score_band(score),
        arc_fraction: f64::from(score) / 100.0,
        risk_label: format!("{} RISK", risk_label(analysis.risk_level)),
        risk_tone: risk_tone(analysis.risk_level),
    }
}

/// Builds metric card views from interpreted readings.
pub fn metric_cards(readings: &[MetricReading]) -> Vec<MetricCardView> {
    readings
        .iter()
        .map(|reading| MetricCardView {
            name: reading.key.display_name(),
            value_text: reading.value.render(),
            progress_percent: clamp_percentage(reading.percentage),
            interpretation: reading.interpretation,
            tooltip: reading.key.tooltip(),
        })
        .collect()
}

/// Builds the dust-attack panel view.
pub fn dust_panel(dust: &DustAttackMetrics) -> DustPanelView {
    if !dust.dust_attack_detected {
        return DustPanelView::Clear;
    }

    DustPanelView::Detected {
        transactions: dust.dust_transactions_received,
        unique_senders_text: dust
            .unique_dust_senders
            .map(|count| count.to_string())
            .unwrap_or_else(|| "N/A".to_string()),
        vulnerability_text: format!(
            "{:.0}%",
            clamp_percentage(dust.dust_vulnerability * 100.0)
        ),
        risk_label: risk_label(dust.linking_risk).to_string(),
        tone: risk_tone(dust.linking_risk),
    }
}

/// Builds the exchange-exposure panel view.
pub fn exchange_panel(fingerprint: &ExchangeFingerprintMetrics) -> ExchangePanelView {
    let cex_count = fingerprint
        .detected_exchanges
        .iter()
        .filter(|exchange| exchange.kind == ExchangeKind::Cex)
        .count();
    let dex_count = fingerprint
        .detected_exchanges
        .iter()
        .filter(|exchange| exchange.kind == ExchangeKind::Dex)
        .count();

    ExchangePanelView {
        kyc_percent_text: format!(
            "{:.1}%",
            clamp_percentage(fingerprint.kyc_exposure * 100.0)
        ),
        risk_label: risk_label(fingerprint.traceability_risk).to_string(),
        tone: risk_tone(fingerprint.traceability_risk),
        cex_count,
        dex_count,
        exchange_names: fingerprint
            .detected_exchanges
            .iter()
            .map(|exchange| exchange.name.clone())
            .collect(),
    }
}

/// Builds recommendation rows, preserving service order.
pub fn recommendation_views(recommendations: &[Recommendation]) -> Vec<RecommendationView> {
    recommendations
        .iter()
        .map(|recommendation| RecommendationView {
            action: recommendation.action.clone(),
            impact: recommendation.impact.clone(),
            priority_label: priority_label(recommendation.priority),
            tone: priority_tone(recommendation.priority),
        })
        .collect()
}

/// Projects one analysis result into a complete render-ready report.
pub fn project_report(
    wallet_address: impl Into<String>,
    analysis: &PrivacyAnalysis,
    readings: &[MetricReading],
) -> ReportView {
    ReportView {
        wallet_address: wallet_address.into(),
        gauge: gauge_view(analysis),
        metrics: metric_cards(readings),
        dust: dust_panel(&analysis.dust_attack),
        exchange: exchange_panel(&analysis.exchange_fingerprint),
        recommendations: recommendation_views(&analysis.recommendations),
    }
}

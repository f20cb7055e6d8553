#![warn(missing_docs)]
//! # solprivacy-analysis-contract
//!
//! ## Purpose
//! Defines the analysis service response schema and the boundary validation
//! applied before any result reaches interpretation or display code.
//!
//! ## Responsibilities
//! - Parse the `{success, data, error}` envelope returned by
//!   `/api/v3/analyze/{walletAddress}`.
//! - Represent all eleven metric families as owned, typed sub-results.
//! - Enforce contract invariants (fraction ranges, score ranges, closed enum
//!   sets) and fail with an error naming the offending wire field.
//!
//! ## Data flow
//! Raw JSON body -> [`parse_analysis_response`] -> validated
//! [`PrivacyAnalysis`] -> metric interpretation and report projection.
//!
//! ## Ownership and lifetimes
//! Parsed values are owned structs so results outlive transient network
//! buffers. A result is immutable once parsed; a new submission replaces it
//! wholesale.
//!
//! ## Error model
//! Invalid JSON, service-reported failure, and out-of-contract field values
//! return [`AnalysisContractError`] variants. Nothing downstream ever sees a
//! NaN or out-of-range fraction.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Ordered five-point risk scale used by the composite result and both
/// attack-detection sub-results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    /// Negligible identified risk.
    Minimal,
    /// Low risk.
    Low,
    /// Medium risk.
    Medium,
    /// High risk.
    High,
    /// Critical risk.
    Critical,
}

/// Recommendation priority, ordered most urgent first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    /// Act on this first.
    High,
    /// Worth doing soon.
    Medium,
    /// Nice to have.
    Low,
}

/// Exchange venue classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExchangeKind {
    /// Centralized, KYC-gated exchange.
    #[serde(rename = "CEX")]
    Cex,
    /// Decentralized exchange.
    #[serde(rename = "DEX")]
    Dex,
}

/// Shannon-entropy sub-result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntropyMetrics {
    /// Transaction-pattern entropy as a fraction in [0, 1].
    pub total_entropy: f64,
}

/// Mutual-information sub-result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MutualInformationMetrics {
    /// Correlation with known entities as a fraction in [0, 1].
    pub total_mutual_information: f64,
}

/// Differential-privacy sub-result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DifferentialPrivacyMetrics {
    /// Epsilon leakage parameter; lower is stronger. Finite, non-negative.
    pub epsilon: f64,
}

/// k-anonymity sub-result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KAnonymityMetrics {
    /// Size of the indistinguishability set.
    pub k_value: u64,
    /// Service-computed display score in [0, 100].
    pub k_anonymity_score: f64,
}

/// Address-clustering sub-result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusteringMetrics {
    /// Heuristic clustering vulnerability as a fraction in [0, 1].
    pub clustering_vulnerability: f64,
}

/// Temporal-pattern sub-result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemporalMetrics {
    /// Transaction-timing autocorrelation as a fraction in [0, 1].
    pub autocorrelation: f64,
}

/// Network-centrality sub-result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CentralityMetrics {
    /// PageRank-based visibility as a fraction in [0, 1].
    pub network_visibility: f64,
}

/// Mixer-detection sub-result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MixerMetrics {
    /// Probability of mixer interaction as a fraction in [0, 1].
    pub mixer_usage_probability: f64,
}

/// Cross-chain bridge sub-result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossChainMetrics {
    /// Whether bridge usage was detected.
    pub bridge_usage_detected: bool,
    /// Names of detected bridges.
    #[serde(default)]
    pub detected_bridges: Vec<String>,
}

/// Dust-attack sub-result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DustAttackMetrics {
    /// Whether dust-attack activity was detected.
    pub dust_attack_detected: bool,
    /// Vulnerability to dust linking as a fraction in [0, 1].
    pub dust_vulnerability: f64,
    /// Count of dust transactions received.
    pub dust_transactions_received: u64,
    /// Count of distinct dust senders, when the service resolved it.
    #[serde(default)]
    pub unique_dust_senders: Option<u64>,
    /// Risk that dust outputs link this wallet to other activity.
    pub linking_risk: RiskLevel,
}

/// One exchange the service fingerprinted against this wallet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedExchange {
    /// Exchange display name.
    pub name: String,
    /// Venue classification.
    #[serde(rename = "type")]
    pub kind: ExchangeKind,
}

/// Exchange/KYC fingerprint sub-result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeFingerprintMetrics {
    /// Fraction of activity traceable to KYC counterparties, in [0, 1].
    pub kyc_exposure: f64,
    /// Exchanges detected in the wallet's history.
    #[serde(default)]
    pub detected_exchanges: Vec<DetectedExchange>,
    /// Overall traceability risk.
    pub traceability_risk: RiskLevel,
}

/// One remediation recommendation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    /// What the wallet owner should do.
    pub action: String,
    /// Expected privacy impact of doing it.
    pub impact: String,
    /// Urgency bucket.
    pub priority: Priority,
}

/// Complete analysis result for one wallet, immutable once received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrivacyAnalysis {
    /// Composite privacy score in [0, 100].
    pub advanced_privacy_score: u8,
    /// Letter grade assigned by the service.
    pub grade: String,
    /// Overall risk classification.
    pub risk_level: RiskLevel,
    /// Shannon-entropy sub-result.
    pub entropy: EntropyMetrics,
    /// Mutual-information sub-result.
    pub mutual_information: MutualInformationMetrics,
    /// Differential-privacy sub-result.
    pub differential_privacy: DifferentialPrivacyMetrics,
    /// k-anonymity sub-result.
    pub k_anonymity: KAnonymityMetrics,
    /// Clustering sub-result.
    pub advanced_clustering: ClusteringMetrics,
    /// Temporal-pattern sub-result.
    pub temporal_analysis: TemporalMetrics,
    /// Network-centrality sub-result.
    pub network_centrality: CentralityMetrics,
    /// Mixer-detection sub-result.
    pub mixer_detection: MixerMetrics,
    /// Cross-chain bridge sub-result.
    pub cross_chain: CrossChainMetrics,
    /// Dust-attack sub-result.
    pub dust_attack: DustAttackMetrics,
    /// Exchange/KYC fingerprint sub-result.
    pub exchange_fingerprint: ExchangeFingerprintMetrics,
    /// Ranked remediation recommendations, service order preserved.
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
}

/// Wire envelope wrapping one analysis result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisEnvelope {
    /// Whether the service completed the analysis.
    pub success: bool,
    /// The analysis result, present when `success` is true.
    #[serde(default)]
    pub data: Option<PrivacyAnalysis>,
    /// Service-reported failure detail, present when `success` is false.
    #[serde(default)]
    pub error: Option<String>,
}

/// Parses a raw envelope body into a validated analysis result.
///
/// # Errors
/// Returns [`AnalysisContractError::Decode`] for invalid JSON.
/// Returns [`AnalysisContractError::ServiceFailure`] when the envelope
/// reports `success: false`.
/// Returns [`AnalysisContractError::InvalidMetricData`] when a field violates
/// the contract invariants in the error's `field` path.
pub fn parse_analysis_response(raw: &str) -> Result<PrivacyAnalysis, AnalysisContractError> {
    let envelope: AnalysisEnvelope =
        serde_json::from_str(raw).map_err(AnalysisContractError::Decode)?;

    if !envelope.success {
        return Err(AnalysisContractError::ServiceFailure(
            envelope
                .error
                .unwrap_or_else(|| "service reported failure without detail".to_string()),
        ));
    }

    let analysis = envelope.data.ok_or_else(|| AnalysisContractError::InvalidMetricData {
        field: "data".to_string(),
        reason: "successful envelope is missing the analysis payload".to_string(),
    })?;

    validate_analysis(&analysis)?;
    Ok(analysis)
}

/// Validates contract invariants on an already-decoded analysis result.
///
/// # Errors
/// Returns [`AnalysisContractError::InvalidMetricData`] naming the first
/// offending wire field.
pub fn validate_analysis(analysis: &PrivacyAnalysis) -> Result<(), AnalysisContractError> {
    check_score("advancedPrivacyScore", f64::from(analysis.advanced_privacy_score))?;
    if analysis.grade.trim().is_empty() {
        return Err(invalid("grade", "grade is empty"));
    }

    check_fraction("entropy.totalEntropy", analysis.entropy.total_entropy)?;
    check_fraction(
        "mutualInformation.totalMutualInformation",
        analysis.mutual_information.total_mutual_information,
    )?;
    check_epsilon("differentialPrivacy.epsilon", analysis.differential_privacy.epsilon)?;
    check_score("kAnonymity.kAnonymityScore", analysis.k_anonymity.k_anonymity_score)?;
    check_fraction(
        "advancedClustering.clusteringVulnerability",
        analysis.advanced_clustering.clustering_vulnerability,
    )?;
    check_fraction(
        "temporalAnalysis.autocorrelation",
        analysis.temporal_analysis.autocorrelation,
    )?;
    check_fraction(
        "networkCentrality.networkVisibility",
        analysis.network_centrality.network_visibility,
    )?;
    check_fraction(
        "mixerDetection.mixerUsageProbability",
        analysis.mixer_detection.mixer_usage_probability,
    )?;
    check_fraction("dustAttack.dustVulnerability", analysis.dust_attack.dust_vulnerability)?;
    check_fraction(
        "exchangeFingerprint.kycExposure",
        analysis.exchange_fingerprint.kyc_exposure,
    )?;

    for (index, exchange) in analysis.exchange_fingerprint.detected_exchanges.iter().enumerate() {
        if exchange.name.trim().is_empty() {
            return Err(invalid(
                &format!("exchangeFingerprint.detectedExchanges[{index}].name"),
                "exchange name is empty",
            ));
        }
    }

    Ok(())
}

fn check_fraction(field: &str, value: f64) -> Result<(), AnalysisContractError> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(invalid(field, &format!("expected fraction in [0, 1], got {value}")));
    }
    Ok(())
}

fn check_score(field: &str, value: f64) -> Result<(), AnalysisContractError> {
    if !value.is_finite() || !(0.0..=100.0).contains(&value) {
        return Err(invalid(field, &format!("expected score in [0, 100], got {value}")));
    }
    Ok(())
}

fn check_epsilon(field: &str, value: f64) -> Result<(), AnalysisContractError> {
    if !value.is_finite() || value < 0.0 {
        return Err(invalid(field, &format!("expected finite non-negative epsilon, got {value}")));
    }
    Ok(())
}

fn invalid(field: &str, reason: &str) -> AnalysisContractError {
    AnalysisContractError::InvalidMetricData {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

/// Analysis contract errors.
#[derive(Debug, Error)]
pub enum AnalysisContractError {
    /// JSON decode failure.
    #[error("analysis decode failure: {0}")]
    Decode(#[from] serde_json::Error),
    /// Service completed the request but reported an application failure.
    #[error("analysis service failure: {0}")]
    ServiceFailure(String),
    /// Decoded payload violates a contract invariant.
    #[error("invalid metric data in `{field}`: {reason}")]
    InvalidMetricData {
        /// Wire-format path of the offending field.
        field: String,
        /// Why the value was rejected.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    //! Unit tests for envelope parsing and invariant validation.

    use super::*;

    fn sample_analysis() -> PrivacyAnalysis {
        PrivacyAnalysis {
            advanced_privacy_score: 55,
            grade: "D".to_string(),
            risk_level: RiskLevel::Medium,
            entropy: EntropyMetrics { total_entropy: 0.65 },
            mutual_information: MutualInformationMetrics {
                total_mutual_information: 0.3,
            },
            differential_privacy: DifferentialPrivacyMetrics { epsilon: 2.3 },
            k_anonymity: KAnonymityMetrics {
                k_value: 15,
                k_anonymity_score: 45.0,
            },
            advanced_clustering: ClusteringMetrics {
                clustering_vulnerability: 0.4,
            },
            temporal_analysis: TemporalMetrics { autocorrelation: 0.2 },
            network_centrality: CentralityMetrics {
                network_visibility: 0.35,
            },
            mixer_detection: MixerMetrics {
                mixer_usage_probability: 0.1,
            },
            cross_chain: CrossChainMetrics {
                bridge_usage_detected: false,
                detected_bridges: vec![],
            },
            dust_attack: DustAttackMetrics {
                dust_attack_detected: true,
                dust_vulnerability: 0.7,
                dust_transactions_received: 12,
                unique_dust_senders: Some(5),
                linking_risk: RiskLevel::Critical,
            },
            exchange_fingerprint: ExchangeFingerprintMetrics {
                kyc_exposure: 0.08,
                detected_exchanges: vec![DetectedExchange {
                    name: "Raydium".to_string(),
                    kind: ExchangeKind::Dex,
                }],
                traceability_risk: RiskLevel::Low,
            },
            recommendations: vec![Recommendation {
                action: "Avoid reusing addresses for receiving funds".to_string(),
                impact: "Reduces clustering vulnerability".to_string(),
                priority: Priority::High,
            }],
        }
    }

    #[test]
    fn accepts_in_contract_analysis() {
        validate_analysis(&sample_analysis()).expect("sample should validate");
    }

    #[test]
    fn rejects_out_of_range_fraction_naming_field() {
        let mut analysis = sample_analysis();
        analysis.mixer_detection.mixer_usage_probability = 1.2;

        let error = validate_analysis(&analysis).expect_err("fraction above 1 should fail");
        match error {
            AnalysisContractError::InvalidMetricData { field, .. } => {
                assert_eq!(field, "mixerDetection.mixerUsageProbability");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_nan_epsilon() {
        let mut analysis = sample_analysis();
        analysis.differential_privacy.epsilon = f64::NAN;

        assert!(validate_analysis(&analysis).is_err());
    }

    #[test]
    fn service_failure_is_opaque_to_parsing() {
        let raw = r#"{"success":false,"error":"wallet not found"}"#;
        let error = parse_analysis_response(raw).expect_err("failure envelope should error");
        assert!(matches!(error, AnalysisContractError::ServiceFailure(_)));
    }

    #[test]
    fn successful_envelope_without_data_violates_contract() {
        let raw = r#"{"success":true}"#;
        let error = parse_analysis_response(raw).expect_err("missing data should error");
        match error {
            AnalysisContractError::InvalidMetricData { field, .. } => assert_eq!(field, "data"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn risk_levels_are_ordered() {
        assert!(RiskLevel::Minimal < RiskLevel::Low);
        assert!(RiskLevel::High < RiskLevel::Critical);
    }

    #[test]
    fn wire_names_round_trip_camel_case() {
        let raw = serde_json::to_value(sample_analysis()).expect("serialize should work");
        assert!(raw.get("advancedPrivacyScore").is_some());
        assert_eq!(raw["dustAttack"]["linkingRisk"], "CRITICAL");
        assert_eq!(raw["exchangeFingerprint"]["detectedExchanges"][0]["type"], "DEX");
    }
}

#![warn(missing_docs)]
//! # solprivacy-metrics
//!
//! ## Purpose
//! Implements the metric interpretation table: the pure mapping from one
//! validated analysis result to eleven display readings.
//!
//! ## Responsibilities
//! - Derive a display value, a display percentage, and a short qualitative
//!   interpretation for each of the eleven fixed metrics.
//! - Carry the stable display name and tooltip text per metric.
//!
//! ## Data flow
//! Validated [`PrivacyAnalysis`] -> [`interpret_all`] -> [`MetricReading`]
//! values consumed by report projection.
//!
//! ## Ownership and lifetimes
//! Readings are small owned values; interpretation strings are `'static`
//! because the threshold table is fixed.
//!
//! ## Error model
//! None. Inputs are validated at the contract boundary, and every threshold
//! comparison is total, so interpretation has no failure outcomes.
//!
//! ## Notes
//! Percentages are deliberately not clamped here (the only floor is the
//! documented `max(0, …)` on the differential-privacy formula). The display
//! layer clamps at the formatting boundary.

use solprivacy_analysis_contract::PrivacyAnalysis;

/// The eleven fixed metric keys, in report display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricKey {
    /// Shannon entropy of transaction patterns.
    Entropy,
    /// Mutual information against known entities.
    MutualInformation,
    /// Differential-privacy epsilon.
    DifferentialPrivacy,
    /// k-anonymity set size.
    KAnonymity,
    /// Clustering vulnerability.
    Clustering,
    /// Temporal autocorrelation.
    Temporal,
    /// Network centrality / visibility.
    Centrality,
    /// Mixer usage probability.
    Mixer,
    /// Cross-chain bridge linkability.
    CrossChain,
    /// Dust-attack detection.
    DustAttack,
    /// Exchange/KYC fingerprint exposure.
    ExchangeFingerprint,
}

impl MetricKey {
    /// All metric keys in report display order.
    pub const ALL: [MetricKey; 11] = [
        MetricKey::Entropy,
        MetricKey::MutualInformation,
        MetricKey::DifferentialPrivacy,
        MetricKey::KAnonymity,
        MetricKey::Clustering,
        MetricKey::Temporal,
        MetricKey::Centrality,
        MetricKey::Mixer,
        MetricKey::CrossChain,
        MetricKey::DustAttack,
        MetricKey::ExchangeFingerprint,
    ];

    /// Stable display name for report headers.
    pub fn display_name(self) -> &'static str {
        match self {
            MetricKey::Entropy => "Shannon Entropy",
            MetricKey::MutualInformation => "Mutual Information",
            MetricKey::DifferentialPrivacy => "Differential Privacy",
            MetricKey::KAnonymity => "k-Anonymity",
            MetricKey::Clustering => "Clustering Vulnerability",
            MetricKey::Temporal => "Temporal Patterns",
            MetricKey::Centrality => "Network Centrality",
            MetricKey::Mixer => "Mixer Detection",
            MetricKey::CrossChain => "Cross-chain Linkability",
            MetricKey::DustAttack => "Dust Attack Detection",
            MetricKey::ExchangeFingerprint => "Exchange/KYC Exposure",
        }
    }

    /// Explanatory tooltip shown alongside the metric.
    pub fn tooltip(self) -> &'static str {
        match self {
            MetricKey::Entropy => {
                "Measures the randomness and unpredictability of your transaction patterns. \
                 Higher entropy means better privacy."
            }
            MetricKey::MutualInformation => {
                "Indicates how much information about your wallet can be inferred from public \
                 data. Lower is better."
            }
            MetricKey::DifferentialPrivacy => {
                "Epsilon (\u{3b5}) value indicating the level of privacy protection. Lower \
                 epsilon means stronger privacy guarantees."
            }
            MetricKey::KAnonymity => {
                "Shows how many similar wallets exist. Higher k-value means you blend in \
                 better with the crowd."
            }
            MetricKey::Clustering => {
                "Measures how easily your wallet can be grouped with related addresses \
                 through heuristic analysis."
            }
            MetricKey::Temporal => {
                "Analyzes if your transactions follow predictable time patterns that could \
                 be used to identify you."
            }
            MetricKey::Centrality => {
                "PageRank-based measure of how central and visible your wallet is in the \
                 transaction network."
            }
            MetricKey::Mixer => {
                "Probability that this wallet has interacted with mixing services or \
                 privacy protocols."
            }
            MetricKey::CrossChain => {
                "Detects if bridge usage could link this wallet to addresses on other chains."
            }
            MetricKey::DustAttack => {
                "Identifies if small \"dust\" transactions have been sent to track your \
                 wallet activity."
            }
            MetricKey::ExchangeFingerprint => {
                "Percentage of transactions that can be linked to KYC-required exchanges."
            }
        }
    }
}

/// Display value derived for one metric.
#[derive(Debug, Clone, PartialEq)]
pub enum MetricValue {
    /// Fractional value rendered with two decimals.
    Decimal(f64),
    /// Whole-number value rendered as-is.
    Integer(u64),
    /// Pre-formatted label rendered verbatim.
    Label(String),
}

impl MetricValue {
    /// Renders the value the way the report displays it.
    pub fn render(&self) -> String {
        match self {
            MetricValue::Decimal(value) => format!("{value:.2}"),
            MetricValue::Integer(value) => value.to_string(),
            MetricValue::Label(text) => text.clone(),
        }
    }
}

/// One interpreted metric: display value, raw percentage, interpretation.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricReading {
    /// Which metric this reading describes.
    pub key: MetricKey,
    /// Display value for the metric card.
    pub value: MetricValue,
    /// Display percentage. Not clamped; see module notes.
    pub percentage: f64,
    /// Short qualitative interpretation from the fixed threshold table.
    pub interpretation: &'static str,
}

/// Interprets every metric of one analysis result, in display order.
pub fn interpret_all(analysis: &PrivacyAnalysis) -> Vec<MetricReading> {
    MetricKey::ALL
        .iter()
        .map(|key| interpret_metric(*key, analysis))
        .collect()
}

/// Interprets a single metric of one analysis result.
pub fn interpret_metric(key: MetricKey, analysis: &PrivacyAnalysis) -> MetricReading {
    match key {
        MetricKey::Entropy => {
            let value = analysis.entropy.total_entropy;
            reading(key, MetricValue::Decimal(value), value * 100.0, interpret_entropy(value))
        }
        MetricKey::MutualInformation => {
            let value = analysis.mutual_information.total_mutual_information;
            reading(
                key,
                MetricValue::Decimal(value),
                (1.0 - value) * 100.0,
                interpret_mutual_information(value),
            )
        }
        MetricKey::DifferentialPrivacy => {
            let epsilon = analysis.differential_privacy.epsilon;
            reading(
                key,
                MetricValue::Label(format!("\u{3b5} = {epsilon:.2}")),
                (100.0 - epsilon * 10.0).max(0.0),
                interpret_epsilon(epsilon),
            )
        }
        MetricKey::KAnonymity => {
            let k_value = analysis.k_anonymity.k_value;
            reading(
                key,
                MetricValue::Integer(k_value),
                analysis.k_anonymity.k_anonymity_score,
                interpret_k_anonymity(k_value),
            )
        }
        MetricKey::Clustering => {
            let value = analysis.advanced_clustering.clustering_vulnerability;
            reading(
                key,
                MetricValue::Decimal(value),
                (1.0 - value) * 100.0,
                interpret_clustering(value),
            )
        }
        MetricKey::Temporal => {
            let value = analysis.temporal_analysis.autocorrelation;
            reading(
                key,
                MetricValue::Decimal(value),
                (1.0 - value) * 100.0,
                interpret_temporal(value),
            )
        }
        MetricKey::Centrality => {
            let value = analysis.network_centrality.network_visibility;
            reading(
                key,
                MetricValue::Decimal(value),
                (1.0 - value) * 100.0,
                interpret_centrality(value),
            )
        }
        MetricKey::Mixer => {
            let value = analysis.mixer_detection.mixer_usage_probability;
            reading(key, MetricValue::Decimal(value), value * 100.0, interpret_mixer(value))
        }
        MetricKey::CrossChain => {
            let detected = analysis.cross_chain.bridge_usage_detected;
            reading(
                key,
                MetricValue::Label(if detected { "Detected" } else { "None" }.to_string()),
                if detected { 30.0 } else { 100.0 },
                if detected {
                    "Bridge activity may link identities"
                } else {
                    "No cross-chain bridges detected"
                },
            )
        }
        MetricKey::DustAttack => {
            let detected = analysis.dust_attack.dust_attack_detected;
            let percentage = if detected {
                (1.0 - analysis.dust_attack.dust_vulnerability) * 100.0
            } else {
                100.0
            };
            reading(
                key,
                MetricValue::Label(if detected { "Detected" } else { "Clear" }.to_string()),
                percentage,
                if detected {
                    "Dust attack activity found"
                } else {
                    "No dust attacks detected"
                },
            )
        }
        MetricKey::ExchangeFingerprint => {
            let exposure = analysis.exchange_fingerprint.kyc_exposure;
            let displayed_percent = (exposure * 1000.0).round() / 10.0;
            reading(
                key,
                MetricValue::Label(format!("{displayed_percent:.1}%")),
                (1.0 - exposure) * 100.0,
                interpret_kyc_percent(displayed_percent),
            )
        }
    }
}

fn reading(
    key: MetricKey,
    value: MetricValue,
    percentage: f64,
    interpretation: &'static str,
) -> MetricReading {
    MetricReading {
        key,
        value,
        percentage,
        interpretation,
    }
}

fn interpret_entropy(value: f64) -> &'static str {
    if value > 0.7 {
        "High randomness, good privacy"
    } else if value > 0.4 {
        "Moderate patterns detected"
    } else {
        "Low entropy, predictable behavior"
    }
}

fn interpret_mutual_information(value: f64) -> &'static str {
    if value < 0.3 {
        "Low correlation with known entities"
    } else if value < 0.6 {
        "Some correlations found"
    } else {
        "High correlation risk"
    }
}

// Threshold applies to the two-decimal displayed epsilon, so a value that
// renders as "1.00" reads as moderate, not strong.
fn interpret_epsilon(epsilon: f64) -> &'static str {
    let displayed = (epsilon * 100.0).round() / 100.0;
    if displayed < 1.0 {
        "Strong privacy guarantees"
    } else if displayed < 3.0 {
        "Moderate privacy level"
    } else {
        "Weak differential privacy"
    }
}

fn interpret_k_anonymity(k_value: u64) -> &'static str {
    if k_value >= 50 {
        "Blends well with crowd"
    } else if k_value >= 20 {
        "Moderate anonymity set"
    } else {
        "Low k-value, identifiable"
    }
}

fn interpret_clustering(value: f64) -> &'static str {
    if value < 0.3 {
        "Hard to cluster"
    } else if value < 0.6 {
        "Some clustering patterns"
    } else {
        "Highly clusterable"
    }
}

fn interpret_temporal(value: f64) -> &'static str {
    if value < 0.2 {
        "Random timing patterns"
    } else if value < 0.5 {
        "Some time-based patterns"
    } else {
        "Predictable timing"
    }
}

fn interpret_centrality(value: f64) -> &'static str {
    if value < 0.2 {
        "Low network visibility"
    } else if value < 0.5 {
        "Moderate visibility"
    } else {
        "High network prominence"
    }
}

fn interpret_mixer(value: f64) -> &'static str {
    if value > 0.7 {
        "Likely mixer usage detected"
    } else if value > 0.3 {
        "Possible mixing activity"
    } else {
        "No mixer patterns detected"
    }
}

fn interpret_kyc_percent(displayed_percent: f64) -> &'static str {
    if displayed_percent < 10.0 {
        "Minimal KYC exposure"
    } else if displayed_percent < 30.0 {
        "Some exchange activity"
    } else {
        "High exchange exposure"
    }
}

#[cfg(test)]
mod tests {
    //! Boundary tests for the fixed threshold table.

    use solprivacy_analysis_contract::{
        CentralityMetrics, ClusteringMetrics, CrossChainMetrics, DifferentialPrivacyMetrics,
        DustAttackMetrics, EntropyMetrics, ExchangeFingerprintMetrics, KAnonymityMetrics,
        MixerMetrics, MutualInformationMetrics, PrivacyAnalysis, RiskLevel, TemporalMetrics,
    };

    use super::*;

    fn analysis() -> PrivacyAnalysis {
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
                dust_attack_detected: false,
                dust_vulnerability: 0.7,
                dust_transactions_received: 0,
                unique_dust_senders: None,
                linking_risk: RiskLevel::Minimal,
            },
            exchange_fingerprint: ExchangeFingerprintMetrics {
                kyc_exposure: 0.08,
                detected_exchanges: vec![],
                traceability_risk: RiskLevel::Low,
            },
            recommendations: vec![],
        }
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn interpretation_is_deterministic() {
        let input = analysis();
        assert_eq!(interpret_all(&input), interpret_all(&input));
    }

    #[test]
    fn entropy_boundary_falls_to_moderate() {
        let mut input = analysis();
        input.entropy.total_entropy = 0.7;
        let reading = interpret_metric(MetricKey::Entropy, &input);
        assert_eq!(reading.interpretation, "Moderate patterns detected");

        input.entropy.total_entropy = 0.70001;
        let reading = interpret_metric(MetricKey::Entropy, &input);
        assert_eq!(reading.interpretation, "High randomness, good privacy");
        assert_close(reading.percentage, 70.001);
    }

    #[test]
    fn mixer_boundary_falls_to_no_patterns() {
        let mut input = analysis();
        input.mixer_detection.mixer_usage_probability = 0.3;
        let reading = interpret_metric(MetricKey::Mixer, &input);
        assert_eq!(reading.interpretation, "No mixer patterns detected");

        input.mixer_detection.mixer_usage_probability = 0.30001;
        let reading = interpret_metric(MetricKey::Mixer, &input);
        assert_eq!(reading.interpretation, "Possible mixing activity");
    }

    #[test]
    fn epsilon_just_under_one_is_strong() {
        let mut input = analysis();
        input.differential_privacy.epsilon = 0.99;
        let reading = interpret_metric(MetricKey::DifferentialPrivacy, &input);
        assert_eq!(reading.value.render(), "\u{3b5} = 0.99");
        assert_eq!(reading.interpretation, "Strong privacy guarantees");
        assert_close(reading.percentage, 90.1);
    }

    #[test]
    fn epsilon_at_three_is_weak() {
        let mut input = analysis();
        input.differential_privacy.epsilon = 3.0;
        let reading = interpret_metric(MetricKey::DifferentialPrivacy, &input);
        assert_eq!(reading.interpretation, "Weak differential privacy");
        assert_close(reading.percentage, 70.0);
    }

    #[test]
    fn large_epsilon_percentage_floors_at_zero() {
        let mut input = analysis();
        input.differential_privacy.epsilon = 14.5;
        let reading = interpret_metric(MetricKey::DifferentialPrivacy, &input);
        assert_close(reading.percentage, 0.0);
    }

    #[test]
    fn k_anonymity_uses_inclusive_thresholds_and_score_field() {
        let mut input = analysis();
        input.k_anonymity.k_value = 50;
        input.k_anonymity.k_anonymity_score = 88.0;
        let reading = interpret_metric(MetricKey::KAnonymity, &input);
        assert_eq!(reading.value.render(), "50");
        assert_eq!(reading.interpretation, "Blends well with crowd");
        assert_close(reading.percentage, 88.0);

        input.k_anonymity.k_value = 20;
        let reading = interpret_metric(MetricKey::KAnonymity, &input);
        assert_eq!(reading.interpretation, "Moderate anonymity set");

        input.k_anonymity.k_value = 19;
        let reading = interpret_metric(MetricKey::KAnonymity, &input);
        assert_eq!(reading.interpretation, "Low k-value, identifiable");
    }

    #[test]
    fn clear_dust_result_ignores_vulnerability() {
        let mut input = analysis();
        input.dust_attack.dust_attack_detected = false;
        input.dust_attack.dust_vulnerability = 0.95;
        let reading = interpret_metric(MetricKey::DustAttack, &input);
        assert_eq!(reading.value.render(), "Clear");
        assert_close(reading.percentage, 100.0);
        assert_eq!(reading.interpretation, "No dust attacks detected");
    }

    #[test]
    fn detected_dust_uses_vulnerability_complement() {
        let mut input = analysis();
        input.dust_attack.dust_attack_detected = true;
        input.dust_attack.dust_vulnerability = 0.7;
        let reading = interpret_metric(MetricKey::DustAttack, &input);
        assert_eq!(reading.value.render(), "Detected");
        assert_close(reading.percentage, 30.0);
        assert_eq!(reading.interpretation, "Dust attack activity found");
    }

    #[test]
    fn kyc_exposure_formats_one_decimal_percent() {
        let mut input = analysis();
        input.exchange_fingerprint.kyc_exposure = 0.08;
        let reading = interpret_metric(MetricKey::ExchangeFingerprint, &input);
        assert_eq!(reading.value.render(), "8.0%");
        assert_close(reading.percentage, 92.0);
        assert_eq!(reading.interpretation, "Minimal KYC exposure");
    }

    #[test]
    fn kyc_thresholds_apply_to_displayed_percent() {
        let mut input = analysis();
        input.exchange_fingerprint.kyc_exposure = 0.10;
        let reading = interpret_metric(MetricKey::ExchangeFingerprint, &input);
        assert_eq!(reading.interpretation, "Some exchange activity");

        input.exchange_fingerprint.kyc_exposure = 0.30;
        let reading = interpret_metric(MetricKey::ExchangeFingerprint, &input);
        assert_eq!(reading.interpretation, "High exchange exposure");
    }

    #[test]
    fn cross_chain_detection_drops_percentage_to_thirty() {
        let mut input = analysis();
        input.cross_chain.bridge_usage_detected = true;
        let reading = interpret_metric(MetricKey::CrossChain, &input);
        assert_eq!(reading.value.render(), "Detected");
        assert_close(reading.percentage, 30.0);

        input.cross_chain.bridge_usage_detected = false;
        let reading = interpret_metric(MetricKey::CrossChain, &input);
        assert_eq!(reading.value.render(), "None");
        assert_close(reading.percentage, 100.0);
    }

    #[test]
    fn inverted_metrics_use_complement_percentage() {
        let mut input = analysis();
        input.mutual_information.total_mutual_information = 0.25;
        input.advanced_clustering.clustering_vulnerability = 0.6;
        input.temporal_analysis.autocorrelation = 0.5;
        input.network_centrality.network_visibility = 0.5;

        assert_close(
            interpret_metric(MetricKey::MutualInformation, &input).percentage,
            75.0,
        );
        assert_close(interpret_metric(MetricKey::Clustering, &input).percentage, 40.0);
        assert_eq!(
            interpret_metric(MetricKey::Clustering, &input).interpretation,
            "Highly clusterable"
        );
        assert_eq!(
            interpret_metric(MetricKey::Temporal, &input).interpretation,
            "Predictable timing"
        );
        assert_eq!(
            interpret_metric(MetricKey::Centrality, &input).interpretation,
            "High network prominence"
        );
    }

    #[test]
    fn all_metrics_are_covered_once() {
        let readings = interpret_all(&analysis());
        assert_eq!(readings.len(), 11);
        for (reading, key) in readings.iter().zip(MetricKey::ALL) {
            assert_eq!(reading.key, key);
        }
    }
}

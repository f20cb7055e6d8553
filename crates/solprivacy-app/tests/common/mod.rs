//! Shared fixtures for app integration tests.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::Mutex;

use solprivacy_analysis_contract::{
    CentralityMetrics, ClusteringMetrics, CrossChainMetrics, DetectedExchange,
    DifferentialPrivacyMetrics, DustAttackMetrics, EntropyMetrics, ExchangeFingerprintMetrics,
    ExchangeKind, KAnonymityMetrics, MixerMetrics, MutualInformationMetrics, PrivacyAnalysis,
    Priority, Recommendation, RiskLevel, TemporalMetrics,
};
use solprivacy_client::{AnalysisClient, AnalysisTransport, ClientError, TransportResponse};
use url::Url;

/// Valid Solana-length wallet address used across tests.
#[allow(dead_code)]
pub const WALLET_ADDRESS: &str = "vines1vzrYbzLMRdu58ou5XTby4qAqVRLmqo36NKPTg";

/// Creates a deterministic mid-score analysis fixture.
#[allow(dead_code)]
pub fn fixture_analysis() -> PrivacyAnalysis {
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
            detected_exchanges: vec![
                DetectedExchange {
                    name: "Raydium".to_string(),
                    kind: ExchangeKind::Dex,
                },
                DetectedExchange {
                    name: "Jupiter".to_string(),
                    kind: ExchangeKind::Dex,
                },
            ],
            traceability_risk: RiskLevel::Low,
        },
        recommendations: vec![
            Recommendation {
                action: "Consider using a privacy-focused wallet or mixer".to_string(),
                impact: "Significantly improve transaction unlinkability".to_string(),
                priority: Priority::High,
            },
            Recommendation {
                action: "Avoid reusing addresses for receiving funds".to_string(),
                impact: "Reduces clustering vulnerability".to_string(),
                priority: Priority::High,
            },
            Recommendation {
                action: "Randomize transaction timing patterns".to_string(),
                impact: "Makes temporal analysis more difficult".to_string(),
                priority: Priority::Medium,
            },
            Recommendation {
                action: "Do not interact with dust transactions".to_string(),
                impact: "Prevents dust attack linking".to_string(),
                priority: Priority::High,
            },
            Recommendation {
                action: "Use DEX aggregators to obscure trading patterns".to_string(),
                impact: "Reduces exchange fingerprinting accuracy".to_string(),
                priority: Priority::Low,
            },
        ],
    }
}

/// Wraps an analysis fixture in the service success envelope.
#[allow(dead_code)]
pub fn envelope_json(analysis: &PrivacyAnalysis) -> String {
    serde_json::json!({
        "success": true,
        "data": analysis,
    })
    .to_string()
}

/// Scripted transport: pops one queued response per fetch.
#[derive(Debug)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<TransportResponse>>,
}

impl ScriptedTransport {
    #[allow(dead_code)]
    pub fn new(responses: Vec<TransportResponse>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
        }
    }
}

impl AnalysisTransport for ScriptedTransport {
    fn fetch(&self, _request_url: &Url) -> Result<TransportResponse, ClientError> {
        self.responses
            .lock()
            .expect("response queue lock")
            .pop_front()
            .ok_or_else(|| ClientError::Transport("no scripted response left".to_string()))
    }
}

/// Builds a client over a single scripted response.
#[allow(dead_code)]
pub fn client_with_response(status: u16, body: String) -> AnalysisClient {
    client_with_responses(vec![TransportResponse { status, body }])
}

/// Builds a client over a queue of scripted responses.
#[allow(dead_code)]
pub fn client_with_responses(responses: Vec<TransportResponse>) -> AnalysisClient {
    AnalysisClient::new(
        "https://api.solprivacy.test",
        Arc::new(ScriptedTransport::new(responses)),
    )
    .expect("test client should build")
}

#![warn(missing_docs)]
//! # solprivacy-app binary
//!
//! Terminal entry point: fetches a wallet privacy analysis and renders the
//! full report (score gauge, eleven metrics, attack panels, recommendations)
//! as text.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use solprivacy_analysis_contract::parse_analysis_response;
use solprivacy_app::{analyze_address, app_version, build_report, user_notice};
use solprivacy_client::{AnalysisClient, HttpAnalysisTransport, validate_wallet_address};
use solprivacy_session::AnalysisSession;
use solprivacy_ui::{BadgeTone, DustPanelView, ReportView, ScoreBand};
use tracing_subscriber::EnvFilter;

const PROGRESS_BAR_WIDTH: usize = 20;

/// Wallet privacy analyzer report client.
#[derive(Debug, Parser)]
#[command(name = "solprivacy", version = solprivacy_app::APP_VERSION)]
struct Cli {
    /// Wallet address to analyze (at least 32 characters).
    address: String,

    /// Base URL of the analysis service.
    #[arg(long, default_value = "https://api.solprivacy.test")]
    endpoint: String,

    /// Render a report from a local envelope JSON file instead of fetching.
    #[arg(long)]
    fixture: Option<PathBuf>,

    /// Request timeout in seconds.
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    tracing::info!(version = app_version(), "solprivacy starting");

    match run(&cli) {
        Ok(report) => print!("{}", render_report(&report)),
        Err(notice) => {
            eprintln!("{notice}");
            std::process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> Result<ReportView, String> {
    if let Some(fixture_path) = &cli.fixture {
        let address = validate_wallet_address(&cli.address).map_err(|error| error.to_string())?;
        let raw = std::fs::read_to_string(fixture_path)
            .map_err(|error| format!("unable to read fixture '{}': {error}", fixture_path.display()))?;
        let analysis = parse_analysis_response(&raw).map_err(|error| {
            tracing::error!(%error, "fixture rejected at contract boundary");
            error.to_string()
        })?;
        return Ok(build_report(&address, &analysis));
    }

    let transport = HttpAnalysisTransport::new(Duration::from_secs(cli.timeout_secs))
        .map_err(|error| error.to_string())?;
    let client = AnalysisClient::new(&cli.endpoint, Arc::new(transport))
        .map_err(|error| error.to_string())?;
    let mut session = AnalysisSession::new();

    match analyze_address(&client, &mut session, &cli.address) {
        Ok(Some(report)) => Ok(report),
        // Unreachable with a single synchronous submission, but the policy
        // is honored here too.
        Ok(None) => Err("analysis superseded by a newer request".to_string()),
        Err(error) => {
            tracing::error!(%error, "analysis failed");
            Err(user_notice(&error).to_string())
        }
    }
}

fn render_report(report: &ReportView) -> String {
    let mut out = String::new();

    out.push_str(&format!("Wallet: {}\n\n", report.wallet_address));

    out.push_str("Privacy Score\n");
    out.push_str(&format!(
        "  {:>3} / 100  Grade: {}  {}  [{}]\n\n",
        report.gauge.score,
        report.gauge.grade,
        band_marker(report.gauge.band),
        report.gauge.risk_label
    ));

    out.push_str("Privacy Metrics\n");
    for card in &report.metrics {
        out.push_str(&format!(
            "  {:<26} {:>10}  {} {:>5.1}%\n",
            card.name,
            card.value_text,
            progress_bar(card.progress_percent),
            card.progress_percent
        ));
        out.push_str(&format!("  {:<26} {}\n", "", card.interpretation));
    }
    out.push('\n');

    out.push_str("Attack Detection\n");
    render_dust_panel(&mut out, &report.dust);
    render_exchange_panel(&mut out, report);

    if !report.recommendations.is_empty() {
        out.push_str("\nRecommendations\n");
        for recommendation in &report.recommendations {
            out.push_str(&format!(
                "  [{:<6}] {}\n           {}\n",
                recommendation.priority_label, recommendation.action, recommendation.impact
            ));
        }
    }

    out
}

fn render_dust_panel(out: &mut String, dust: &DustPanelView) {
    match dust {
        DustPanelView::Detected {
            transactions,
            unique_senders_text,
            vulnerability_text,
            risk_label,
            tone,
        } => {
            out.push_str("  Dust Attack Detection: DETECTED\n");
            out.push_str(&format!(
                "    Dust Transactions: {transactions} | Unique Senders: {unique_senders_text} | \
                 Vulnerability: {vulnerability_text} | Linking Risk: {risk_label} ({})\n",
                tone_marker(*tone)
            ));
        }
        DustPanelView::Clear => {
            out.push_str("  Dust Attack Detection: clear, no dust attack activity detected\n");
        }
    }
}

fn render_exchange_panel(out: &mut String, report: &ReportView) {
    let exchange = &report.exchange;
    out.push_str("  Exchange & KYC Exposure\n");
    out.push_str(&format!(
        "    KYC Exposure: {} | Traceability Risk: {} ({}) | CEX: {} | DEX: {}\n",
        exchange.kyc_percent_text,
        exchange.risk_label,
        tone_marker(exchange.tone),
        exchange.cex_count,
        exchange.dex_count
    ));
    if !exchange.exchange_names.is_empty() {
        out.push_str(&format!("    Detected: {}\n", exchange.exchange_names.join(", ")));
    }
}

fn progress_bar(percent: f64) -> String {
    // Percent arrives clamped to [0,100] from the projection layer.
    let filled = ((percent / 100.0) * PROGRESS_BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(PROGRESS_BAR_WIDTH);
    format!(
        "[{}{}]",
        "#".repeat(filled),
        "-".repeat(PROGRESS_BAR_WIDTH - filled)
    )
}

fn band_marker(band: ScoreBand) -> &'static str {
    match band {
        ScoreBand::Good => "good",
        ScoreBand::Caution => "caution",
        ScoreBand::Poor => "poor",
    }
}

fn tone_marker(tone: BadgeTone) -> &'static str {
    match tone {
        BadgeTone::Positive => "ok",
        BadgeTone::Warning => "warn",
        BadgeTone::Critical => "alert",
    }
}

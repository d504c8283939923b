//! Parsing of the workload's `/summary` document.
//!
//! Only the fields the agent acts on are modelled; everything else in the
//! document is ignored but kept verbatim in [`HealthSnapshot::raw`].

use rig_core::HealthSnapshot;

use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct SummaryDocument {
    #[serde(default)]
    worker_id: Option<String>,
    hashrate: HashrateSection,
    results: ResultsSection,
}

#[derive(Debug, Deserialize)]
struct HashrateSection {
    /// Rolling averages; entries are null until their window has filled
    total: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct ResultsSection {
    #[serde(default)]
    shares_good: i64,
    #[serde(default)]
    shares_bad: i64,
}

/// Parse a summary body. `None` when the body is not JSON or lacks the
/// `hashrate.total` / `results` sections.
pub fn parse_summary(body: &str) -> Option<HealthSnapshot> {
    let document: SummaryDocument = serde_json::from_str(body).ok()?;

    let total_hashrate = document
        .hashrate
        .total
        .iter()
        .flatten()
        .copied()
        .find(|rate| rate.is_finite())
        .unwrap_or(0.0);

    Some(HealthSnapshot {
        worker_id: document.worker_id.unwrap_or_default(),
        total_hashrate,
        accepted_shares: document.results.shares_good,
        rejected_shares: document.results.shares_bad,
        raw: body.to_string(),
    })
}

//! Rate card audit CLI.
//!
//! Reads a host export of advertising opportunities (a JSON array) and runs
//! each record through a live engine: normalized display lines, hub override
//! validation, and a portfolio revenue projection. Points at
//! `http://localhost:4020` unless `API_URL` says otherwise.

mod audit_report;

use std::process::ExitCode;
use std::time::Duration;

use serde_json::{json, Value};

use audit_report::{
    display_name, format_context, format_line, format_money, format_projection, truncate,
    HealthResponse, NormalizeResponse, PortfolioResponse, ValidateOverridesResponse,
};

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> ExitCode {
    let base_url = std::env::var("API_URL").unwrap_or_else(|_| "http://localhost:4020".to_string());

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: audit <opportunities.json>");
        return ExitCode::from(2);
    };

    let raw = match std::fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(e) => {
            eprintln!("cannot read {path}: {e}");
            return ExitCode::FAILURE;
        }
    };

    let opportunities = match serde_json::from_str::<Value>(&raw) {
        Ok(Value::Array(items)) => items,
        Ok(_) => {
            eprintln!("{path}: expected a JSON array of opportunity records");
            return ExitCode::FAILURE;
        }
        Err(e) => {
            eprintln!("{path}: invalid JSON: {e}");
            return ExitCode::FAILURE;
        }
    };

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(5))
        .build()
        .expect("failed to build HTTP client");

    match run_audit(&client, &base_url, &opportunities).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("audit failed: {e}");
            eprintln!("is the engine running at {base_url}? (override with API_URL)");
            ExitCode::FAILURE
        }
    }
}

// ---------------------------------------------------------------------------
// Audit flow
// ---------------------------------------------------------------------------

async fn run_audit(
    client: &reqwest::Client,
    base_url: &str,
    opportunities: &[Value],
) -> Result<(), reqwest::Error> {
    let health: HealthResponse = client
        .get(format!("{base_url}/health"))
        .send()
        .await?
        .json()
        .await?;

    println!("rate card audit: {} opportunities", opportunities.len());
    println!(
        "engine {} at {base_url} (uptime {}s)",
        health.status, health.uptime_secs
    );
    println!();

    // One portfolio call up front; items come back in input order, so the
    // per-opportunity loop below can index straight into it.
    let items: Vec<Value> = opportunities
        .iter()
        .enumerate()
        .map(|(index, o)| {
            json!({
                "id": display_name(o, index),
                "pricing": o.get("pricing"),
                "frequency": o.get("frequency"),
                "performanceMetrics": o.get("performanceMetrics"),
                "spotsPerOccurrence": o.get("spotsPerOccurrence"),
            })
        })
        .collect();
    let portfolio: PortfolioResponse = client
        .post(format!("{base_url}/revenue/portfolio"))
        .json(&json!({ "opportunities": items }))
        .send()
        .await?
        .json()
        .await?;

    for (index, opportunity) in opportunities.iter().enumerate() {
        let normalized: NormalizeResponse = client
            .post(format!("{base_url}/pricing/normalize"))
            .json(&json!({
                "pricing": opportunity.get("pricing"),
                "channel": opportunity.get("channel"),
            }))
            .send()
            .await?
            .json()
            .await?;

        println!(
            "{:>3}. {}{}",
            index + 1,
            truncate(&display_name(opportunity, index), 48),
            format_context(opportunity)
        );
        for line in &normalized.lines {
            println!("       {}", format_line(line));
        }
        if let Some(minimum) = &normalized.minimum_commitment {
            println!("       minimum commitment: {minimum}");
        }
        if let Some(item) = portfolio.items.get(index) {
            println!("       {}", format_projection(item));
        }

        if let Some(overrides) = opportunity.get("hubOverrides").filter(|v| v.is_array()) {
            let validated: ValidateOverridesResponse = client
                .post(format!("{base_url}/pricing/overrides/validate"))
                .json(&json!({ "overrides": overrides }))
                .send()
                .await?
                .json()
                .await?;
            if validated.dropped > 0 {
                println!(
                    "       hub overrides: {} kept, {} dropped",
                    validated.overrides.len(),
                    validated.dropped
                );
            }
        }
    }

    let projectable = portfolio.items.iter().filter(|i| i.projectable).count();
    println!();
    println!(
        "portfolio: {}/mo projected across {} of {} opportunities",
        format_money(portfolio.total_monthly),
        projectable,
        portfolio.items.len()
    );

    Ok(())
}

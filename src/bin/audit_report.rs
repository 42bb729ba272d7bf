//! Response mirrors and report formatting for the audit binary.

#![allow(dead_code)]

use serde::Deserialize;
use serde_json::Value;

// ---------------------------------------------------------------------------
// API response mirrors
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub uptime_secs: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizeResponse {
    pub lines: Vec<DisplayLine>,
    pub minimum_commitment: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayLine {
    /// number | "contact" | null
    pub amount: Value,
    pub unit_label: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateOverridesResponse {
    pub overrides: Vec<Value>,
    pub dropped: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioResponse {
    pub items: Vec<PortfolioItem>,
    pub total_monthly: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioItem {
    pub model: Option<String>,
    pub monthly_revenue: f64,
    pub projectable: bool,
}

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

/// One price line: "$50.00 /send", "Contact for pricing", or "N/A".
pub fn format_line(line: &DisplayLine) -> String {
    match line.amount.as_f64() {
        Some(amount) => format!("{} {}", format_money(amount), line.unit_label),
        // contact and unpriced lines carry the whole message in the label
        None => line.unit_label.clone(),
    }
}

pub fn format_projection(item: &PortfolioItem) -> String {
    if item.projectable {
        format!(
            "projected: {}/mo ({})",
            format_money(item.monthly_revenue),
            item.model.as_deref().unwrap_or("?")
        )
    } else if item.model.as_deref() == Some("contact") {
        "projected: none (contact pricing)".to_string()
    } else {
        "projected: none (unpriced)".to_string()
    }
}

pub fn format_money(amount: f64) -> String {
    format!("${amount:.2}")
}

/// Pick a human label for an opportunity record.
pub fn display_name(opportunity: &Value, index: usize) -> String {
    opportunity
        .get("name")
        .and_then(Value::as_str)
        .or_else(|| opportunity.get("id").and_then(Value::as_str))
        .map(str::to_string)
        .unwrap_or_else(|| format!("opportunity {}", index + 1))
}

/// Bracketed channel/frequency context, e.g. " [newsletters, weekly]".
pub fn format_context(opportunity: &Value) -> String {
    let channel = opportunity.get("channel").and_then(Value::as_str);
    let frequency = opportunity.get("frequency").and_then(Value::as_str);
    match (channel, frequency) {
        (Some(c), Some(f)) => format!(" [{c}, {f}]"),
        (Some(c), None) => format!(" [{c}]"),
        (None, Some(f)) => format!(" [{f}]"),
        (None, None) => String::new(),
    }
}

pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}

// satisfies cargo's bin auto-discovery; this file is a module of audit.rs
fn main() {}

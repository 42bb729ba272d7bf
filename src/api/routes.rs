use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::api::health::HealthState;
use crate::api::latency::LatencyStats;
use crate::config::DEFAULT_SPOTS_PER_OCCURRENCE;
use crate::pricing::{infer_model, merge_overrides, normalize, resolve_field};
use crate::projection::project_monthly_revenue;
use crate::types::{
    Channel, DisplayLine, HubPriceOverride, PerformanceMetrics, PricingInput, PricingModel,
    Projection,
};

#[derive(Clone)]
pub struct ApiState {
    pub health: Arc<HealthState>,
    pub latency: Arc<LatencyStats>,
}

pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(get_health))
        .route("/pricing/normalize", post(normalize_pricing))
        .route("/pricing/overrides/validate", post(validate_overrides))
        .route("/revenue/project", post(project_revenue))
        .route("/revenue/portfolio", post(project_portfolio))
        .route("/stats/latency", get(get_stats_latency))
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Request structs
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizeRequest {
    /// Raw pricing value exactly as the host stores it: object, tier array,
    /// or junk. Never rejected for shape.
    #[serde(default)]
    pub pricing: Option<Value>,
    /// Channel tag for the one context-sensitive unit label.
    #[serde(default)]
    pub channel: Option<String>,
}

#[derive(Deserialize)]
pub struct ValidateOverridesRequest {
    #[serde(default)]
    pub overrides: Option<Vec<Value>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRequest {
    #[serde(default)]
    pub pricing: Option<Value>,
    /// Cadence label of the parent channel/event/show record.
    #[serde(default)]
    pub frequency: Option<String>,
    #[serde(default)]
    pub performance_metrics: Option<PerformanceMetrics>,
    #[serde(default)]
    pub spots_per_occurrence: Option<f64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioRequest {
    #[serde(default)]
    pub opportunities: Vec<PortfolioItem>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioItem {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub pricing: Option<Value>,
    #[serde(default)]
    pub frequency: Option<String>,
    #[serde(default)]
    pub performance_metrics: Option<PerformanceMetrics>,
    #[serde(default)]
    pub spots_per_occurrence: Option<f64>,
}

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizeResponse {
    pub lines: Vec<DisplayLine>,
    /// Resolved model of the representative record. Callers read this to
    /// tell contact/unpriced apart from a zero amount.
    pub model: Option<PricingModel>,
    pub minimum_commitment: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateOverridesResponse {
    pub overrides: Vec<HubPriceOverride>,
    pub dropped: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionResponse {
    pub model: Option<PricingModel>,
    pub monthly_revenue: f64,
    pub projectable: bool,
}

impl From<Projection> for ProjectionResponse {
    fn from(p: Projection) -> Self {
        Self {
            model: p.model,
            monthly_revenue: p.monthly_revenue,
            projectable: p.projectable(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioResponse {
    pub items: Vec<PortfolioItemResponse>,
    pub total_monthly: f64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioItemResponse {
    pub id: Option<String>,
    pub model: Option<PricingModel>,
    pub monthly_revenue: f64,
    pub projectable: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub uptime_secs: u64,
    pub normalize_requests: u64,
    pub override_requests: u64,
    pub projection_requests: u64,
    pub last_request_at_ns: u64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LatencyResponse {
    pub p50_us: Option<u64>,
    pub p95_us: Option<u64>,
    pub p99_us: Option<u64>,
    pub samples: u64,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn normalize_pricing(
    State(state): State<ApiState>,
    Json(req): Json<NormalizeRequest>,
) -> Json<NormalizeResponse> {
    let started = Instant::now();

    let channel = req.channel.as_deref().and_then(Channel::from_tag);
    let pricing = req
        .pricing
        .as_ref()
        .map(PricingInput::from_value)
        .unwrap_or_default();
    let lines = normalize(&pricing, channel);
    let model = pricing
        .representative()
        .and_then(|record| infer_model(record, resolve_field(record).map(|(field, _)| field)));
    let minimum_commitment = pricing
        .representative()
        .and_then(|record| record.minimum_commitment.clone());

    state.latency.record(started.elapsed());
    state.health.record_normalize();
    debug!(lines = lines.len(), model = ?model, channel = ?channel, "NORMALIZE");

    Json(NormalizeResponse {
        lines,
        model,
        minimum_commitment,
    })
}

async fn validate_overrides(
    State(state): State<ApiState>,
    Json(req): Json<ValidateOverridesRequest>,
) -> Json<ValidateOverridesResponse> {
    let started = Instant::now();

    let candidates: Vec<HubPriceOverride> = req
        .overrides
        .unwrap_or_default()
        .iter()
        .map(HubPriceOverride::from_value)
        .collect();
    let submitted = candidates.len();
    let overrides = merge_overrides(candidates);
    let dropped = submitted - overrides.len();

    state.latency.record(started.elapsed());
    state.health.record_overrides();
    debug!(submitted, dropped, "VALIDATE_OVERRIDES");

    Json(ValidateOverridesResponse { overrides, dropped })
}

async fn project_revenue(
    State(state): State<ApiState>,
    Json(req): Json<ProjectRequest>,
) -> Json<ProjectionResponse> {
    let started = Instant::now();

    let projection = project_item(
        &req.pricing,
        req.performance_metrics.as_ref(),
        req.frequency.as_deref(),
        req.spots_per_occurrence,
    );

    state.latency.record(started.elapsed());
    state.health.record_projection();
    debug!(model = ?projection.model, monthly = projection.monthly_revenue, "PROJECT");

    Json(ProjectionResponse::from(projection))
}

async fn project_portfolio(
    State(state): State<ApiState>,
    Json(req): Json<PortfolioRequest>,
) -> Json<PortfolioResponse> {
    let started = Instant::now();

    let mut total_monthly = 0.0;
    let items: Vec<PortfolioItemResponse> = req
        .opportunities
        .iter()
        .map(|item| {
            let projection = project_item(
                &item.pricing,
                item.performance_metrics.as_ref(),
                item.frequency.as_deref(),
                item.spots_per_occurrence,
            );
            total_monthly += projection.monthly_revenue;
            PortfolioItemResponse {
                id: item.id.clone(),
                model: projection.model,
                monthly_revenue: projection.monthly_revenue,
                projectable: projection.projectable(),
            }
        })
        .collect();

    state.latency.record(started.elapsed());
    state.health.record_projection();
    debug!(items = items.len(), total_monthly, "PORTFOLIO");

    Json(PortfolioResponse {
        items,
        total_monthly,
    })
}

/// Shared by the single and portfolio projection handlers.
fn project_item(
    pricing: &Option<Value>,
    metrics: Option<&PerformanceMetrics>,
    frequency: Option<&str>,
    spots: Option<f64>,
) -> Projection {
    let pricing = pricing
        .as_ref()
        .map(PricingInput::from_value)
        .unwrap_or_default();
    project_monthly_revenue(
        &pricing,
        metrics,
        frequency,
        spots.unwrap_or(DEFAULT_SPOTS_PER_OCCURRENCE),
    )
}

async fn get_health(State(state): State<ApiState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        uptime_secs: state.health.uptime_secs(),
        normalize_requests: state.health.normalize_requests(),
        override_requests: state.health.override_requests(),
        projection_requests: state.health.projection_requests(),
        last_request_at_ns: state.health.last_request_at_ns(),
    })
}

async fn get_stats_latency(State(state): State<ApiState>) -> Json<LatencyResponse> {
    let snap = state.latency.snapshot();
    Json(LatencyResponse {
        p50_us: snap.p50_us,
        p95_us: snap.p95_us,
        p99_us: snap.p99_us,
        samples: snap.samples,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn state() -> ApiState {
        ApiState {
            health: Arc::new(HealthState::new()),
            latency: Arc::new(LatencyStats::new()),
        }
    }

    #[tokio::test]
    async fn normalize_endpoint_returns_lines_and_model() {
        let req = NormalizeRequest {
            pricing: Some(json!({"flatRate": 2500.0, "pricingModel": "flat"})),
            channel: Some("events".to_string()),
        };
        let Json(resp) = normalize_pricing(State(state()), Json(req)).await;
        assert_eq!(resp.lines.len(), 1);
        assert_eq!(resp.lines[0].unit_label, "/occurrence");
        assert_eq!(resp.model, Some(PricingModel::Flat));
    }

    #[tokio::test]
    async fn normalize_endpoint_survives_junk() {
        let req = NormalizeRequest {
            pricing: Some(json!(17)),
            channel: Some("fax".to_string()),
        };
        let Json(resp) = normalize_pricing(State(state()), Json(req)).await;
        assert_eq!(resp.lines, vec![DisplayLine::unavailable()]);
        assert_eq!(resp.model, None);
    }

    #[tokio::test]
    async fn validate_endpoint_reports_dropped_count() {
        let req = ValidateOverridesRequest {
            overrides: Some(vec![
                json!({"hubId": "", "hubName": "X", "pricing": {"flatRate": 1.0}}),
                json!({"hubId": "h2", "hubName": "Y", "pricing": {"flatRate": 2.0}}),
            ]),
        };
        let Json(resp) = validate_overrides(State(state()), Json(req)).await;
        assert_eq!(resp.overrides.len(), 1);
        assert_eq!(resp.dropped, 1);
        assert_eq!(resp.overrides[0].hub_id.as_deref(), Some("h2"));
    }

    #[tokio::test]
    async fn project_endpoint_composes_the_engine() {
        let req = ProjectRequest {
            pricing: Some(json!({"perSpot": 150.0})),
            frequency: Some("weekly".to_string()),
            performance_metrics: None,
            spots_per_occurrence: None,
        };
        let Json(resp) = project_revenue(State(state()), Json(req)).await;
        assert_eq!(resp.model, Some(PricingModel::PerSpot));
        assert!((resp.monthly_revenue - 649.5).abs() < 1e-9);
        assert!(resp.projectable);
    }

    #[tokio::test]
    async fn portfolio_endpoint_totals_across_items() {
        let req = PortfolioRequest {
            opportunities: vec![
                PortfolioItem {
                    id: Some("newsletter-banner".to_string()),
                    pricing: Some(json!({"perSend": 50.0})),
                    frequency: Some("weekly".to_string()),
                    performance_metrics: None,
                    spots_per_occurrence: None,
                },
                PortfolioItem {
                    id: Some("event-sponsor".to_string()),
                    pricing: Some(json!({"pricingModel": "contact"})),
                    frequency: None,
                    performance_metrics: None,
                    spots_per_occurrence: None,
                },
            ],
        };
        let Json(resp) = project_portfolio(State(state()), Json(req)).await;
        assert_eq!(resp.items.len(), 2);
        // contact items contribute nothing to the total
        assert!((resp.total_monthly - 216.5).abs() < 1e-9);
        assert!(!resp.items[1].projectable);
    }

    #[tokio::test]
    async fn health_and_latency_reflect_traffic() {
        let s = state();
        let req = NormalizeRequest {
            pricing: None,
            channel: None,
        };
        let _ = normalize_pricing(State(s.clone()), Json(req)).await;

        let Json(health) = get_health(State(s.clone())).await;
        assert_eq!(health.status, "ok");
        assert_eq!(health.normalize_requests, 1);

        let Json(latency) = get_stats_latency(State(s)).await;
        assert_eq!(latency.samples, 1);
        assert!(latency.p50_us.is_some());
    }
}

//! Monthly revenue projection.
//!
//! Composes the field resolver, model inferencer, and frequency table with an
//! opportunity's performance metrics. Total over every input shape: anything
//! unprojectable comes out as 0.0 with the resolved model preserved, so
//! callers can tell "contact pricing" apart from "zero dollars".

use crate::config::{frequency_multipliers, CPM_UNIT_SIZE};
use crate::pricing::{infer_model, resolve_field};
use crate::projection::frequency::occurrences_per_month;
use crate::types::{PerformanceMetrics, PricingInput, PricingModel, Projection};

/// Project one opportunity's monthly revenue.
///
/// `frequency` is the parent channel/show cadence label; the record's own
/// frequency qualifier fills in when the caller has none, and explicit
/// `occurrencesPerMonth` metrics outrank both. `spots_per_occurrence`
/// multiplies occurrence-based models for ads that run more than once per
/// publishing instance (two mid-roll slots in one episode).
pub fn project_monthly_revenue(
    pricing: &PricingInput,
    metrics: Option<&PerformanceMetrics>,
    frequency: Option<&str>,
    spots_per_occurrence: f64,
) -> Projection {
    let Some(record) = pricing.representative() else {
        return Projection {
            model: None,
            monthly_revenue: 0.0,
        };
    };
    let resolved = resolve_field(record);
    let Some(model) = infer_model(record, resolved.map(|(field, _)| field)) else {
        return Projection {
            model: None,
            monthly_revenue: 0.0,
        };
    };
    let Some(amount) = resolved.map(|(_, value)| value) else {
        return Projection {
            model: Some(model),
            monthly_revenue: 0.0,
        };
    };

    let occurrences = metrics
        .and_then(|m| m.occurrences_per_month)
        .unwrap_or_else(|| cadence(frequency, record.frequency.as_deref()));

    let monthly_revenue = match model {
        // a flat or monthly fee contributes its amount once per month
        // regardless of channel cadence
        PricingModel::Flat | PricingModel::Monthly => amount,
        PricingModel::Weekly | PricingModel::PerWeek => amount * frequency_multipliers::WEEKLY,
        PricingModel::PerDay => amount * frequency_multipliers::DAILY,
        PricingModel::PerSpot
        | PricingModel::PerSend
        | PricingModel::PerEpisode
        | PricingModel::PerPost
        | PricingModel::PerStory
        | PricingModel::PerAd
        | PricingModel::PerLine
        | PricingModel::PerVideo => amount * occurrences * spots_per_occurrence,
        PricingModel::Cpm | PricingModel::Cpd | PricingModel::Cpv => {
            let units_per_month = metrics.and_then(|m| m.impressions_per_month).or_else(|| {
                metrics
                    .and_then(|m| m.audience_size)
                    .map(|audience| audience * occurrences * spots_per_occurrence)
            });
            match units_per_month {
                Some(units) => amount * units / CPM_UNIT_SIZE,
                // never fabricate traffic numbers
                None => 0.0,
            }
        }
        PricingModel::FlatRate | PricingModel::Cpc | PricingModel::Contact => 0.0,
    };

    Projection {
        model: Some(model),
        monthly_revenue,
    }
}

/// The caller's channel cadence, else the record's own frequency qualifier,
/// else nothing. Blank caller labels count as absent.
fn cadence(channel_frequency: Option<&str>, record_frequency: Option<&str>) -> f64 {
    channel_frequency
        .filter(|s| !s.trim().is_empty())
        .or(record_frequency)
        .map(occurrences_per_month)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pricing(v: serde_json::Value) -> PricingInput {
        PricingInput::from_value(&v)
    }

    fn metrics(
        occ: Option<f64>,
        impressions: Option<f64>,
        audience: Option<f64>,
    ) -> PerformanceMetrics {
        PerformanceMetrics {
            occurrences_per_month: occ,
            impressions_per_month: impressions,
            audience_size: audience,
        }
    }

    #[test]
    fn per_spot_on_a_weekly_channel() {
        let p =
            project_monthly_revenue(&pricing(json!({"perSpot": 150.0})), None, Some("weekly"), 1.0);
        assert_eq!(p.model, Some(PricingModel::PerSpot));
        assert!((p.monthly_revenue - 649.5).abs() < 1e-9);
        assert!(p.projectable());
    }

    #[test]
    fn spots_per_occurrence_multiplies() {
        // two mid-roll slots in every episode
        let p =
            project_monthly_revenue(&pricing(json!({"perSpot": 150.0})), None, Some("weekly"), 2.0);
        assert!((p.monthly_revenue - 1299.0).abs() < 1e-9);
    }

    #[test]
    fn flat_fee_ignores_channel_cadence() {
        let p = project_monthly_revenue(
            &pricing(json!({"flatRate": 2500.0, "pricingModel": "flat"})),
            None,
            Some("weekly"),
            1.0,
        );
        assert_eq!(p.monthly_revenue, 2500.0);
    }

    #[test]
    fn weekly_models_scale_by_the_average_month() {
        let p = project_monthly_revenue(&pricing(json!({"weekly": 100.0})), None, None, 1.0);
        assert_eq!(p.model, Some(PricingModel::PerWeek));
        assert!((p.monthly_revenue - 433.0).abs() < 1e-9);
    }

    #[test]
    fn cpm_with_explicit_impressions() {
        let p = project_monthly_revenue(
            &pricing(json!({"cpm": 10.0, "pricingModel": "cpm"})),
            Some(&metrics(None, Some(50_000.0), None)),
            None,
            1.0,
        );
        assert_eq!(p.monthly_revenue, 500.0);
    }

    #[test]
    fn cpm_derives_units_from_audience_and_cadence() {
        let p = project_monthly_revenue(
            &pricing(json!({"cpm": 10.0})),
            Some(&metrics(None, None, Some(20_000.0))),
            Some("weekly"),
            1.0,
        );
        // 20000 listeners x 4.33 occurrences = 86600 impressions
        assert!((p.monthly_revenue - 866.0).abs() < 1e-9);
    }

    #[test]
    fn cpm_without_metrics_projects_nothing_but_keeps_the_model() {
        let p = project_monthly_revenue(&pricing(json!({"cpm": 10.0})), None, Some("weekly"), 1.0);
        assert_eq!(p.model, Some(PricingModel::Cpm));
        assert_eq!(p.monthly_revenue, 0.0);
        assert!(p.projectable());
    }

    #[test]
    fn contact_pricing_is_exactly_zero_for_any_metrics() {
        let p = project_monthly_revenue(
            &pricing(json!({"pricingModel": "contact"})),
            Some(&metrics(Some(10.0), Some(1_000_000.0), Some(50_000.0))),
            Some("daily"),
            3.0,
        );
        assert_eq!(p.model, Some(PricingModel::Contact));
        assert_eq!(p.monthly_revenue, 0.0);
        assert!(!p.projectable());
    }

    #[test]
    fn unresolvable_pricing_is_exactly_zero() {
        let p = project_monthly_revenue(&PricingInput::default(), None, Some("weekly"), 1.0);
        assert_eq!(p.model, None);
        assert_eq!(p.monthly_revenue, 0.0);
        assert!(!p.projectable());
    }

    #[test]
    fn explicit_occurrence_metrics_outrank_the_frequency_label() {
        let p = project_monthly_revenue(
            &pricing(json!({"perSend": 50.0})),
            Some(&metrics(Some(10.0), None, None)),
            Some("weekly"),
            1.0,
        );
        assert_eq!(p.monthly_revenue, 500.0);
    }

    #[test]
    fn record_frequency_fills_in_when_the_caller_has_none() {
        let input = pricing(json!({"perSend": 40.0, "frequency": "monthly"}));
        let p = project_monthly_revenue(&input, None, None, 1.0);
        assert_eq!(p.monthly_revenue, 40.0);
        // a blank caller label counts as absent too
        let p = project_monthly_revenue(&input, None, Some("  "), 1.0);
        assert_eq!(p.monthly_revenue, 40.0);
    }

    #[test]
    fn unknown_cadence_projects_zero_occurrences() {
        let p = project_monthly_revenue(
            &pricing(json!({"perSend": 50.0})),
            None,
            Some("quarterly"),
            1.0,
        );
        assert_eq!(p.monthly_revenue, 0.0);
        assert_eq!(p.model, Some(PricingModel::PerSend));
    }

    #[test]
    fn display_only_models_never_project() {
        let flat_rate = project_monthly_revenue(
            &pricing(json!({"flatRate": 100.0, "pricingModel": "flat_rate"})),
            None,
            Some("weekly"),
            1.0,
        );
        assert_eq!(flat_rate.monthly_revenue, 0.0);

        let cpc = project_monthly_revenue(
            &pricing(json!({"cpc": 2.0})),
            Some(&metrics(None, Some(10_000.0), None)),
            None,
            1.0,
        );
        assert_eq!(cpc.monthly_revenue, 0.0);
    }

    #[test]
    fn tier_lists_project_their_first_tier() {
        let p = project_monthly_revenue(
            &pricing(json!([
                {"pricing": {"monthly": 300.0}},
                {"pricing": {"monthly": 250.0}},
            ])),
            None,
            None,
            1.0,
        );
        assert_eq!(p.model, Some(PricingModel::Monthly));
        assert_eq!(p.monthly_revenue, 300.0);
    }

    #[test]
    fn empty_tier_list_is_unresolvable() {
        let p = project_monthly_revenue(&pricing(json!([])), None, Some("weekly"), 1.0);
        assert_eq!(p.model, None);
        assert_eq!(p.monthly_revenue, 0.0);
    }
}

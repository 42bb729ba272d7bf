use crate::types::{PriceField, PriceRecord, PricingModel};

/// Decide which pricing model a record is on. An explicit recognized
/// pricingModel tag always wins; otherwise the resolved field is mapped
/// through the fixed field-to-model table. A blank tag counts as unset; an
/// unrecognized tag yields no model rather than being reinterpreted from the
/// legacy fields.
pub fn infer_model(record: &PriceRecord, resolved: Option<PriceField>) -> Option<PricingModel> {
    match record.pricing_model.as_deref().map(str::trim) {
        Some(tag) if !tag.is_empty() => PricingModel::from_tag(tag),
        _ => resolved.map(PriceField::model),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tagged(tag: &str) -> PriceRecord {
        PriceRecord {
            pricing_model: Some(tag.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn explicit_tag_wins_over_populated_fields() {
        let record = PriceRecord {
            per_send: Some(50.0),
            pricing_model: Some("flat".to_string()),
            ..Default::default()
        };
        assert_eq!(
            infer_model(&record, Some(PriceField::PerSend)),
            Some(PricingModel::Flat)
        );
    }

    #[test]
    fn unrecognized_tag_is_not_reinterpreted() {
        let record = PriceRecord {
            flat_rate: Some(100.0),
            pricing_model: Some("sponsorship".to_string()),
            ..Default::default()
        };
        assert_eq!(infer_model(&record, Some(PriceField::FlatRate)), None);
    }

    #[test]
    fn blank_tag_falls_back_to_field_inference() {
        let record = PriceRecord {
            weekly: Some(75.0),
            pricing_model: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(
            infer_model(&record, Some(PriceField::Weekly)),
            Some(PricingModel::PerWeek)
        );
    }

    #[test]
    fn untagged_record_maps_the_resolved_field() {
        assert_eq!(
            infer_model(&PriceRecord::default(), Some(PriceField::Per30Second)),
            Some(PricingModel::PerSpot)
        );
        assert_eq!(
            infer_model(&PriceRecord::default(), Some(PriceField::Daily)),
            Some(PricingModel::PerDay)
        );
    }

    #[test]
    fn nothing_resolves_to_nothing() {
        assert_eq!(infer_model(&PriceRecord::default(), None), None);
    }

    #[test]
    fn contact_tag_is_a_model_without_an_amount() {
        assert_eq!(infer_model(&tagged("contact"), None), Some(PricingModel::Contact));
    }
}

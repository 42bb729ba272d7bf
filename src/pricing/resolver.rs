use crate::types::{PriceField, PriceRecord};

/// Scan the fixed priority order and return the first populated amount.
/// Zero counts as populated here: whether a zero price is shown is the
/// display layer's call, not the resolver's. Returns None when no known
/// field is set at all.
pub fn resolve_field(record: &PriceRecord) -> Option<(PriceField, f64)> {
    PriceField::ALL
        .iter()
        .find_map(|&field| record.field_value(field).map(|value| (field, value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_record_resolves_nothing() {
        assert_eq!(resolve_field(&PriceRecord::default()), None);
    }

    #[test]
    fn single_field_resolves_itself() {
        let record = PriceRecord {
            per_send: Some(50.0),
            ..Default::default()
        };
        assert_eq!(resolve_field(&record), Some((PriceField::PerSend, 50.0)));
    }

    #[test]
    fn multi_field_legacy_record_resolves_in_fixed_order() {
        // flatRate outranks cpm and perSend no matter how the record was built
        let record = PriceRecord {
            cpm: Some(12.0),
            per_send: Some(50.0),
            flat_rate: Some(100.0),
            ..Default::default()
        };
        assert_eq!(resolve_field(&record), Some((PriceField::FlatRate, 100.0)));
    }

    #[test]
    fn per_spot_outranks_timed_slots() {
        let record = PriceRecord {
            per_30_second: Some(80.0),
            per_spot: Some(90.0),
            ..Default::default()
        };
        assert_eq!(resolve_field(&record), Some((PriceField::PerSpot, 90.0)));
    }

    #[test]
    fn zero_is_a_found_value() {
        let record = PriceRecord {
            flat_rate: Some(0.0),
            ..Default::default()
        };
        assert_eq!(resolve_field(&record), Some((PriceField::FlatRate, 0.0)));
    }
}

use crate::config::frequency_multipliers::{BI_WEEKLY, DAILY, MONTHLY, WEEKLY};

/// Convert a cadence label to occurrences per average month. Labels outside
/// the table (quarterly, annual, irregular, on-demand, free text) convert to
/// 0: a cadence the table cannot price contributes no projected occurrences.
pub fn occurrences_per_month(frequency: &str) -> f64 {
    match frequency.trim().to_ascii_lowercase().as_str() {
        "daily" => DAILY,
        "weekly" => WEEKLY,
        "bi-weekly" => BI_WEEKLY,
        "monthly" => MONTHLY,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognized_labels_use_the_fixed_table() {
        assert_eq!(occurrences_per_month("daily"), 30.0);
        assert_eq!(occurrences_per_month("weekly"), 4.33);
        assert_eq!(occurrences_per_month("bi-weekly"), 2.17);
        assert_eq!(occurrences_per_month("monthly"), 1.0);
    }

    #[test]
    fn casing_and_padding_do_not_matter() {
        assert_eq!(occurrences_per_month(" Weekly "), 4.33);
        assert_eq!(occurrences_per_month("DAILY"), 30.0);
    }

    #[test]
    fn everything_else_is_zero() {
        assert_eq!(occurrences_per_month("quarterly"), 0.0);
        assert_eq!(occurrences_per_month("annual"), 0.0);
        assert_eq!(occurrences_per_month("on-demand"), 0.0);
        assert_eq!(occurrences_per_month(""), 0.0);
        assert_eq!(occurrences_per_month("whenever we feel like it"), 0.0);
    }
}

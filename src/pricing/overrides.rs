use crate::types::HubPriceOverride;

/// Filter a hub override list down to the entries safe to persist: non-empty
/// hub id and name, pricing a structured object. Invalid candidates are
/// dropped silently; half-filled rows are normal while a record is being
/// edited and must not block saving the rest. Running the merge twice yields
/// the same list as running it once.
pub fn merge_overrides(overrides: Vec<HubPriceOverride>) -> Vec<HubPriceOverride> {
    overrides.into_iter().filter(is_valid).collect()
}

fn is_valid(candidate: &HubPriceOverride) -> bool {
    let has_id = candidate.hub_id.as_deref().is_some_and(|s| !s.is_empty());
    let has_name = candidate.hub_name.as_deref().is_some_and(|s| !s.is_empty());
    has_id && has_name && candidate.pricing.is_object()
}

//! Tier normalization and display formatting.
//!
//! Turns whatever pricing shape a record carries into an ordered list of
//! renderable lines. Every path is total: garbage shapes come out as N/A
//! lines, never as errors.

use crate::pricing::{infer_model, resolve_field};
use crate::types::{
    Channel, DisplayAmount, DisplayLine, PriceField, PriceRecord, PricingInput, PricingModel,
};

/// Normalize a pricing input into display lines.
///
/// Tier lists map to one line per tier in input order. A single record with
/// an explicit recognized model yields exactly one line. Legacy untagged
/// records yield one line per populated non-zero field, so historical
/// multi-price data stays visible instead of being silently collapsed.
pub fn normalize(pricing: &PricingInput, channel: Option<Channel>) -> Vec<DisplayLine> {
    match pricing {
        PricingInput::Tiers(tiers) => tiers
            .iter()
            .map(|tier| tier_line(&tier.pricing, channel))
            .collect(),
        PricingInput::Single(record) => single_lines(record, channel),
    }
}

fn tier_line(record: &PriceRecord, channel: Option<Channel>) -> DisplayLine {
    let resolved = resolve_field(record);
    match infer_model(record, resolved.map(|(field, _)| field)) {
        Some(PricingModel::Contact) => DisplayLine {
            amount: DisplayAmount::Contact,
            unit_label: PricingModel::Contact.unit_label(channel),
        },
        Some(model) => DisplayLine {
            amount: resolved
                .map(|(_, value)| DisplayAmount::Value(value))
                .unwrap_or(DisplayAmount::Unpriced),
            unit_label: model.unit_label(channel),
        },
        None => DisplayLine::unavailable(),
    }
}

fn single_lines(record: &PriceRecord, channel: Option<Channel>) -> Vec<DisplayLine> {
    match record.pricing_model.as_deref().map(str::trim) {
        Some(tag) if !tag.is_empty() => vec![tagged_line(record, tag, channel)],
        _ => legacy_lines(record, channel),
    }
}

/// One line for a record with an explicit model tag. The amount lives in
/// `flatRate` in the canonical schema (`cpm` for impression models), with a
/// priority scan as the fallback for tagged records that kept their amount
/// in a legacy field.
fn tagged_line(record: &PriceRecord, tag: &str, channel: Option<Channel>) -> DisplayLine {
    match PricingModel::from_tag(tag) {
        Some(PricingModel::Contact) => DisplayLine {
            amount: DisplayAmount::Contact,
            unit_label: PricingModel::Contact.unit_label(channel),
        },
        Some(model) => {
            let amount = record
                .flat_rate
                .or(record.cpm)
                .or_else(|| resolve_field(record).map(|(_, value)| value));
            DisplayLine {
                amount: amount
                    .map(DisplayAmount::Value)
                    .unwrap_or(DisplayAmount::Unpriced),
                unit_label: model.unit_label(channel),
            }
        }
        None => DisplayLine::unavailable(),
    }
}

/// Legacy untagged records: one line per populated non-zero field, priority
/// order. Zero amounts count as unset here, because old editors wrote zeros
/// into every field they did not use.
fn legacy_lines(record: &PriceRecord, channel: Option<Channel>) -> Vec<DisplayLine> {
    let lines: Vec<DisplayLine> = PriceField::ALL
        .iter()
        .filter_map(|&field| record.field_value(field).map(|value| (field, value)))
        .filter(|&(_, value)| value != 0.0)
        .map(|(field, value)| DisplayLine {
            amount: DisplayAmount::Value(value),
            unit_label: field.model().unit_label(channel),
        })
        .collect();
    if lines.is_empty() {
        vec![DisplayLine::unavailable()]
    } else {
        lines
    }
}

use crate::config::catalog::{DatasetSpec, RowPolicy};
use crate::core::dates::parse_date;
use crate::domain::model::{ParsedRecord, RawRow};

/// Total conversion of a raw field to a numeric value. The literal `"NA"`
/// (exact match) is null; a parseable finite float is a value; anything else
/// is null. Never fails.
pub fn coerce_field(raw: &str) -> Option<f64> {
    if raw == "NA" {
        return None;
    }
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Some(v),
        _ => None,
    }
}

/// Applies date normalization and field coercion to every raw row. Rows with
/// an unparseable or missing date are dropped; all-null rows are dropped or
/// kept per the dataset's policy.
pub fn build_records(rows: &[RawRow], spec: &DatasetSpec) -> Vec<ParsedRecord> {
    rows.iter()
        .filter_map(|row| coerce_row(row, spec))
        .collect()
}

fn coerce_row(row: &RawRow, spec: &DatasetSpec) -> Option<ParsedRecord> {
    let date = row
        .get(spec.date_field.as_str())
        .and_then(|raw| parse_date(raw))?;

    let values: Vec<Option<f64>> = spec
        .fields
        .iter()
        .map(|field| {
            row.get(field.name.as_str())
                .and_then(|raw| coerce_field(raw))
                .map(|v| v * field.scale)
        })
        .collect();

    if spec.policy == RowPolicy::RequireAnySignal && values.iter().all(Option::is_none) {
        return None;
    }

    Some(ParsedRecord { date, values })
}

use crate::config::catalog::{DatasetSpec, FieldSpec, RowPolicy};
use crate::domain::model::{NamedSeries, SeriesSet};
use chrono::NaiveDate;

/// Agricultural commodity indices, charted as monthly means of the daily
/// quotes.
pub fn commodity_spec() -> DatasetSpec {
    DatasetSpec::new(
        "food_commodity",
        "commodity Food price.csv",
        vec![
            FieldSpec::plain("index"),
            FieldSpec::plain("corn"),
            FieldSpec::plain("rice"),
            FieldSpec::plain("wheat"),
        ],
    )
    .with_monthly_mean()
}

/// Year-on-year food inflation by region. The source stores fractions
/// (0.083 for 8.3%), so every field is scaled to percent on ingestion, and
/// sparse months are kept so the regional charts stay date-aligned.
pub fn inflation_spec() -> DatasetSpec {
    DatasetSpec::new(
        "food_inflation",
        "food price inflation.csv",
        vec![
            FieldSpec::scaled("developing", 100.0),
            FieldSpec::scaled("africa", 100.0),
            FieldSpec::scaled("asiaoceania", 100.0),
            FieldSpec::scaled("america", 100.0),
        ],
    )
    .with_policy(RowPolicy::KeepPartial)
}

pub fn price_index_spec() -> DatasetSpec {
    DatasetSpec::new(
        "food_price_index",
        "food pricee index.csv",
        vec![FieldSpec::plain("value")],
    )
}

pub fn datasets() -> Vec<DatasetSpec> {
    vec![commodity_spec(), inflation_spec(), price_index_spec()]
}

/// Compiled-in annual FAO index sample shown next to the fetched datasets.
pub fn sample_indices() -> SeriesSet {
    let years = [2014, 2015, 2016, 2017, 2018, 2019, 2020, 2021, 2022, 2023];
    let price = [
        100.0, 98.0, 105.0, 110.0, 115.0, 120.0, 118.0, 122.0, 130.0, 125.0,
    ];
    let production = [85.0, 88.0, 92.0, 95.0, 97.0, 99.0, 96.0, 94.0, 90.0, 93.0];

    SeriesSet {
        labels: years
            .iter()
            .filter_map(|&y| NaiveDate::from_ymd_opt(y, 1, 1))
            .collect(),
        series: vec![
            NamedSeries {
                name: "food_price_index".to_string(),
                points: price.iter().copied().map(Some).collect(),
            },
            NamedSeries {
                name: "food_production_index".to_string(),
                points: production.iter().copied().map(Some).collect(),
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commodity_schema() {
        let spec = commodity_spec();
        assert!(spec.monthly_mean);
        assert_eq!(spec.policy, RowPolicy::RequireAnySignal);
        let names: Vec<&str> = spec.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["index", "corn", "rice", "wheat"]);
    }

    #[test]
    fn test_inflation_schema_scales_to_percent() {
        let spec = inflation_spec();
        assert_eq!(spec.policy, RowPolicy::KeepPartial);
        assert!(spec.fields.iter().all(|f| f.scale == 100.0));
    }

    #[test]
    fn test_sample_indices_are_aligned() {
        let sample = sample_indices();
        assert!(sample.is_aligned());
        assert_eq!(sample.labels.len(), 10);
    }
}

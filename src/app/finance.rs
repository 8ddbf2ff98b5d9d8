use crate::config::catalog::{DatasetSpec, FieldSpec, RowPolicy};
use crate::domain::model::{NamedSeries, SeriesSet};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Exchange-rate index against the US dollar (Jan 1 2019 = 100).
pub fn exchange_index_spec() -> DatasetSpec {
    DatasetSpec::new(
        "finance_exchange",
        "plot_4a1.csv",
        vec![
            FieldSpec::plain("africa"),
            FieldSpec::plain("asiaoceania"),
            FieldSpec::plain("america"),
        ],
    )
}

/// International reserves in months of imports. Every column can be "NA";
/// rows are kept even when fully null so the three regional charts share one
/// date axis.
pub fn reserves_spec() -> DatasetSpec {
    DatasetSpec::new(
        "finance_reserves",
        "plot_4b2.csv",
        vec![
            FieldSpec::plain("developed_4b2"),
            FieldSpec::plain("developing_4b2"),
            FieldSpec::plain("africa_4b2"),
            FieldSpec::plain("asiaoceania_4b2"),
            FieldSpec::plain("america_4b2"),
        ],
    )
    .with_policy(RowPolicy::KeepPartial)
}

pub fn datasets() -> Vec<DatasetSpec> {
    vec![exchange_index_spec(), reserves_spec()]
}

/// Compiled-in annual US/EU inflation sample.
pub fn sample_inflation() -> SeriesSet {
    let years = [
        2012, 2013, 2014, 2015, 2016, 2017, 2018, 2019, 2020, 2021, 2022,
    ];
    let us = [
        2.07, 1.46, 1.62, 0.12, 1.26, 2.07, 1.91, 1.81, 1.25, 4.02, 8.0,
    ];
    let eu = [2.5, 1.3, 0.4, 0.0, 0.2, 1.5, 1.8, 1.4, 0.3, 2.9, 8.1];

    SeriesSet {
        labels: years
            .iter()
            .filter_map(|&y| NaiveDate::from_ymd_opt(y, 1, 1))
            .collect(),
        series: vec![
            NamedSeries {
                name: "united_states".to_string(),
                points: us.iter().copied().map(Some).collect(),
            },
            NamedSeries {
                name: "european_union".to_string(),
                points: eu.iter().copied().map(Some).collect(),
            },
        ],
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyRate {
    pub code: String,
    pub rate_usd: f64,
    pub yoy_change_pct: f64,
}

/// Compiled-in currency snapshot sample (USD per unit, year-on-year change).
pub fn sample_exchange_rates() -> Vec<CurrencyRate> {
    let rows = [
        ("EUR", 0.85, 1.2),
        ("JPY", 130.0, -5.3),
        ("INR", 75.0, 2.1),
        ("GBP", 0.72, 0.8),
        ("CNY", 6.75, -1.5),
    ];
    rows.iter()
        .map(|(code, rate, change)| CurrencyRate {
            code: code.to_string(),
            rate_usd: *rate,
            yoy_change_pct: *change,
        })
        .collect()
}

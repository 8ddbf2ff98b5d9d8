use crate::core::dates;
use crate::domain::model::{NamedSeries, SeriesSet};

/// Weekly GDP snapshot shown on the cross-cutting view. Static data; the
/// labels deliberately use the month-first numeric form so they flow through
/// the same normalizer as fetched sources.
pub fn gdp_series() -> SeriesSet {
    let rows = [
        ("01-07-2025", 0.031315666),
        ("01-14-2025", 0.031315666),
        ("01-21-2025", 0.031315666),
        ("01-28-2025", 0.031315666),
        ("02-04-2025", 0.032465484),
        ("02-11-2025", 0.032429159),
        ("02-18-2025", 0.032429159),
        ("02-25-2025", 0.032481402),
        ("03-04-2025", 0.03339183),
        ("03-11-2025", 0.033425957),
        ("03-18-2025", 0.03291994),
        ("03-25-2025", 0.03291994),
    ];

    let mut labels = Vec::with_capacity(rows.len());
    let mut points = Vec::with_capacity(rows.len());
    for (label, value) in rows {
        if let Some(date) = dates::parse_date(label) {
            labels.push(date);
            points.push(Some(value));
        }
    }

    SeriesSet {
        labels,
        series: vec![NamedSeries {
            name: "gdp".to_string(),
            points,
        }],
    }
}

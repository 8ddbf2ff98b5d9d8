use crate::core::aggregate::{count_by_key, rank_by_mean};
use crate::core::{coerce, dates, rows};
use crate::domain::model::{
    CrisisRecord, CrisisReport, GeographyRank, GeographyTimeline, RawRow, TimelinePoint,
};
use crate::domain::ports::Fetcher;
use crate::utils::error::{IngestError, Result};
use chrono::Datelike;
use std::collections::HashMap;
use std::sync::Arc;

/// How many of the ranked geographies feed the per-geography timelines.
const TIMELINE_GEOGRAPHIES: usize = 5;

fn text_field(row: &RawRow, key: &str, fallback: &str) -> String {
    row.get(key)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .unwrap_or(fallback)
        .to_string()
}

/// Cleans raw prediction rows. Only an unparseable date drops a row;
/// categorical gaps fall back to placeholder labels and numeric gaps to zero.
pub fn clean_records(raw_rows: &[RawRow]) -> Vec<CrisisRecord> {
    raw_rows
        .iter()
        .filter_map(|row| {
            let date = row.get("date").and_then(|raw| dates::parse_date(raw))?;
            Some(CrisisRecord {
                date,
                geography: text_field(row, "geography", ""),
                countries: text_field(row, "countries", ""),
                development_status: text_field(row, "development_status", "Unknown"),
                developing_region: text_field(row, "developing_region", "Unknown"),
                crisis_probability: row
                    .get("crisis_probability")
                    .and_then(|raw| coerce::coerce_field(raw))
                    .unwrap_or(0.0),
                crisis_predicted: row
                    .get("crisis_predicted")
                    .and_then(|raw| raw.trim().parse::<i64>().ok())
                    .unwrap_or(0),
                crisis_type: text_field(row, "crisis_type", "None"),
            })
        })
        .collect()
}

pub fn build_report(records: &[CrisisRecord], ranking_cutoff: usize) -> CrisisReport {
    // Display labels: the first countries string seen per geography.
    let mut countries_by_geography: HashMap<&str, &str> = HashMap::new();
    for record in records {
        countries_by_geography
            .entry(record.geography.as_str())
            .or_insert(record.countries.as_str());
    }

    let ranked = rank_by_mean(
        records
            .iter()
            .map(|r| (r.geography.clone(), r.crisis_probability)),
        Some(ranking_cutoff),
    );
    let top_geographies: Vec<GeographyRank> = ranked
        .into_iter()
        .map(|summary| GeographyRank {
            countries: countries_by_geography
                .get(summary.key.as_str())
                .unwrap_or(&"")
                .to_string(),
            geography: summary.key,
            count: summary.count,
            mean_probability: summary.mean,
        })
        .collect();

    let status_distribution =
        count_by_key(records.iter().map(|r| r.development_status.clone()));

    let mut regional_summary = rank_by_mean(
        records
            .iter()
            .map(|r| (r.developing_region.clone(), r.crisis_probability)),
        None,
    );
    regional_summary.retain(|summary| summary.key != "Unknown");

    let probability_timeline = top_geographies
        .iter()
        .take(TIMELINE_GEOGRAPHIES)
        .map(|rank| {
            let mut points: Vec<TimelinePoint> = records
                .iter()
                .filter(|r| r.geography == rank.geography)
                .map(|r| TimelinePoint {
                    month: format!("{:04}-{:02}", r.date.year(), r.date.month()),
                    probability: r.crisis_probability,
                })
                .collect();
            points.sort_by(|a, b| a.month.cmp(&b.month));
            GeographyTimeline {
                geography: rank.geography.clone(),
                countries: rank.countries.clone(),
                points,
            }
        })
        .collect();

    CrisisReport {
        top_geographies,
        status_distribution,
        regional_summary,
        probability_timeline,
    }
}

/// Full prediction pipeline: fetch, parse, clean, aggregate into the report.
pub async fn load(
    fetcher: Arc<dyn Fetcher>,
    resource: &str,
    ranking_cutoff: usize,
) -> Result<CrisisReport> {
    let text = fetcher.fetch_text(resource).await?;
    let raw_rows = rows::parse_rows(&text)?;
    let records = clean_records(&raw_rows);

    if records.is_empty() {
        return Err(IngestError::EmptyResult {
            dataset: "prediction".to_string(),
        });
    }

    tracing::info!("prediction: {} cleaned records", records.len());
    Ok(build_report(&records, ranking_cutoff))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(
        date: (i32, u32, u32),
        geography: &str,
        region: &str,
        status: &str,
        probability: f64,
    ) -> CrisisRecord {
        CrisisRecord {
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            geography: geography.to_string(),
            countries: geography.to_string(),
            development_status: status.to_string(),
            developing_region: region.to_string(),
            crisis_probability: probability,
            crisis_predicted: 0,
            crisis_type: "None".to_string(),
        }
    }

    fn raw(pairs: &[(&str, &str)]) -> RawRow {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_clean_records_defaults_and_drops() {
        let rows = vec![
            raw(&[
                ("date", "2025-01-07"),
                ("geography", "CHE"),
                ("countries", "Switzerland"),
                ("development_status", ""),
                ("crisis_probability", "0.82"),
                ("crisis_predicted", "1"),
                ("crisis_type", ""),
            ]),
            raw(&[("date", "not a date"), ("geography", "XXX")]),
        ];

        let cleaned = clean_records(&rows);
        assert_eq!(cleaned.len(), 1);
        let record = &cleaned[0];
        assert_eq!(record.development_status, "Unknown");
        assert_eq!(record.developing_region, "Unknown");
        assert_eq!(record.crisis_type, "None");
        assert_eq!(record.crisis_predicted, 1);
        assert!((record.crisis_probability - 0.82).abs() < 1e-12);
    }

    #[test]
    fn test_clean_records_zeroes_bad_probability() {
        let rows = vec![raw(&[
            ("date", "2025-01-07"),
            ("geography", "BEN"),
            ("crisis_probability", "NA"),
        ])];
        let cleaned = clean_records(&rows);
        assert_eq!(cleaned[0].crisis_probability, 0.0);
    }

    #[test]
    fn test_report_ranks_geographies_by_mean_probability() {
        let records = vec![
            record((2025, 1, 7), "BEN", "Africa", "Developing", 0.4),
            record((2025, 1, 7), "CHE", "Unknown", "Developed", 0.9),
            record((2025, 2, 4), "BEN", "Africa", "Developing", 0.6),
        ];
        let report = build_report(&records, 10);

        assert_eq!(report.top_geographies.len(), 2);
        assert_eq!(report.top_geographies[0].geography, "CHE");
        assert_eq!(report.top_geographies[1].geography, "BEN");
        assert_eq!(report.top_geographies[1].count, 2);
        assert!((report.top_geographies[1].mean_probability - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_report_cutoff_limits_ranking() {
        let records: Vec<CrisisRecord> = (0..15)
            .map(|i| {
                record(
                    (2025, 1, 7),
                    &format!("G{:02}", i),
                    "Africa",
                    "Developing",
                    i as f64 / 15.0,
                )
            })
            .collect();
        let report = build_report(&records, 10);
        assert_eq!(report.top_geographies.len(), 10);
        assert_eq!(report.top_geographies[0].geography, "G14");
    }

    #[test]
    fn test_report_filters_unknown_region_from_summary() {
        let records = vec![
            record((2025, 1, 7), "CHE", "Unknown", "Developed", 0.9),
            record((2025, 1, 7), "BEN", "Africa", "Developing", 0.4),
        ];
        let report = build_report(&records, 10);

        assert_eq!(report.regional_summary.len(), 1);
        assert_eq!(report.regional_summary[0].key, "Africa");
    }

    #[test]
    fn test_report_status_distribution_counts() {
        let records = vec![
            record((2025, 1, 7), "A", "Africa", "Developing", 0.1),
            record((2025, 1, 7), "B", "Africa", "Developing", 0.2),
            record((2025, 1, 7), "C", "Africa", "Developed", 0.3),
        ];
        let report = build_report(&records, 10);

        assert_eq!(report.status_distribution.len(), 2);
        assert_eq!(report.status_distribution[0].name, "Developing");
        assert_eq!(report.status_distribution[0].count, 2);
    }

    #[test]
    fn test_timeline_is_chronological_per_geography() {
        let records = vec![
            record((2025, 3, 4), "BEN", "Africa", "Developing", 0.6),
            record((2025, 1, 7), "BEN", "Africa", "Developing", 0.4),
            record((2025, 2, 4), "BEN", "Africa", "Developing", 0.5),
        ];
        let report = build_report(&records, 10);

        let months: Vec<&str> = report.probability_timeline[0]
            .points
            .iter()
            .map(|p| p.month.as_str())
            .collect();
        assert_eq!(months, vec!["2025-01", "2025-02", "2025-03"]);
    }
}

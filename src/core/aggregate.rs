use crate::domain::model::{CategoryCount, GroupSummary, ParsedRecord};
use chrono::{Datelike, NaiveDate};
use std::collections::HashMap;

/// One year-month bucket of records, finalized to per-field means. Buckets
/// keep the order in which their key was first encountered, not calendar
/// order; callers that need chronological output re-sort the labels.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyBucket {
    pub key: String,
    pub first_date: NaiveDate,
    pub means: Vec<Option<f64>>,
}

struct BucketAccumulator {
    first_date: NaiveDate,
    sums: Vec<f64>,
    counts: Vec<usize>,
}

pub fn bucket_key(date: NaiveDate) -> String {
    format!("{}-{}", date.year(), date.month())
}

/// Groups records by (year, month) and takes the arithmetic mean of each
/// field over only its non-null contributions. A field that is null for some
/// record simply does not take part in that bucket's mean; a field null for
/// the whole bucket stays null.
pub fn monthly_means(records: &[ParsedRecord], field_count: usize) -> Vec<MonthlyBucket> {
    let mut order: Vec<String> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut accumulators: Vec<BucketAccumulator> = Vec::new();

    for record in records {
        let key = bucket_key(record.date);
        let slot = *index.entry(key.clone()).or_insert_with(|| {
            order.push(key);
            accumulators.push(BucketAccumulator {
                first_date: record.date,
                sums: vec![0.0; field_count],
                counts: vec![0; field_count],
            });
            accumulators.len() - 1
        });

        let acc = &mut accumulators[slot];
        for (i, value) in record.values.iter().enumerate().take(field_count) {
            if let Some(v) = value {
                acc.sums[i] += v;
                acc.counts[i] += 1;
            }
        }
    }

    order
        .into_iter()
        .zip(accumulators)
        .map(|(key, acc)| MonthlyBucket {
            key,
            first_date: acc.first_date,
            means: acc
                .sums
                .iter()
                .zip(&acc.counts)
                .map(|(sum, count)| {
                    if *count > 0 {
                        Some(sum / *count as f64)
                    } else {
                        None
                    }
                })
                .collect(),
        })
        .collect()
}

/// Count and mean per distinct categorical key, ranked by descending mean.
/// Ties keep first-seen order (the sort is stable) so output is
/// deterministic. `cutoff` truncates the ranked list without re-sorting.
pub fn rank_by_mean<I>(entries: I, cutoff: Option<usize>) -> Vec<GroupSummary>
where
    I: IntoIterator<Item = (String, f64)>,
{
    let mut order: Vec<String> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut totals: Vec<(f64, usize)> = Vec::new();

    for (key, value) in entries {
        let slot = *index.entry(key.clone()).or_insert_with(|| {
            order.push(key);
            totals.push((0.0, 0));
            totals.len() - 1
        });
        totals[slot].0 += value;
        totals[slot].1 += 1;
    }

    let mut summaries: Vec<GroupSummary> = order
        .into_iter()
        .zip(totals)
        .map(|(key, (total, count))| GroupSummary {
            key,
            count,
            mean: total / count as f64,
        })
        .collect();

    summaries.sort_by(|a, b| {
        b.mean
            .partial_cmp(&a.mean)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    if let Some(cutoff) = cutoff {
        summaries.truncate(cutoff);
    }
    summaries
}

/// Occurrence count per distinct key, in first-seen order.
pub fn count_by_key<I>(keys: I) -> Vec<CategoryCount>
where
    I: IntoIterator<Item = String>,
{
    let mut order: Vec<String> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<usize> = Vec::new();

    for key in keys {
        let slot = *index.entry(key.clone()).or_insert_with(|| {
            order.push(key);
            counts.push(0);
            counts.len() - 1
        });
        counts[slot] += 1;
    }

    order
        .into_iter()
        .zip(counts)
        .map(|(name, count)| CategoryCount { name, count })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: &str, values: Vec<Option<f64>>) -> ParsedRecord {
        ParsedRecord {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            values,
        }
    }

    #[test]
    fn test_monthly_mean_over_non_null_values() {
        let records = vec![
            record("2022-01-03", vec![Some(2.0)]),
            record("2022-01-10", vec![Some(4.0)]),
            record("2022-01-17", vec![Some(6.0)]),
        ];
        let buckets = monthly_means(&records, 1);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].key, "2022-1");
        assert_eq!(buckets[0].means, vec![Some(4.0)]);
    }

    #[test]
    fn test_monthly_mean_skips_nulls_instead_of_zeroing() {
        let records = vec![
            record("2022-01-03", vec![Some(2.0)]),
            record("2022-01-10", vec![None]),
            record("2022-01-17", vec![Some(6.0)]),
        ];
        let buckets = monthly_means(&records, 1);
        assert_eq!(buckets[0].means, vec![Some(4.0)]);
    }

    #[test]
    fn test_monthly_mean_all_null_field_stays_null() {
        let records = vec![
            record("2022-01-03", vec![None, Some(1.0)]),
            record("2022-01-10", vec![None, Some(3.0)]),
        ];
        let buckets = monthly_means(&records, 2);
        assert_eq!(buckets[0].means, vec![None, Some(2.0)]);
    }

    #[test]
    fn test_buckets_keep_first_encountered_order() {
        // Input is deliberately not chronological.
        let records = vec![
            record("2022-03-01", vec![Some(1.0)]),
            record("2022-01-15", vec![Some(2.0)]),
            record("2022-03-20", vec![Some(3.0)]),
        ];
        let buckets = monthly_means(&records, 1);
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].key, "2022-3");
        assert_eq!(buckets[1].key, "2022-1");
        assert_eq!(
            buckets[0].first_date,
            NaiveDate::from_ymd_opt(2022, 3, 1).unwrap()
        );
    }

    #[test]
    fn test_bucket_key_has_no_zero_padding() {
        assert_eq!(
            bucket_key(NaiveDate::from_ymd_opt(2019, 1, 31).unwrap()),
            "2019-1"
        );
        assert_eq!(
            bucket_key(NaiveDate::from_ymd_opt(2019, 12, 1).unwrap()),
            "2019-12"
        );
    }

    #[test]
    fn test_rank_by_mean_descending() {
        let entries = vec![
            ("A".to_string(), 10.0),
            ("B".to_string(), 30.0),
            ("A".to_string(), 20.0),
        ];
        let ranked = rank_by_mean(entries, None);
        assert_eq!(
            ranked,
            vec![
                GroupSummary {
                    key: "B".to_string(),
                    count: 1,
                    mean: 30.0
                },
                GroupSummary {
                    key: "A".to_string(),
                    count: 2,
                    mean: 15.0
                },
            ]
        );
    }

    #[test]
    fn test_rank_by_mean_ties_are_stable() {
        let entries = vec![
            ("first".to_string(), 5.0),
            ("second".to_string(), 5.0),
            ("third".to_string(), 5.0),
        ];
        let ranked = rank_by_mean(entries, None);
        let keys: Vec<&str> = ranked.iter().map(|s| s.key.as_str()).collect();
        assert_eq!(keys, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_rank_by_mean_cutoff_truncates_after_sorting() {
        let entries = vec![
            ("low".to_string(), 1.0),
            ("high".to_string(), 9.0),
            ("mid".to_string(), 5.0),
        ];
        let ranked = rank_by_mean(entries, Some(2));
        let keys: Vec<&str> = ranked.iter().map(|s| s.key.as_str()).collect();
        assert_eq!(keys, vec!["high", "mid"]);
    }

    #[test]
    fn test_count_by_key() {
        let counts = count_by_key(
            ["Developing", "Developed", "Developing"]
                .iter()
                .map(|s| s.to_string()),
        );
        assert_eq!(
            counts,
            vec![
                CategoryCount {
                    name: "Developing".to_string(),
                    count: 2
                },
                CategoryCount {
                    name: "Developed".to_string(),
                    count: 1
                },
            ]
        );
    }
}

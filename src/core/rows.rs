use crate::domain::model::RawRow;
use crate::utils::error::{IngestError, Result};

/// Header-driven split of comma-separated text into raw rows. The first line
/// names the fields; every following non-empty line becomes one row keyed by
/// those names. Short rows are tolerated (missing trailing fields stay
/// absent), extra fields beyond the header are dropped.
pub fn parse_rows(text: &str) -> Result<Vec<RawRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| IngestError::Parse {
            detail: format!("unreadable header line: {}", e),
        })?
        .iter()
        .map(str::to_string)
        .collect();

    if headers.is_empty() || headers.iter().all(|h| h.trim().is_empty()) {
        return Err(IngestError::Parse {
            detail: "missing header line".to_string(),
        });
    }

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        if record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }

        let mut row = RawRow::with_capacity(headers.len());
        for (i, field) in record.iter().enumerate() {
            if let Some(name) = headers.get(i) {
                row.insert(name.clone(), field.to_string());
            }
        }
        rows.push(row);
    }

    Ok(rows)
}

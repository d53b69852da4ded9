use std::path::Path;

use tracing::{debug, info};

pub mod reader;

use crate::error::{EnrichError, Result};
use reader::{inner_extension, open_maybe_gz};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleRow {
    pub protein: String,
    pub gene: String,
}

/// Loaded once per run; column order is fixed to (protein, gene).
#[derive(Debug, Clone, Default)]
pub struct SampleTable {
    rows: Vec<SampleRow>,
}

impl SampleTable {
    pub fn new(rows: Vec<SampleRow>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn proteins(&self) -> Vec<String> {
        self.rows.iter().map(|r| r.protein.clone()).collect()
    }

    pub fn genes(&self) -> Vec<String> {
        self.rows.iter().map(|r| r.gene.clone()).collect()
    }
}

pub fn delimiter_for(path: &Path) -> u8 {
    match inner_extension(path).as_deref() {
        Some("tsv") | Some("txt") | Some("tab") => b'\t',
        _ => b',',
    }
}

pub fn load_sample_table(path: &Path) -> Result<SampleTable> {
    if !path.exists() {
        return Err(EnrichError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("input table not found: {}", path.display()),
        )));
    }
    let reader = open_maybe_gz(path)?;
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(delimiter_for(path))
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let header = csv_reader.headers()?.clone();
    if header.len() < 2 {
        return Err(EnrichError::Parse(format!(
            "{}: expected at least two columns, header has {}",
            path.display(),
            header.len()
        )));
    }
    debug!(
        "renaming input columns '{}', '{}' to protein, gene",
        &header[0], &header[1]
    );

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        if record.iter().all(str::is_empty) {
            continue;
        }
        if record.len() < 2 {
            return Err(EnrichError::Parse(format!(
                "{} line {}: expected at least two fields, found {}",
                path.display(),
                line,
                record.len()
            )));
        }
        rows.push(SampleRow {
            protein: record[0].to_string(),
            gene: record[1].to_string(),
        });
    }

    info!("loaded {} rows from {}", rows.len(), path.display());
    Ok(SampleTable::new(rows))
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/table.rs"]
mod tests;

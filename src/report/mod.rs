use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::error::Result;
use crate::model::result::{EnrichResult, EnrichRow, RESULT_COLUMNS};

/// Shortest representation that parses back to the same value; magnitudes
/// below 1e-4 use exponent notation (`2.19e-61`).
pub fn format_f64(v: f64) -> String {
    if v.is_nan() {
        "NA".to_string()
    } else if v != 0.0 && v.abs() < 1e-4 {
        format!("{:e}", v)
    } else {
        format!("{}", v)
    }
}

pub fn format_ratio((num, den): (usize, usize)) -> String {
    format!("{num}/{den}")
}

pub fn row_fields(row: &EnrichRow) -> [String; 9] {
    [
        row.id.clone(),
        row.description.clone(),
        format_ratio(row.gene_ratio),
        format_ratio(row.bg_ratio),
        format_f64(row.pvalue),
        format_f64(row.p_adjust),
        row.qvalue.map(format_f64).unwrap_or_else(|| "NA".to_string()),
        row.gene_ids.join("/"),
        row.count().to_string(),
    ]
}

/// Dumps the result table as CSV: header row, every field quoted, no index.
pub fn write_result(result: &EnrichResult, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .from_path(path)?;
    writer.write_record(RESULT_COLUMNS)?;
    for row in result.result_table() {
        writer.write_record(row_fields(row))?;
    }
    writer.flush()?;
    debug!(
        "{} {} ({}): {} input IDs, universe {}, ontology {:?}, adjust {}",
        result.species,
        result.organism,
        result.key_type,
        result.gene.len(),
        result.universe_size,
        result.ontology,
        result.params.adjust
    );
    info!(
        "wrote {} rows to {}",
        result.result_table().len(),
        path.display()
    );
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;

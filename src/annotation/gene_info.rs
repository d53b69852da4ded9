use std::io::BufRead;

use crate::error::{EnrichError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneRecord {
    pub gene_id: String,
    pub symbol: String,
}

/// Parses NCBI `gene_info` rows, keeping only `taxon` when given.
pub fn parse_gene_info<R: BufRead>(
    mut reader: R,
    taxon: Option<u32>,
) -> Result<Vec<GeneRecord>> {
    let mut buf = String::new();
    let mut records = Vec::new();
    let mut line_no = 0usize;

    loop {
        buf.clear();
        let read = reader.read_line(&mut buf)?;
        if read == 0 {
            break;
        }
        line_no += 1;
        let line = buf.trim_end();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let cols: Vec<&str> = line.split('\t').collect();
        if cols.len() < 3 {
            return Err(EnrichError::Parse(format!(
                "gene_info line {} has <3 columns",
                line_no
            )));
        }
        let tax_id: u32 = cols[0].trim().parse().map_err(|_| {
            EnrichError::Parse(format!(
                "gene_info line {}: invalid tax_id '{}'",
                line_no, cols[0]
            ))
        })?;
        if taxon.is_some_and(|t| t != tax_id) {
            continue;
        }
        let symbol = cols[2].trim();
        if symbol.is_empty() || symbol == "-" {
            continue;
        }
        records.push(GeneRecord {
            gene_id: cols[1].trim().to_string(),
            symbol: symbol.to_string(),
        });
    }

    Ok(records)
}

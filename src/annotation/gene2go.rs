use std::io::BufRead;

use tracing::debug;

use crate::error::{EnrichError, Result};
use crate::model::species::Ontology;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoAnnotation {
    pub gene_id: String,
    pub go_id: String,
    pub term: String,
    pub ontology: Ontology,
}

/// Parses NCBI `gene2go`. Negated (`NOT ...`) annotations are skipped.
pub fn parse_gene2go<R: BufRead>(
    mut reader: R,
    taxon: Option<u32>,
) -> Result<Vec<GoAnnotation>> {
    let mut buf = String::new();
    let mut out = Vec::new();
    let mut line_no = 0usize;
    let mut negated = 0usize;

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
        if cols.len() < 8 {
            return Err(EnrichError::Parse(format!(
                "gene2go line {} has <8 columns",
                line_no
            )));
        }
        if let Some(t) = taxon {
            if cols[0].trim() != t.to_string() {
                continue;
            }
        }
        let qualifier = cols[4].trim();
        if qualifier.starts_with("NOT") {
            negated += 1;
            continue;
        }
        let Some(ontology) = Ontology::from_gene2go_category(cols[7].trim()) else {
            return Err(EnrichError::Parse(format!(
                "gene2go line {}: unknown category '{}'",
                line_no, cols[7]
            )));
        };
        out.push(GoAnnotation {
            gene_id: cols[1].trim().to_string(),
            go_id: cols[2].trim().to_string(),
            term: cols[5].trim().to_string(),
            ontology,
        });
    }

    if negated > 0 {
        debug!("skipped {} negated gene2go annotations", negated);
    }
    Ok(out)
}

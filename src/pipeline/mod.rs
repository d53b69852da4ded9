use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::enrich::{go_enrichment, kegg_enrichment};
use crate::error::Result;
use crate::input::load_sample_table;
use crate::mapping::{map_to_entrez, map_to_uniprot};
use crate::model::params::EnrichParams;
use crate::model::species::{Ontology, Species};
use crate::report::write_result;
use crate::services::Backends;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    Kegg,
    Go,
}

impl OutputKind {
    pub fn suffix(self) -> &'static str {
        match self {
            OutputKind::Kegg => "_KEGG",
            OutputKind::Go => "_GO",
        }
    }
}

#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    pub do_kegg: bool,
    pub do_go: bool,
    pub ontology: Ontology,
    pub params: EnrichParams,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            do_kegg: true,
            do_go: false,
            ontology: Ontology::Bp,
            params: EnrichParams::default(),
        }
    }
}

pub fn output_path(prefix: &str, kind: OutputKind) -> PathBuf {
    PathBuf::from(format!("{}{}.csv", prefix, kind.suffix()))
}

/// Runs the requested enrichments and returns the files written.
pub fn analyze(
    input_path: &Path,
    output_prefix: &str,
    species: &str,
    options: &AnalyzeOptions,
    backends: &Backends<'_>,
) -> Result<Vec<PathBuf>> {
    let species: Species = species.parse()?;
    options.params.validate()?;

    let table = load_sample_table(input_path)?;
    if table.is_empty() {
        warn!("{} has no data rows", input_path.display());
    }
    let mut written = Vec::new();

    if options.do_kegg {
        let ids = map_to_uniprot(&table, species, backends)?;
        let result = kegg_enrichment(&ids, species, &options.params, backends.kegg)?;
        let path = output_path(output_prefix, OutputKind::Kegg);
        write_result(&result, &path)?;
        written.push(path);
    }

    if options.do_go {
        match species {
            Species::Avium => {
                warn!("GO enrichment is not implemented for avium; skipping");
            }
            Species::Abscessus => {
                let ids = map_to_entrez(&table, species, backends)?;
                let result = go_enrichment(
                    &ids,
                    species,
                    options.ontology,
                    &options.params,
                    backends.orgdb,
                )?;
                let path = output_path(output_prefix, OutputKind::Go);
                write_result(&result, &path)?;
                written.push(path);
            }
        }
    }

    info!("analysis finished: {} file(s) written", written.len());
    Ok(written)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/analyze.rs"]
mod tests;

use tracing::info;

use crate::annotation::OrgDb;
use crate::enrich::ora::over_representation;
use crate::error::{EnrichError, Result};
use crate::model::params::EnrichParams;
use crate::model::result::{EnrichResult, EnrichRow};
use crate::model::species::{Ontology, Species};

pub const GO_KEY_TYPE: &str = "ENTREZID";

/// GO over-representation of Entrez IDs; `geneID` is reported as symbols.
pub fn go_enrichment(
    ids: &[String],
    species: Species,
    ontology: Ontology,
    params: &EnrichParams,
    orgdb: Option<&OrgDb>,
) -> Result<EnrichResult> {
    match species {
        Species::Avium => Err(EnrichError::not_supported("GO enrichment", species)),
        Species::Abscessus => {
            let orgdb = orgdb.ok_or_else(|| {
                EnrichError::MissingInput(
                    "GO enrichment for abscessus needs an annotation database (--orgdb)"
                        .to_string(),
                )
            })?;
            let sets = orgdb.go_sets(ontology)?;
            let mut table = over_representation(ids, sets, params)?;
            make_readable(&mut table.rows, orgdb);
            info!(
                "GO {} enrichment ({}): {} of {} terms pass cutoffs",
                ontology,
                species,
                table.rows.len(),
                sets.len()
            );
            Ok(EnrichResult {
                species,
                organism: species.name().to_string(),
                key_type: GO_KEY_TYPE.to_string(),
                ontology: Some(ontology),
                params: params.clone(),
                gene: ids.to_vec(),
                universe_size: table.universe_size,
                result: table.rows,
            })
        }
    }
}

fn make_readable(rows: &mut [EnrichRow], orgdb: &OrgDb) {
    for row in rows {
        for id in row.gene_ids.iter_mut() {
            if let Some(symbol) = orgdb.entrez_symbol(id) {
                *id = symbol.to_string();
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/enrich/go.rs"]
mod tests;

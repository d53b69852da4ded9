use tracing::info;

use crate::enrich::ora::over_representation;
use crate::error::Result;
use crate::model::params::EnrichParams;
use crate::model::result::EnrichResult;
use crate::model::species::Species;
use crate::services::KeggSource;

/// Input identifiers are always UniProt accessions.
pub const KEGG_KEY_TYPE: &str = "uniprot";

pub fn kegg_enrichment(
    ids: &[String],
    species: Species,
    params: &EnrichParams,
    kegg: &dyn KeggSource,
) -> Result<EnrichResult> {
    let organism = species.kegg_code();

    let sets = kegg.pathway_sets(organism)?;
    let table = over_representation(ids, &sets, params)?;
    info!(
        "KEGG enrichment ({}): {} of {} pathways pass cutoffs",
        organism,
        table.rows.len(),
        sets.len()
    );

    Ok(EnrichResult {
        species,
        organism: organism.to_string(),
        key_type: KEGG_KEY_TYPE.to_string(),
        ontology: None,
        params: params.clone(),
        gene: ids.to_vec(),
        universe_size: table.universe_size,
        result: table.rows,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/enrich/kegg.rs"]
mod tests;

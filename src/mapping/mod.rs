use tracing::info;

use crate::error::{EnrichError, Result};
use crate::input::SampleTable;
use crate::model::species::{ABSCESSUS_UNIPROT_TAXON, Species};
use crate::services::Backends;

pub fn map_to_uniprot(
    table: &SampleTable,
    species: Species,
    backends: &Backends<'_>,
) -> Result<Vec<String>> {
    match species {
        Species::Avium => Ok(table.proteins()),
        Species::Abscessus => {
            let entrez = symbols_to_entrez(table, backends)?;
            let accessions = backends
                .uniprot
                .entrez_to_uniprot(&entrez, ABSCESSUS_UNIPROT_TAXON)?;
            info!(
                "mapped {} Entrez IDs to {} UniProt accessions",
                entrez.len(),
                accessions.len()
            );
            Ok(accessions)
        }
    }
}

pub fn map_to_entrez(
    table: &SampleTable,
    species: Species,
    backends: &Backends<'_>,
) -> Result<Vec<String>> {
    match species {
        Species::Avium => Err(EnrichError::not_supported("Entrez ID mapping", species)),
        Species::Abscessus => symbols_to_entrez(table, backends),
    }
}

fn symbols_to_entrez(table: &SampleTable, backends: &Backends<'_>) -> Result<Vec<String>> {
    let orgdb = backends.orgdb()?;
    let entrez = orgdb.symbols_to_entrez(&table.genes());
    info!(
        "mapped {} gene symbols to {} Entrez IDs",
        table.len(),
        entrez.len()
    );
    Ok(entrez)
}

#[cfg(test)]
#[path = "../../tests/src_inline/mapping/tests.rs"]
mod tests;

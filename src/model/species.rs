use std::fmt;
use std::str::FromStr;

use crate::error::EnrichError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Species {
    Avium,
    Abscessus,
}

/// NCBI taxon that UniProt lookups for M. abscessus are scoped to.
pub const ABSCESSUS_UNIPROT_TAXON: u32 = 36809;

impl Species {
    pub fn name(self) -> &'static str {
        match self {
            Species::Avium => "avium",
            Species::Abscessus => "abscessus",
        }
    }

    pub fn kegg_code(self) -> &'static str {
        match self {
            Species::Avium => "mav",
            Species::Abscessus => "mab",
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Species {
    type Err = EnrichError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "avium" => Ok(Species::Avium),
            "abscessus" => Ok(Species::Abscessus),
            _ => Err(EnrichError::UnknownSpecies(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Ontology {
    Bp,
    Mf,
    Cc,
}

impl Ontology {
    pub fn code(self) -> &'static str {
        match self {
            Ontology::Bp => "BP",
            Ontology::Mf => "MF",
            Ontology::Cc => "CC",
        }
    }

    /// Category column of NCBI gene2go.
    pub fn from_gene2go_category(category: &str) -> Option<Self> {
        match category {
            "Process" => Some(Ontology::Bp),
            "Function" => Some(Ontology::Mf),
            "Component" => Some(Ontology::Cc),
            _ => None,
        }
    }

    /// `namespace:` value of a GO OBO term stanza.
    pub fn from_obo_namespace(namespace: &str) -> Option<Self> {
        match namespace {
            "biological_process" => Some(Ontology::Bp),
            "molecular_function" => Some(Ontology::Mf),
            "cellular_component" => Some(Ontology::Cc),
            _ => None,
        }
    }
}

impl fmt::Display for Ontology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Ontology {
    type Err = EnrichError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BP" => Ok(Ontology::Bp),
            "MF" => Ok(Ontology::Mf),
            "CC" => Ok(Ontology::Cc),
            other => Err(EnrichError::InvalidParameter(format!(
                "invalid ontology '{other}' (use BP|MF|CC)"
            ))),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/species.rs"]
mod tests;

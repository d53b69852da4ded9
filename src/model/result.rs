use crate::model::params::EnrichParams;
use crate::model::species::{Ontology, Species};

#[derive(Debug, Clone, PartialEq)]
pub struct EnrichRow {
    pub id: String,
    pub description: String,
    /// Sample genes in the term, over annotated sample genes.
    pub gene_ratio: (usize, usize),
    /// Term size, over universe size.
    pub bg_ratio: (usize, usize),
    pub pvalue: f64,
    pub p_adjust: f64,
    pub qvalue: Option<f64>,
    pub gene_ids: Vec<String>,
}

impl EnrichRow {
    pub fn count(&self) -> usize {
        self.gene_ids.len()
    }
}

#[derive(Debug, Clone)]
pub struct EnrichResult {
    pub species: Species,
    pub organism: String,
    pub key_type: String,
    pub ontology: Option<Ontology>,
    pub params: EnrichParams,
    pub gene: Vec<String>,
    pub universe_size: usize,
    pub result: Vec<EnrichRow>,
}

impl EnrichResult {
    pub fn result_table(&self) -> &[EnrichRow] {
        &self.result
    }
}

pub const RESULT_COLUMNS: [&str; 9] = [
    "ID",
    "Description",
    "GeneRatio",
    "BgRatio",
    "pvalue",
    "p.adjust",
    "qvalue",
    "geneID",
    "Count",
];

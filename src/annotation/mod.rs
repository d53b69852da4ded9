//! Organism annotation database built from NCBI `gene_info` and `gene2go`
//! dumps, with optional GO ancestor propagation from an OBO file.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::{Path, PathBuf};

use tracing::{info, warn};

pub mod gene2go;
pub mod gene_info;
pub mod obo;

use crate::error::{EnrichError, Result};
use crate::input::reader::open_maybe_gz;
use crate::model::gene_sets::GeneSets;
use crate::model::species::Ontology;
use gene2go::{GoAnnotation, parse_gene2go};
use gene_info::{GeneRecord, parse_gene_info};
use obo::{GoDag, parse_obo};

#[derive(Debug, Clone, Default)]
pub struct OrgDb {
    symbol_to_entrez: HashMap<String, Vec<String>>,
    entrez_to_symbol: HashMap<String, String>,
    go: BTreeMap<Ontology, GeneSets>,
}

#[derive(Debug, Clone)]
pub struct OrgDbPaths {
    pub gene_info: PathBuf,
    pub gene2go: PathBuf,
    pub obo: Option<PathBuf>,
}

impl OrgDb {
    pub fn load_dir(dir: &Path, taxon: Option<u32>) -> Result<Self> {
        let paths = discover_paths(dir)?;
        info!(
            "discovered annotation files: gene_info={}, gene2go={}, obo={}",
            paths.gene_info.display(),
            paths.gene2go.display(),
            paths
                .obo
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "none".to_string())
        );
        Self::load(&paths, taxon)
    }

    pub fn load(paths: &OrgDbPaths, taxon: Option<u32>) -> Result<Self> {
        let genes = parse_gene_info(open_maybe_gz(&paths.gene_info)?, taxon)?;
        let annotations = parse_gene2go(open_maybe_gz(&paths.gene2go)?, taxon)?;
        let dag = match &paths.obo {
            Some(path) => {
                let dag = parse_obo(open_maybe_gz(path)?)?;
                if dag.is_empty() {
                    warn!(
                        "{} has no [Term] stanzas; GO terms are not propagated",
                        path.display()
                    );
                } else {
                    info!("GO graph: {} terms from {}", dag.len(), path.display());
                }
                Some(dag)
            }
            None => None,
        };
        if genes.is_empty() {
            warn!("gene_info yielded no genes (taxon filter: {:?})", taxon);
        }
        let db = Self::from_records(&genes, &annotations, dag.as_ref());
        info!(
            "annotation database: {} symbols, {} GO terms",
            db.symbol_to_entrez.len(),
            db.go.values().map(GeneSets::len).sum::<usize>()
        );
        Ok(db)
    }

    pub fn from_records(
        genes: &[GeneRecord],
        annotations: &[GoAnnotation],
        dag: Option<&GoDag>,
    ) -> Self {
        let mut symbol_to_entrez: HashMap<String, Vec<String>> = HashMap::new();
        let mut entrez_to_symbol = HashMap::new();
        for gene in genes {
            let ids = symbol_to_entrez.entry(gene.symbol.clone()).or_default();
            if !ids.contains(&gene.gene_id) {
                ids.push(gene.gene_id.clone());
            }
            entrez_to_symbol
                .entry(gene.gene_id.clone())
                .or_insert_with(|| gene.symbol.clone());
        }

        let mut go: BTreeMap<Ontology, GeneSets> = BTreeMap::new();
        let mut ancestor_cache: HashMap<String, Vec<String>> = HashMap::new();
        let mut obsolete = 0usize;
        for ann in annotations {
            let term_id = dag
                .map(|d| d.canonical(&ann.go_id).to_string())
                .unwrap_or_else(|| ann.go_id.clone());
            if dag
                .and_then(|d| d.term(&term_id))
                .is_some_and(|t| t.obsolete)
            {
                obsolete += 1;
                continue;
            }
            let sets = go.entry(ann.ontology).or_default();
            sets.insert(&term_id, &ann.gene_id);
            if sets.name(&term_id).is_none() {
                let name = dag
                    .and_then(|d| d.term(&term_id))
                    .map(|t| t.name.as_str())
                    .filter(|n| !n.is_empty())
                    .unwrap_or(ann.term.as_str());
                sets.set_name(&term_id, name);
            }

            let Some(dag) = dag else {
                continue;
            };
            let ancestors = ancestor_cache.entry(term_id.clone()).or_insert_with(|| {
                dag.ancestors(&term_id)
                    .into_iter()
                    .filter(|a| {
                        dag.term(a)
                            .is_some_and(|t| t.namespace.is_none_or(|ns| ns == ann.ontology))
                    })
                    .collect()
            });
            for ancestor in ancestors.iter() {
                sets.insert(ancestor, &ann.gene_id);
                if sets.name(ancestor).is_none() {
                    if let Some(term) = dag.term(ancestor) {
                        sets.set_name(ancestor, &term.name);
                    }
                }
            }
        }

        if obsolete > 0 {
            warn!("skipped {} annotations to obsolete GO terms", obsolete);
        }

        Self {
            symbol_to_entrez,
            entrez_to_symbol,
            go,
        }
    }

    /// Symbol to Entrez conversion; unmapped and empty symbols are dropped.
    pub fn symbols_to_entrez(&self, symbols: &[String]) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut out = Vec::with_capacity(symbols.len());
        let mut requested = 0usize;
        let mut failed = 0usize;
        for symbol in symbols {
            let symbol = symbol.trim();
            if symbol.is_empty() || !seen.insert(symbol) {
                continue;
            }
            requested += 1;
            match self.symbol_to_entrez.get(symbol) {
                Some(ids) => out.extend(ids.iter().cloned()),
                None => failed += 1,
            }
        }
        if failed > 0 {
            warn!(
                "{:.2}% of input gene symbols failed to map to Entrez IDs ({} of {})",
                100.0 * failed as f64 / requested as f64,
                failed,
                requested
            );
        }
        out
    }

    pub fn entrez_symbol(&self, entrez: &str) -> Option<&str> {
        self.entrez_to_symbol.get(entrez).map(String::as_str)
    }

    pub fn go_sets(&self, ontology: Ontology) -> Result<&GeneSets> {
        self.go.get(&ontology).ok_or_else(|| {
            EnrichError::MissingInput(format!(
                "annotation database has no GO {} annotations",
                ontology
            ))
        })
    }
}

pub fn discover_paths(dir: &Path) -> Result<OrgDbPaths> {
    Ok(OrgDbPaths {
        gene_info: find_first(dir, &["gene_info", "gene_info.gz"]).ok_or_else(|| {
            EnrichError::MissingInput(format!("missing gene_info(.gz) in {}", dir.display()))
        })?,
        gene2go: find_first(dir, &["gene2go", "gene2go.gz"]).ok_or_else(|| {
            EnrichError::MissingInput(format!("missing gene2go(.gz) in {}", dir.display()))
        })?,
        obo: find_first(dir, &["go-basic.obo", "go.obo", "go-basic.obo.gz", "go.obo.gz"]),
    })
}

fn find_first(dir: &Path, candidates: &[&str]) -> Option<PathBuf> {
    candidates
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

#[cfg(test)]
#[path = "../../tests/src_inline/annotation/tests.rs"]
mod tests;

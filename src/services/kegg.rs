use std::collections::HashMap;

use reqwest::blocking::Client;
use tracing::info;

use crate::error::{EnrichError, Result};
use crate::model::gene_sets::GeneSets;
use crate::services::{KeggSource, get_text, join_url, strip_db_prefix};

pub const DEFAULT_KEGG_URL: &str = "https://rest.kegg.jp";

/// Target database of `conv/<db>/<org>` used to re-key pathway members.
pub const KEGG_CONV_DB: &str = "uniprot";

pub struct KeggRestClient {
    client: Client,
    base_url: String,
}

impl KeggRestClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn fetch(&self, path: &str) -> Result<String> {
        get_text(&self.client, "KEGG", &join_url(&self.base_url, path))
    }
}

impl KeggSource for KeggRestClient {
    fn pathway_sets(&self, organism: &str) -> Result<GeneSets> {
        info!("fetching KEGG pathways for {} ({})", organism, KEGG_CONV_DB);
        let links = self.fetch(&format!("link/pathway/{organism}"))?;
        let names = self.fetch(&format!("list/pathway/{organism}"))?;
        let sets = build_pathway_sets(&links, &names)?;
        if sets.is_empty() {
            return Err(EnrichError::service(
                "KEGG",
                format!("no pathway annotation returned for organism '{organism}'"),
            ));
        }
        let conv = self.fetch(&format!("conv/{KEGG_CONV_DB}/{organism}"))?;
        Ok(sets.rekey(&parse_conv(&conv)?))
    }
}

/// Joins `link/pathway` membership with `list/pathway` names.
pub fn build_pathway_sets(links: &str, names: &str) -> Result<GeneSets> {
    let mut sets = GeneSets::new();
    for (line_no, line) in non_empty_lines(links) {
        let (gene, pathway) = split_pair(line, line_no, "link/pathway")?;
        sets.insert(strip_db_prefix(pathway), strip_db_prefix(gene));
    }
    for (line_no, line) in non_empty_lines(names) {
        let (pathway, name) = split_pair(line, line_no, "list/pathway")?;
        sets.set_name(strip_db_prefix(pathway), strip_organism_suffix(name));
    }
    Ok(sets)
}

/// Maps KEGG gene IDs to the identifiers returned by `conv/<db>/<org>`.
pub fn parse_conv(text: &str) -> Result<HashMap<String, Vec<String>>> {
    let mut map: HashMap<String, Vec<String>> = HashMap::new();
    for (line_no, line) in non_empty_lines(text) {
        let (gene, target) = split_pair(line, line_no, "conv")?;
        let targets = map.entry(strip_db_prefix(gene).to_string()).or_default();
        let target = strip_db_prefix(target).to_string();
        if !targets.contains(&target) {
            targets.push(target);
        }
    }
    Ok(map)
}

/// "Glycolysis / Gluconeogenesis - Mycobacterium avium 104" -> "Glycolysis / Gluconeogenesis"
pub fn strip_organism_suffix(name: &str) -> &str {
    name.rsplit_once(" - ")
        .map(|(head, _)| head)
        .unwrap_or(name)
        .trim()
}

fn non_empty_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim_end()))
        .filter(|(_, l)| !l.is_empty())
}

fn split_pair<'a>(line: &'a str, line_no: usize, what: &str) -> Result<(&'a str, &'a str)> {
    line.split_once('\t')
        .map(|(a, b)| (a.trim(), b.trim()))
        .ok_or_else(|| {
            EnrichError::service(
                "KEGG",
                format!("{what} line {line_no} is not tab separated: '{line}'"),
            )
        })
}

#[cfg(test)]
#[path = "../../tests/src_inline/services/kegg.rs"]
mod tests;

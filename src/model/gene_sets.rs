use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Term -> annotated genes, plus display names for terms.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeneSets {
    terms: BTreeMap<String, BTreeSet<String>>,
    names: BTreeMap<String, String>,
}

impl GeneSets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, term: &str, gene: &str) {
        if term.is_empty() || gene.is_empty() {
            return;
        }
        self.terms
            .entry(term.to_string())
            .or_default()
            .insert(gene.to_string());
    }

    pub fn set_name(&mut self, term: &str, name: &str) {
        self.names.insert(term.to_string(), name.to_string());
    }

    pub fn name(&self, term: &str) -> Option<&str> {
        self.names.get(term).map(String::as_str)
    }

    pub fn terms(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.terms.iter().map(|(t, g)| (t.as_str(), g))
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn universe(&self) -> BTreeSet<&str> {
        self.terms
            .values()
            .flat_map(|genes| genes.iter().map(String::as_str))
            .collect()
    }

    /// Replaces every gene by its mapped identifiers; unmapped genes are dropped.
    pub fn rekey(&self, mapping: &HashMap<String, Vec<String>>) -> GeneSets {
        let mut out = GeneSets {
            terms: BTreeMap::new(),
            names: self.names.clone(),
        };
        for (term, genes) in &self.terms {
            for gene in genes {
                if let Some(targets) = mapping.get(gene) {
                    for target in targets {
                        out.insert(term, target);
                    }
                }
            }
        }
        out
    }
}

use std::collections::{BTreeSet, HashMap};
use std::io::BufRead;

use crate::error::Result;
use crate::model::species::Ontology;

#[derive(Debug, Clone, Default)]
pub struct GoTerm {
    pub id: String,
    pub name: String,
    pub namespace: Option<Ontology>,
    pub parents: Vec<String>,
    pub obsolete: bool,
}

/// GO graph restricted to `is_a` and `part_of` edges.
#[derive(Debug, Clone, Default)]
pub struct GoDag {
    terms: HashMap<String, GoTerm>,
    alt_ids: HashMap<String, String>,
}

impl GoDag {
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn canonical<'a>(&'a self, id: &'a str) -> &'a str {
        self.alt_ids.get(id).map(String::as_str).unwrap_or(id)
    }

    pub fn term(&self, id: &str) -> Option<&GoTerm> {
        self.terms.get(self.canonical(id))
    }

    /// All ancestors of `id`, excluding `id` itself.
    pub fn ancestors(&self, id: &str) -> BTreeSet<String> {
        let mut seen = BTreeSet::new();
        let mut stack: Vec<&str> = Vec::new();
        if let Some(term) = self.term(id) {
            stack.extend(term.parents.iter().map(String::as_str));
        }
        while let Some(next) = stack.pop() {
            if !seen.insert(next.to_string()) {
                continue;
            }
            if let Some(term) = self.terms.get(next) {
                stack.extend(term.parents.iter().map(String::as_str));
            }
        }
        seen
    }
}

pub fn parse_obo<R: BufRead>(mut reader: R) -> Result<GoDag> {
    let mut buf = String::new();
    let mut dag = GoDag::default();
    let mut current: Option<GoTerm> = None;
    let mut current_alts: Vec<String> = Vec::new();
    let mut in_term = false;

    loop {
        buf.clear();
        let read = reader.read_line(&mut buf)?;
        let line = buf.trim();
        let stanza_start = line.starts_with('[');
        if read == 0 || stanza_start {
            if let Some(term) = current.take() {
                for alt in current_alts.drain(..) {
                    dag.alt_ids.insert(alt, term.id.clone());
                }
                if !term.id.is_empty() {
                    dag.terms.insert(term.id.clone(), term);
                }
            }
            if read == 0 {
                break;
            }
            in_term = line == "[Term]";
            if in_term {
                current = Some(GoTerm::default());
            }
            continue;
        }
        if !in_term {
            continue;
        }
        let Some(term) = current.as_mut() else {
            continue;
        };
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim();
        match key {
            "id" => term.id = value.to_string(),
            "name" => term.name = value.to_string(),
            "namespace" => term.namespace = Ontology::from_obo_namespace(value),
            "alt_id" => current_alts.push(value.to_string()),
            "is_a" => term.parents.push(first_token(value).to_string()),
            "relationship" => {
                let mut parts = value.split_whitespace();
                if parts.next() == Some("part_of") {
                    if let Some(parent) = parts.next() {
                        term.parents.push(parent.to_string());
                    }
                }
            }
            "is_obsolete" => term.obsolete = value == "true",
            _ => {}
        }
    }

    Ok(dag)
}

fn first_token(value: &str) -> &str {
    value.split_whitespace().next().unwrap_or("")
}

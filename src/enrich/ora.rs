use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};

use statrs::distribution::{DiscreteCDF, Hypergeometric};
use tracing::{debug, warn};

use crate::enrich::adjust::{adjust_pvalues, qvalues};
use crate::error::{EnrichError, Result};
use crate::model::gene_sets::GeneSets;
use crate::model::params::EnrichParams;
use crate::model::result::EnrichRow;

#[derive(Debug)]
struct Candidate<'a> {
    term: &'a str,
    size: usize,
    hits: Vec<&'a str>,
}

/// Rows that pass the cutoffs, and the number of annotated genes they were
/// tested against.
#[derive(Debug, Clone, Default)]
pub struct OraTable {
    pub rows: Vec<EnrichRow>,
    pub universe_size: usize,
}

/// Hypergeometric over-representation of `genes` in `sets`, adjusted and
/// filtered by `params`. Rows are sorted by ascending p-value.
pub fn over_representation(
    genes: &[String],
    sets: &GeneSets,
    params: &EnrichParams,
) -> Result<OraTable> {
    params.validate()?;

    let universe: BTreeSet<&str> = sets.universe();
    let population = universe.len();
    let mut seen = HashSet::new();
    let sample: Vec<&str> = genes
        .iter()
        .map(|g| g.as_str())
        .filter(|g| universe.contains(g) && seen.insert(*g))
        .collect();
    if sample.is_empty() {
        warn!(
            "none of the {} input genes is annotated; nothing to test",
            genes.len()
        );
        return Ok(OraTable {
            rows: Vec::new(),
            universe_size: population,
        });
    }

    let mut candidates = Vec::new();
    for (term, members) in sets.terms() {
        let size = members.len();
        if size < params.min_gs_size || size > params.max_gs_size {
            continue;
        }
        let hits: Vec<&str> = sample
            .iter()
            .copied()
            .filter(|g| members.contains(*g))
            .collect();
        if hits.is_empty() {
            continue;
        }
        candidates.push(Candidate { term, size, hits });
    }
    if candidates.is_empty() {
        warn!(
            "no term with {}..={} genes contains an input gene",
            params.min_gs_size, params.max_gs_size
        );
        return Ok(OraTable {
            rows: Vec::new(),
            universe_size: population,
        });
    }

    let draws = candidates
        .iter()
        .flat_map(|c| c.hits.iter().copied())
        .collect::<HashSet<&str>>()
        .len();
    debug!(
        "testing {} terms: universe={}, annotated input genes={}",
        candidates.len(),
        population,
        draws
    );

    let mut pvalues = Vec::with_capacity(candidates.len());
    for c in &candidates {
        pvalues.push(upper_tail(population, c.size, draws, c.hits.len())?);
    }
    let adjusted = adjust_pvalues(&pvalues, params.adjust);
    let qvals = qvalues(&pvalues);

    let mut rows = Vec::new();
    for (idx, c) in candidates.into_iter().enumerate() {
        let pvalue = pvalues[idx];
        let p_adjust = adjusted[idx];
        let qvalue = qvals.as_ref().map(|q| q[idx]);
        if pvalue > params.pvalue_cutoff || p_adjust > params.pvalue_cutoff {
            continue;
        }
        if qvalue.is_some_and(|q| q > params.qvalue_cutoff) {
            continue;
        }
        rows.push(EnrichRow {
            id: c.term.to_string(),
            description: sets.name(c.term).unwrap_or(c.term).to_string(),
            gene_ratio: (c.hits.len(), draws),
            bg_ratio: (c.size, population),
            pvalue,
            p_adjust,
            qvalue,
            gene_ids: c.hits.iter().map(|g| g.to_string()).collect(),
        });
    }

    rows.sort_by(|a, b| {
        a.pvalue
            .partial_cmp(&b.pvalue)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.id.cmp(&b.id))
    });
    Ok(OraTable {
        rows,
        universe_size: population,
    })
}

/// P(X >= observed) for X ~ Hypergeometric(population, successes, draws).
pub fn upper_tail(
    population: usize,
    successes: usize,
    draws: usize,
    observed: usize,
) -> Result<f64> {
    if observed == 0 {
        return Ok(1.0);
    }
    let dist = Hypergeometric::new(population as u64, successes as u64, draws as u64)
        .map_err(|e| EnrichError::InvalidParameter(format!("hypergeometric: {e}")))?;
    Ok(dist.sf(observed as u64 - 1).clamp(0.0, 1.0))
}

#[cfg(test)]
#[path = "../../tests/src_inline/enrich/ora.rs"]
mod tests;

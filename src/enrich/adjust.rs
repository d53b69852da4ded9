use std::cmp::Ordering;

use crate::model::params::AdjustMethod;

/// Lambda used for the single-point pi0 estimate.
pub const QVALUE_LAMBDA: f64 = 0.05;

pub fn adjust_pvalues(pvalues: &[f64], method: AdjustMethod) -> Vec<f64> {
    let m = pvalues.len();
    if m == 0 {
        return Vec::new();
    }
    match method {
        AdjustMethod::None => pvalues.to_vec(),
        AdjustMethod::Bonferroni => pvalues.iter().map(|p| (p * m as f64).min(1.0)).collect(),
        AdjustMethod::Holm => holm(pvalues),
        AdjustMethod::BenjaminiHochberg => step_up(pvalues, 1.0),
        AdjustMethod::BenjaminiYekutieli => {
            let q: f64 = (1..=m).map(|i| 1.0 / i as f64).sum();
            step_up(pvalues, q)
        }
    }
}

/// Storey q-values with a fixed lambda. `None` when pi0 cannot be estimated.
pub fn qvalues(pvalues: &[f64]) -> Option<Vec<f64>> {
    let m = pvalues.len();
    if m == 0 {
        return None;
    }
    let above = pvalues.iter().filter(|&&p| p >= QVALUE_LAMBDA).count();
    if above == 0 {
        return None;
    }
    let pi0 = (above as f64 / (m as f64 * (1.0 - QVALUE_LAMBDA))).min(1.0);
    Some(step_up(pvalues, 1.0).into_iter().map(|q| pi0 * q).collect())
}

fn ascending_order(pvalues: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..pvalues.len()).collect();
    order.sort_by(|&a, &b| {
        pvalues[a]
            .partial_cmp(&pvalues[b])
            .unwrap_or(Ordering::Equal)
    });
    order
}

fn step_up(pvalues: &[f64], scale: f64) -> Vec<f64> {
    let m = pvalues.len();
    let order = ascending_order(pvalues);
    let mut out = vec![0.0; m];
    let mut running = f64::INFINITY;
    for (rank0, &idx) in order.iter().enumerate().rev() {
        let rank = (rank0 + 1) as f64;
        let value = scale * pvalues[idx] * m as f64 / rank;
        running = running.min(value);
        out[idx] = running.min(1.0);
    }
    out
}

fn holm(pvalues: &[f64]) -> Vec<f64> {
    let m = pvalues.len();
    let order = ascending_order(pvalues);
    let mut out = vec![0.0; m];
    let mut running = 0.0f64;
    for (rank0, &idx) in order.iter().enumerate() {
        let value = (m - rank0) as f64 * pvalues[idx];
        running = running.max(value);
        out[idx] = running.min(1.0);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/src_inline/enrich/adjust.rs"]
mod tests;

use super::*;
use crate::test_support::approx;

fn assert_all_close(actual: &[f64], expected: &[f64]) {
    assert_eq!(actual.len(), expected.len());
    for (a, e) in actual.iter().zip(expected) {
        assert!(approx(*a, *e), "{actual:?} != {expected:?}");
    }
}

#[test]
fn test_benjamini_hochberg() {
    let p = [0.01, 0.04, 0.03, 0.005];
    let adj = adjust_pvalues(&p, AdjustMethod::BenjaminiHochberg);
    assert_all_close(&adj, &[0.02, 0.04, 0.04, 0.02]);
}

#[test]
fn test_benjamini_yekutieli() {
    let adj = adjust_pvalues(&[0.01, 0.02], AdjustMethod::BenjaminiYekutieli);
    assert_all_close(&adj, &[0.03, 0.03]);
}

#[test]
fn test_bonferroni_capped() {
    let adj = adjust_pvalues(&[0.01, 0.3, 0.7], AdjustMethod::Bonferroni);
    assert_all_close(&adj, &[0.03, 0.9, 1.0]);
}

#[test]
fn test_holm() {
    let adj = adjust_pvalues(&[0.01, 0.04, 0.03], AdjustMethod::Holm);
    assert_all_close(&adj, &[0.03, 0.06, 0.06]);
}

#[test]
fn test_none_and_empty() {
    assert_all_close(&adjust_pvalues(&[0.2, 0.1], AdjustMethod::None), &[0.2, 0.1]);
    assert!(adjust_pvalues(&[], AdjustMethod::BenjaminiHochberg).is_empty());
}

#[test]
fn test_qvalues_storey_fixed_lambda() {
    let p = [0.01, 0.02, 0.5, 0.9];
    let pi0 = 2.0 / (4.0 * (1.0 - QVALUE_LAMBDA));
    let q = qvalues(&p).unwrap();
    assert_all_close(
        &q,
        &[pi0 * 0.04, pi0 * 0.04, pi0 * (0.5 * 4.0 / 3.0), pi0 * 0.9],
    );
}

#[test]
fn test_qvalues_undefined_without_large_pvalues() {
    assert!(qvalues(&[0.001, 0.01]).is_none());
    assert!(qvalues(&[]).is_none());
}

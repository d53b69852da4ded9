use std::fmt;
use std::str::FromStr;

use crate::error::{EnrichError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdjustMethod {
    BenjaminiHochberg,
    BenjaminiYekutieli,
    Bonferroni,
    Holm,
    None,
}

impl AdjustMethod {
    pub fn name(self) -> &'static str {
        match self {
            AdjustMethod::BenjaminiHochberg => "BH",
            AdjustMethod::BenjaminiYekutieli => "BY",
            AdjustMethod::Bonferroni => "bonferroni",
            AdjustMethod::Holm => "holm",
            AdjustMethod::None => "none",
        }
    }
}

impl fmt::Display for AdjustMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AdjustMethod {
    type Err = EnrichError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bh" | "fdr" => Ok(AdjustMethod::BenjaminiHochberg),
            "by" => Ok(AdjustMethod::BenjaminiYekutieli),
            "bonferroni" => Ok(AdjustMethod::Bonferroni),
            "holm" => Ok(AdjustMethod::Holm),
            "none" => Ok(AdjustMethod::None),
            _ => Err(EnrichError::InvalidParameter(format!(
                "invalid p-value adjustment '{s}' (use BH|BY|bonferroni|holm|none)"
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EnrichParams {
    pub pvalue_cutoff: f64,
    pub qvalue_cutoff: f64,
    pub adjust: AdjustMethod,
    pub min_gs_size: usize,
    pub max_gs_size: usize,
}

impl Default for EnrichParams {
    fn default() -> Self {
        Self {
            pvalue_cutoff: 0.05,
            qvalue_cutoff: 0.2,
            adjust: AdjustMethod::BenjaminiHochberg,
            min_gs_size: 10,
            max_gs_size: 500,
        }
    }
}

impl EnrichParams {
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("pvalue cutoff", self.pvalue_cutoff),
            ("qvalue cutoff", self.qvalue_cutoff),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(EnrichError::InvalidParameter(format!(
                    "{name} must be within [0, 1], got {value}"
                )));
            }
        }
        if self.min_gs_size > self.max_gs_size {
            return Err(EnrichError::InvalidParameter(format!(
                "min gene set size {} exceeds max gene set size {}",
                self.min_gs_size, self.max_gs_size
            )));
        }
        Ok(())
    }
}

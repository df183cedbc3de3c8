//! Price tier binning.
//!
//! Bins are half-open `[lower, upper)` intervals over consecutive edges.
//! Prices outside the outermost edges are unclassified (`None`).

use crate::utils::error::ValidationError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Price tier label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PriceTier {
    Low,
    Medium,
    High,
}

impl PriceTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            PriceTier::Low => "Low",
            PriceTier::Medium => "Medium",
            PriceTier::High => "High",
        }
    }
}

impl fmt::Display for PriceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PriceTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(PriceTier::Low),
            "medium" => Ok(PriceTier::Medium),
            "high" => Ok(PriceTier::High),
            other => Err(format!("unknown price tier '{}'", other)),
        }
    }
}

/// Which end of each bin is closed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inclusivity {
    /// `[lower, upper)`
    LowerInclusive,
}

/// Bin edges, labels and inclusivity rule
#[derive(Debug, Clone, PartialEq)]
pub struct PriceTiers {
    edges: Vec<Decimal>,
    labels: Vec<PriceTier>,
    inclusivity: Inclusivity,
}

impl PriceTiers {
    /// Build tiers from `n + 1` strictly increasing edges and `n` labels
    pub fn new(edges: Vec<Decimal>, labels: Vec<PriceTier>) -> Result<Self, ValidationError> {
        if edges.len() < 2 {
            return Err(ValidationError::InvalidTiers(
                "at least two edges are required".to_string(),
            ));
        }
        if labels.len() != edges.len() - 1 {
            return Err(ValidationError::InvalidTiers(format!(
                "{} edges need {} labels, got {}",
                edges.len(),
                edges.len() - 1,
                labels.len()
            )));
        }
        if edges.windows(2).any(|w| w[0] >= w[1]) {
            return Err(ValidationError::InvalidTiers(
                "edges must be strictly increasing".to_string(),
            ));
        }

        Ok(Self {
            edges,
            labels,
            inclusivity: Inclusivity::LowerInclusive,
        })
    }

    /// `[0,100) Low, [100,200) Medium, [200,500) High`
    pub fn standard() -> Self {
        Self {
            edges: vec![
                Decimal::ZERO,
                Decimal::from(100),
                Decimal::from(200),
                Decimal::from(500),
            ],
            labels: vec![PriceTier::Low, PriceTier::Medium, PriceTier::High],
            inclusivity: Inclusivity::LowerInclusive,
        }
    }

    /// Tier for a price, or `None` when it falls outside every bin
    pub fn classify(&self, price: Decimal) -> Option<PriceTier> {
        match self.inclusivity {
            Inclusivity::LowerInclusive => self
                .edges
                .windows(2)
                .position(|w| price >= w[0] && price < w[1])
                .map(|i| self.labels[i]),
        }
    }

    pub fn edges(&self) -> &[Decimal] {
        &self.edges
    }

    pub fn labels(&self) -> &[PriceTier] {
        &self.labels
    }

    pub fn inclusivity(&self) -> Inclusivity {
        self.inclusivity
    }
}

impl Default for PriceTiers {
    fn default() -> Self {
        Self::standard()
    }
}

//! Contribution Ranker
//!
//! Picks the features most responsible for one model's risk score.
//! Output is deterministic: descending by percentage, ties in catalog
//! declaration order, features outside the catalog last (by name).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::catalog::FeatureCatalog;
use super::types::clamp_percentage;

/// Hard cap on ranked entries
pub const MAX_CONTRIBUTORS: usize = 5;

// ============================================================================
// TYPES
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedContribution {
    pub name: String,
    pub percentage: f64,
    pub tier: ContributionTier,
}

/// Ranked contributors, or an explicit "no data" marker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", content = "entries", rename_all = "snake_case")]
pub enum RankedContributions {
    Empty,
    Ranked(Vec<RankedContribution>),
}

impl RankedContributions {
    pub fn is_empty(&self) -> bool {
        match self {
            RankedContributions::Empty => true,
            RankedContributions::Ranked(entries) => entries.is_empty(),
        }
    }

    pub fn entries(&self) -> &[RankedContribution] {
        match self {
            RankedContributions::Empty => &[],
            RankedContributions::Ranked(entries) => entries,
        }
    }
}

/// Presentation emphasis for a single contribution.
///
/// Separate from the 50/70 risk bands on purpose: these cut points only
/// drive per-feature coloring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContributionTier {
    Info,
    Caution,
    Critical,
}

impl ContributionTier {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage > 60.0 {
            ContributionTier::Critical
        } else if percentage > 30.0 {
            ContributionTier::Caution
        } else {
            ContributionTier::Info
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            ContributionTier::Info => "#3b82f6",     // Blue
            ContributionTier::Caution => "#f59e0b",  // Yellow
            ContributionTier::Critical => "#ef4444", // Red
        }
    }
}

// ============================================================================
// RANKING
// ============================================================================

/// Top `n` contributors (`n` capped at [`MAX_CONTRIBUTORS`])
pub fn top_contributors(
    contributions: &HashMap<String, f64>,
    catalog: &FeatureCatalog,
    n: usize,
) -> RankedContributions {
    if contributions.is_empty() {
        return RankedContributions::Empty;
    }

    let mut entries: Vec<(Option<usize>, &str, f64)> = contributions
        .iter()
        .map(|(name, pct)| (catalog.index_of(name), name.as_str(), clamp_percentage(*pct)))
        .collect();

    entries.sort_by(|a, b| {
        b.2.total_cmp(&a.2)
            .then_with(|| catalog_order(a.0, b.0))
            .then_with(|| a.1.cmp(b.1))
    });

    let ranked = entries
        .into_iter()
        .take(n.min(MAX_CONTRIBUTORS))
        .map(|(_, name, percentage)| RankedContribution {
            name: name.to_string(),
            percentage,
            tier: ContributionTier::from_percentage(percentage),
        })
        .collect();

    RankedContributions::Ranked(ranked)
}

/// Catalog features first in declaration order, unknown features after
fn catalog_order(a: Option<usize>, b: Option<usize>) -> std::cmp::Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    }
}

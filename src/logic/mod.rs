//! Risk Logic Module
//!
//! Pure core of the service: feature catalog, normalization, contribution
//! ranking, risk classification and summary aggregation.
//!
//! ## Structure
//! - `types`: Core types (ModelType, ModelResult, TelemetrySnapshot)
//! - `catalog`: Feature catalog, labels and scale table
//! - `validation`: Boundary checks that build a TelemetrySnapshot
//! - `normalizer`: Raw value <-> [0, 100] visualization scale
//! - `ranker`: Top-N contribution ranking
//! - `classifier`: Risk bands and overall status
//! - `summary`: Cross-model aggregation
//! - `pipeline`: Composition of all of the above
//!
//! ## Usage
//! ```ignore
//! use drive_risk::logic::{evaluate, FeatureCatalog, ScaleTable, TelemetrySnapshot};
//!
//! let catalog = FeatureCatalog::standard();
//! let snapshot = TelemetrySnapshot::from_pairs(&catalog, [("Temperature_C", 61.0)])?;
//! let report = evaluate(&catalog, &ScaleTable::standard(), &snapshot, &results, Default::default())?;
//! println!("{}", report.summary.status);
//! ```

pub mod types;
pub mod catalog;
pub mod validation;
pub mod normalizer;
pub mod ranker;
pub mod classifier;
pub mod summary;
pub mod pipeline;

#[cfg(test)]
mod tests;

// Re-export main types for convenience
pub use types::{Calibration, ModelResult, ModelType, TelemetrySnapshot};
pub use catalog::{format_label, Feature, FeatureCatalog, LayoutInfo, ScaleTable, UnitHint};
pub use validation::{InvalidField, InvalidReason, InvalidValueError};
pub use normalizer::{denormalize, normalize, NormalizedPoint};
pub use ranker::{top_contributors, ContributionTier, RankedContribution, RankedContributions};
pub use classifier::{classify_single, classify_status, RiskBand, RiskStatus};
pub use summary::{aggregate, ModelRisks, Summary};
pub use pipeline::{evaluate, ModelView, PipelineError, PredictionReport};

//! Feature Catalog - Centralized Feature Definition
//!
//! Single source of truth for the drive telemetry features the pipeline
//! recognizes, their default values and their visualization scale.
//!
//! ## Rules:
//! 1. Add feature → increment CATALOG_VERSION
//! 2. Change order → increment CATALOG_VERSION
//! 3. Remove feature → increment CATALOG_VERSION
//!
//! Declaration order is also the tie-break order for contribution ranking.

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// CATALOG VERSION
// ============================================================================

/// Current catalog layout version
pub const CATALOG_VERSION: u8 = 1;

/// Scale maximum for features missing from the scale table
pub const DEFAULT_MAX_VALUE: f64 = 100.0;

// ============================================================================
// FEATURE DEFINITION
// ============================================================================

/// Unit family of a feature, used as a display hint only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitHint {
    Count,
    Bytes,
    Percent,
    Temperature,
    Rate,
}

/// One recognized telemetry feature with its default value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub name: String,
    pub value: f64,
    pub unit_hint: UnitHint,
}

/// (name, default, unit, scale max) in declaration order
const STANDARD_FEATURES: &[(&str, f64, UnitHint, f64)] = &[
    ("Power_On_Hours", 1000.0, UnitHint::Count, 50_000.0),
    ("Total_TBW_TB", 50.0, UnitHint::Bytes, 1000.0),
    ("Total_TBR_TB", 40.0, UnitHint::Bytes, 1000.0),
    ("Temperature_C", 35.0, UnitHint::Temperature, 100.0),
    ("Percent_Life_Used", 5.0, UnitHint::Percent, 100.0),
    ("Media_Errors", 0.0, UnitHint::Count, 100.0),
    ("Unsafe_Shutdowns", 0.0, UnitHint::Count, 500.0),
    ("CRC_Errors", 0.0, UnitHint::Count, 100.0),
    ("Read_Error_Rate", 0.5, UnitHint::Rate, 10.0),
    ("Write_Error_Rate", 0.3, UnitHint::Rate, 10.0),
];

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    #[error("feature catalog is empty")]
    Empty,
    #[error("duplicate feature name: {0}")]
    DuplicateFeature(String),
    #[error("scale maximum for {name} must be positive, got {value}")]
    NonPositiveScale { name: String, value: f64 },
}

// ============================================================================
// FEATURE CATALOG
// ============================================================================

/// Ordered, immutable set of recognized features
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureCatalog {
    features: Vec<Feature>,
}

impl FeatureCatalog {
    /// Build a catalog from an external feature-metadata provider
    pub fn new(features: Vec<Feature>) -> Result<Self, CatalogError> {
        if features.is_empty() {
            return Err(CatalogError::Empty);
        }
        for (i, feature) in features.iter().enumerate() {
            if features[..i].iter().any(|f| f.name == feature.name) {
                return Err(CatalogError::DuplicateFeature(feature.name.clone()));
            }
        }
        Ok(Self { features })
    }

    /// The built-in NVMe drive catalog
    pub fn standard() -> Self {
        Self {
            features: STANDARD_FEATURES
                .iter()
                .map(|(name, value, unit_hint, _)| Feature {
                    name: name.to_string(),
                    value: *value,
                    unit_hint: *unit_hint,
                })
                .collect(),
        }
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    /// Ordered name -> default value pairs
    pub fn defaults(&self) -> Vec<(&str, f64)> {
        self.features
            .iter()
            .map(|f| (f.name.as_str(), f.value))
            .collect()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.features.iter().map(|f| f.name.as_str())
    }

    /// Declaration index (O(n) but features are few)
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.features.iter().position(|f| f.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index_of(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Map a display label back to its feature key.
    ///
    /// The catalog is treated as closed: a label resolves only if some
    /// catalog feature formats to exactly that label. Anything else falls
    /// back to the canonical lowercase/underscore form.
    pub fn label_to_key(&self, label: &str) -> String {
        self.features
            .iter()
            .find(|f| format_label(&f.name) == label)
            .map(|f| f.name.clone())
            .unwrap_or_else(|| canonical_key(label))
    }

    pub fn layout_info(&self) -> LayoutInfo {
        LayoutInfo {
            version: CATALOG_VERSION,
            hash: self.layout_hash(),
            feature_count: self.features.len(),
            feature_names: self.features.iter().map(|f| f.name.clone()).collect(),
        }
    }

    /// CRC32 of version + ordered names, used to detect catalog drift
    pub fn layout_hash(&self) -> u32 {
        let mut hasher = Hasher::new();
        hasher.update(&[CATALOG_VERSION]);
        for feature in &self.features {
            hasher.update(feature.name.as_bytes());
            hasher.update(&[0]);
        }
        hasher.finalize()
    }
}

impl Default for FeatureCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

/// Layout information exposed to clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutInfo {
    pub version: u8,
    pub hash: u32,
    pub feature_count: usize,
    pub feature_names: Vec<String>,
}

// ============================================================================
// LABEL FORMATTING
// ============================================================================

/// Human-readable label for a feature name.
///
/// `Temperature_C` → `Temperature (°C)`, `total_tb_written` → `Total TB Written`.
pub fn format_label(name: &str) -> String {
    let spaced: String = name
        .chars()
        .map(|c| if c == '_' || c == '-' { ' ' } else { c })
        .collect();

    let mut words: Vec<String> = spaced.split(' ').map(capitalize).collect();

    for word in words.iter_mut() {
        if word.as_str() == "Tb" {
            *word = "TB".to_string();
        }
    }
    if let Some(last) = words.last_mut() {
        if last.as_str() == "C" {
            *last = "(°C)".to_string();
        }
    }

    words.join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lowercase/underscore fallback key for labels outside the catalog
fn canonical_key(label: &str) -> String {
    label
        .trim()
        .replace("(°C)", "C")
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

// ============================================================================
// SCALE TABLE
// ============================================================================

/// Feature name -> positive visualization maximum
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleTable {
    entries: Vec<(String, f64)>,
}

impl ScaleTable {
    pub fn new(entries: Vec<(String, f64)>) -> Result<Self, CatalogError> {
        for (name, value) in &entries {
            if !(value.is_finite() && *value > 0.0) {
                return Err(CatalogError::NonPositiveScale {
                    name: name.clone(),
                    value: *value,
                });
            }
        }
        Ok(Self { entries })
    }

    /// Scale maxima for the built-in catalog
    pub fn standard() -> Self {
        Self {
            entries: STANDARD_FEATURES
                .iter()
                .map(|(name, _, _, max)| (name.to_string(), *max))
                .collect(),
        }
    }

    /// Declared maximum, if the feature is known
    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
    }

    /// Maximum used for scaling; unknown features use [`DEFAULT_MAX_VALUE`]
    pub fn max_value(&self, name: &str) -> f64 {
        self.get(name).unwrap_or(DEFAULT_MAX_VALUE)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), *v))
    }
}

impl Default for ScaleTable {
    fn default() -> Self {
        Self::standard()
    }
}

// ============================================================================
// TESTS
// ============================================================================

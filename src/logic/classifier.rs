//! Risk Classifier
//!
//! Only classification logic. Input: risk percentage. Output: band/status.
//! Every input is clamped to [0, 100] before it is compared.

use serde::{Deserialize, Serialize};

use super::types::clamp_percentage;

// ============================================================================
// THRESHOLDS
// ============================================================================

/// Lower bound of the Medium band / Warning status
pub const MEDIUM_THRESHOLD: f64 = 50.0;

/// Lower bound of the High band; Danger is strictly above it
pub const HIGH_THRESHOLD: f64 = 70.0;

// ============================================================================
// RISK BAND (per model)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskBand {
    Low,
    Medium,
    High,
}

impl RiskBand {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskBand::Low => "Low",
            RiskBand::Medium => "Medium",
            RiskBand::High => "High",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            RiskBand::Low => "#10b981",    // Green
            RiskBand::Medium => "#f59e0b", // Yellow
            RiskBand::High => "#ef4444",   // Red
        }
    }
}

impl std::fmt::Display for RiskBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-model badge: `<50` Low, `[50, 70)` Medium, `>=70` High
pub fn classify_single(risk_percentage: f64) -> RiskBand {
    let risk = clamp_percentage(risk_percentage);
    if risk >= HIGH_THRESHOLD {
        RiskBand::High
    } else if risk >= MEDIUM_THRESHOLD {
        RiskBand::Medium
    } else {
        RiskBand::Low
    }
}

// ============================================================================
// OVERALL STATUS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskStatus {
    Healthy,
    Warning,
    Danger,
}

impl RiskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskStatus::Healthy => "Healthy",
            RiskStatus::Warning => "Warning",
            RiskStatus::Danger => "Danger",
        }
    }

    pub fn severity_level(&self) -> u8 {
        match self {
            RiskStatus::Healthy => 0,
            RiskStatus::Warning => 1,
            RiskStatus::Danger => 2,
        }
    }
}

impl std::fmt::Display for RiskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Overall status, highest threshold checked first:
/// `>70` Danger, `>=50` Warning, otherwise Healthy.
pub fn classify_status(overall_risk: f64) -> RiskStatus {
    let risk = clamp_percentage(overall_risk);
    if risk > HIGH_THRESHOLD {
        RiskStatus::Danger
    } else if risk >= MEDIUM_THRESHOLD {
        RiskStatus::Warning
    } else {
        RiskStatus::Healthy
    }
}

/// Icon selector: attention at or above 50, independent of status text
pub fn needs_attention(overall_risk: f64) -> bool {
    clamp_percentage(overall_risk) >= MEDIUM_THRESHOLD
}

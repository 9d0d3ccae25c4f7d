//! Feature catalog handler

use std::collections::BTreeMap;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::logic::{format_label, LayoutInfo};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct FeaturesResponse {
    pub success: bool,
    /// Feature names in declaration order
    pub features: Vec<String>,
    pub defaults: BTreeMap<String, f64>,
    pub labels: BTreeMap<String, String>,
    pub scales: BTreeMap<String, f64>,
    pub layout: LayoutInfo,
}

/// List features with defaults, display labels and scale maxima
pub async fn list(State(state): State<AppState>) -> Json<FeaturesResponse> {
    let catalog = &state.catalog;

    Json(FeaturesResponse {
        success: true,
        features: catalog.names().map(str::to_string).collect(),
        defaults: catalog
            .defaults()
            .into_iter()
            .map(|(n, v)| (n.to_string(), v))
            .collect(),
        labels: catalog
            .names()
            .map(|n| (n.to_string(), format_label(n)))
            .collect(),
        scales: catalog
            .names()
            .map(|n| (n.to_string(), state.scale.max_value(n)))
            .collect(),
        layout: catalog.layout_info(),
    })
}

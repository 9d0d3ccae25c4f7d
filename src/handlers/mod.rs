//! HTTP handlers

pub mod health;
pub mod features;
pub mod predict;
pub mod train;

//! Vehicle record -> one named, ordered row for the pipeline.
//!
//! No scaling or encoding happens here; the artifact owns all of that.

use crate::error::PredictError;
use crate::types::{Categorical, VehicleRecord};

/// Authoritative column order, as the pipeline was fitted.
pub const FEATURE_COLUMNS: [&str; 14] = [
    "model",
    "brand",
    "car_body_type",
    "drivetrain",
    "segment",
    "top_speed_kmh",
    "battery_capacity_kWh",
    "torque_nm",
    "efficiency_wh_per_km",
    "acceleration_0_100_s",
    "seats",
    "length_mm",
    "width_mm",
    "height_mm",
];

#[derive(Debug, Clone, PartialEq)]
pub enum FeatureValue {
    Text(String),
    Int(i64),
    Float(f64),
}

impl FeatureValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(v) => Some(*v as f64),
            Self::Float(v) => Some(*v),
            Self::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// A single-row table: `(column, value)` pairs in [`FEATURE_COLUMNS`] order.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    columns: Vec<(&'static str, FeatureValue)>,
}

impl FeatureRow {
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FeatureValue)> {
        self.columns.iter().map(|(k, v)| (*k, v))
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.columns.iter().map(|(k, _)| *k).collect()
    }

    pub fn get(&self, column: &str) -> Option<&FeatureValue> {
        self.columns
            .iter()
            .find(|(k, _)| *k == column)
            .map(|(_, v)| v)
    }

    /// Numeric column as f64; integers are widened.
    pub fn number(&self, column: &'static str) -> Result<f64, PredictError> {
        self.get(column)
            .and_then(FeatureValue::as_f64)
            .ok_or(PredictError::MissingColumn(column))
    }

    pub fn text(&self, column: &str) -> Option<&str> {
        self.get(column).and_then(FeatureValue::as_text)
    }
}

pub fn build_row(record: &VehicleRecord) -> FeatureRow {
    use FeatureValue::{Float, Int, Text};

    let values = [
        Text(record.model.clone()),
        Text(record.brand.clone()),
        Text(record.car_body_type.as_str().to_string()),
        Text(record.drivetrain.as_str().to_string()),
        Text(record.segment.as_str().to_string()),
        Int(record.top_speed_kmh),
        Float(record.battery_capacity_kwh),
        Int(record.torque_nm),
        Int(record.efficiency_wh_per_km),
        Float(record.acceleration_0_100_s),
        Int(record.seats),
        Int(record.length_mm),
        Int(record.width_mm),
        Int(record.height_mm),
    ];

    FeatureRow {
        columns: FEATURE_COLUMNS.into_iter().zip(values).collect(),
    }
}

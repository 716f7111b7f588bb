use crate::error::PredictError;
use crate::model::RangePredictor;
use crate::record::{build_row, FEATURE_COLUMNS};
use crate::types::VehicleRecord;

/// Build the row for `record` and call into the pipeline once.
///
/// The result is returned exactly as the pipeline produced it; negative or
/// implausible ranges are not clamped.
pub fn invoke(predictor: &dyn RangePredictor, record: &VehicleRecord) -> Result<f64, PredictError> {
    let row = build_row(record);
    let km = predictor.predict(&row)?;
    tracing::debug!(
        "predicted brand={} model={} in_dim={} range_km={:.3}",
        record.brand,
        record.model,
        FEATURE_COLUMNS.len(),
        km
    );
    Ok(km)
}

/// Showcase cards: whole kilometres.
pub fn format_showcase_range(km: f64) -> String {
    format!("{km:.0} km")
}

/// Form result: two decimal places.
pub fn format_form_range(km: f64) -> String {
    format!("{km:.2} km")
}

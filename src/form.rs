//! The "Customize Your EV" form: raw field values, bounds, and the
//! submit state machine.
//!
//! Values are kept as the strings the browser sent so a failed submission
//! can re-render exactly what the user typed.

use serde::Deserialize;

use crate::error::{FieldError, PredictError};
use crate::model::RangePredictor;
use crate::predict::invoke;
use crate::types::{
    Bounds, BodyType, Categorical, Drivetrain, Segment, VehicleRecord, ACCELERATION_0_100_S,
    BATTERY_CAPACITY_KWH, EFFICIENCY_WH_PER_KM, HEIGHT_MM, LENGTH_MM, SEATS, TOP_SPEED_KMH,
    TORQUE_NM, WIDTH_MM,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Widget {
    Number,
    Slider,
}

/// Rendering metadata for one numeric input.
#[derive(Debug, Clone, Copy)]
pub struct NumericField {
    pub name: &'static str,
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub widget: Widget,
}

fn int_field(name: &'static str, label: &'static str, b: Bounds<i64>, widget: Widget) -> NumericField {
    NumericField {
        name,
        label,
        min: b.min as f64,
        max: b.max as f64,
        step: 1.0,
        widget,
    }
}

fn float_field(name: &'static str, label: &'static str, b: Bounds<f64>) -> NumericField {
    NumericField {
        name,
        label,
        min: b.min,
        max: b.max,
        step: 0.01,
        widget: Widget::Number,
    }
}

pub fn numeric_fields() -> [NumericField; 9] {
    [
        int_field("top_speed_kmh", "Top Speed (km/h)", TOP_SPEED_KMH, Widget::Number),
        float_field("battery_capacity_kWh", "Battery Capacity (kWh)", BATTERY_CAPACITY_KWH),
        int_field("torque_nm", "Torque (Nm)", TORQUE_NM, Widget::Number),
        int_field("efficiency_wh_per_km", "Efficiency (Wh/km)", EFFICIENCY_WH_PER_KM, Widget::Number),
        float_field("acceleration_0_100_s", "0–100 km/h (s)", ACCELERATION_0_100_S),
        int_field("seats", "Seats", SEATS, Widget::Slider),
        int_field("length_mm", "Length (mm)", LENGTH_MM, Widget::Number),
        int_field("width_mm", "Width (mm)", WIDTH_MM, Widget::Number),
        int_field("height_mm", "Height (mm)", HEIGHT_MM, Widget::Number),
    ]
}

/// Submitted form body (`application/x-www-form-urlencoded`).
/// Absent fields fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FormInput {
    pub brand: String,
    pub model: String,
    pub car_body_type: String,
    pub drivetrain: String,
    pub segment: String,
    pub top_speed_kmh: String,
    #[serde(rename = "battery_capacity_kWh")]
    pub battery_capacity_kwh: String,
    pub torque_nm: String,
    pub efficiency_wh_per_km: String,
    pub acceleration_0_100_s: String,
    pub seats: String,
    pub length_mm: String,
    pub width_mm: String,
    pub height_mm: String,
}

impl Default for FormInput {
    fn default() -> Self {
        Self {
            brand: "Audi".into(),
            model: "e-tron GT".into(),
            car_body_type: BodyType::Suv.as_str().into(),
            drivetrain: Drivetrain::Fwd.as_str().into(),
            segment: Segment::Compact.as_str().into(),
            top_speed_kmh: "200".into(),
            battery_capacity_kwh: "60.0".into(),
            torque_nm: "400".into(),
            efficiency_wh_per_km: "140".into(),
            acceleration_0_100_s: "4.0".into(),
            seats: "2".into(),
            length_mm: "4600".into(),
            width_mm: "2000".into(),
            height_mm: "1300".into(),
        }
    }
}

fn parse_int(field: &'static str, raw: &str, bounds: Bounds<i64>) -> Result<i64, FieldError> {
    let v = raw.trim().parse::<i64>().map_err(|_| FieldError::NotANumber {
        field,
        value: raw.to_string(),
    })?;
    bounds.check(field, v)
}

fn parse_float(field: &'static str, raw: &str, bounds: Bounds<f64>) -> Result<f64, FieldError> {
    let v = raw.trim().parse::<f64>().map_err(|_| FieldError::NotANumber {
        field,
        value: raw.to_string(),
    })?;
    bounds.check(field, v)
}

impl FormInput {
    /// Current raw value of a numeric field, by wire name.
    pub fn numeric_value(&self, name: &str) -> Option<&str> {
        let v = match name {
            "top_speed_kmh" => &self.top_speed_kmh,
            "battery_capacity_kWh" => &self.battery_capacity_kwh,
            "torque_nm" => &self.torque_nm,
            "efficiency_wh_per_km" => &self.efficiency_wh_per_km,
            "acceleration_0_100_s" => &self.acceleration_0_100_s,
            "seats" => &self.seats,
            "length_mm" => &self.length_mm,
            "width_mm" => &self.width_mm,
            "height_mm" => &self.height_mm,
            _ => return None,
        };
        Some(v)
    }

    /// Map the current values onto a record. Anything outside the widget
    /// bounds is refused here, before the pipeline sees it.
    pub fn to_record(&self) -> Result<VehicleRecord, FieldError> {
        Ok(VehicleRecord {
            brand: self.brand.clone(),
            model: self.model.clone(),
            car_body_type: BodyType::parse(&self.car_body_type)?,
            drivetrain: Drivetrain::parse(&self.drivetrain)?,
            segment: Segment::parse(&self.segment)?,
            top_speed_kmh: parse_int("top_speed_kmh", &self.top_speed_kmh, TOP_SPEED_KMH)?,
            battery_capacity_kwh: parse_float(
                "battery_capacity_kWh",
                &self.battery_capacity_kwh,
                BATTERY_CAPACITY_KWH,
            )?,
            torque_nm: parse_int("torque_nm", &self.torque_nm, TORQUE_NM)?,
            efficiency_wh_per_km: parse_int(
                "efficiency_wh_per_km",
                &self.efficiency_wh_per_km,
                EFFICIENCY_WH_PER_KM,
            )?,
            acceleration_0_100_s: parse_float(
                "acceleration_0_100_s",
                &self.acceleration_0_100_s,
                ACCELERATION_0_100_S,
            )?,
            seats: parse_int("seats", &self.seats, SEATS)?,
            length_mm: parse_int("length_mm", &self.length_mm, LENGTH_MM)?,
            width_mm: parse_int("width_mm", &self.width_mm, WIDTH_MM)?,
            height_mm: parse_int("height_mm", &self.height_mm, HEIGHT_MM)?,
        })
    }
}

/// Per-form state. `Submitted` only exists for the duration of
/// [`FormState::submit`]; the call is synchronous.
#[derive(Debug, Clone, PartialEq)]
pub enum FormState {
    Idle,
    Success(f64),
    Failed(String),
}

impl FormState {
    /// Idle -> Submitted -> {Success, Failed}. Every failure, whether in
    /// building the record or inside the pipeline, becomes `Failed`.
    pub fn submit(predictor: &dyn RangePredictor, input: &FormInput) -> Self {
        let result = input
            .to_record()
            .map_err(PredictError::from)
            .and_then(|record| invoke(predictor, &record));

        match result {
            Ok(km) => {
                tracing::info!("form prediction model={} range_km={:.2}", input.model, km);
                Self::Success(km)
            }
            Err(e) => {
                tracing::warn!("form prediction failed model={}: {}", input.model, e);
                Self::Failed(e.to_string())
            }
        }
    }
}

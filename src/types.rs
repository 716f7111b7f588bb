use std::fmt;

use crate::error::FieldError;

/// Closed set of training-time string values for one categorical column.
pub trait Categorical: Copy + Sized + 'static {
    const FIELD: &'static str;
    const ALL: &'static [Self];

    fn as_str(self) -> &'static str;

    fn parse(value: &str) -> Result<Self, FieldError> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == value)
            .ok_or_else(|| FieldError::UnknownChoice {
                field: Self::FIELD,
                allowed: Self::ALL
                    .iter()
                    .map(|c| c.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
                value: value.to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyType {
    Suv,
    Hatchback,
    Sedan,
}

impl Categorical for BodyType {
    const FIELD: &'static str = "car_body_type";
    const ALL: &'static [Self] = &[Self::Suv, Self::Hatchback, Self::Sedan];

    fn as_str(self) -> &'static str {
        match self {
            Self::Suv => "SUV",
            Self::Hatchback => "Hatchback",
            Self::Sedan => "Sedan",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Drivetrain {
    Fwd,
    Rwd,
    Awd,
}

impl Categorical for Drivetrain {
    const FIELD: &'static str = "drivetrain";
    const ALL: &'static [Self] = &[Self::Fwd, Self::Rwd, Self::Awd];

    fn as_str(self) -> &'static str {
        match self {
            Self::Fwd => "FWD",
            Self::Rwd => "RWD",
            Self::Awd => "AWD",
        }
    }
}

/// Market segment. The artifact was fitted on the spaced spelling ("A - Mini").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    Mini,
    Compact,
    Medium,
}

impl Categorical for Segment {
    const FIELD: &'static str = "segment";
    const ALL: &'static [Self] = &[Self::Mini, Self::Compact, Self::Medium];

    fn as_str(self) -> &'static str {
        match self {
            Self::Mini => "A - Mini",
            Self::Compact => "B - Compact",
            Self::Medium => "C - Medium",
        }
    }
}

macro_rules! display_as_str {
    ($($t:ty),*) => {
        $(impl fmt::Display for $t {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

display_as_str!(BodyType, Drivetrain, Segment);

/// Inclusive `[min, max]` range accepted by the input surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds<T> {
    pub min: T,
    pub max: T,
}

impl<T: PartialOrd + Copy + fmt::Display> Bounds<T> {
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }

    // NaN compares false on both sides, so it is never contained.
    pub fn contains(&self, value: T) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn check(&self, field: &'static str, value: T) -> Result<T, FieldError> {
        if self.contains(value) {
            Ok(value)
        } else {
            Err(FieldError::OutOfBounds {
                field,
                min: self.min.to_string(),
                max: self.max.to_string(),
                value: value.to_string(),
            })
        }
    }
}

pub const TOP_SPEED_KMH: Bounds<i64> = Bounds::new(100, 350);
pub const BATTERY_CAPACITY_KWH: Bounds<f64> = Bounds::new(10.0, 150.0);
pub const TORQUE_NM: Bounds<i64> = Bounds::new(50, 1200);
pub const EFFICIENCY_WH_PER_KM: Bounds<i64> = Bounds::new(100, 250);
pub const ACCELERATION_0_100_S: Bounds<f64> = Bounds::new(2.0, 20.0);
pub const SEATS: Bounds<i64> = Bounds::new(2, 7);
pub const LENGTH_MM: Bounds<i64> = Bounds::new(3000, 5500);
pub const WIDTH_MM: Bounds<i64> = Bounds::new(1500, 2500);
pub const HEIGHT_MM: Bounds<i64> = Bounds::new(1200, 2000);

/// One EV configuration, exactly the columns the pipeline was fitted on.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleRecord {
    pub brand: String,
    pub model: String,
    pub car_body_type: BodyType,
    pub drivetrain: Drivetrain,
    pub segment: Segment,
    pub top_speed_kmh: i64,
    pub battery_capacity_kwh: f64,
    pub torque_nm: i64,
    pub efficiency_wh_per_km: i64,
    pub acceleration_0_100_s: f64,
    pub seats: i64,
    pub length_mm: i64,
    pub width_mm: i64,
    pub height_mm: i64,
}

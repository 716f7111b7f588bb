//! Three fixed example vehicles, predicted on every page render.

use crate::error::PredictError;
use crate::model::RangePredictor;
use crate::predict::{format_showcase_range, invoke};
use crate::types::{BodyType, Drivetrain, Segment, VehicleRecord};

pub const SHOWCASE_COLUMNS: usize = 3;

pub fn sample_vehicles() -> [VehicleRecord; 3] {
    [
        VehicleRecord {
            brand: "Mazda".into(),
            model: "Mazda MX-30".into(),
            car_body_type: BodyType::Suv,
            drivetrain: Drivetrain::Fwd,
            segment: Segment::Medium,
            top_speed_kmh: 140,
            battery_capacity_kwh: 35.5,
            torque_nm: 270,
            efficiency_wh_per_km: 160,
            acceleration_0_100_s: 9.7,
            seats: 5,
            length_mm: 4395,
            width_mm: 1795,
            height_mm: 1555,
        },
        VehicleRecord {
            brand: "Mini".into(),
            model: "Mini Cooper SE".into(),
            car_body_type: BodyType::Hatchback,
            drivetrain: Drivetrain::Fwd,
            segment: Segment::Compact,
            top_speed_kmh: 150,
            battery_capacity_kwh: 32.6,
            torque_nm: 270,
            efficiency_wh_per_km: 145,
            acceleration_0_100_s: 7.3,
            seats: 4,
            length_mm: 3850,
            width_mm: 1727,
            height_mm: 1432,
        },
        VehicleRecord {
            brand: "Honda".into(),
            model: "Honda e".into(),
            car_body_type: BodyType::Hatchback,
            drivetrain: Drivetrain::Rwd,
            segment: Segment::Mini,
            top_speed_kmh: 145,
            battery_capacity_kwh: 35.5,
            torque_nm: 315,
            efficiency_wh_per_km: 180,
            acceleration_0_100_s: 8.3,
            seats: 4,
            length_mm: 3895,
            width_mm: 1750,
            height_mm: 1495,
        },
    ]
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShowcaseCard {
    pub column: usize,
    pub model: String,
    pub car_body_type: BodyType,
    pub segment: Segment,
    pub battery_capacity_kwh: f64,
    pub efficiency_wh_per_km: i64,
    pub acceleration_0_100_s: f64,
    pub seats: i64,
    pub range_km: f64,
}

impl ShowcaseCard {
    fn new(index: usize, v: &VehicleRecord, range_km: f64) -> Self {
        Self {
            column: index % SHOWCASE_COLUMNS,
            model: v.model.clone(),
            car_body_type: v.car_body_type,
            segment: v.segment,
            battery_capacity_kwh: v.battery_capacity_kwh,
            efficiency_wh_per_km: v.efficiency_wh_per_km,
            acceleration_0_100_s: v.acceleration_0_100_s,
            seats: v.seats,
            range_km,
        }
    }

    pub fn range_label(&self) -> String {
        format_showcase_range(self.range_km)
    }
}

/// Predict every sample in order. The first failure aborts the whole
/// showcase; samples are fixed at authoring time so there is no recovery.
pub fn build_showcase(predictor: &dyn RangePredictor) -> Result<Vec<ShowcaseCard>, PredictError> {
    sample_vehicles()
        .iter()
        .enumerate()
        .map(|(i, v)| -> Result<ShowcaseCard, PredictError> {
            Ok(ShowcaseCard::new(i, v, invoke(predictor, v)?))
        })
        .collect()
}

/// Cards grouped by column, preserving order within each column.
pub fn by_column(cards: &[ShowcaseCard]) -> [Vec<&ShowcaseCard>; SHOWCASE_COLUMNS] {
    let mut cols: [Vec<&ShowcaseCard>; SHOWCASE_COLUMNS] = Default::default();
    for card in cards {
        cols[card.column].push(card);
    }
    cols
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::FeatureRow;

    struct ByEfficiency;

    impl RangePredictor for ByEfficiency {
        fn predict(&self, row: &FeatureRow) -> Result<f64, PredictError> {
            Ok(row.number("battery_capacity_kWh")? * 1000.0 / row.number("efficiency_wh_per_km")?)
        }
    }

    struct FailOn(&'static str);

    impl RangePredictor for FailOn {
        fn predict(&self, row: &FeatureRow) -> Result<f64, PredictError> {
            if row.text("model") == Some(self.0) {
                return Err(PredictError::Backend("unseen category".into()));
            }
            Ok(100.0)
        }
    }

    #[test]
    fn three_cards_in_literal_order() {
        let cards = build_showcase(&ByEfficiency).unwrap();
        let models: Vec<_> = cards.iter().map(|c| c.model.as_str()).collect();
        assert_eq!(models, ["Mazda MX-30", "Mini Cooper SE", "Honda e"]);

        let specs: Vec<_> = cards
            .iter()
            .map(|c| (c.battery_capacity_kwh, c.efficiency_wh_per_km, c.acceleration_0_100_s, c.seats))
            .collect();
        assert_eq!(specs, [(35.5, 160, 9.7, 5), (32.6, 145, 7.3, 4), (35.5, 180, 8.3, 4)]);
        assert_eq!(cards[0].car_body_type, BodyType::Suv);
        assert_eq!(cards[0].segment, Segment::Medium);
    }

    #[test]
    fn cards_are_round_robin_across_columns() {
        let cards = build_showcase(&ByEfficiency).unwrap();
        let cols: Vec<_> = cards.iter().map(|c| c.column).collect();
        assert_eq!(cols, [0, 1, 2]);

        let grouped = by_column(&cards);
        assert!(grouped.iter().all(|c| c.len() == 1));
        assert_eq!(grouped[2][0].model, "Honda e");
    }

    #[test]
    fn range_is_whole_kilometres() {
        let cards = build_showcase(&ByEfficiency).unwrap();
        let labels: Vec<_> = cards.iter().map(ShowcaseCard::range_label).collect();
        assert_eq!(labels, ["222 km", "225 km", "197 km"]);
    }

    #[test]
    fn failing_sample_aborts_showcase() {
        let err = build_showcase(&FailOn("Mini Cooper SE")).unwrap_err();
        assert_eq!(err.to_string(), "pipeline raised: unseen category");
    }
}

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, Response},
    Router,
};
use http_body_util::BodyExt;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use tower::util::ServiceExt;

use ev_range_estimator::{
    error::PredictError,
    model::RangePredictor,
    record::FeatureRow,
    server::{router, AppState},
};

/// battery_kWh * 1000 / efficiency_Wh_per_km, counting calls.
#[derive(Default)]
pub struct LinearStub {
    pub calls: AtomicUsize,
}

impl RangePredictor for LinearStub {
    fn predict(&self, row: &FeatureRow) -> Result<f64, PredictError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(row.number("battery_capacity_kWh")? * 1000.0 / row.number("efficiency_wh_per_km")?)
    }
}

impl LinearStub {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

/// Raises for one model name, linear otherwise.
pub struct FailForModel(pub &'static str);

impl RangePredictor for FailForModel {
    fn predict(&self, row: &FeatureRow) -> Result<f64, PredictError> {
        if row.text("model") == Some(self.0) {
            return Err(PredictError::Backend(format!(
                "Found unknown categories ['{}'] in column 0",
                self.0
            )));
        }
        Ok(row.number("battery_capacity_kWh")? * 1000.0 / row.number("efficiency_wh_per_km")?)
    }
}

pub fn app(predictor: Arc<dyn RangePredictor>) -> Router {
    router(AppState::new(predictor).unwrap())
}

pub fn form_body(pairs: &[(&str, &str)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

pub fn default_pairs() -> Vec<(&'static str, &'static str)> {
    vec![
        ("brand", "Audi"),
        ("model", "e-tron GT"),
        ("car_body_type", "SUV"),
        ("drivetrain", "FWD"),
        ("segment", "B - Compact"),
        ("top_speed_kmh", "200"),
        ("battery_capacity_kWh", "60.0"),
        ("torque_nm", "400"),
        ("efficiency_wh_per_km", "140"),
        ("acceleration_0_100_s", "4.0"),
        ("seats", "2"),
        ("length_mm", "4600"),
        ("width_mm", "2000"),
        ("height_mm", "1300"),
    ]
}

pub fn with(pairs: &[(&'static str, &'static str)], key: &str, value: &'static str) -> Vec<(&'static str, &'static str)> {
    pairs
        .iter()
        .map(|&(k, v)| if k == key { (k, value) } else { (k, v) })
        .collect()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_form(app: Router, pairs: &[(&str, &str)]) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(form_body(pairs)))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

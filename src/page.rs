//! HTML for the single page and its static theme.

use minijinja::{context, Environment};
use serde::Serialize;

use crate::error::RenderError;
use crate::form::{numeric_fields, FormInput, FormState, Widget};
use crate::predict::format_form_range;
use crate::showcase::{by_column, ShowcaseCard};
use crate::types::{BodyType, Categorical, Drivetrain, Segment};

// The `.html` suffix turns on minijinja's HTML auto-escaping.
const PAGE_NAME: &str = "page.html";
const PAGE_TEMPLATE: &str = include_str!("../templates/page.html");

pub const THEME_CSS: &str = r#"html, body {
    background-color: #121212;
    color: #f0f0f0;
    font-family: 'Segoe UI', sans-serif;
    margin: 0;
}
main { max-width: 1200px; margin: 0 auto; padding: 2em; }
.main-title {
    font-size: 3em;
    color: #00e6e6;
    text-align: center;
    margin-bottom: 0.3em;
    font-weight: bold;
}
.sub-title {
    text-align: center;
    font-size: 1.2em;
    color: #aaaaaa;
    margin-bottom: 2em;
}
.columns { display: flex; gap: 1.5em; }
.column { flex: 1; display: flex; flex-direction: column; gap: 1.5em; }
.custom-card {
    background: linear-gradient(145deg, #1e1e1e, #292929);
    border-radius: 16px;
    padding: 20px;
    box-shadow: 0 0 12px rgba(0, 230, 230, 0.15);
    transition: all 0.3s ease-in-out;
}
.custom-card:hover {
    box-shadow: 0 0 25px rgba(0, 230, 230, 0.4);
    transform: translateY(-5px);
}
.car-header { font-size: 1.1em; font-weight: 600; color: #00e6e6; margin-bottom: 0.5em; }
.car-spec { font-size: 0.9em; color: #cccccc; }
.range-value { font-size: 1.4em; color: #03fc8c; font-weight: bold; margin-top: 10px; }
form { background: #1a1a1a; border-radius: 16px; padding: 20px; }
label { display: block; margin: 0.6em 0 0.2em; color: #cccccc; }
input, select { width: 100%; padding: 6px; background: #262626; color: #f0f0f0; border: 1px solid #333; border-radius: 6px; }
button { margin-top: 1.2em; padding: 8px 18px; background: #00e6e6; color: #121212; border: 0; border-radius: 8px; font-weight: bold; cursor: pointer; }
.result { margin-top: 1em; padding: 12px 16px; border-radius: 8px; }
.result.success { background: rgba(3, 252, 140, 0.15); color: #03fc8c; }
.result.error { background: rgba(255, 75, 75, 0.15); color: #ff4b4b; }
"#;

#[derive(Serialize)]
struct CardView<'a> {
    model: &'a str,
    body_type: &'static str,
    segment: &'static str,
    battery: String,
    efficiency: i64,
    acceleration: String,
    seats: i64,
    range: String,
}

impl<'a> From<&'a ShowcaseCard> for CardView<'a> {
    fn from(card: &'a ShowcaseCard) -> Self {
        Self {
            model: &card.model,
            body_type: card.car_body_type.as_str(),
            segment: card.segment.as_str(),
            battery: card.battery_capacity_kwh.to_string(),
            efficiency: card.efficiency_wh_per_km,
            acceleration: card.acceleration_0_100_s.to_string(),
            seats: card.seats,
            range: card.range_label(),
        }
    }
}

#[derive(Serialize)]
struct TextView<'a> {
    name: &'static str,
    label: &'static str,
    value: &'a str,
}

#[derive(Serialize)]
struct OptionView {
    value: &'static str,
    selected: bool,
}

#[derive(Serialize)]
struct SelectView {
    name: &'static str,
    label: &'static str,
    options: Vec<OptionView>,
}

impl SelectView {
    fn of<C: Categorical>(label: &'static str, current: &str) -> Self {
        Self {
            name: C::FIELD,
            label,
            options: C::ALL
                .iter()
                .map(|c| OptionView {
                    value: c.as_str(),
                    selected: c.as_str() == current,
                })
                .collect(),
        }
    }
}

// Bounds are pre-formatted so whole numbers render as "10", not "10.0".
#[derive(Serialize)]
struct NumericView<'a> {
    name: &'static str,
    label: &'static str,
    kind: &'static str,
    min: String,
    max: String,
    step: String,
    value: &'a str,
}

#[derive(Serialize)]
struct ResultView {
    success: bool,
    message: String,
}

impl ResultView {
    fn from_state(state: &FormState) -> Option<Self> {
        match state {
            FormState::Idle => None,
            FormState::Success(km) => Some(Self {
                success: true,
                message: format_form_range(*km),
            }),
            FormState::Failed(msg) => Some(Self {
                success: false,
                message: msg.clone(),
            }),
        }
    }
}

/// Compiled page template. Built once at startup and shared read-only.
pub struct Page {
    env: Environment<'static>,
}

impl Page {
    pub fn new() -> Result<Self, RenderError> {
        let mut env = Environment::new();
        env.add_template(PAGE_NAME, PAGE_TEMPLATE)?;
        Ok(Self { env })
    }

    pub fn render(
        &self,
        cards: &[ShowcaseCard],
        input: &FormInput,
        state: &FormState,
    ) -> Result<String, RenderError> {
        let columns: Vec<Vec<CardView>> = by_column(cards)
            .iter()
            .map(|col| col.iter().map(|c| CardView::from(*c)).collect())
            .collect();

        let text_fields = [
            TextView { name: "brand", label: "Brand", value: &input.brand },
            TextView { name: "model", label: "Model", value: &input.model },
        ];

        let selects = [
            SelectView::of::<BodyType>("Car Body Type", &input.car_body_type),
            SelectView::of::<Drivetrain>("Drivetrain", &input.drivetrain),
            SelectView::of::<Segment>("Segment", &input.segment),
        ];

        let numeric: Vec<NumericView> = numeric_fields()
            .iter()
            .map(|f| NumericView {
                name: f.name,
                label: f.label,
                kind: match f.widget {
                    Widget::Number => "number",
                    Widget::Slider => "range",
                },
                min: f.min.to_string(),
                max: f.max.to_string(),
                step: f.step.to_string(),
                value: input.numeric_value(f.name).unwrap_or_default(),
            })
            .collect();

        let html = self.env.get_template(PAGE_NAME)?.render(context! {
            columns => columns,
            text_fields => text_fields,
            selects => selects,
            numeric_fields => numeric,
            result => ResultView::from_state(state),
        })?;
        Ok(html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(column: usize, model: &str) -> ShowcaseCard {
        ShowcaseCard {
            column,
            model: model.to_string(),
            car_body_type: BodyType::Suv,
            segment: Segment::Medium,
            battery_capacity_kwh: 35.5,
            efficiency_wh_per_km: 160,
            acceleration_0_100_s: 9.7,
            seats: 5,
            range_km: 221.875,
        }
    }

    fn render(cards: &[ShowcaseCard], input: &FormInput, state: &FormState) -> String {
        Page::new().unwrap().render(cards, input, state).unwrap()
    }

    #[test]
    fn idle_page_has_no_result_panel() {
        let html = render(&[card(0, "Mazda MX-30")], &FormInput::default(), &FormState::Idle);
        assert!(html.contains("EV Range Estimator"));
        assert!(html.contains("<div class=\"car-header\">Mazda MX-30</div>"));
        assert!(html.contains("Body: SUV | C - Medium"));
        assert!(html.contains("Battery: 35.5 kWh | Efficiency: 160 Wh/km"));
        assert!(html.contains("0–100 km/h: 9.7s | Seats: 5"));
        assert!(html.contains("<div class=\"range-value\">222 km</div>"));
        assert!(!html.contains("class=\"result"));
    }

    #[test]
    fn cards_land_in_their_columns() {
        let cards = [card(0, "A"), card(1, "B"), card(2, "C")];
        let html = render(&cards, &FormInput::default(), &FormState::Idle);
        let col1 = html.find("data-column=\"1\"").unwrap();
        let col2 = html.find("data-column=\"2\"").unwrap();
        let b = html.find(">B<").unwrap();
        assert!(col1 < b && b < col2);
    }

    #[test]
    fn form_carries_bounds_and_defaults() {
        let html = render(&[], &FormInput::default(), &FormState::Idle);
        assert!(html.contains("name=\"seats\" min=\"2\" max=\"7\" step=\"1\" value=\"2\""));
        assert!(html.contains("type=\"range\" id=\"seats\""));
        assert!(html.contains(
            "name=\"battery_capacity_kWh\" min=\"10\" max=\"150\" step=\"0.01\" value=\"60.0\""
        ));
        assert!(html.contains("<option value=\"B - Compact\" selected>"));
        assert!(html.contains("<option value=\"Sedan\">"));
        assert!(html.contains("name=\"model\" value=\"e-tron GT\""));
    }

    #[test]
    fn result_panels() {
        let ok = render(&[], &FormInput::default(), &FormState::Success(428.571));
        assert!(ok.contains("<div class=\"result success\">🏁 Estimated Range: 428.57 km</div>"));

        let failed = render(
            &[],
            &FormInput::default(),
            &FormState::Failed("pipeline raised: <boom>".into()),
        );
        assert!(failed.contains(
            "<div class=\"result error\">Prediction failed: pipeline raised: &lt;boom&gt;</div>"
        ));
    }

    #[test]
    fn user_text_is_auto_escaped() {
        let input = FormInput {
            model: "\"><script>".into(),
            ..FormInput::default()
        };
        let html = render(&[card(0, "<b>&</b>")], &input, &FormState::Idle);
        assert!(html.contains("value=\"&quot;&gt;&lt;script&gt;\""));
        assert!(html.contains("<div class=\"car-header\">&lt;b&gt;&amp;&lt;"));
        assert!(!html.contains("<script>"));
        assert!(!html.contains("<b>&</b>"));
    }
}

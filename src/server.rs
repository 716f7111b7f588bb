use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Form, Router,
};
use std::sync::Arc;

use crate::error::{PredictError, RenderError};
use crate::form::{FormInput, FormState};
use crate::model::RangePredictor;
use crate::page::{Page, THEME_CSS};
use crate::showcase::build_showcase;

// ---------- Server state ----------

/// Loaded once at startup, read by every request, never mutated.
#[derive(Clone)]
pub struct AppState {
    predictor: Arc<dyn RangePredictor>,
    page: Arc<Page>,
}

impl AppState {
    pub fn new(predictor: Arc<dyn RangePredictor>) -> Result<Self, RenderError> {
        Ok(Self {
            predictor,
            page: Arc::new(Page::new()?),
        })
    }
}

/// Reasons the page cannot be served at all.
pub enum PageFailure {
    /// A showcase sample failed to predict.
    Showcase(PredictError),
    Render(RenderError),
}

impl From<RenderError> for PageFailure {
    fn from(e: RenderError) -> Self {
        Self::Render(e)
    }
}

impl IntoResponse for PageFailure {
    fn into_response(self) -> Response {
        let message = match self {
            Self::Showcase(e) => {
                tracing::error!("showcase render aborted: {}", e);
                format!("showcase prediction failed: {e}")
            }
            Self::Render(e) => {
                tracing::error!("page render failed: {}", e);
                e.to_string()
            }
        };
        (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
    }
}

// ---------- Handlers ----------

async fn index(State(state): State<AppState>) -> Result<Html<String>, PageFailure> {
    let cards = build_showcase(state.predictor.as_ref()).map_err(PageFailure::Showcase)?;
    let html = state.page.render(&cards, &FormInput::default(), &FormState::Idle)?;
    Ok(Html(html))
}

async fn submit(
    State(state): State<AppState>,
    Form(input): Form<FormInput>,
) -> Result<Html<String>, PageFailure> {
    // Same order as a fresh page load: samples first, then the form.
    let cards = build_showcase(state.predictor.as_ref()).map_err(PageFailure::Showcase)?;
    let outcome = FormState::submit(state.predictor.as_ref(), &input);
    let html = state.page.render(&cards, &input, &outcome)?;
    Ok(Html(html))
}

async fn theme() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], THEME_CSS)
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index).post(submit))
        .route("/static/theme.css", get(theme))
        .with_state(state)
}

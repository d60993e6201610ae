//! Server-rendered analysis page.
//!
//! `GET /` renders an empty view, `POST /` runs one submit against the proxy
//! in-process and renders the resulting state. A small inline script adds
//! Enter-to-submit and the loading spinner; the page works without it.

use askama::Template;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Form,
};
use emotext_core::view::{Chart, ViewState, ABOUT_TEXT};
use serde::Deserialize;
use tracing::{debug, error};

use crate::state::AppState;

// ============================================================
// TEMPLATES
// ============================================================

#[derive(Template)]
#[template(path = "index.html")]
struct PageTemplate {
    text: String,
    show_info: bool,
    info_label: &'static str,
    about: &'static str,
    loading: bool,
    error: Option<String>,
    chart: Option<ChartView>,
}

/// View model for the bar chart.
struct ChartView {
    title: &'static str,
    dataset_label: &'static str,
    bars: Vec<BarView>,
}

/// View model for one bar, numbers pre-formatted.
struct BarView {
    label: String,
    score: String,
    height: String,
    fill: &'static str,
    border: &'static str,
}

impl ChartView {
    fn from_chart(chart: &Chart) -> Self {
        Self {
            title: chart.title,
            dataset_label: chart.dataset_label,
            bars: chart
                .bars
                .iter()
                .map(|bar| BarView {
                    label: bar.label.clone(),
                    score: format!("{:.2}", bar.score),
                    height: format!("{:.1}", chart.height_percent(bar)),
                    fill: bar.fill,
                    border: bar.border,
                })
                .collect(),
        }
    }
}

impl PageTemplate {
    fn from_state(state: &ViewState) -> Self {
        Self {
            text: state.text.clone(),
            show_info: state.show_info,
            info_label: state.info_label(),
            about: ABOUT_TEXT,
            loading: state.loading,
            error: state.error.clone(),
            chart: state.chart().as_ref().map(ChartView::from_chart),
        }
    }
}

// ============================================================
// HANDLERS
// ============================================================

#[derive(Deserialize, Default)]
pub struct PageQuery {
    pub info: Option<bool>,
}

#[derive(Deserialize)]
pub struct PageForm {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub info: Option<String>,
    #[serde(default)]
    pub action: Option<String>,
}

impl PageForm {
    fn show_info(&self) -> bool {
        matches!(self.info.as_deref(), Some("true") | Some("on"))
    }
}

/// GET / - Serve the analysis page.
pub async fn index(Query(query): Query<PageQuery>) -> Response {
    let mut view = ViewState::new();
    view.show_info = query.info.unwrap_or(false);
    render(&view)
}

/// POST / - Analyze the submitted text, or toggle the info panel.
pub async fn submit(State(state): State<AppState>, Form(form): Form<PageForm>) -> Response {
    let mut view = ViewState::with_text(form.text.clone());
    view.show_info = form.show_info();

    if form.action.as_deref() == Some("toggle-info") {
        view.toggle_info();
        return render(&view);
    }

    view.submit(&state.service).await;
    debug!(
        has_result = view.result.is_some(),
        has_error = view.error.is_some(),
        "Analysis page submitted"
    );

    render(&view)
}

fn render(view: &ViewState) -> Response {
    match PageTemplate::from_state(view).render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to render analysis page");
            (StatusCode::INTERNAL_SERVER_ERROR, Html("Template error".to_string())).into_response()
        }
    }
}

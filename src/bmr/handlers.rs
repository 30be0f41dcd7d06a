use axum::{
    extract::State,
    http::StatusCode,
    response::Html,
    routing::post,
    Form, Router,
};
use tracing::{info, instrument, warn};

use super::{dto::BmrForm, services::estimate_from_strs};
use crate::{
    state::AppState,
    views::{render_page, PageView},
};

pub fn bmr_routes() -> Router<AppState> {
    Router::new().route("/bmr", post(calculate))
}

/// POST /bmr: renders the page with BMR and maintenance; the log is untouched.
#[instrument(skip(state))]
pub async fn calculate(
    State(state): State<AppState>,
    Form(form): Form<BmrForm>,
) -> Result<Html<String>, (StatusCode, String)> {
    let result = estimate_from_strs(&form.weight, &form.height, &form.age, &form.sex, &form.activity)
        .map_err(|e| {
            warn!(error = %e, "bmr input rejected");
            e.into_rejection()
        })?;
    info!(bmr = result.bmr, maintenance = result.maintenance, "bmr calculated");

    let (entries, totals) = state.log.snapshot();
    Ok(Html(render_page(&PageView {
        entries: &entries,
        totals,
        image_error: None,
        bmr: Some(result),
    })))
}

use axum::{
    extract::{multipart::MultipartError, DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Json, Router,
};
use bytes::Bytes;
use tracing::{info, instrument, warn};

use super::{
    dto::{LogResponse, TextEntryForm},
    services::{record_image, record_text, Upload},
};
use crate::{
    error::AppError,
    images::allowed_file,
    parse::required_f64,
    state::AppState,
    views::{render_page, PageView},
};

const EXT_ERROR: &str = "Only JPG / PNG images allowed";

// --- public routers ---

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/api/log", get(log_json))
}

pub fn write_routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/text", post(add_text))
        .route("/reset", post(reset))
        .route(
            "/image",
            post(add_image).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
}

// --- handlers ---

#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> Html<String> {
    page(&state, None)
}

#[instrument(skip(state))]
pub async fn log_json(State(state): State<AppState>) -> Json<LogResponse> {
    let (entries, totals) = state.log.snapshot();
    Json(LogResponse { entries, totals })
}

/// POST /text: a miss is logged and otherwise ignored.
#[instrument(skip(state))]
pub async fn add_text(
    State(state): State<AppState>,
    Form(form): Form<TextEntryForm>,
) -> Result<Redirect, (StatusCode, String)> {
    let grams = required_f64("grams", &form.grams).map_err(AppError::into_rejection)?;
    record_text(&state.foods, &state.log, &form.food, grams);
    Ok(Redirect::to("/"))
}

/// POST /image (multipart): fields `img` and `grams`.
#[instrument(skip(state, mp))]
pub async fn add_image(
    State(state): State<AppState>,
    mut mp: Multipart,
) -> Result<Response, (StatusCode, String)> {
    let mut upload: Option<Upload> = None;
    let mut grams_raw: Option<String> = None;

    while let Some(field) = mp.next_field().await.map_err(multipart_rejection)? {
        let name = field.name().map(|s| s.to_string());
        match name.as_deref() {
            Some("img") => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let body: Bytes = field.bytes().await.map_err(multipart_rejection)?;
                upload = Some(Upload { filename, body });
            }
            Some("grams") => {
                grams_raw = Some(field.text().await.map_err(multipart_rejection)?);
            }
            _ => {}
        }
    }

    let Some(upload) = upload.filter(|u| !u.filename.is_empty()) else {
        return Ok(Redirect::to("/").into_response());
    };

    if !allowed_file(&upload.filename) {
        warn!(filename = %upload.filename, "rejected upload extension");
        return Ok(page(&state, Some(EXT_ERROR)).into_response());
    }

    let grams = required_f64("grams", grams_raw.as_deref().unwrap_or_default())
        .map_err(AppError::into_rejection)?;

    let intake = record_image(&state, upload, grams)
        .await
        .map_err(AppError::into_rejection)?;
    info!(guess = %intake.guess, matched = intake.entry.is_some(), "image classified");

    Ok(Redirect::to("/").into_response())
}

#[instrument(skip(state))]
pub async fn reset(State(state): State<AppState>) -> Redirect {
    let dropped = state.log.clear();
    info!(dropped, "daily log cleared");
    Redirect::to("/")
}

fn page(state: &AppState, image_error: Option<&str>) -> Html<String> {
    let (entries, totals) = state.log.snapshot();
    Html(render_page(&PageView {
        entries: &entries,
        totals,
        image_error,
        bmr: None,
    }))
}

fn multipart_rejection(e: MultipartError) -> (StatusCode, String) {
    (e.status(), e.body_text())
}

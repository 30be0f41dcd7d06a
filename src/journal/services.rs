use bytes::Bytes;
use tracing::info;
use uuid::Uuid;

use super::{repo::DailyLog, repo_types::LogEntry};
use crate::{
    error::AppResult,
    foods::{
        services::{compute, find_food},
        FoodTable,
    },
    images::{self, services::content_type_for},
    state::AppState,
};

/// An image the user submitted, with the name their client gave it.
pub struct Upload {
    pub filename: String,
    pub body: Bytes,
}

#[derive(Debug)]
pub struct ImageIntake {
    pub guess: String,
    pub entry: Option<LogEntry>,
}

/// Match `query` against the table and log it on success.
/// A miss leaves the log untouched and is reported back as `None`.
pub fn record_text(
    foods: &FoodTable,
    log: &DailyLog,
    query: &str,
    grams: f64,
) -> Option<LogEntry> {
    let Some(row) = find_food(foods, query) else {
        info!(query, "no reference food matched");
        return None;
    };
    let entry = compute(row, grams);
    log.append(entry.clone());
    info!(food = %entry.food, grams, calories = entry.calories, entries = log.len(), "intake logged");
    Some(entry)
}

/// Store the upload, guess the food from it, then behave like [`record_text`].
pub async fn record_image(st: &AppState, upload: Upload, grams: f64) -> AppResult<ImageIntake> {
    let key = images::secure_filename(&upload.filename)
        .unwrap_or_else(|| format!("upload-{}.{}", Uuid::new_v4(), upload_ext(&upload.filename)));

    st.storage
        .put_object(&key, upload.body.clone(), content_type_for(&key))
        .await?;

    let name = key.clone();
    let body = upload.body;
    let guess = tokio::task::spawn_blocking(move || images::classify(&body, &name))
        .await
        .map_err(anyhow::Error::from)??;

    let entry = record_text(&st.foods, &st.log, &guess, grams);
    Ok(ImageIntake { guess, entry })
}

fn upload_ext(filename: &str) -> String {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .filter(|ext| ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .unwrap_or_else(|| "bin".into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::AppError, foods::repo_types::ReferenceRow, images::services::test_images::solid_png,
    };

    fn foods() -> FoodTable {
        FoodTable::new(vec![
            ReferenceRow {
                food: "Banana".into(),
                calories: 89.0,
                protein: 1.1,
                carbs: 22.8,
                fat: 0.3,
                fiber: 2.6,
            },
            ReferenceRow {
                food: "Red apple".into(),
                calories: 52.0,
                protein: 0.3,
                carbs: 14.0,
                fat: 0.2,
                fiber: 2.4,
            },
        ])
    }

    #[test]
    fn text_match_appends_entry() {
        let log = DailyLog::new();
        let entry = record_text(&foods(), &log, "BANANA", 120.0).unwrap();
        assert_eq!(entry.food, "Banana");
        assert_eq!(entry.calories, 106.8);
        assert_eq!(log.entries(), vec![entry]);
    }

    #[test]
    fn text_miss_is_a_noop() {
        let log = DailyLog::new();
        assert!(record_text(&foods(), &log, "chicken", 100.0).is_none());
        assert!(log.entries().is_empty());
    }

    #[tokio::test]
    async fn image_by_filename_is_stored_and_logged() {
        let (state, storage) = AppState::fake(foods());
        let upload = Upload {
            filename: "my banana.jpg".into(),
            body: Bytes::from_static(b"not decoded"),
        };

        let intake = record_image(&state, upload, 100.0).await.unwrap();
        assert_eq!(intake.guess, "banana");
        assert_eq!(intake.entry.unwrap().calories, 89.0);
        assert_eq!(state.log.len(), 1);

        let objects = storage.objects.lock();
        assert_eq!(objects.len(), 1);
        assert_eq!(objects[0].0, "my_banana.jpg");
    }

    #[tokio::test]
    async fn accented_filename_keeps_its_keyword() {
        let (state, storage) = AppState::fake(foods());
        let upload = Upload {
            filename: "bánana.jpg".into(),
            body: Bytes::from_static(b"not decoded"),
        };

        let intake = record_image(&state, upload, 100.0).await.unwrap();
        assert_eq!(intake.guess, "banana");
        assert_eq!(storage.objects.lock()[0].0, "banana.jpg");
    }

    #[tokio::test]
    async fn image_by_colour_matches_table() {
        let (state, _storage) = AppState::fake(foods());
        let upload = Upload {
            filename: "IMG_0001.png".into(),
            body: Bytes::from(solid_png(60, 60, [220, 20, 20])),
        };

        let intake = record_image(&state, upload, 200.0).await.unwrap();
        assert_eq!(intake.guess, "apple");
        assert_eq!(intake.entry.unwrap().food, "Red apple");
    }

    #[tokio::test]
    async fn unmatched_guess_leaves_log_empty() {
        let (state, _storage) = AppState::fake(foods());
        let upload = Upload {
            filename: "photo.png".into(),
            body: Bytes::from(solid_png(60, 60, [0, 0, 255])),
        };

        let intake = record_image(&state, upload, 50.0).await.unwrap();
        assert_eq!(intake.guess, "rice");
        assert!(intake.entry.is_none());
        assert_eq!(state.log.len(), 0);
    }

    #[tokio::test]
    async fn corrupt_image_is_decode_error() {
        let (state, storage) = AppState::fake(foods());
        let upload = Upload {
            filename: "photo.png".into(),
            body: Bytes::from_static(b"garbage"),
        };

        let err = record_image(&state, upload, 50.0).await.unwrap_err();
        assert!(matches!(err, AppError::ImageDecode(_)));
        assert_eq!(state.log.len(), 0);
        // the upload is kept even when it cannot be decoded
        assert_eq!(storage.objects.lock().len(), 1);
    }

    #[test]
    fn fallback_extension() {
        assert_eq!(upload_ext("x.PNG"), "png");
        assert_eq!(upload_ext("noext"), "bin");
    }
}

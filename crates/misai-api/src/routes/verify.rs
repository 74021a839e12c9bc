//! Text, image and video verification routes

use crate::scorer::{self, ImageScore, TextScore, VideoScore};
use crate::{ApiError, ApiResult};
use axum::{
    extract::{Multipart, Path},
    Json,
};
use serde::Deserialize;
use tracing::info;

#[derive(Deserialize)]
pub struct TestInput {
    pub text: String,
}

pub async fn test_ai(
    Path(model): Path<String>,
    Json(input): Json<TestInput>,
) -> ApiResult<Json<TextScore>> {
    if input.text.trim().is_empty() {
        return Err(ApiError::BadRequest("Input text cannot be empty".to_string()));
    }

    let score = scorer::score_text(&model, &input.text);
    info!("Scored text for {}: hallucination {}", model, score.hallucination_score);
    Ok(Json(score))
}

pub async fn test_image(
    multipart: Multipart,
) -> ApiResult<Json<ImageScore>> {
    let (filename, data) = read_upload(multipart, "image").await?;
    let score = scorer::score_image(&filename, &data);
    info!("Scored image {} ({} bytes): authentic={}", filename, data.len(), score.authentic);
    Ok(Json(score))
}

pub async fn test_video(
    multipart: Multipart,
) -> ApiResult<Json<VideoScore>> {
    let (filename, data) = read_upload(multipart, "video").await?;
    let score = scorer::score_video(&filename, &data);
    info!("Scored video {} ({} bytes): authentic={}", filename, data.len(), score.authentic);
    Ok(Json(score))
}

/// Pull the named file field out of a multipart form
async fn read_upload(mut multipart: Multipart, field_name: &str) -> ApiResult<(String, Vec<u8>)> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(field_name) {
            continue;
        }

        let filename = field
            .file_name()
            .map(str::to_string)
            .filter(|name| !name.is_empty());
        let Some(filename) = filename else {
            break;
        };
        let data = field.bytes().await?.to_vec();
        return Ok((filename, data));
    }

    Err(ApiError::BadRequest(format!("No {} uploaded", field_name)))
}

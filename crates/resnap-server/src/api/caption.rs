use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, State,
    },
    Extension, Json,
};
use resnap_core::UNKNOWN_ITEM;
use serde::Serialize;

use crate::middleware::RequestId;

use super::{ApiError, AppState};

const IMAGE_FIELD: &str = "image";

#[derive(Debug, Serialize)]
pub(super) struct CaptionResponse {
    caption: String,
}

struct Upload {
    bytes: Vec<u8>,
    content_type: Option<String>,
}

/// `POST /caption`: names the item in the uploaded `image` field.
///
/// Provider failures are not surfaced to the caller; the caption falls back
/// to `"unknown item"` so the lookup flow can continue.
pub(super) async fn caption_image(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<CaptionResponse>, ApiError> {
    let mut multipart = multipart
        .map_err(|e| ApiError::new(req_id.0.clone(), "bad_request", e.body_text()))?;

    let Some(upload) = read_image_field(&mut multipart, &req_id).await? else {
        return Err(ApiError::new(
            req_id.0,
            "bad_request",
            "No image file uploaded.",
        ));
    };

    let Some(vision) = state.vision.as_ref() else {
        tracing::warn!(request_id = %req_id.0, "vision provider not configured");
        return Ok(unknown_item());
    };

    match vision
        .describe_image(&upload.bytes, upload.content_type.as_deref())
        .await
    {
        Ok(caption) => Ok(Json(CaptionResponse { caption })),
        Err(e) => {
            tracing::warn!(request_id = %req_id.0, error = %e, "captioning failed");
            Ok(unknown_item())
        }
    }
}

async fn read_image_field(
    multipart: &mut Multipart,
    req_id: &RequestId,
) -> Result<Option<Upload>, ApiError> {
    let bad_upload = |e: MultipartError| ApiError::new(req_id.0.clone(), "bad_request", e.body_text());

    while let Some(field) = multipart.next_field().await.map_err(bad_upload)? {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }
        let content_type = field.content_type().map(str::to_owned);
        let bytes = field.bytes().await.map_err(bad_upload)?;
        if bytes.is_empty() {
            return Ok(None);
        }
        return Ok(Some(Upload {
            bytes: bytes.to_vec(),
            content_type,
        }));
    }
    Ok(None)
}

fn unknown_item() -> Json<CaptionResponse> {
    Json(CaptionResponse {
        caption: UNKNOWN_ITEM.to_owned(),
    })
}

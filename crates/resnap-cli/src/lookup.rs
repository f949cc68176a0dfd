use std::path::Path;

use anyhow::Context;
use resnap_core::{first_thumbnail, Condition, LookupOutcome};

use crate::service::{mime_for_path, Photo, ServiceClient};

/// Text search: the term is the label, the first listing supplies the
/// thumbnail.
pub(crate) async fn search_outcome(
    service: &ServiceClient,
    term: &str,
    condition: Condition,
) -> anyhow::Result<LookupOutcome> {
    let response = service.lookup(term, condition).await?;
    Ok(LookupOutcome {
        label: term.to_owned(),
        condition,
        thumbnail: first_thumbnail(&response.items).map(str::to_owned),
        estimate: response.estimate,
    })
}

/// Photo search: caption the image, then look up the caption. The entry
/// keeps the uploaded photo as its thumbnail.
pub(crate) async fn photo_outcome(
    service: &ServiceClient,
    photo: &Photo,
    condition: Condition,
) -> anyhow::Result<LookupOutcome> {
    let label = service.caption(photo).await;
    tracing::debug!(label = %label, "photo captioned");
    let response = service.lookup(&label, condition).await?;
    Ok(LookupOutcome {
        label,
        condition,
        estimate: response.estimate,
        thumbnail: None,
    })
}

pub(crate) async fn read_photo(path: &Path) -> anyhow::Result<Photo> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("photo.jpg")
        .to_owned();
    Ok(Photo {
        bytes,
        file_name,
        mime: mime_for_path(path),
    })
}

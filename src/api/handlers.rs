use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde_json::Value;

use crate::core::SweeperError;
use crate::export::{ARCHIVE_MEDIA_TYPE, ARCHIVE_NAME};
use crate::ingest::UploadedFile;
use crate::service::{FileInfo, SweeperService};
use crate::session::IngestOutcome;
use crate::summary::Summary;

use super::error::ApiError;
use super::types::{ChartRequest, CleanRequest, ExportQuery};

pub async fn health() -> &'static str {
    "OK"
}

pub async fn list_files(State(service): State<Arc<SweeperService>>) -> Json<Vec<FileInfo>> {
    Json(service.list().await)
}

pub async fn reset(State(service): State<Arc<SweeperService>>) -> StatusCode {
    service.reset().await;
    StatusCode::NO_CONTENT
}

/// PUT /api/v1/files/{name}
///
/// The raw request body is the file content. Uploading a name that is
/// already loaded keeps the loaded state and answers 200 instead of 201.
pub async fn upload(
    State(service): State<Arc<SweeperService>>,
    Path(name): Path<String>,
    body: Bytes,
) -> Result<(StatusCode, Json<FileInfo>), ApiError> {
    let (outcome, info) = service.upload(UploadedFile::new(name, body)).await?;
    let status = match outcome {
        IngestOutcome::Created => StatusCode::CREATED,
        IngestOutcome::Existing => StatusCode::OK,
    };
    Ok((status, Json(info)))
}

pub async fn summary(
    State(service): State<Arc<SweeperService>>,
    Path(name): Path<String>,
) -> Result<Json<Summary>, ApiError> {
    Ok(Json(service.summary(&name).await?))
}

pub async fn clean(
    State(service): State<Arc<SweeperService>>,
    Path(name): Path<String>,
    Json(req): Json<CleanRequest>,
) -> Result<Json<FileInfo>, ApiError> {
    Ok(Json(service.clean(&name, &req.operations).await?))
}

/// POST /api/v1/files/{name}/chart
///
/// Answers with a Plotly figure.
pub async fn chart(
    State(service): State<Arc<SweeperService>>,
    Path(name): Path<String>,
    Json(req): Json<ChartRequest>,
) -> Result<Json<Value>, ApiError> {
    let y = match (&req.y, req.kind.uses_y()) {
        (Some(y), _) => y.as_str(),
        (None, false) => "",
        (None, true) => {
            return Err(SweeperError::InvalidRequest(format!(
                "{:?} chart needs a y column",
                req.kind
            ))
            .into());
        }
    };
    let spec = service.chart(&name, req.kind, &req.x, y).await?;
    Ok(Json(spec.to_plotly()))
}

pub async fn export(
    State(service): State<Arc<SweeperService>>,
    Path(name): Path<String>,
    Query(query): Query<ExportQuery>,
) -> Result<Response, ApiError> {
    let (file_name, export) = service.export(&name, query.format).await?;
    Ok(attachment(export.media_type, &file_name, export.bytes))
}

pub async fn export_all(State(service): State<Arc<SweeperService>>) -> Result<Response, ApiError> {
    let bytes = service.export_all().await?;
    Ok(attachment(ARCHIVE_MEDIA_TYPE, ARCHIVE_NAME, bytes))
}

fn attachment(media_type: &'static str, file_name: &str, bytes: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, media_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        bytes,
    )
        .into_response()
}

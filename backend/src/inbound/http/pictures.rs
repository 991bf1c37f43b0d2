//! Picture API handlers.
//!
//! ```text
//! GET  /customers/picture/{id}
//! POST /customers/picture   multipart/form-data, file field "picture"
//! ```

use actix_multipart::Multipart;
use actix_web::{get, post, web};
use futures_util::TryStreamExt;
use serde_json::json;
use tracing::debug;

use crate::domain::{DomainError, PictureId, PictureRecord, PictureUpload};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_path_id, picture_reference_error};

/// Multipart field carrying the file.
pub const PICTURE_FIELD: &str = "picture";

/// Default upload ceiling of 32 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 32 * 1024 * 1024;

const PICTURE_ID: FieldName = FieldName::new("id");

/// Upload limits registered as app data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadPolicy {
    pub max_bytes: usize,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

fn multipart_error(err: actix_multipart::MultipartError) -> DomainError {
    debug!(error = %err, "multipart payload rejected");
    DomainError::invalid_request(format!("invalid multipart payload: {err}"))
        .with_details(json!({ "code": "invalid_multipart" }))
}

fn too_large(limit: usize) -> DomainError {
    DomainError::invalid_request("picture exceeds the upload size limit")
        .with_details(json!({ "field": PICTURE_FIELD, "code": "payload_too_large", "limit": limit }))
}

/// Read the first `picture` field fully, draining anything else.
async fn read_picture(mut payload: Multipart, policy: UploadPolicy) -> Result<PictureUpload, DomainError> {
    let mut upload = None;
    while let Some(mut field) = payload.try_next().await.map_err(multipart_error)? {
        let wanted = upload.is_none() && field.name() == Some(PICTURE_FIELD);
        if !wanted {
            while field.try_next().await.map_err(multipart_error)?.is_some() {}
            continue;
        }

        let original_filename = field
            .content_disposition()
            .and_then(|disposition| disposition.get_filename())
            .map(str::to_owned);
        let mut content = Vec::new();
        while let Some(chunk) = field.try_next().await.map_err(multipart_error)? {
            if content.len() + chunk.len() > policy.max_bytes {
                return Err(too_large(policy.max_bytes));
            }
            content.extend_from_slice(&chunk);
        }
        upload = Some(PictureUpload {
            content,
            original_filename,
        });
    }

    upload.ok_or_else(|| {
        DomainError::invalid_request("multipart field \"picture\" is required")
            .with_details(json!({ "field": PICTURE_FIELD, "code": "missing_field" }))
    })
}

/// Look up a stored picture path.
#[utoipa::path(
    get,
    path = "/customers/picture/{id}",
    params(("id" = i32, Path, description = "Picture id")),
    responses(
        (status = 200, description = "Picture", body = PictureRecord),
        (status = 400, description = "Invalid id", body = DomainError),
        (status = 401, description = "Missing or invalid token", body = DomainError),
        (status = 404, description = "Picture not found", body = DomainError)
    ),
    tags = ["pictures"],
    operation_id = "getPicture"
)]
#[get("/picture/{id:[0-9]+}")]
pub async fn get_picture(
    state: web::Data<HttpState>,
    _user: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<PictureRecord>> {
    let raw = parse_path_id(&path, PICTURE_ID)?;
    let id = PictureId::new(raw).map_err(picture_reference_error)?;
    let record = state.pictures_query.get(id).await?;
    Ok(web::Json(record))
}

/// Upload a picture and record it.
#[utoipa::path(
    post,
    path = "/customers/picture",
    request_body(content_type = "multipart/form-data", description = "File in the `picture` field"),
    responses(
        (status = 200, description = "Picture stored", body = PictureRecord),
        (status = 400, description = "Missing or oversized file", body = DomainError),
        (status = 401, description = "Missing or invalid token", body = DomainError),
        (status = 500, description = "Storage failure", body = DomainError)
    ),
    tags = ["pictures"],
    operation_id = "uploadPicture"
)]
#[post("/picture")]
pub async fn upload_picture(
    state: web::Data<HttpState>,
    _user: AuthenticatedUser,
    policy: Option<web::Data<UploadPolicy>>,
    payload: Multipart,
) -> ApiResult<web::Json<PictureRecord>> {
    let policy = policy.map(|data| **data).unwrap_or_default();
    let upload = read_picture(payload, policy).await?;
    let record = state.pictures.upload(upload).await?;
    Ok(web::Json(record))
}

#[cfg(test)]
#[path = "pictures_tests.rs"]
mod tests;

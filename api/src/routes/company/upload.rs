use actix_multipart::{Field, Multipart};
use actix_web::{web, HttpResponse};
use futures_util::TryStreamExt;
use serde_json::{Map, Value};

use bizreg_core::domain::entities::image::{ImageKind, ImageUpload};
use bizreg_core::repositories::{CompanyRepository, UserRepository};
use bizreg_core::services::company::ImageHost;
use bizreg_core::services::registration::IdentityProvider;
use bizreg_shared::ApiResponse;

use crate::app::AppState;
use crate::handlers::ApiError;
use crate::middleware::AuthContext;

/// Handler for POST /api/company/upload-logo (multipart field `logo`)
pub async fn upload_logo<U, I, C, H>(
    auth: AuthContext,
    state: web::Data<AppState<U, I, C, H>>,
    payload: Multipart,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    I: IdentityProvider + 'static,
    C: CompanyRepository + 'static,
    H: ImageHost + 'static,
{
    upload_image(auth, state, payload, ImageKind::Logo, "Logo uploaded successfully").await
}

/// Handler for POST /api/company/upload-banner (multipart field `banner`)
pub async fn upload_banner<U, I, C, H>(
    auth: AuthContext,
    state: web::Data<AppState<U, I, C, H>>,
    payload: Multipart,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    I: IdentityProvider + 'static,
    C: CompanyRepository + 'static,
    H: ImageHost + 'static,
{
    upload_image(auth, state, payload, ImageKind::Banner, "Banner uploaded successfully").await
}

async fn upload_image<U, I, C, H>(
    auth: AuthContext,
    state: web::Data<AppState<U, I, C, H>>,
    payload: Multipart,
    kind: ImageKind,
    message: &str,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    I: IdentityProvider + 'static,
    C: CompanyRepository + 'static,
    H: ImageHost + 'static,
{
    let image = read_file_field(payload, kind).await?.ok_or(ApiError::FileMissing)?;

    let uploaded = state
        .companies
        .upload_image(auth.user_id, kind, image)
        .await?;

    let mut data = Map::new();
    data.insert(format!("{}_url", kind.as_str()), Value::String(uploaded.url));
    data.insert("public_id".to_string(), Value::String(uploaded.public_id));

    Ok(HttpResponse::Ok().json(ApiResponse::success(message, Value::Object(data))))
}

/// Read the multipart field named after the image kind.
///
/// At most one byte past the kind's ceiling is buffered: that is enough for
/// the company service to reject the file without holding an arbitrarily
/// large body in memory. Other fields are drained and ignored.
async fn read_file_field(
    mut payload: Multipart,
    kind: ImageKind,
) -> Result<Option<ImageUpload>, ApiError> {
    let limit = kind.max_bytes() + 1;

    while let Some(mut field) = payload.try_next().await.map_err(multipart_error)? {
        if field.content_disposition().get_name() != Some(kind.as_str()) {
            drain(&mut field).await?;
            continue;
        }

        let content_type = field
            .content_type()
            .map(|mime| mime.to_string())
            .unwrap_or_default();
        let file_name = field
            .content_disposition()
            .get_filename()
            .map(str::to_string);

        let mut bytes = Vec::new();
        while let Some(chunk) = field.try_next().await.map_err(multipart_error)? {
            let room = limit.saturating_sub(bytes.len());
            bytes.extend_from_slice(&chunk[..chunk.len().min(room)]);
        }

        if bytes.is_empty() && file_name.is_none() {
            return Ok(None);
        }

        return Ok(Some(ImageUpload {
            bytes,
            content_type,
            file_name,
        }));
    }

    Ok(None)
}

async fn drain(field: &mut Field) -> Result<(), ApiError> {
    while field.try_next().await.map_err(multipart_error)?.is_some() {}
    Ok(())
}

fn multipart_error(err: actix_multipart::MultipartError) -> ApiError {
    ApiError::BadRequest(format!("Invalid multipart body: {}", err))
}

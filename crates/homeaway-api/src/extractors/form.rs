//! `FormSubmission` extractor: multipart or urlencoded bodies as [`FormData`].

use axum::Form;
use axum::extract::{FromRequest, Multipart, Request};
use axum::http::header::CONTENT_TYPE;

use homeaway_core::error::AppError;
use homeaway_service::{FormData, UploadedFile};

use crate::error::ApiError;

/// The submitted form. Parts with a file name become files; every other
/// part is a text field.
#[derive(Debug, Clone)]
pub struct FormSubmission(pub FormData);

impl<S: Send + Sync> FromRequest<S> for FormSubmission {
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| AppError::validation(format!("Invalid multipart body: {e}")))?;
            return Ok(Self(read_multipart(multipart).await?));
        }

        if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state)
                .await
                .map_err(|e| AppError::validation(format!("Invalid form body: {e}")))?;
            let mut form = FormData::new();
            for (name, value) in pairs {
                form.insert_field(name, value);
            }
            return Ok(Self(form));
        }

        Err(AppError::validation(
            "Expected multipart/form-data or application/x-www-form-urlencoded",
        )
        .into())
    }
}

async fn read_multipart(mut multipart: Multipart) -> Result<FormData, AppError> {
    let mut form = FormData::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        match field.file_name().map(str::to_string) {
            Some(file_name) => {
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::validation(format!("Read error: {e}")))?;
                form.insert_file(name, UploadedFile::new(file_name, content_type, data));
            }
            None => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::validation(format!("Read error: {e}")))?;
                form.insert_field(name, text);
            }
        }
    }

    Ok(form)
}

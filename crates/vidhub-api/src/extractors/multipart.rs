//! Buffered multipart form with text fields and uploaded files.

use std::collections::HashMap;

use axum::extract::{FromRequest, Multipart, Request};

use vidhub_core::error::AppError;
use vidhub_service::UploadedFile;

use crate::error::ApiError;

/// A fully read multipart form.
#[derive(Debug, Default)]
pub struct MultipartForm {
    fields: HashMap<String, String>,
    files: HashMap<String, UploadedFile>,
}

impl<S> FromRequest<S> for MultipartForm
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let multipart = Multipart::from_request(req, state).await?;
        Self::read(multipart).await
    }
}

impl MultipartForm {
    /// Read every part. Parts with a file name are files, the rest text.
    /// Empty file parts are dropped.
    async fn read(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(String::from) else {
                continue;
            };

            if let Some(file_name) = field.file_name().map(String::from) {
                let content_type = field.content_type().map(String::from);
                let data = field.bytes().await?;
                if !data.is_empty() {
                    form.files.insert(
                        name,
                        UploadedFile {
                            file_name: Some(file_name),
                            content_type,
                            data,
                        },
                    );
                }
            } else {
                let text = field.text().await?;
                form.fields.insert(name, text);
            }
        }

        Ok(form)
    }

    /// A text field.
    pub fn text(&self, name: &str) -> Option<String> {
        self.fields.get(name).cloned()
    }

    /// Take an uploaded file out of the form.
    pub fn take_file(&mut self, name: &str) -> Option<UploadedFile> {
        self.files.remove(name)
    }

    /// Parse a numeric text field. Blank counts as absent.
    pub fn number(&self, name: &str) -> Result<Option<f64>, AppError> {
        match self.fields.get(name).map(|v| v.trim()) {
            None | Some("") => Ok(None),
            Some(raw) => raw
                .parse::<f64>()
                .map(Some)
                .map_err(|_| AppError::validation(format!("Invalid {name}"))),
        }
    }
}

//! HTTP request handlers, one module per resource.

pub mod auth;
pub mod bookmarks;
pub mod books;
pub mod categories;
pub mod news;
pub mod ratings;
pub mod roles;
pub mod transactions;
pub mod users;

use axum::extract::Multipart;

use crate::error::{AppError, AppResult};

/// A parsed multipart request: the JSON `data` field plus any uploaded
/// files keyed by field name.
pub(crate) struct MultipartPayload {
    pub data: Option<String>,
    pub files: Vec<UploadedFile>,
}

/// One file field pulled out of a multipart body.
pub(crate) struct UploadedFile {
    pub field: String,
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl MultipartPayload {
    /// Drain a multipart stream into memory. Text fields other than `data`
    /// are ignored; fields without a filename are treated as text.
    pub async fn read(mut multipart: Multipart) -> AppResult<Self> {
        let mut data = None;
        let mut files = Vec::new();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?
        {
            let name = field.name().unwrap_or_default().to_string();
            match field.file_name() {
                Some(filename) => {
                    let filename = filename.to_string();
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| AppError::BadRequest(e.to_string()))?;
                    files.push(UploadedFile {
                        field: name,
                        filename,
                        bytes: bytes.to_vec(),
                    });
                }
                None if name == "data" => {
                    data = Some(
                        field
                            .text()
                            .await
                            .map_err(|e| AppError::BadRequest(e.to_string()))?,
                    );
                }
                None => {}
            }
        }

        Ok(MultipartPayload { data, files })
    }

    /// The JSON `data` field deserialized into `T`, or a 400 when missing
    /// or malformed.
    pub fn parse_data<T: serde::de::DeserializeOwned>(&self) -> AppResult<T> {
        let raw = self
            .data
            .as_deref()
            .ok_or_else(|| AppError::BadRequest("Field data harus dikirim".to_string()))?;
        serde_json::from_str(raw).map_err(|e| AppError::BadRequest(format!("Data tidak valid: {e}")))
    }

    /// The first uploaded file with the given field name.
    pub fn file(&self, field: &str) -> Option<&UploadedFile> {
        self.files.iter().find(|f| f.field == field)
    }

    /// The first uploaded file regardless of field name, for single-file
    /// endpoints.
    pub fn any_file(&self) -> Option<&UploadedFile> {
        self.files.first()
    }
}

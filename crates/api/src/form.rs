use std::collections::HashMap;

use axum::extract::Multipart;
use book_site_core::file::FileUpload;

use crate::error::{ApiError, ApiResult};

/// Allowance for multipart boundaries and text fields on top of a file limit.
pub const FORM_OVERHEAD_BYTES: usize = 1024 * 1024;

/// A multipart form buffered into text fields and files, keyed by field name.
#[derive(Debug, Default)]
pub struct FormData {
    fields: HashMap<String, String>,
    files: HashMap<String, FileUpload>,
}

impl FormData {
    pub async fn read(mut multipart: Multipart) -> ApiResult<Self> {
        let mut form = FormData::default();
        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };
            match field.file_name().map(str::to_string) {
                Some(file_name) => {
                    let content_type = field
                        .content_type()
                        .unwrap_or("application/octet-stream")
                        .to_string();
                    let bytes = field.bytes().await?;
                    form.files
                        .insert(name, FileUpload::new(file_name, content_type, bytes));
                }
                None => {
                    let text = field.text().await?;
                    form.fields.insert(name, text);
                }
            }
        }
        Ok(form)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn take_file(&mut self, name: &str) -> Option<FileUpload> {
        self.files.remove(name)
    }
}

/// Parse a `true`/`false` form value.
pub fn parse_flag(name: &str, raw: &str) -> ApiResult<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ApiError::BadRequest(format!("{name} must be true or false"))),
    }
}

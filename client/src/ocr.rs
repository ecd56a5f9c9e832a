//! Image-to-text extraction over the OCR job endpoint.
//!
//! One multipart POST per image; the response is a completed job carrying
//! the extracted text. Failures here are user-visible and hard to reproduce
//! (they depend on the uploaded file), so every error variant carries an
//! [`OcrDiagnostics`] snapshot the UI can surface verbatim for a bug report.

#[cfg(test)]
#[path = "ocr_test.rs"]
mod ocr_test;

use chrono::{DateTime, Utc};
use reqwest::multipart::{Form, Part};
use serde::Serialize;
use serde_json::Value;

/// Everything known about an OCR attempt at the moment it failed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OcrDiagnostics {
    pub timestamp: DateTime<Utc>,
    pub file_name: String,
    pub file_size: usize,
    pub file_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<Value>,
}

impl OcrDiagnostics {
    fn new(file_name: &str, file_type: &str, file_size: usize) -> Self {
        Self {
            timestamp: Utc::now(),
            file_name: file_name.to_owned(),
            file_size,
            file_type: file_type.to_owned(),
            http_status: None,
            job_id: None,
            detail: None,
            response: None,
        }
    }
}

/// Error from the OCR upload path. Every network-adjacent variant carries
/// the diagnostics snapshot.
#[derive(Debug, thiserror::Error)]
pub enum OcrError {
    /// The upload never completed.
    #[error("ocr upload failed: {message}")]
    Network {
        message: String,
        diagnostics: OcrDiagnostics,
    },

    /// The endpoint answered with a non-2xx status.
    #[error("ocr endpoint returned http {status}")]
    Http {
        status: u16,
        diagnostics: OcrDiagnostics,
    },

    /// The job completed with `status: "FAILED"` despite a 2xx response.
    #[error("ocr processing failed: {message}")]
    ProcessingFailed {
        message: String,
        diagnostics: OcrDiagnostics,
    },

    /// The file was rejected before any network call.
    #[error("invalid ocr input: {0}")]
    Validation(String),
}

impl OcrError {
    /// The diagnostics snapshot, absent only for pre-flight validation errors.
    #[must_use]
    pub fn diagnostics(&self) -> Option<&OcrDiagnostics> {
        match self {
            Self::Network { diagnostics, .. }
            | Self::Http { diagnostics, .. }
            | Self::ProcessingFailed { diagnostics, .. } => Some(diagnostics),
            Self::Validation(_) => None,
        }
    }
}

/// Client for the OCR job endpoint.
///
/// Deliberately unauthenticated: the OCR service sits behind its own
/// endpoint and accepts anonymous uploads.
#[derive(Clone)]
pub struct OcrClient {
    base_url: String,
    http: reqwest::Client,
}

impl OcrClient {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self { base_url, http: reqwest::Client::new() }
    }

    /// Upload an image and return its extracted text (possibly empty: a
    /// blank image is a successful extraction of nothing).
    ///
    /// # Errors
    ///
    /// [`OcrError::Validation`] for non-image input, rejected before any
    /// network call; otherwise the transport, HTTP, or job-status failure
    /// with diagnostics attached.
    pub async fn process_image(
        &self,
        file_name: &str,
        mime_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, OcrError> {
        if !mime_type.starts_with("image/") {
            return Err(OcrError::Validation(format!(
                "expected an image file, got `{mime_type}`"
            )));
        }
        let mut diagnostics = OcrDiagnostics::new(file_name, mime_type, bytes.len());

        let part = Part::bytes(bytes)
            .file_name(file_name.to_owned())
            .mime_str(mime_type)
            .map_err(|e| OcrError::Validation(format!("unparseable mime type: {e}")))?;
        let form = Form::new().part("file", part);
        let url = format!("{}/ocr/jobs", self.base_url);

        let response = match self.http.post(url).multipart(form).send().await {
            Ok(response) => response,
            Err(e) => {
                diagnostics.detail = Some(e.to_string());
                return Err(OcrError::Network {
                    message: e.to_string(),
                    diagnostics,
                });
            }
        };

        let status = response.status();
        diagnostics.http_status = Some(status.as_u16());
        // Best effort: an unreadable body still leaves status diagnostics.
        let body = response.json::<Value>().await.ok();
        diagnostics.response.clone_from(&body);
        if let Some(job_id) = body.as_ref().and_then(|b| b.get("job_id")).and_then(Value::as_str) {
            diagnostics.job_id = Some(job_id.to_owned());
        }

        if !status.is_success() {
            return Err(OcrError::Http { status: status.as_u16(), diagnostics });
        }

        let job_status = body
            .as_ref()
            .and_then(|b| b.get("status"))
            .and_then(Value::as_str)
            .unwrap_or_default();
        if job_status == "FAILED" {
            let message = body
                .as_ref()
                .and_then(|b| b.get("error"))
                .and_then(Value::as_str)
                .unwrap_or("text extraction failed")
                .to_owned();
            diagnostics.detail = Some(message.clone());
            return Err(OcrError::ProcessingFailed { message, diagnostics });
        }

        Ok(body
            .as_ref()
            .and_then(|b| b.get("text"))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_owned())
    }
}

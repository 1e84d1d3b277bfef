//! Axum route handlers for the Resume API.

use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartError, rejection::FormRejection, Multipart, Path, State},
    http::StatusCode,
    Form, Json,
};
use bytes::Bytes;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::info;
use uuid::Uuid;

use crate::cache::{get_json, set_json};
use crate::errors::AppError;
use crate::models::analysis::MatchResult;
use crate::models::resume::UploadedResume;
use crate::parsing::profile::extract_profile;
use crate::parsing::text::ExtractionError;
use crate::state::AppState;

const UPLOAD_FIELD: &str = "file";
const SUPPORTED_EXTENSION: &str = ".pdf";
const TEXT_PREVIEW_CHARS: usize = 500;
const JD_PREVIEW_CHARS: usize = 200;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    #[serde(flatten)]
    pub resume: UploadedResume,
    pub status: String,
    pub from_cache: bool,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeForm {
    pub job_description: String,
    #[serde(default = "default_use_ai_matching")]
    pub use_ai_matching: bool,
}

fn default_use_ai_matching() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub resume_id: Uuid,
    pub job_description_preview: String,
    pub match_result: MatchResult,
    pub from_cache: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ResumeDetailResponse {
    pub status: String,
    pub resume_id: Uuid,
    pub data: UploadedResume,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/upload
///
/// Accepts a multipart PDF, extracts a candidate profile and stores it under a
/// fresh id. Identical documents are served from the upload cache.
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let (filename, document) =
        read_document(&mut multipart, state.config.max_upload_bytes).await?;
    let resume_id = Uuid::new_v4();
    let file_size = document.len();

    let cache_key = format!("upload_{}", fingerprint(&document));
    if let Some(mut cached) = get_json::<UploadedResume>(state.cache.as_ref(), &cache_key).await {
        info!(%resume_id, %filename, "Serving upload from cache");
        cached.resume_id = resume_id;
        cached.filename = filename;
        cached.uploaded_at = Utc::now();
        state.resumes.insert(cached.clone()).await;
        return Ok(Json(UploadResponse {
            resume: cached,
            status: "success".to_string(),
            from_cache: true,
        }));
    }

    // PDF decoding is CPU-bound and may panic on hostile input.
    let extractor = Arc::clone(&state.extractor);
    let (text, extracted_info) = tokio::task::spawn_blocking(move || {
        extractor
            .extract(&document)
            .map(|text| {
                let profile = extract_profile(&text);
                (text, profile)
            })
    })
    .await
    .map_err(|e| ExtractionError::Unreadable(format!("extractor aborted: {e}")))??;

    info!(
        %resume_id,
        %filename,
        file_size,
        text_chars = text.chars().count(),
        "Extracted resume profile"
    );

    let resume = UploadedResume {
        resume_id,
        filename,
        file_size,
        extracted_info,
        text_preview: preview(&text, TEXT_PREVIEW_CHARS),
        uploaded_at: Utc::now(),
    };

    state.resumes.insert(resume.clone()).await;
    set_json(
        state.cache.as_ref(),
        &cache_key,
        &resume,
        state.config.upload_cache_ttl_secs,
    )
    .await;

    Ok(Json(UploadResponse {
        resume,
        status: "success".to_string(),
        from_cache: false,
    }))
}

/// POST /api/analyze/:resume_id
///
/// Scores a stored resume against the submitted job description.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Path(resume_id): Path<String>,
    form: Result<Form<AnalyzeForm>, FormRejection>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let Form(form) = form.map_err(|e| AppError::Validation(e.body_text()))?;
    let resume_id = parse_resume_id(&resume_id)?;
    let resume = state
        .resumes
        .get(resume_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Resume {resume_id} not found")))?;

    let cache_key = format!(
        "analyze_{resume_id}_{}_{}",
        fingerprint(form.job_description.as_bytes()),
        form.use_ai_matching
    );
    if let Some(mut cached) = get_json::<AnalyzeResponse>(state.cache.as_ref(), &cache_key).await {
        info!(%resume_id, "Serving analysis from cache");
        cached.from_cache = true;
        return Ok(Json(cached));
    }

    // Scoring is CPU-bound; a failure inside it surfaces as an internal error.
    let scorer = Arc::clone(&state.scorer);
    let job_description = form.job_description.clone();
    let use_ai_matching = form.use_ai_matching;
    let match_result = tokio::task::spawn_blocking(move || {
        scorer.score(&resume.extracted_info, &job_description, use_ai_matching)
    })
    .await
    .map_err(|e| {
        AppError::Internal(anyhow::anyhow!("scoring task failed for {resume_id}: {e}"))
    })?;
    info!(
        %resume_id,
        overall = match_result.overall_score,
        recommendation = ?match_result.recommendation,
        "Analyzed resume"
    );

    let response = AnalyzeResponse {
        resume_id,
        job_description_preview: preview(&form.job_description, JD_PREVIEW_CHARS),
        match_result,
        from_cache: false,
    };
    set_json(
        state.cache.as_ref(),
        &cache_key,
        &response,
        state.config.analysis_cache_ttl_secs,
    )
    .await;

    Ok(Json(response))
}

/// GET /api/resume/:resume_id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path(resume_id): Path<String>,
) -> Result<Json<ResumeDetailResponse>, AppError> {
    let resume_id = parse_resume_id(&resume_id)?;
    let data = state
        .resumes
        .get(resume_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Resume {resume_id} not found")))?;

    Ok(Json(ResumeDetailResponse {
        status: "success".to_string(),
        resume_id,
        data,
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

/// Pulls the `file` field out of the form, enforcing type and size limits.
async fn read_document(
    multipart: &mut Multipart,
    max_bytes: usize,
) -> Result<(String, Bytes), AppError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        if !filename.to_lowercase().ends_with(SUPPORTED_EXTENSION) {
            return Err(AppError::UnsupportedFormat(
                "Only PDF files are supported".to_string(),
            ));
        }

        let data = field.bytes().await.map_err(multipart_error)?;
        if data.len() > max_bytes {
            return Err(AppError::PayloadTooLarge(format!(
                "File size exceeds the {} byte limit",
                max_bytes
            )));
        }
        return Ok((filename, data));
    }

    Err(AppError::Validation(format!(
        "multipart field '{UPLOAD_FIELD}' is required"
    )))
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(e.body_text())
    } else {
        AppError::Validation(e.body_text())
    }
}

/// Unknown and malformed ids are indistinguishable to callers.
fn parse_resume_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound(format!("Resume {raw} not found")))
}

fn fingerprint(data: &[u8]) -> String {
    format!("{:x}", Sha256::digest(data))
}

fn preview(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let head: String = text.chars().take(max_chars).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_truncates_on_char_boundary() {
        assert_eq!(preview("short", 10), "short");
        assert_eq!(preview("ééééé", 3), "ééé...");
    }

    #[test]
    fn test_fingerprint_is_stable_hex() {
        let a = fingerprint(b"resume");
        assert_eq!(a, fingerprint(b"resume"));
        assert_ne!(a, fingerprint(b"resume2"));
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn test_malformed_id_is_not_found() {
        assert!(matches!(parse_resume_id("abc"), Err(AppError::NotFound(_))));
        assert!(parse_resume_id(&Uuid::new_v4().to_string()).is_ok());
    }
}

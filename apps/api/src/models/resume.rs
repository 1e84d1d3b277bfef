use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::profile::CandidateProfile;

/// One uploaded resume as held by the resume store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadedResume {
    pub resume_id: Uuid,
    pub filename: String,
    pub file_size: usize,
    pub extracted_info: CandidateProfile,
    pub text_preview: String,
    pub uploaded_at: DateTime<Utc>,
}

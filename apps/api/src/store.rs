//! Process-local resume store, keyed by generated id. Not durable: it starts
//! empty and is cleared on shutdown.

use std::collections::HashMap;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::resume::UploadedResume;

#[derive(Default)]
pub struct ResumeStore {
    resumes: RwLock<HashMap<Uuid, UploadedResume>>,
}

impl ResumeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last write wins if the id already exists.
    pub async fn insert(&self, resume: UploadedResume) {
        self.resumes.write().await.insert(resume.resume_id, resume);
    }

    pub async fn get(&self, resume_id: Uuid) -> Option<UploadedResume> {
        self.resumes.read().await.get(&resume_id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.resumes.read().await.len()
    }

    pub async fn clear(&self) {
        self.resumes.write().await.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::profile::CandidateProfile;
    use chrono::Utc;
    use std::sync::Arc;

    fn make_resume(filename: &str) -> UploadedResume {
        UploadedResume {
            resume_id: Uuid::new_v4(),
            filename: filename.to_string(),
            file_size: 1024,
            extracted_info: CandidateProfile::default(),
            text_preview: String::new(),
            uploaded_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_insert_get_clear() {
        let store = ResumeStore::new();
        let resume = make_resume("cv.pdf");
        let id = resume.resume_id;

        store.insert(resume.clone()).await;
        assert_eq!(store.get(id).await, Some(resume));
        assert_eq!(store.get(Uuid::new_v4()).await, None);

        store.clear().await;
        assert_eq!(store.len().await, 0);
        assert_eq!(store.get(id).await, None);
    }

    #[tokio::test]
    async fn test_concurrent_inserts_are_all_kept() {
        let store = Arc::new(ResumeStore::new());
        let handles: Vec<_> = (0..32)
            .map(|i| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.insert(make_resume(&format!("{i}.pdf"))).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }
        assert_eq!(store.len().await, 32);
    }
}

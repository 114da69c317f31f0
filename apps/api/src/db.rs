//! Resume persistence stub.
//!
//! Stands in for the real database client: writes land in an in-memory map
//! so the HTTP flow is exercisable end-to-end, and responses mirror the
//! simulated backend (`simulated-resume-id` for the first stored resume).

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

pub const SIMULATED_RESUME_ID: &str = "simulated-resume-id";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("missing user ID or resume data")]
    MissingData,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResumeRecord {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub file_ref: String,
    pub data: Value,
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EnhancementRecord {
    pub id: String,
    pub resume_id: String,
    pub data: Value,
    pub score: Option<u32>,
    pub created_at: DateTime<Utc>,
}

#[derive(Default)]
pub struct ResumeStore {
    resumes: Mutex<HashMap<String, ResumeRecord>>,
    enhancements: Mutex<Vec<EnhancementRecord>>,
}

impl ResumeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Saves a resume and returns its id. The first resume per process gets
    /// the canonical simulated id; later ones get unique derived ids.
    pub fn save_resume(
        &self,
        user_id: &str,
        name: &str,
        file_ref: &str,
        data: Value,
    ) -> Result<String, StoreError> {
        if user_id.is_empty() || data.is_null() {
            return Err(StoreError::MissingData);
        }

        let mut resumes = self.resumes.lock().unwrap();
        let id = if resumes.contains_key(SIMULATED_RESUME_ID) {
            format!("simulated-resume-{}", Uuid::new_v4().simple())
        } else {
            SIMULATED_RESUME_ID.to_string()
        };

        let now = Utc::now();
        resumes.insert(
            id.clone(),
            ResumeRecord {
                id: id.clone(),
                user_id: user_id.to_string(),
                name: name.to_string(),
                file_ref: file_ref.to_string(),
                data,
                created_at: now,
                last_updated: now,
            },
        );
        Ok(id)
    }

    pub fn get_resume(&self, resume_id: &str) -> Option<ResumeRecord> {
        self.resumes.lock().unwrap().get(resume_id).cloned()
    }

    pub fn get_user_resumes(&self, user_id: &str) -> Vec<ResumeRecord> {
        if user_id.is_empty() {
            return vec![];
        }
        let mut records: Vec<ResumeRecord> = self
            .resumes
            .lock()
            .unwrap()
            .values()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        records
    }

    pub fn update_resume(&self, resume_id: &str, data: Value) -> bool {
        let mut resumes = self.resumes.lock().unwrap();
        match resumes.get_mut(resume_id) {
            Some(record) => {
                record.data = data;
                record.last_updated = Utc::now();
                true
            }
            None => false,
        }
    }

    pub fn delete_resume(&self, resume_id: &str) -> bool {
        self.resumes.lock().unwrap().remove(resume_id).is_some()
    }

    pub fn save_enhancement(&self, resume_id: &str, data: Value, score: Option<u32>) -> String {
        let id = format!("simulated-enhancement-{}", Uuid::new_v4().simple());
        self.enhancements.lock().unwrap().push(EnhancementRecord {
            id: id.clone(),
            resume_id: resume_id.to_string(),
            data,
            score,
            created_at: Utc::now(),
        });
        id
    }

    pub fn get_enhancements(&self, resume_id: &str) -> Vec<EnhancementRecord> {
        self.enhancements
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.resume_id == resume_id)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_first_resume_gets_simulated_id() {
        let store = ResumeStore::new();
        let id = store
            .save_resume("user-1", "My Resume", "temp_storage/x.pdf", json!({"a": 1}))
            .unwrap();
        assert_eq!(id, SIMULATED_RESUME_ID);

        let second = store
            .save_resume("user-1", "Other", "temp_storage/y.pdf", json!({"b": 2}))
            .unwrap();
        assert_ne!(second, SIMULATED_RESUME_ID);
    }

    #[test]
    fn test_save_requires_user_and_data() {
        let store = ResumeStore::new();
        assert!(matches!(
            store.save_resume("", "n", "ref", json!({})),
            Err(StoreError::MissingData)
        ));
        assert!(matches!(
            store.save_resume("user-1", "n", "ref", Value::Null),
            Err(StoreError::MissingData)
        ));
    }

    #[test]
    fn test_list_is_scoped_to_user_and_newest_first() {
        let store = ResumeStore::new();
        store
            .save_resume("user-1", "A", "ref-a", json!({}))
            .unwrap();
        store
            .save_resume("user-2", "B", "ref-b", json!({}))
            .unwrap();

        let mine = store.get_user_resumes("user-1");
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].name, "A");
        assert!(store.get_user_resumes("").is_empty());
    }

    #[test]
    fn test_update_and_delete() {
        let store = ResumeStore::new();
        let id = store
            .save_resume("user-1", "A", "ref", json!({"v": 1}))
            .unwrap();

        assert!(store.update_resume(&id, json!({"v": 2})));
        assert_eq!(store.get_resume(&id).unwrap().data["v"], 2);

        assert!(store.delete_resume(&id));
        assert!(!store.delete_resume(&id));
        assert!(store.get_resume(&id).is_none());
    }

    #[test]
    fn test_enhancements_attach_to_resume() {
        let store = ResumeStore::new();
        let id = store
            .save_resume("user-1", "A", "ref", json!({}))
            .unwrap();

        store.save_enhancement(&id, json!({"enhanced": true}), Some(88));
        store.save_enhancement("other", json!({}), None);

        let records = store.get_enhancements(&id);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].score, Some(88));
    }
}

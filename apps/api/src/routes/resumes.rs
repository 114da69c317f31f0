use axum::{
    extract::{Multipart, Path, Query, State},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use crate::analysis::report::{
    missing_sections, EnhancedSection, FeedbackReport, JobMatchReport, ResumeSections,
};
use crate::analysis::{enhance, feedback, matching, sections};
use crate::db::ResumeRecord;
use crate::errors::AppError;
use crate::extract::extract_resume_text;
use crate::state::AppState;
use crate::storage::object_key;

#[derive(Serialize)]
pub struct UploadResponse {
    pub resume_id: String,
    pub file_ref: String,
    pub storage_key: String,
    pub sections: ResumeSections,
    pub missing_sections: Vec<String>,
    pub feedback: FeedbackReport,
}

/// POST /api/v1/resumes
///
/// Multipart upload: `file` (the resume), `user_id`, optional `force_ocr`.
/// Stores the file, extracts text, runs the analyzer, persists the result,
/// and pushes a live update.
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let mut user_id: Option<String> = None;
    let mut force_ocr = false;
    let mut file: Option<(String, Option<String>, Bytes)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart body: {e}")))?
    {
        match field.name() {
            Some("user_id") => {
                user_id = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| AppError::Validation(e.to_string()))?,
                );
            }
            Some("force_ocr") => {
                let raw = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(e.to_string()))?;
                force_ocr = raw == "true" || raw == "1";
            }
            Some("file") => {
                let file_name = field
                    .file_name()
                    .unwrap_or("resume.pdf")
                    .to_string();
                let content_type = field.content_type().map(str::to_string);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(e.to_string()))?;
                file = Some((file_name, content_type, data));
            }
            _ => {}
        }
    }

    let user_id =
        user_id.ok_or_else(|| AppError::Validation("user_id field is required".to_string()))?;
    let (file_name, content_type, data) =
        file.ok_or_else(|| AppError::Validation("file field is required".to_string()))?;
    if data.is_empty() {
        return Err(AppError::Validation("uploaded file is empty".to_string()));
    }

    // Store the original upload first so the raw document is never lost.
    let storage_key = object_key(&user_id, &file_name);
    let file_ref = state
        .storage
        .put(&storage_key, data.to_vec(), content_type.as_deref())
        .await?;
    info!("stored resume upload at {file_ref}");

    let text =
        extract_resume_text(&data, &file_name, force_ocr, state.ocr.as_deref()).await?;

    let analyzer = state.services.get("resume_analyzer")?;
    let extracted = sections::extract_sections(analyzer.as_ref(), &text).await?;
    let report = feedback::resume_feedback(analyzer.as_ref(), &text, &extracted).await?;
    let missing = missing_sections(&extracted);

    let resume_id = state.store.save_resume(
        &user_id,
        &file_name,
        &file_ref,
        json!({
            "storage_key": &storage_key,
            "sections": &extracted,
            "feedback": &report,
            "missing_sections": &missing,
        }),
    )?;

    state
        .events
        .trigger_resume_update(
            &user_id,
            &resume_id,
            "analysis",
            json!({
                "missing_sections": &missing,
                "issues": report.overall.issues.len(),
            }),
        )
        .await;

    Ok(Json(UploadResponse {
        resume_id,
        file_ref,
        storage_key,
        sections: extracted,
        missing_sections: missing,
        feedback: report,
    }))
}

#[derive(Deserialize)]
pub struct UserIdQuery {
    pub user_id: String,
}

/// GET /api/v1/resumes?user_id=...
pub async fn handle_list(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Json<Vec<ResumeRecord>> {
    Json(state.store.get_user_resumes(&params.user_id))
}

/// GET /api/v1/resumes/:id
pub async fn handle_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ResumeRecord>, AppError> {
    state
        .store
        .get_resume(&id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))
}

/// GET /api/v1/resumes/:id/file
///
/// Streams back the originally uploaded document.
pub async fn handle_download(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Vec<u8>, AppError> {
    let record = state
        .store
        .get_resume(&id)
        .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))?;
    let key = storage_key_of(&record)
        .ok_or_else(|| AppError::NotFound(format!("Resume {id} has no stored file")))?;
    Ok(state.storage.get(&key).await?)
}

/// DELETE /api/v1/resumes/:id
///
/// Removes the stored document and the resume record.
pub async fn handle_delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let record = state
        .store
        .get_resume(&id)
        .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))?;

    if let Some(key) = storage_key_of(&record) {
        state.storage.delete(&key).await?;
    }
    state.store.delete_resume(&id);
    state
        .events
        .trigger_resume_update(&record.user_id, &id, "deleted", json!({}))
        .await;

    Ok(Json(json!({ "deleted": true })))
}

/// GET /api/v1/resumes/:id/enhancements
pub async fn handle_list_enhancements(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<Vec<crate::db::EnhancementRecord>> {
    Json(state.store.get_enhancements(&id))
}

#[derive(Deserialize)]
pub struct MatchRequest {
    pub job_description: String,
    pub job_id: Option<String>,
}

#[derive(Serialize)]
pub struct MatchResponse {
    pub job_id: String,
    pub report: JobMatchReport,
    pub keywords: Vec<String>,
}

/// POST /api/v1/resumes/:id/match
pub async fn handle_match(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<MatchRequest>,
) -> Result<Json<MatchResponse>, AppError> {
    if req.job_description.trim().len() < 20 {
        return Err(AppError::Validation(
            "job_description is too short to match against".to_string(),
        ));
    }

    let record = state
        .store
        .get_resume(&id)
        .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))?;
    let resume_sections = stored_sections(&record);

    let matcher = state.services.get("job_matcher")?;
    let report =
        matching::match_to_job(matcher.as_ref(), &resume_sections, &req.job_description).await?;

    // Keyword extraction is best-effort garnish on the report.
    let keywords = match matching::extract_job_keywords(matcher.as_ref(), &req.job_description)
        .await
    {
        Ok(keywords) => keywords,
        Err(e) => {
            warn!("job keyword extraction failed: {e}");
            vec![]
        }
    };

    let job_id = req
        .job_id
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    state
        .events
        .trigger_job_match_update(
            &record.user_id,
            &id,
            &job_id,
            "score",
            json!({ "match_percentage": report.match_percentage }),
        )
        .await;

    Ok(Json(MatchResponse {
        job_id,
        report,
        keywords,
    }))
}

#[derive(Deserialize)]
pub struct EnhanceRequest {
    pub section_name: String,
    /// Defaults to the stored content of the named section.
    pub content: Option<String>,
    pub job_description: Option<String>,
}

/// POST /api/v1/resumes/:id/enhance
pub async fn handle_enhance(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<EnhanceRequest>,
) -> Result<Json<EnhancedSection>, AppError> {
    let record = state
        .store
        .get_resume(&id)
        .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))?;

    let content = match req.content {
        Some(content) => content,
        None => stored_sections(&record)
            .get(&req.section_name)
            .cloned()
            .ok_or_else(|| {
                AppError::Validation(format!(
                    "resume has no stored content for section '{}'",
                    req.section_name
                ))
            })?,
    };

    let enhancer = state.services.get("content_enhancer")?;
    let enhanced = enhance::enhance_section(
        enhancer.as_ref(),
        &req.section_name,
        &content,
        req.job_description.as_deref(),
    )
    .await?;

    state.store.save_enhancement(
        &id,
        json!({
            "section": &req.section_name,
            "enhanced_content": &enhanced.enhanced_content,
        }),
        None,
    );

    // Fold the rewrite back into the stored sections.
    let mut updated = record.data.clone();
    let has_section = match updated
        .get_mut("sections")
        .and_then(|s| s.get_mut(&req.section_name))
    {
        Some(section) => {
            *section = json!(&enhanced.enhanced_content);
            true
        }
        None => false,
    };
    if has_section {
        state.store.update_resume(&id, updated);
    }
    state
        .events
        .trigger_resume_update(
            &record.user_id,
            &id,
            "enhancement",
            json!({ "section": &req.section_name }),
        )
        .await;

    Ok(Json(enhanced))
}

fn stored_sections(record: &ResumeRecord) -> ResumeSections {
    record
        .data
        .get("sections")
        .cloned()
        .and_then(|v| serde_json::from_value(v).ok())
        .unwrap_or_default()
}

fn storage_key_of(record: &ResumeRecord) -> Option<String> {
    record
        .data
        .get("storage_key")
        .and_then(|v| v.as_str())
        .map(str::to_string)
}

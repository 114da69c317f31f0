use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Section name → content. Sections the model could not find carry the
/// literal value `"Missing"`.
pub type ResumeSections = BTreeMap<String, String>;

pub const MISSING: &str = "Missing";

/// The standard sections scored and enhanced individually.
pub const STANDARD_SECTIONS: &[&str] = &["summary", "experience", "education", "skills", "projects"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrammarIssue {
    pub text: String,
    pub correction: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GrammarReport {
    #[serde(default)]
    pub issues: Vec<GrammarIssue>,
    #[serde(default)]
    pub overall_assessment: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionQuality {
    pub strengths: String,
    pub weaknesses: String,
    pub suggestions: String,
}

/// Full feedback for one resume: a grammar pass over the whole text plus a
/// quality analysis per standard section.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FeedbackReport {
    pub overall: GrammarReport,
    pub sections: BTreeMap<String, SectionQuality>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobMatchReport {
    #[serde(default)]
    pub match_percentage: u32,
    #[serde(default)]
    pub matching_skills: Vec<String>,
    #[serde(default)]
    pub missing_skills: Vec<String>,
    #[serde(default)]
    pub recommendations: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnhancedSection {
    pub enhanced_content: String,
    pub suggestions: String,
}

/// Names of standard sections absent from an extraction result.
pub fn missing_sections(sections: &ResumeSections) -> Vec<String> {
    STANDARD_SECTIONS
        .iter()
        .filter(|name| {
            !sections.iter().any(|(section, content)| {
                section.to_lowercase().contains(**name) && content != MISSING
            })
        })
        .map(|name| name.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_sections_flags_absent_and_missing_valued() {
        let mut sections = ResumeSections::new();
        sections.insert("Summary".to_string(), "A concise summary".to_string());
        sections.insert("Skills".to_string(), MISSING.to_string());

        let missing = missing_sections(&sections);
        assert!(missing.contains(&"skills".to_string()));
        assert!(missing.contains(&"experience".to_string()));
        assert!(!missing.contains(&"summary".to_string()));
    }

    #[test]
    fn test_missing_sections_empty_for_complete_resume() {
        let mut sections = ResumeSections::new();
        for name in STANDARD_SECTIONS {
            sections.insert(name.to_string(), format!("{name} content"));
        }
        assert!(missing_sections(&sections).is_empty());
    }
}

//! Resume-to-job matching and JD keyword extraction.

use tracing::warn;

use crate::analysis::report::{JobMatchReport, ResumeSections};
use crate::analysis::sections::sections_as_text;
use crate::analysis::{parse_json_array, parse_json_object, prompts};
use crate::services::{GenerateError, TextGenerator};

const MIN_JD_LEN: usize = 50;
const MAX_KEYWORDS: usize = 20;

/// Scores the resume against a job description.
///
/// Unparseable model output degrades to an empty report whose
/// recommendations explain the situation; backend errors propagate.
pub async fn match_to_job(
    generator: &dyn TextGenerator,
    sections: &ResumeSections,
    job_description: &str,
) -> Result<JobMatchReport, GenerateError> {
    let resume_text = sections_as_text(sections);
    let prompt = prompts::job_match(&resume_text, job_description);
    let response = generator.generate_text(&prompt).await?;

    if let Some(mut report) = parse_json_object::<JobMatchReport>(&response) {
        report.match_percentage = report.match_percentage.min(100);
        return Ok(report);
    }

    warn!(
        backend = generator.name(),
        "job match output was not parseable JSON; returning defaults"
    );
    Ok(JobMatchReport {
        match_percentage: 0,
        matching_skills: vec![],
        missing_skills: vec![],
        recommendations: "The analysis could not be parsed. Try again.".to_string(),
    })
}

/// Pulls the most important keywords out of a job description. Short
/// descriptions and unparseable output both yield an empty list.
pub async fn extract_job_keywords(
    generator: &dyn TextGenerator,
    job_description: &str,
) -> Result<Vec<String>, GenerateError> {
    if job_description.trim().len() < MIN_JD_LEN {
        return Ok(vec![]);
    }

    let response = generator
        .generate_text(&prompts::job_keywords(job_description))
        .await?;

    let mut keywords = parse_json_array::<String>(&response).unwrap_or_default();
    keywords.truncate(MAX_KEYWORDS);
    Ok(keywords)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct CannedGenerator(String);

    #[async_trait]
    impl TextGenerator for CannedGenerator {
        fn name(&self) -> &'static str {
            "canned"
        }

        async fn generate_text(&self, _prompt: &str) -> Result<String, GenerateError> {
            Ok(self.0.clone())
        }
    }

    fn sections_with_experience() -> ResumeSections {
        let mut sections = ResumeSections::new();
        sections.insert(
            "Experience".to_string(),
            "Five years of backend work in Rust".to_string(),
        );
        sections
    }

    #[tokio::test]
    async fn test_match_report_parses_and_clamps_percentage() {
        let generator = CannedGenerator(
            r#"{"match_percentage": 130, "matching_skills": ["rust"],
                "missing_skills": ["kafka"], "recommendations": "- add kafka"}"#
                .to_string(),
        );

        let report = match_to_job(&generator, &sections_with_experience(), "a JD")
            .await
            .unwrap();
        assert_eq!(report.match_percentage, 100);
        assert_eq!(report.matching_skills, vec!["rust"]);
        assert_eq!(report.missing_skills, vec!["kafka"]);
    }

    #[tokio::test]
    async fn test_match_degrades_on_garbage_output() {
        let generator = CannedGenerator("I am unable to help with that.".to_string());

        let report = match_to_job(&generator, &sections_with_experience(), "a JD")
            .await
            .unwrap();
        assert_eq!(report.match_percentage, 0);
        assert!(report.recommendations.contains("could not be parsed"));
    }

    #[tokio::test]
    async fn test_keywords_skip_short_descriptions() {
        let generator = CannedGenerator(r#"["never used"]"#.to_string());

        let keywords = extract_job_keywords(&generator, "too short").await.unwrap();
        assert!(keywords.is_empty());
    }

    #[tokio::test]
    async fn test_keywords_parse_and_truncate() {
        let all: Vec<String> = (0..30).map(|i| format!("kw{i}")).collect();
        let generator = CannedGenerator(serde_json::to_string(&all).unwrap());

        let jd = "a sufficiently long job description that describes the role in detail";
        let keywords = extract_job_keywords(&generator, jd).await.unwrap();
        assert_eq!(keywords.len(), MAX_KEYWORDS);
        assert_eq!(keywords[0], "kw0");
    }
}

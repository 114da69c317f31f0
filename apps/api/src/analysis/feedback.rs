//! Whole-resume feedback: a grammar pass plus per-section quality analysis.

use tracing::warn;

use crate::analysis::report::{
    FeedbackReport, GrammarReport, ResumeSections, SectionQuality, MISSING, STANDARD_SECTIONS,
};
use crate::analysis::{parse_json_object, prompts};
use crate::services::{GenerateError, TextGenerator};

const MIN_ANALYZABLE_LEN: usize = 20;

/// Runs the grammar check over the full text, then a quality analysis over
/// each standard section that has content. A section whose analysis fails
/// gets a placeholder entry rather than sinking the whole report.
pub async fn resume_feedback(
    generator: &dyn TextGenerator,
    resume_text: &str,
    sections: &ResumeSections,
) -> Result<FeedbackReport, GenerateError> {
    let mut report = FeedbackReport {
        overall: check_grammar(generator, resume_text).await?,
        ..Default::default()
    };

    for (name, content) in sections {
        let lowered = name.to_lowercase();
        if !STANDARD_SECTIONS.iter().any(|s| lowered.contains(s)) {
            continue;
        }
        if content == MISSING || content.trim().is_empty() {
            continue;
        }

        match analyze_section_quality(generator, name, content).await {
            Ok(quality) => {
                report.sections.insert(name.clone(), quality);
            }
            Err(e) => {
                warn!("section quality analysis failed for '{name}': {e}");
                report.sections.insert(
                    name.clone(),
                    SectionQuality {
                        strengths: "Error analyzing this section.".to_string(),
                        weaknesses: "Unable to provide detailed feedback.".to_string(),
                        suggestions: "Try again or check your AI service configuration."
                            .to_string(),
                    },
                );
            }
        }
    }

    Ok(report)
}

/// Grammar and style review of one block of text.
pub async fn check_grammar(
    generator: &dyn TextGenerator,
    text: &str,
) -> Result<GrammarReport, GenerateError> {
    if text.trim().len() < MIN_ANALYZABLE_LEN {
        return Ok(GrammarReport {
            issues: vec![],
            overall_assessment: "Text too short to analyze".to_string(),
        });
    }

    let response = generator.generate_text(&prompts::grammar_check(text)).await?;
    Ok(parse_json_object::<GrammarReport>(&response).unwrap_or_else(|| {
        warn!(
            backend = generator.name(),
            "grammar check output was not parseable JSON"
        );
        GrammarReport {
            issues: vec![],
            overall_assessment: "No detailed assessment provided".to_string(),
        }
    }))
}

async fn analyze_section_quality(
    generator: &dyn TextGenerator,
    section_name: &str,
    section_content: &str,
) -> Result<SectionQuality, GenerateError> {
    if section_content.trim().len() < MIN_ANALYZABLE_LEN {
        return Ok(SectionQuality {
            strengths: "Section too short to analyze".to_string(),
            weaknesses: "Content insufficient for analysis".to_string(),
            suggestions: "Add more content to this section".to_string(),
        });
    }

    let prompt = prompts::section_quality(section_name, section_content);
    let response = generator.generate_text(&prompt).await?;
    Ok(
        parse_json_object::<SectionQuality>(&response).unwrap_or_else(|| SectionQuality {
            strengths: "No specific strengths identified".to_string(),
            weaknesses: "No specific weaknesses identified".to_string(),
            suggestions: "No specific suggestions provided".to_string(),
        }),
    )
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

    #[tokio::test]
    async fn test_short_text_skips_the_backend_call() {
        struct Panicking;

        #[async_trait]
        impl TextGenerator for Panicking {
            fn name(&self) -> &'static str {
                "panicking"
            }

            async fn generate_text(&self, _prompt: &str) -> Result<String, GenerateError> {
                panic!("should not be called for short text");
            }
        }

        let report = check_grammar(&Panicking, "too short").await.unwrap();
        assert_eq!(report.overall_assessment, "Text too short to analyze");
    }

    #[tokio::test]
    async fn test_grammar_report_parses_model_json() {
        let generator = CannedGenerator(
            r#"{"issues": [{"text": "im", "correction": "I'm", "reason": "capitalization"}],
                "overall_assessment": "Mostly clean"}"#
                .to_string(),
        );

        let report = check_grammar(&generator, "a long enough block of resume text")
            .await
            .unwrap();
        assert_eq!(report.issues.len(), 1);
        assert_eq!(report.overall_assessment, "Mostly clean");
    }

    #[tokio::test]
    async fn test_feedback_covers_standard_sections_only() {
        let generator = CannedGenerator(
            r#"{"strengths": "s", "weaknesses": "w", "suggestions": "g",
                "issues": [], "overall_assessment": "ok"}"#
                .to_string(),
        );

        let mut sections = ResumeSections::new();
        sections.insert(
            "Experience".to_string(),
            "Led a team of four engineers building data pipelines".to_string(),
        );
        sections.insert("Hobbies".to_string(), "chess, running, baking".to_string());
        sections.insert("Skills".to_string(), MISSING.to_string());

        let report = resume_feedback(&generator, "a long enough resume text body", &sections)
            .await
            .unwrap();
        assert!(report.sections.contains_key("Experience"));
        assert!(!report.sections.contains_key("Hobbies"));
        assert!(!report.sections.contains_key("Skills"));
    }
}

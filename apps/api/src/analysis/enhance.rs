//! Section enhancement: rewrite one resume section, optionally tailored to
//! a job description.

use tracing::warn;

use crate::analysis::report::EnhancedSection;
use crate::analysis::{parse_json_object, prompts};
use crate::services::{GenerateError, TextGenerator};

const MIN_ENHANCEABLE_LEN: usize = 10;

fn guidance_for(section_name: &str) -> &'static str {
    match section_name.to_lowercase().as_str() {
        "summary" => {
            "Focus on creating a concise professional summary that highlights key \
             qualifications and achievements. Use powerful language and relevant keywords."
        }
        "experience" => {
            "Use strong action verbs, quantify achievements, and highlight relevant skills \
             and technologies. Format consistently and focus on impact."
        }
        "education" => {
            "Present educational background clearly and concisely, highlighting relevant \
             coursework, achievements, and credentials."
        }
        "skills" => {
            "Organize skills logically, prioritizing those most relevant to the target job. \
             Include technical skills, soft skills, and proficiency levels."
        }
        "projects" => {
            "Highlight projects that demonstrate relevant skills, focusing on your role, \
             technologies used, and measurable outcomes."
        }
        _ => "Improve this section with clear, concise language and relevant details.",
    }
}

/// Rewrites one section. Content too short to work with is returned as-is;
/// unparseable model output falls back to the original content.
pub async fn enhance_section(
    generator: &dyn TextGenerator,
    section_name: &str,
    section_content: &str,
    job_description: Option<&str>,
) -> Result<EnhancedSection, GenerateError> {
    if section_content.trim().len() < MIN_ENHANCEABLE_LEN {
        return Ok(EnhancedSection {
            enhanced_content: section_content.to_string(),
            suggestions: "Section content too short to enhance.".to_string(),
        });
    }

    let prompt = prompts::enhance_section(
        section_name,
        section_content,
        guidance_for(section_name),
        job_description,
    );
    let response = generator.generate_text(&prompt).await?;

    if let Some(enhanced) = parse_json_object::<EnhancedSection>(&response) {
        if !enhanced.enhanced_content.trim().is_empty() {
            return Ok(enhanced);
        }
    }

    warn!(
        backend = generator.name(),
        "enhancement output for '{section_name}' was not parseable; keeping original content"
    );
    Ok(EnhancedSection {
        enhanced_content: section_content.to_string(),
        suggestions: "Content enhanced for clarity and impact.".to_string(),
    })
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
    async fn test_short_content_returned_unchanged() {
        let generator = CannedGenerator("unused".to_string());

        let result = enhance_section(&generator, "summary", "short", None)
            .await
            .unwrap();
        assert_eq!(result.enhanced_content, "short");
        assert!(result.suggestions.contains("too short"));
    }

    #[tokio::test]
    async fn test_enhancement_parses_model_json() {
        let generator = CannedGenerator(
            r#"{"enhanced_content": "Led cross-team delivery of a data platform",
                "suggestions": "Added an action verb and scope"}"#
                .to_string(),
        );

        let result = enhance_section(
            &generator,
            "experience",
            "worked on a data platform with other teams",
            Some("We need a platform engineer"),
        )
        .await
        .unwrap();
        assert!(result.enhanced_content.starts_with("Led"));
    }

    #[tokio::test]
    async fn test_enhancement_falls_back_to_original_on_garbage() {
        let generator = CannedGenerator("not json at all".to_string());

        let original = "maintained several internal services";
        let result = enhance_section(&generator, "experience", original, None)
            .await
            .unwrap();
        assert_eq!(result.enhanced_content, original);
    }

    #[test]
    fn test_guidance_covers_known_sections_and_default() {
        assert!(guidance_for("Summary").contains("professional summary"));
        assert!(guidance_for("skills").contains("Organize skills"));
        assert!(guidance_for("references").contains("clear, concise"));
    }
}

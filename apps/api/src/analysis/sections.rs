//! Structured section extraction from raw resume text.

use tracing::warn;

use crate::analysis::report::{ResumeSections, MISSING, STANDARD_SECTIONS};
use crate::analysis::{parse_json_object, prompts};
use crate::services::{GenerateError, TextGenerator};

/// Extracts named sections from resume text via one backend call.
///
/// Backend failures propagate; unparseable model output degrades to a map
/// holding the full text plus every standard section marked `"Missing"`.
pub async fn extract_sections(
    generator: &dyn TextGenerator,
    resume_text: &str,
) -> Result<ResumeSections, GenerateError> {
    let prompt = prompts::section_extraction(resume_text);
    let response = generator.generate_text(&prompt).await?;

    if let Some(sections) = parse_json_object::<ResumeSections>(&response) {
        if !sections.is_empty() {
            return Ok(sections);
        }
    }

    warn!(
        backend = generator.name(),
        "section extraction output was not parseable JSON; returning defaults"
    );
    Ok(fallback_sections(resume_text))
}

fn fallback_sections(resume_text: &str) -> ResumeSections {
    let mut sections = ResumeSections::new();
    sections.insert("full_text".to_string(), resume_text.to_string());
    for name in STANDARD_SECTIONS {
        sections.insert(capitalize(name), MISSING.to_string());
    }
    sections
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Joins extracted sections back into one block of text for prompts that
/// want the whole resume, skipping missing sections and the raw dump.
pub fn sections_as_text(sections: &ResumeSections) -> String {
    sections
        .iter()
        .filter(|(name, content)| *content != MISSING && name.as_str() != "full_text")
        .map(|(name, content)| format!("{name}:\n{content}"))
        .collect::<Vec<_>>()
        .join("\n\n")
}

//! Prompt templates for the analysis operations.
//!
//! Every prompt instructs the model to answer in JSON; the callers recover
//! from fenced or prose-wrapped output, so the wording here only has to
//! make the desired shape unambiguous.

pub fn section_extraction(resume_text: &str) -> String {
    format!(
        r#"As an AI resume analyzer, extract the following information from this resume text.
For each section, return the content if present. If a section is not present, return "Missing".

Sections to extract (be thorough and include ALL content for each section):
1. Personal Information (name, email, phone, LinkedIn, GitHub, etc.)
2. Summary (professional summary, career objective)
3. Education (degrees, institutions, dates, GPA, relevant coursework)
4. Skills (technical skills, soft skills, tools, technologies)
5. Experience (job titles, companies, dates, responsibilities, achievements)
6. Projects (name, description, technologies used, outcomes)
7. Certifications (name, issuing organization, dates)
8. Languages (language name, proficiency level)

The resume text is provided below:

```
{resume_text}
```

Format your response as a JSON object with section names as keys and content as values.
If a section is missing, set its value to "Missing"."#
    )
}

pub fn grammar_check(text: &str) -> String {
    format!(
        r#"As a professional editor, review the following text for grammar, style, and clarity issues.

TEXT:
```
{text}
```

For each issue you find, provide the problematic text, the correction, and a brief
explanation. Also provide an overall assessment of the writing quality.

Format your response as a JSON object with:
- issues: array of objects, each with "text", "correction", and "reason" fields
- overall_assessment: brief overall assessment of the writing"#
    )
}

pub fn section_quality(section_name: &str, section_content: &str) -> String {
    format!(
        r#"As a professional resume reviewer, analyze this {section_name} section.

SECTION CONTENT:
```
{section_content}
```

Provide a thorough analysis with strengths, weaknesses, and specific actionable suggestions.

Format your response as a JSON object with:
- strengths: string listing strengths, as bullet points
- weaknesses: string listing weaknesses, as bullet points
- suggestions: string with specific suggestions, as bullet points"#
    )
}

pub fn job_match(resume_text: &str, job_description: &str) -> String {
    format!(
        r#"As an AI job matching expert, analyze this resume against the job description.

RESUME:
```
{resume_text}
```

JOB DESCRIPTION:
```
{job_description}
```

Please provide:
1. Match percentage (0-100) based on how well the resume matches the job requirements
2. List of matching skills/qualifications found in both the resume and job description
3. List of missing skills/qualifications that are in the job description but not in the resume
4. Specific recommendations for tailoring the resume to better match this job

Format your response as a JSON object with the following keys:
- match_percentage: number between 0-100
- matching_skills: array of strings
- missing_skills: array of strings
- recommendations: string with bullet points"#
    )
}

pub fn job_keywords(job_description: &str) -> String {
    format!(
        r#"As a keyword extraction expert, identify the most important keywords from this job description.
Focus on skills, qualifications, tools, technologies, and industry terms relevant for a resume.

JOB DESCRIPTION:
```
{job_description}
```

Return ONLY a JSON array of strings with the 20 most important keywords, without any explanations."#
    )
}

pub fn enhance_section(
    section_name: &str,
    section_content: &str,
    guidance: &str,
    job_description: Option<&str>,
) -> String {
    match job_description {
        Some(jd) => format!(
            r#"As an expert resume writer, enhance this {section_name} section to match the job description.

CURRENT CONTENT:
```
{section_content}
```

JOB DESCRIPTION:
```
{jd}
```

GUIDANCE:
{guidance}

Use only factual information present in the original content, but improve wording, structure, and relevance.

Return your response as a JSON object with:
- enhanced_content: the improved section content
- suggestions: brief explanation of improvements made"#
        ),
        None => format!(
            r#"As an expert resume writer, enhance this {section_name} section.

CURRENT CONTENT:
```
{section_content}
```

GUIDANCE:
{guidance}

Use only factual information present in the original content, but improve wording, structure, and impact.

Return your response as a JSON object with:
- enhanced_content: the improved section content
- suggestions: brief explanation of improvements made"#
        ),
    }
}

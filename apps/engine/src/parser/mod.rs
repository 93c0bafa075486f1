//! Resume parsing pipeline: normalize extracted text, segment it into
//! sections, then run the per-section extractors.

pub mod basic_info;
pub mod education;
pub mod experience;
pub mod sections;
pub mod skills;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::normalize::normalize;
use crate::parser::education::EducationRecord;
use crate::parser::experience::ExperienceRecord;

/// Everything extracted from one resume. Immutable after construction;
/// `sentences` is the evidence corpus for contextual/semantic matching.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedResume {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub skills: Vec<String>,
    pub education: Vec<EducationRecord>,
    pub experience: Vec<ExperienceRecord>,
    pub sentences: Vec<String>,
}

/// Parses structured data out of line-broken plain text. Always succeeds:
/// a resume where nothing matched is a valid, fully-empty result.
pub fn parse_text(raw_text: &str) -> ParsedResume {
    let text = normalize(raw_text);

    let info = basic_info::extract_basic_info(&text);
    let sections = sections::segment(&text);

    let skills = skills::extract_skills(&sections.skills, &sections.project_technologies, &text);
    let education = education::extract_education(&sections.education);
    let experience = experience::extract_experience(&sections.experience);

    // Sentence-ish fragments: split on terminators, newlines, and bullets.
    let sentences: Vec<String> = text
        .split(['.', '\n', '•'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    debug!(
        skills = skills.len(),
        education = education.len(),
        experience = experience.len(),
        sentences = sentences.len(),
        "parsed resume"
    );

    ParsedResume {
        name: info.name,
        email: info.email,
        phone: info.phone,
        skills,
        education,
        experience,
        sentences,
    }
}

//! Section segmentation: walks resume lines in order, switching the active
//! bucket whenever a short line matches a known section-header pattern.

use std::sync::LazyLock;

use regex::Regex;

use crate::parser::skills::extract_technologies_from_line;

/// A line longer than this is never treated as a header, even if it contains
/// a header word; long descriptive sentences stay in the current bucket.
const HEADER_MAX_LEN: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SectionLabel {
    Education,
    Experience,
    Projects,
    Skills,
    Achievements,
    Unlabeled,
}

static HEADER_PATTERNS: LazyLock<Vec<(SectionLabel, Regex)>> = LazyLock::new(|| {
    [
        (SectionLabel::Education, r"\b(education|academic|qualification)\b"),
        (SectionLabel::Experience, r"\b(experience|work|employment|internship)\b"),
        (SectionLabel::Projects, r"\b(projects?|portfolio)\b"),
        (SectionLabel::Skills, r"\b(skills?|technical|technologies|competencies)\b"),
        (SectionLabel::Achievements, r"\b(achievements?|certifications?|awards?)\b"),
    ]
    .into_iter()
    .map(|(label, pattern)| (label, Regex::new(pattern).expect("valid header regex")))
    .collect()
});

/// Labeled line-groups produced by [`segment`]. Lines that precede the first
/// recognized header land in `unlabeled`.
#[derive(Debug, Clone, Default)]
pub struct Sections {
    pub education: Vec<String>,
    pub experience: Vec<String>,
    pub projects: Vec<String>,
    pub skills: Vec<String>,
    pub achievements: Vec<String>,
    pub unlabeled: Vec<String>,
    /// Technologies recognized inside project-description lines while
    /// accumulating the projects bucket.
    pub project_technologies: Vec<String>,
}

impl Sections {
    fn bucket_mut(&mut self, label: SectionLabel) -> &mut Vec<String> {
        match label {
            SectionLabel::Education => &mut self.education,
            SectionLabel::Experience => &mut self.experience,
            SectionLabel::Projects => &mut self.projects,
            SectionLabel::Skills => &mut self.skills,
            SectionLabel::Achievements => &mut self.achievements,
            SectionLabel::Unlabeled => &mut self.unlabeled,
        }
    }
}

/// Splits normalized resume text into labeled line-groups. Header lines
/// themselves are consumed; every other non-empty line lands in exactly one
/// bucket.
pub fn segment(text: &str) -> Sections {
    let mut sections = Sections::default();
    let mut current = SectionLabel::Unlabeled;

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let lower = line.to_lowercase();
        let header = HEADER_PATTERNS
            .iter()
            .find(|(_, re)| re.is_match(&lower))
            .filter(|_| line.chars().count() < HEADER_MAX_LEN)
            .map(|(label, _)| *label);

        if let Some(label) = header {
            current = label;
            continue;
        }

        sections.bucket_mut(current).push(line.to_string());
        if current == SectionLabel::Projects {
            for tech in extract_technologies_from_line(line) {
                sections.project_technologies.push(tech.to_string());
            }
        }
    }

    sections
}

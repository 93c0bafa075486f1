//! Skill extraction: dictionary matching over skill-section lines,
//! delimiter-split lists, project technologies, and a full-document
//! fallback when the skills section is empty.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::dictionaries::SKILL_MATCHER;
use crate::normalize::title_case;

static LIST_DELIMITERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[,•·:\-]").expect("valid regex"));
static CATEGORY_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(languages|frameworks|tools|databases|cloud)\s*").expect("valid regex")
});
/// "Tech:", "Technologies used:", "Built with:", "Stack:" followed by a list.
static TECH_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(tech(?:nologies)?(?:\s+used)?|built\s+with|stack)[:\s]*(.+)")
        .expect("valid regex")
});
static FILLER_WORDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(and|or|with)\b").expect("valid regex"));

/// Extracts distinct display-cased skill names from the skill-section lines,
/// merged with technologies found in project descriptions. Scans the whole
/// document only when the skills section produced nothing. Output is sorted
/// for determinism.
pub fn extract_skills(
    skill_lines: &[String],
    project_technologies: &[String],
    full_text: &str,
) -> Vec<String> {
    let mut skills: BTreeSet<String> = BTreeSet::new();

    for line in skill_lines {
        for hit in SKILL_MATCHER.matches_in(line) {
            skills.insert(title_case(hit));
        }

        // Comma/bullet separated lists, with an optional category label
        // ("Languages: Python, Go") stripped from each segment.
        if line.contains([',', '•', '·', '-', ':']) {
            for part in LIST_DELIMITERS.split(line) {
                let trimmed = part.trim();
                let cleaned = CATEGORY_LABEL.replace(&trimmed.to_lowercase(), "").into_owned();
                if cleaned.chars().count() > 2 && SKILL_MATCHER.contains(&cleaned) {
                    skills.insert(title_case(trimmed));
                }
            }
        }
    }

    for tech in project_technologies {
        skills.insert(title_case(tech));
    }

    if skills.is_empty() {
        for hit in SKILL_MATCHER.matches_in(full_text) {
            skills.insert(title_case(hit));
        }
    }

    skills.into_iter().collect()
}

/// Recognizes technologies inside a single free-text line. Two layouts:
/// an explicit label ("Tech: React, Node.js") with a comma/slash-separated
/// list, or a pipe-delimited "title | techlist" row. Segments are matched
/// against the skill dictionary with the usual short-token boundary rule.
pub fn extract_technologies_from_line(line: &str) -> Vec<&'static str> {
    let mut found = Vec::new();

    if let Some(caps) = TECH_LABEL.captures(line) {
        if let Some(list) = caps.get(2) {
            for segment in list.as_str().split([',', '/']) {
                let lowered = segment.to_lowercase();
                let cleaned = FILLER_WORDS.replace_all(&lowered, "");
                for hit in SKILL_MATCHER.matches_in(cleaned.trim()) {
                    if !found.contains(&hit) {
                        found.push(hit);
                    }
                }
            }
        }
    } else if line.contains('|') {
        // "Project Name | React, Docker": everything after the title
        for segment in line.split('|').skip(1) {
            for hit in SKILL_MATCHER.matches_in(segment) {
                if !found.contains(&hit) {
                    found.push(hit);
                }
            }
        }
    }

    found
}

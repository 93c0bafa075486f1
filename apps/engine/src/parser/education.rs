//! Education extraction: a per-line accumulator state machine. A record
//! opens when a degree pattern matches and closes on the next degree, a
//! high-school line, or end of input. Only records with a course are emitted.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::normalize::title_case;

/// High-school indicators. Lines carrying these are dropped entirely; the
/// scorer only cares about college-level degrees.
const SCHOOL_INDICATORS: &[&str] = &[
    "xii",
    "12th",
    "hsc",
    "higher secondary",
    "junior college",
    "senior secondary",
    "intermediate",
    "pre-university",
];

const INSTITUTION_KEYWORDS: &[&str] = &["institute", "university", "college", "academy"];

static DEGREE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(b\.?\s*tech|bachelor|b\.?\s*e\.?|m\.?\s*tech|master|mba|bca|mca|phd)\b")
        .expect("valid regex")
});
/// Looser variant for degrees concatenated into surrounding text ("btechin").
static DEGREE_LOOSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(b\.?tech|btech|b-tech|bachelor|b\.?e\.?|m\.?tech|mtech|master|mba|bca|mca|phd)")
        .expect("valid regex")
});
static SPECIALIZATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(computer science and engineering|computer science|computer engineering|information technology|data science|electronics|mechanical|electrical|civil)",
    )
    .expect("valid regex")
});
static INSTITUTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([A-Z][a-zA-Z\s\.]+(?:institute|university|college|academy)[a-zA-Z\s,\.]*)")
        .expect("valid regex")
});
static YEAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b(20\d{2})\b").expect("valid regex"));
static CGPA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"cgpa[:\-\s]*([0-9.]+)").expect("valid regex"));

static EMBEDDED_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(20\d{2}|19\d{2})\b").expect("valid regex"));
static MONTH_YEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\s*\d{4}")
        .expect("valid regex")
});
static TRAILING_RANGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)[–—-]\s*(present|current).*$").expect("valid regex"));
static MULTI_SPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// One detected degree mention. Every field is present on every record;
/// misses are `None`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EducationRecord {
    pub course: Option<String>,
    pub college: Option<String>,
    pub graduation_year: Option<String>,
    pub cgpa: Option<String>,
}

/// Accumulator state machine over education-section lines.
#[derive(Default)]
struct EducationScanner {
    current: EducationRecord,
    records: Vec<EducationRecord>,
}

impl EducationScanner {
    /// Closes the open record if it reached a degree. An incomplete
    /// accumulator is kept open: an institution or year seen before the
    /// degree line still belongs to the record that degree will open.
    fn flush(&mut self) {
        if self.current.course.is_some() {
            self.records.push(std::mem::take(&mut self.current));
        }
    }

    fn observe(&mut self, line: &str) {
        let lower = line.to_lowercase();

        if SCHOOL_INDICATORS.iter().any(|ind| lower.contains(ind)) {
            self.flush();
            return;
        }

        if let Some(degree) = DEGREE
            .find(line)
            .or_else(|| DEGREE_LOOSE.find(line))
            .map(|m| m.as_str().trim().to_string())
        {
            self.flush();
            self.current.course = match SPECIALIZATION.find(line) {
                Some(spec) => Some(title_case(&format!("{degree} in {}", spec.as_str().trim()))),
                None => Some(title_case(&degree)),
            };
        }

        if self.current.college.is_none()
            && INSTITUTION_KEYWORDS.iter().any(|kw| lower.contains(kw))
        {
            if let Some(m) = INSTITUTION.find(line) {
                self.current.college = Some(clean_institution_name(m.as_str()));
            }
        }

        if self.current.graduation_year.is_none() {
            if let Some(last) = YEAR.captures_iter(line).last() {
                self.current.graduation_year = Some(last[1].to_string());
            }
        }

        if let Some(caps) = CGPA.captures(&lower) {
            self.current.cgpa = Some(caps[1].to_string());
        }
    }

    fn finish(mut self) -> Vec<EducationRecord> {
        self.flush();
        self.records
    }
}

pub fn extract_education(lines: &[String]) -> Vec<EducationRecord> {
    let mut scanner = EducationScanner::default();
    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        scanner.observe(line);
    }
    scanner.finish()
}

/// Strips embedded years, month-year fragments, trailing "present" ranges,
/// and dangling commas from a matched institution name.
fn clean_institution_name(raw: &str) -> String {
    let name = EMBEDDED_YEAR.replace_all(raw, "");
    let name = MONTH_YEAR.replace_all(&name, "");
    let name = TRAILING_RANGE.replace_all(&name, "");
    let name = MULTI_SPACE.replace_all(name.trim(), " ");
    name.trim_end_matches(',').trim().to_string()
}

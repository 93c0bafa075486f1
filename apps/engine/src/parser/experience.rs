//! Experience extraction: per-line classification into role lines, duration
//! parsing of month/year ranges into an integer month count, and a short
//! lookahead for durations that sit on the line below the role.

use std::collections::HashSet;
use std::sync::LazyLock;

use chrono::{Datelike, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::dictionaries::contains_role_keyword;

/// Lines whose first word is one of these are bullet descriptions, not role
/// headers.
const DESCRIPTION_VERBS: &[&str] = &[
    "developed",
    "implemented",
    "built",
    "created",
    "designed",
    "worked",
    "collaborated",
    "achieved",
    "improved",
    "increased",
    "reduced",
    "delivered",
    "launched",
    "optimized",
    "maintained",
    "integrated",
    "automated",
    "deployed",
    "engineered",
    "contributed",
    "assisted",
    "analyzed",
    "trained",
    "conducted",
    "performed",
    "utilized",
    "wrote",
    "spearheaded",
];

const CONTINUATION_PREFIXES: &[&str] = &["and ", "with ", "using ", "to "];

const BULLET_MARKS: &[char] = &['•', '-', '–', '*', '▪'];

/// How many lines below a role line may carry its duration.
const DURATION_LOOKAHEAD: usize = 2;

const MONTHS: &str = "jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec";

static MONTH_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)\b({MONTHS})[a-z]*\s*['’`]?\s*(\d{{2,4}})\s*[-–—]\s*({MONTHS})[a-z]*\s*['’`]?\s*(\d{{2,4}})"
    ))
    .expect("valid regex")
});
static OPEN_MONTH_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)\b({MONTHS})[a-z]*\s*['’`]?\s*(\d{{2,4}})\s*[-–—]\s*(present|current)"
    ))
    .expect("valid regex")
});
static YEAR_RANGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{4})\s*[-–—]\s*(\d{4})\b").expect("valid regex"));
static OPEN_YEAR_RANGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(\d{4})\s*[-–—]\s*(present|current)").expect("valid regex"));
static PERCENT_FIGURE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\d+(\.\d+)?\s*%|accuracy").expect("valid regex"));
static TRAILING_MONTH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)[\s,|]*\b({MONTHS})[a-z]*\.?\s*$")).expect("valid regex")
});

/// One work/internship entry. Only emitted with a role longer than five
/// characters; deduplicated by (role, months).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExperienceRecord {
    pub role: Option<String>,
    pub months: Option<u32>,
}

pub fn extract_experience(lines: &[String]) -> Vec<ExperienceRecord> {
    let mut records = Vec::new();
    let mut seen: HashSet<(String, Option<u32>)> = HashSet::new();

    for (i, line) in lines.iter().enumerate() {
        let line = line.trim();
        if !is_role_line(line) {
            continue;
        }

        // Duration: the role's own line first, then up to two lines below.
        let mut months = parse_duration(line);
        if months.is_none() {
            for next in lines.iter().skip(i + 1).take(DURATION_LOOKAHEAD) {
                months = parse_duration(next);
                if months.is_some() {
                    break;
                }
            }
        }

        let next_line = lines.get(i + 1).map(String::as_str);
        let Some(role) = derive_role(line, next_line) else {
            continue;
        };
        if role.chars().count() <= 5 {
            continue;
        }

        if seen.insert((role.clone(), months)) {
            records.push(ExperienceRecord {
                role: Some(role),
                months,
            });
        }
    }

    records
}

/// A surviving line is a role header when it carries a date range, a known
/// role title, or a layout indicator (pipe / "remote") on a short line.
fn is_role_line(line: &str) -> bool {
    if line.is_empty() || line.starts_with(BULLET_MARKS) {
        return false;
    }
    let lower = line.to_lowercase();
    if let Some(first_word) = lower.split_whitespace().next() {
        let first_word = first_word.trim_matches(|c: char| !c.is_alphanumeric());
        if DESCRIPTION_VERBS.contains(&first_word) {
            return false;
        }
    }
    if PERCENT_FIGURE.is_match(&lower) {
        return false;
    }
    if CONTINUATION_PREFIXES.iter().any(|p| lower.starts_with(p)) {
        return false;
    }

    has_date_pattern(line)
        || contains_role_keyword(line)
        || ((line.contains('|') || lower.contains("remote")) && line.chars().count() < 100)
}

fn has_date_pattern(line: &str) -> bool {
    MONTH_RANGE.is_match(line)
        || OPEN_MONTH_RANGE.is_match(line)
        || YEAR_RANGE.is_match(line)
        || OPEN_YEAR_RANGE.is_match(line)
}

/// Inclusive month count for a range, in priority order: closed month/year
/// range, open-ended month/year range against the current date, then a bare
/// "YYYY-YYYY" treated as whole years (no inclusive adjustment).
fn parse_duration(line: &str) -> Option<u32> {
    if let Some(caps) = MONTH_RANGE.captures(line) {
        let start = (month_number(&caps[1])?, parse_year(&caps[2])?);
        let end = (month_number(&caps[3])?, parse_year(&caps[4])?);
        return Some(months_between_inclusive(start, end));
    }
    if let Some(caps) = OPEN_MONTH_RANGE.captures(line) {
        let start = (month_number(&caps[1])?, parse_year(&caps[2])?);
        let now = Utc::now();
        let end = (now.month() as i32, now.year());
        return Some(months_between_inclusive(start, end));
    }
    if let Some(caps) = YEAR_RANGE.captures(line) {
        let start: i32 = caps[1].parse().ok()?;
        let end: i32 = caps[2].parse().ok()?;
        return Some(((end - start) * 12).max(0) as u32);
    }
    None
}

/// `(end.year - start.year) * 12 + (end.month - start.month) + 1`, clamped
/// to zero for reversed ranges.
fn months_between_inclusive(start: (i32, i32), end: (i32, i32)) -> u32 {
    let (start_month, start_year) = start;
    let (end_month, end_year) = end;
    ((end_year - start_year) * 12 + (end_month - start_month) + 1).max(0) as u32
}

fn month_number(token: &str) -> Option<i32> {
    let lower = token.to_lowercase();
    let number = match lower.get(..3)? {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(number)
}

fn parse_year(token: &str) -> Option<i32> {
    let year: i32 = token.parse().ok()?;
    Some(if year < 100 { 2000 + year } else { year })
}

/// Role text is the line with its date substring stripped. When nothing
/// survives, fall back to comma segments (preferring one with a role
/// keyword), or to the whole line when the next line carries the layout
/// indicator instead.
fn derive_role(line: &str, next_line: Option<&str>) -> Option<String> {
    let stripped = strip_date_spans(line);
    let cleaned = clean_role(&stripped);
    if !cleaned.is_empty() {
        return Some(cleaned);
    }

    if line.contains(',') {
        let segments: Vec<&str> = line.split(',').collect();
        let preferred = segments
            .iter()
            .find(|seg| contains_role_keyword(seg))
            .or_else(|| segments.first())?;
        let cleaned = clean_role(&strip_date_spans(preferred));
        if !cleaned.is_empty() {
            return Some(cleaned);
        }
        return None;
    }

    let next_has_layout = next_line.is_some_and(|next| {
        let lower = next.to_lowercase();
        next.contains('|') || lower.contains("remote")
    });
    if next_has_layout {
        let cleaned = clean_role(line);
        if !cleaned.is_empty() {
            return Some(cleaned);
        }
    }
    None
}

fn strip_date_spans(line: &str) -> String {
    let mut text = line.to_string();
    for re in [
        &*MONTH_RANGE,
        &*OPEN_MONTH_RANGE,
        &*YEAR_RANGE,
        &*OPEN_YEAR_RANGE,
    ] {
        text = re.replace_all(&text, "").into_owned();
    }
    text
}

fn clean_role(text: &str) -> String {
    let text = TRAILING_MONTH.replace(text.trim(), "");
    text.trim_matches(|c: char| c.is_whitespace() || matches!(c, '|' | ',' | '-' | '–' | '—'))
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_month_range_is_inclusive() {
        assert_eq!(parse_duration("Jan 2023 - Mar 2023"), Some(3));
        assert_eq!(parse_duration("Jan 2023 - Jan 2024"), Some(13));
    }

    #[test]
    fn test_bare_year_range_is_not_inclusive() {
        assert_eq!(parse_duration("2020-2022"), Some(24));
    }

    #[test]
    fn test_abbreviated_month_with_apostrophe_year() {
        assert_eq!(parse_duration("Jun'22 - Aug'22"), Some(3));
    }

    #[test]
    fn test_full_month_names() {
        assert_eq!(parse_duration("January 2021 - March 2021"), Some(3));
    }

    #[test]
    fn test_open_range_uses_current_date() {
        let now = Utc::now();
        let months = parse_duration("Jan 2023 - Present").unwrap();
        let expected = (now.year() - 2023) * 12 + (now.month() as i32 - 1) + 1;
        assert_eq!(months, expected as u32);
    }

    #[test]
    fn test_role_line_with_inline_date() {
        let records = extract_experience(&lines(&["Software Engineer, Jan 2022 - Dec 2022"]));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].role.as_deref(), Some("Software Engineer"));
        assert_eq!(records[0].months, Some(12));
    }

    #[test]
    fn test_duration_on_following_line() {
        let records = extract_experience(&lines(&[
            "Backend Developer at Acme",
            "Jun 2021 - Aug 2021",
        ]));
        assert_eq!(records[0].role.as_deref(), Some("Backend Developer at Acme"));
        assert_eq!(records[0].months, Some(3));
    }

    #[test]
    fn test_bullet_lines_are_skipped() {
        let records = extract_experience(&lines(&[
            "Software Engineer, Jan 2022 - Dec 2022",
            "• Built the billing pipeline",
            "- Shipped the mobile app",
        ]));
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_description_verb_lines_are_skipped() {
        let records = extract_experience(&lines(&["Developed a data engineer onboarding guide"]));
        assert!(records.is_empty());
    }

    #[test]
    fn test_percentage_lines_are_skipped() {
        let records = extract_experience(&lines(&["Model intern accuracy improved to 95%"]));
        assert!(records.is_empty());
    }

    #[test]
    fn test_continuation_lines_are_skipped() {
        let records = extract_experience(&lines(&["and data engineer workflows"]));
        assert!(records.is_empty());
    }

    #[test]
    fn test_layout_indicator_line() {
        let records = extract_experience(&lines(&["ML Engineer | Initech | Remote"]));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].role.as_deref(), Some("ML Engineer | Initech | Remote"));
    }

    #[test]
    fn test_short_roles_are_dropped() {
        // "Sre" survives stripping but is too short to keep
        let records = extract_experience(&lines(&["SRE, 2020-2021"]));
        assert!(records.is_empty());
    }

    #[test]
    fn test_duplicate_entries_are_collapsed() {
        let records = extract_experience(&lines(&[
            "Software Engineer, Jan 2022 - Dec 2022",
            "Software Engineer, Jan 2022 - Dec 2022",
        ]));
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_trailing_month_is_stripped_from_role() {
        let records = extract_experience(&lines(&["Data Analyst Jan 2021 - Mar 2021"]));
        assert_eq!(records[0].role.as_deref(), Some("Data Analyst"));
    }
}

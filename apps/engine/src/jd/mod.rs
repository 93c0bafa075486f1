//! Job-description parsing: segments JD text into must-have vs good-to-have
//! tiers by header detection (including headers buried mid-paragraph), then
//! normalizes each tier's content into skill keywords.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dictionaries::SKILL_MATCHER;

const MUST_HAVE_PATTERNS: &[&str] = &[
    r"must\s*have",
    r"required\s*skills?",
    r"requirements",
    r"qualifications",
    r"essential",
    r"minimum\s*qualifications",
    r"what\s*you\s*need",
];

const GOOD_TO_HAVE_PATTERNS: &[&str] = &[
    r"good\s*to\s*have",
    r"nice\s*to\s*have",
    r"preferred",
    r"desired",
    r"plus",
    r"bonus",
    r"additional\s*skills?",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tier {
    MustHave,
    GoodToHave,
}

/// Inline headers get a line break inserted in front of them so that
/// "…global supply chains. Qualifications: Java…" still switches tiers.
static HEADER_BREAKS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    MUST_HAVE_PATTERNS
        .iter()
        .chain(GOOD_TO_HAVE_PATTERNS)
        .map(|p| Regex::new(&format!(r"(?i)([\.\?!]|\b)\s*({p})[:\s]")).expect("valid regex"))
        .collect()
});

static TIER_HEADERS: LazyLock<Vec<(Tier, Regex)>> = LazyLock::new(|| {
    let compile = |tier, patterns: &[&str]| {
        patterns
            .iter()
            .map(|p| {
                (
                    tier,
                    Regex::new(&format!(r"(?i)^\s*(?:{p})[:\s]*(.*)$")).expect("valid regex"),
                )
            })
            .collect::<Vec<_>>()
    };
    let mut headers = compile(Tier::MustHave, MUST_HAVE_PATTERNS);
    headers.extend(compile(Tier::GoodToHave, GOOD_TO_HAVE_PATTERNS));
    headers
});

static KEYWORD_DELIMITERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[,•·:\-/]").expect("valid regex"));

/// Tiered skill requirements extracted from one job description.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JdSkillSet {
    pub must_have: Vec<String>,
    pub good_to_have: Vec<String>,
    pub all_keywords: Vec<String>,
}

impl JdSkillSet {
    fn tier_mut(&mut self, tier: Tier) -> &mut Vec<String> {
        match tier {
            Tier::MustHave => &mut self.must_have,
            Tier::GoodToHave => &mut self.good_to_have,
        }
    }
}

/// Parses a job description into tiered, normalized skill sets. Content
/// before any recognized header defaults to the must-have tier.
pub fn parse_jd(jd_text: &str) -> JdSkillSet {
    let mut text = jd_text.to_string();
    for re in HEADER_BREAKS.iter() {
        text = re.replace_all(&text, "\n${2}:").into_owned();
    }

    let mut parsed = JdSkillSet::default();
    let mut current = Tier::MustHave;

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let header = TIER_HEADERS.iter().find_map(|(tier, re)| {
            re.captures(line)
                .map(|caps| (*tier, caps.get(1).map_or("", |m| m.as_str()).to_string()))
        });

        match header {
            Some((tier, trailing)) => {
                current = tier;
                // Content on the header line itself belongs to the new tier.
                if !trailing.trim().is_empty() {
                    collect_keywords(&trailing, current, &mut parsed);
                }
            }
            None => collect_keywords(line, current, &mut parsed),
        }
    }

    debug!(
        must_have = parsed.must_have.len(),
        good_to_have = parsed.good_to_have.len(),
        "parsed job description"
    );
    parsed
}

/// Turns one line of tier content into normalized keywords: delimiter-split
/// segments within length bounds, plus dictionary skills recognized anywhere
/// in the line. Insertion is order-preserving and de-duplicated.
fn collect_keywords(line: &str, tier: Tier, parsed: &mut JdSkillSet) {
    let mut found: Vec<String> = Vec::new();

    for part in KEYWORD_DELIMITERS.split(line) {
        let cleaned = part.trim().trim_end_matches(['.', '?', '!']).trim();
        let len = cleaned.chars().count();
        if len > 1 && len < 30 {
            found.push(cleaned.to_lowercase());
        }
    }
    for hit in SKILL_MATCHER.matches_in(line) {
        found.push(hit.to_string());
    }

    for keyword in found {
        let tier_list = parsed.tier_mut(tier);
        if !tier_list.contains(&keyword) {
            tier_list.push(keyword.clone());
        }
        if !parsed.all_keywords.contains(&keyword) {
            parsed.all_keywords.push(keyword);
        }
    }
}

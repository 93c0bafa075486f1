//! Name/email/phone extraction from the top of the document. Each field is
//! an independent regex pass; a miss is a `None`, never an error.

use std::sync::LazyLock;

use regex::Regex;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\S+@\S+").expect("valid regex"));

static PHONE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"\+?\d{1,3}[-.\s]?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}",
        r"\b\d{10}\b",
        r"\+\d{2}\s?\d{10}",
    ]
    .into_iter()
    .map(|p| Regex::new(p).expect("valid phone regex"))
    .collect()
});

static DOC_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(resume|cv|curriculum)\b").expect("valid regex"));

#[derive(Debug, Clone, Default)]
pub struct BasicInfo {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

pub fn extract_basic_info(text: &str) -> BasicInfo {
    let email = EMAIL.find(text).map(|m| m.as_str().to_string());

    let phone = PHONE_PATTERNS
        .iter()
        .find_map(|re| re.find(text))
        .map(|m| m.as_str().trim().to_string());

    // Name: first plausible line among the top five, excluding lines that
    // carry the email, the phone, or a document label.
    let mut name = None;
    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()).take(5) {
        if email.as_deref().is_some_and(|e| line.contains(e)) {
            continue;
        }
        if phone.as_deref().is_some_and(|p| line.contains(p)) {
            continue;
        }
        if DOC_LABEL.is_match(line) {
            continue;
        }
        let words: Vec<&str> = line.split_whitespace().collect();
        let alphabetic =
            |w: &str| !w.is_empty() && w.chars().filter(|c| *c != '.').all(char::is_alphabetic);
        if (2..=4).contains(&words.len()) && words.iter().all(|w| alphabetic(w)) {
            name = Some(line.to_string());
            break;
        }
        if words.len() == 1 && alphabetic(words[0]) && words[0].chars().count() > 2 {
            name = Some(line.to_string());
            break;
        }
    }

    BasicInfo { name, email, phone }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_all_three_fields() {
        let info = extract_basic_info("Jane Doe\njane.doe@example.com\n+1 555 123 4567\n");
        assert_eq!(info.name.as_deref(), Some("Jane Doe"));
        assert_eq!(info.email.as_deref(), Some("jane.doe@example.com"));
        assert!(info.phone.is_some());
    }

    #[test]
    fn test_ten_digit_phone() {
        let info = extract_basic_info("Jane Doe\n9876543210\n");
        assert_eq!(info.phone.as_deref(), Some("9876543210"));
    }

    #[test]
    fn test_missing_fields_are_none() {
        let info = extract_basic_info("Objective\nSeeking a challenging role in software\n");
        assert!(info.email.is_none());
        assert!(info.phone.is_none());
    }

    #[test]
    fn test_resume_label_line_is_not_a_name() {
        let info = extract_basic_info("Resume\nJane Doe\njane@example.com\n");
        assert_eq!(info.name.as_deref(), Some("Jane Doe"));
    }

    #[test]
    fn test_name_with_initial() {
        let info = extract_basic_info("Jane M. Doe\njane@example.com\n");
        assert_eq!(info.name.as_deref(), Some("Jane M. Doe"));
    }

    #[test]
    fn test_single_word_name() {
        let info = extract_basic_info("Madonna\nmadonna@example.com\n");
        assert_eq!(info.name.as_deref(), Some("Madonna"));
    }
}

//! Repairs spacing artifacts introduced by layout-based text extraction
//! (merged words, missing punctuation spacing, split ordinals, broken
//! compound technology names). Runs before any pattern matching.

use std::sync::LazyLock;

use regex::Regex;

static MERGED_WORDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z])([A-Z])").expect("valid regex"));
static PUNCT_SPACING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([.,;:!?])([A-Za-z])").expect("valid regex"));
static SPLIT_ORDINAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d)\s+(st|nd|rd|th)\b").expect("valid regex"));

/// Compound technology names commonly broken apart by column-based PDF
/// extraction, or re-broken by the merged-word repair above.
const COMPOUND_REPAIRS: &[(&str, &str)] = &[
    // Languages
    (r"Java\s*Script", "JavaScript"),
    (r"Type\s*Script", "TypeScript"),
    (r"Coffee\s*Script", "CoffeeScript"),
    // Frameworks & libraries
    (r"Node\s*\.\s*js", "Node.js"),
    (r"React\s*Js", "React.js"),
    (r"Vue\s*Js", "Vue.js"),
    (r"Next\s*Js", "Next.js"),
    (r"Nest\s*Js", "Nest.js"),
    (r"Express\s*Js", "Express.js"),
    (r"Angular\s*Js", "AngularJS"),
    (r"Tensor\s*Flow", "TensorFlow"),
    (r"Py\s*Torch", "PyTorch"),
    (r"Sci\s*Kit", "Scikit"),
    (r"Mat\s*Plot\s*Lib", "Matplotlib"),
    (r"Power\s*BI", "PowerBI"),
    // Databases
    (r"Mongo\s*DB", "MongoDB"),
    (r"Postgre\s*SQL", "PostgreSQL"),
    (r"My\s*SQL", "MySQL"),
    (r"No\s*SQL", "NoSQL"),
    (r"Dynamo\s*DB", "DynamoDB"),
    (r"Cosmos\s*DB", "CosmosDB"),
    // Tools
    (r"Git\s*Hub", "GitHub"),
    (r"Git\s*Lab", "GitLab"),
    (r"Vs\s*Code", "VS Code"),
    (r"Visual\s*Studio", "Visual Studio"),
    // Concepts
    (r"Back\s*End", "Backend"),
    (r"Front\s*End", "Frontend"),
    (r"Full\s*Stack", "FullStack"),
    (r"Dev\s*Ops", "DevOps"),
    (r"Ci\s*/\s*Cd", "CI/CD"),
];

static COMPOUND_REPAIR_RES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    COMPOUND_REPAIRS
        .iter()
        .map(|(pattern, replacement)| {
            (
                Regex::new(&format!("(?i){pattern}")).expect("valid repair regex"),
                *replacement,
            )
        })
        .collect()
});

/// Repairs extraction spacing damage. Always succeeds, including on empty
/// input.
pub fn normalize(raw_text: &str) -> String {
    // "DeveloperManager" -> "Developer Manager"
    let text = MERGED_WORDS.replace_all(raw_text, "${1} ${2}");
    // "Experience.Skills" -> "Experience. Skills"
    let text = PUNCT_SPACING.replace_all(&text, "${1} ${2}");
    // "1 st" -> "1st"
    let mut text = SPLIT_ORDINAL.replace_all(&text, "${1}${2}").into_owned();
    // Restore tech names the merged-word pass just broke ("Java Script")
    for (re, replacement) in COMPOUND_REPAIR_RES.iter() {
        text = re.replace_all(&text, *replacement).into_owned();
    }
    text
}

/// Python-style title casing: the first letter of every alphabetic run is
/// uppercased, the rest lowered. "machine learning" -> "Machine Learning",
/// "node.js" -> "Node.Js".
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_run_start = true;
    for c in s.chars() {
        if c.is_alphabetic() {
            if at_run_start {
                out.extend(c.to_uppercase());
                at_run_start = false;
            } else {
                out.extend(c.to_lowercase());
            }
        } else {
            out.push(c);
            at_run_start = true;
        }
    }
    out
}

//! Static lexical reference data shared by every extractor: the known-skill
//! and known-role tables, and the precompiled skill matcher built over them.
//!
//! All tables are lowercase; display casing is applied at the output edge.

use std::sync::LazyLock;

use aho_corasick::AhoCorasick;

/// Known technology tokens. Matched case-insensitively; entries of three
/// characters or fewer additionally require word-boundary context so "r"
/// never fires inside "director".
pub const KNOWN_SKILLS: &[&str] = &[
    // Languages
    "python", "java", "javascript", "c++", "c", "kotlin", "sql", "typescript", "go", "rust",
    "php", "swift", "r", "scala",
    // Frameworks & libraries
    "react", "reactjs", "react.js", "angular", "vue", "vue.js", "node.js", "nodejs", "express",
    "express.js", "django", "flask", "fastapi", "spring", "spring boot", "tensorflow", "pytorch",
    "keras", "scikit-learn", "pandas", "numpy", "matplotlib", "next.js", "nextjs", "streamlit",
    "jetpack compose", "ktor", "room", "hilt",
    // Databases
    "mongodb", "mysql", "postgresql", "firebase", "redis", "supabase", "oracle", "cassandra",
    "dynamodb", "firestore",
    // Cloud & DevOps
    "aws", "azure", "gcp", "docker", "kubernetes", "ci/cd", "jenkins", "github actions",
    "terraform", "ansible",
    // Tools
    "git", "github", "gitlab", "postman", "jira", "linux", "tableau", "power bi", "powerbi",
    "excel", "kafka", "opencv", "selenium", "websocket", "rest api", "graphql", "jwt", "razorpay",
    // AI/ML platforms
    "gemini", "openai", "pinecone", "langchain",
    // Concepts
    "machine learning", "deep learning", "nlp", "data science", "data analysis",
    "cloud computing", "devops", "agile", "oop", "oops", "etl", "computer vision", "rag",
];

/// Known job titles, used by the experience extractor to recognize role lines.
pub const KNOWN_ROLES: &[&str] = &[
    // Software development
    "software engineer", "software developer", "full stack developer", "frontend developer",
    "backend developer", "web developer", "mobile developer", "android developer",
    "ios developer", "frontend engineer", "backend engineer", "full stack engineer",
    // Data & AI
    "data scientist", "data analyst", "data engineer", "machine learning engineer",
    "ai engineer", "ml engineer", "business analyst", "research scientist",
    // Design & product
    "ui/ux designer", "product designer", "graphic designer", "product manager",
    "project manager",
    // Internships & entry level
    "intern", "trainee", "associate", "junior developer", "software intern",
    "data science intern", "sde intern",
    // Leadership
    "team lead", "tech lead", "engineering manager", "senior developer", "senior engineer",
    "lead developer",
    // DevOps & cloud
    "devops engineer", "cloud engineer", "sre", "site reliability engineer", "cloud architect",
    "systems engineer",
    // Other technical
    "qa engineer", "test engineer", "security engineer", "database administrator",
    "network engineer",
    // Student roles
    "contributor", "volunteer", "member", "coordinator", "core member",
    "technical team member", "app developer", "research assistant",
];

/// Precompiled matcher over [`KNOWN_SKILLS`], built once per process and
/// shared by every extractor. Input lines must be lowercased by the caller.
pub struct SkillMatcher {
    automaton: AhoCorasick,
}

pub static SKILL_MATCHER: LazyLock<SkillMatcher> = LazyLock::new(SkillMatcher::new);

impl SkillMatcher {
    fn new() -> Self {
        let automaton = AhoCorasick::new(KNOWN_SKILLS).expect("skill automaton builds");
        Self { automaton }
    }

    /// All dictionary entries present in `line`, in canonical lowercase form.
    ///
    /// Short entries (<= 3 chars) only count when bounded by non-word
    /// context; longer entries match on plain containment.
    pub fn matches_in(&self, line: &str) -> Vec<&'static str> {
        let lower = line.to_lowercase();
        let mut seen = vec![false; KNOWN_SKILLS.len()];
        for m in self.automaton.find_overlapping_iter(&lower) {
            let pattern = KNOWN_SKILLS[m.pattern().as_usize()];
            if pattern.chars().count() <= 3 && !word_bounded(&lower, m.start(), m.end()) {
                continue;
            }
            seen[m.pattern().as_usize()] = true;
        }
        KNOWN_SKILLS
            .iter()
            .zip(seen)
            .filter_map(|(skill, hit)| hit.then_some(*skill))
            .collect()
    }

    /// Exact membership test against the dictionary (canonical lowercase).
    pub fn contains(&self, token: &str) -> bool {
        KNOWN_SKILLS.contains(&token)
    }
}

/// True when a lowercase line contains any known role title.
pub fn contains_role_keyword(line: &str) -> bool {
    let lower = line.to_lowercase();
    KNOWN_ROLES.iter().any(|role| lower.contains(role))
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Word-boundary check for a match span: the characters adjacent to the
/// span must not be word characters.
fn word_bounded(text: &str, start: usize, end: usize) -> bool {
    let before_ok = match text[..start].chars().next_back() {
        Some(c) => !is_word_char(c),
        None => true,
    };
    let after_ok = match text[end..].chars().next() {
        Some(c) => !is_word_char(c),
        None => true,
    };
    before_ok && after_ok
}

//! Resume scoring: a three-tier matching engine over the JD skill sets.
//!
//! Every target skill is tried against escalating strategies: exact
//! membership in the extracted skill set (optionally boosted by contextual
//! evidence), then literal sentence containment, then embedding similarity.
//! Whatever remains lands in `missing` and can trigger the must-have
//! penalty.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::embedding::{cosine_similarity, Embedder};
use crate::jd::JdSkillSet;

/// Action verbs that mark a sentence as hands-on evidence for a skill.
const ACTION_VERBS: &[&str] = &[
    "build", "develop", "design", "implement", "optimize", "deploy", "scale", "integrate",
    "maintain", "architect", "create", "manage", "lead", "engineer", "test", "debug",
];

// ────────────────────────────────────────────────────────────────────────────
// Configuration
// ────────────────────────────────────────────────────────────────────────────

/// Scoring parameters. The stock values are empirically chosen constants
/// carried over from tuning runs, not derived invariants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub must_have_weight: f64,
    pub good_to_have_weight: f64,
    /// Multiplier applied to an exact match backed by an action-verb sentence.
    pub contextual_boost: f64,
    /// Fraction of the tier weight granted to a semantic/textual recovery.
    pub semantic_credit: f64,
    /// Minimum cosine similarity for an embedding-based recovery.
    pub semantic_threshold: f64,
    /// Must-have missing fraction beyond which the penalty kicks in.
    pub penalty_missing_fraction: f64,
    pub penalty_factor: f64,
    pub strong_fit_cutoff: f64,
    pub moderate_fit_cutoff: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            must_have_weight: 1.0,
            good_to_have_weight: 0.5,
            contextual_boost: 1.3,
            semantic_credit: 0.6,
            semantic_threshold: 0.60,
            penalty_missing_fraction: 0.4,
            penalty_factor: 0.6,
            strong_fit_cutoff: 75.0,
            moderate_fit_cutoff: 50.0,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Output data model
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    #[serde(rename = "Strong Fit")]
    StrongFit,
    #[serde(rename = "Moderate Fit")]
    ModerateFit,
    #[serde(rename = "Weak Fit")]
    WeakFit,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Verdict::StrongFit => "Strong Fit",
            Verdict::ModerateFit => "Moderate Fit",
            Verdict::WeakFit => "Weak Fit",
        };
        f.write_str(label)
    }
}

/// An exact match additionally supported by an action-verb sentence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextualMatch {
    pub skill: String,
    pub evidence: String,
}

/// A skill absent from the extracted skill set but recovered from the
/// sentence corpus, literally (confidence 1.0) or by embedding similarity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SemanticMatch {
    pub skill: String,
    pub evidence: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub exact: Vec<String>,
    pub contextual: Vec<ContextualMatch>,
    pub semantic: Vec<SemanticMatch>,
    pub missing: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreDetails {
    pub total_must_have: usize,
    pub total_good_to_have: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreResult {
    pub score: f64,
    pub verdict: Verdict,
    pub breakdown: ScoreBreakdown,
    pub details: ScoreDetails,
}

// ────────────────────────────────────────────────────────────────────────────
// Scorer
// ────────────────────────────────────────────────────────────────────────────

/// Stateless per-call scorer. The embedding provider is injected at
/// construction; without one, scoring degrades to exact matching plus
/// textual recovery and never errors.
pub struct ResumeScorer {
    config: ScoringConfig,
    embedder: Option<Arc<dyn Embedder>>,
}

impl ResumeScorer {
    pub fn new(config: ScoringConfig, embedder: Option<Arc<dyn Embedder>>) -> Self {
        Self { config, embedder }
    }

    pub fn score(
        &self,
        resume_skills: &[String],
        jd: &JdSkillSet,
        resume_sentences: &[String],
    ) -> ScoreResult {
        let resume_set: HashSet<String> =
            resume_skills.iter().map(|s| normalize_skill(s)).collect();
        let sentences: Vec<String> = resume_sentences
            .iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let mut breakdown = ScoreBreakdown::default();
        let mut earned = 0.0_f64;
        let mut possible = 0.0_f64;
        let mut missing_must_have = 0_usize;

        // Sentence embeddings are computed at most once per scoring call and
        // reused across every missing skill.
        let mut sentence_cache: Option<Option<Vec<Vec<f32>>>> = None;

        let tiers = [
            (self.config.must_have_weight, &jd.must_have, true),
            (self.config.good_to_have_weight, &jd.good_to_have, false),
        ];

        for (weight, targets, is_must_have) in tiers {
            for target in targets.iter() {
                let skill = normalize_skill(target);
                possible += weight;

                if resume_set.contains(&skill) {
                    breakdown.exact.push(skill.clone());
                    match contextual_evidence(&skill, &sentences) {
                        Some(evidence) => {
                            earned += weight * self.config.contextual_boost;
                            breakdown.contextual.push(ContextualMatch { skill, evidence });
                        }
                        None => earned += weight,
                    }
                    continue;
                }

                match self.recover(&skill, &sentences, &mut sentence_cache) {
                    Some(recovered) => {
                        earned += weight * self.config.semantic_credit;
                        breakdown.semantic.push(recovered);
                    }
                    None => {
                        breakdown.missing.push(skill);
                        if is_must_have {
                            missing_must_have += 1;
                        }
                    }
                }
            }
        }

        let mut score = if possible > 0.0 {
            earned / possible * 100.0
        } else {
            0.0
        };

        let total_must_have = jd.must_have.len();
        if total_must_have > 0 {
            let missing_fraction = missing_must_have as f64 / total_must_have as f64;
            if missing_fraction > self.config.penalty_missing_fraction {
                debug!(missing_fraction, "applying must-have penalty");
                score *= self.config.penalty_factor;
            }
        }
        let score = score.clamp(0.0, 100.0);

        let verdict = if score >= self.config.strong_fit_cutoff {
            Verdict::StrongFit
        } else if score >= self.config.moderate_fit_cutoff {
            Verdict::ModerateFit
        } else {
            Verdict::WeakFit
        };

        ScoreResult {
            score,
            verdict,
            breakdown,
            details: ScoreDetails {
                total_must_have,
                total_good_to_have: jd.good_to_have.len(),
            },
        }
    }

    /// Recovery path for a skill absent from the extracted set: literal
    /// sentence containment first, then embedding similarity above the
    /// threshold. A per-skill embedding failure only loses that skill.
    fn recover(
        &self,
        skill: &str,
        sentences: &[String],
        sentence_cache: &mut Option<Option<Vec<Vec<f32>>>>,
    ) -> Option<SemanticMatch> {
        for sentence in sentences {
            if sentence.to_lowercase().contains(skill) {
                return Some(SemanticMatch {
                    skill: skill.to_string(),
                    evidence: sentence.clone(),
                    confidence: 1.0,
                });
            }
        }

        let embedder = self.embedder.as_deref()?;
        let skill_embedding = match embedder.encode(skill) {
            Ok(v) => v,
            Err(e) => {
                warn!(skill, "skill embedding failed: {e}");
                return None;
            }
        };

        let sentence_embeddings = sentence_cache
            .get_or_insert_with(|| match embedder.encode_batch(sentences) {
                Ok(vectors) => Some(vectors),
                Err(e) => {
                    warn!("sentence embedding failed, semantic recovery disabled: {e}");
                    None
                }
            })
            .as_deref()?;

        let best = sentences
            .iter()
            .zip(sentence_embeddings)
            .map(|(sentence, vector)| {
                (sentence, cosine_similarity(&skill_embedding, vector) as f64)
            })
            .max_by(|a, b| a.1.total_cmp(&b.1))?;

        let (sentence, confidence) = best;
        if confidence > self.config.semantic_threshold {
            Some(SemanticMatch {
                skill: skill.to_string(),
                evidence: sentence.clone(),
                confidence,
            })
        } else {
            None
        }
    }
}

fn normalize_skill(skill: &str) -> String {
    skill.trim().to_lowercase()
}

/// First sentence that contains the skill token alongside an action verb.
fn contextual_evidence(skill: &str, sentences: &[String]) -> Option<String> {
    sentences
        .iter()
        .find(|sentence| {
            let lower = sentence.to_lowercase();
            lower.contains(skill) && ACTION_VERBS.iter().any(|verb| lower.contains(verb))
        })
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::EngineError;

    /// Deterministic test double: fixed vectors per known text, error on
    /// demand for failure-path tests.
    struct StubEmbedder {
        table: Vec<(&'static str, Vec<f32>)>,
        fail_on: Option<&'static str>,
    }

    impl StubEmbedder {
        fn new(table: Vec<(&'static str, Vec<f32>)>) -> Self {
            Self {
                table,
                fail_on: None,
            }
        }
    }

    impl Embedder for StubEmbedder {
        fn encode(&self, text: &str) -> Result<Vec<f32>, EngineError> {
            if self.fail_on == Some(text) {
                return Err(EngineError::Embedding("stub failure".to_string()));
            }
            Ok(self
                .table
                .iter()
                .find(|(known, _)| text.contains(known))
                .map(|(_, v)| v.clone())
                .unwrap_or_else(|| vec![0.0, 0.0, 1.0]))
        }
    }

    fn skills(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    fn jd(must: &[&str], good: &[&str]) -> JdSkillSet {
        JdSkillSet {
            must_have: must.iter().map(|s| s.to_string()).collect(),
            good_to_have: good.iter().map(|s| s.to_string()).collect(),
            all_keywords: must.iter().chain(good).map(|s| s.to_string()).collect(),
        }
    }

    fn scorer() -> ResumeScorer {
        ResumeScorer::new(ScoringConfig::default(), None)
    }

    #[test]
    fn test_exact_match_full_credit() {
        let result = scorer().score(&skills(&["Python"]), &jd(&["Python"], &[]), &[]);
        assert_eq!(result.score, 100.0);
        assert_eq!(result.verdict, Verdict::StrongFit);
        assert_eq!(result.breakdown.exact, vec!["python"]);
    }

    #[test]
    fn test_empty_jd_scores_zero_weak_fit() {
        let result = scorer().score(&skills(&["Python"]), &jd(&[], &[]), &[]);
        assert_eq!(result.score, 0.0);
        assert_eq!(result.verdict, Verdict::WeakFit);
        assert!(result.breakdown.exact.is_empty());
        assert!(result.breakdown.missing.is_empty());
    }

    #[test]
    fn test_contextual_boost_applies() {
        let sentences = vec!["Developed backend services using Python".to_string()];
        let result = scorer().score(&skills(&["Python"]), &jd(&["Python"], &[]), &sentences);
        // boost pushes earned above possible; score clamps at 100
        assert_eq!(result.score, 100.0);
        assert_eq!(result.breakdown.contextual.len(), 1);
        assert_eq!(result.breakdown.contextual[0].skill, "python");
        assert!(result.breakdown.contextual[0]
            .evidence
            .contains("Developed"));
    }

    #[test]
    fn test_plain_mention_without_action_verb_is_not_contextual() {
        let sentences = vec!["Familiar with Python".to_string()];
        let result = scorer().score(&skills(&["Python"]), &jd(&["Python"], &[]), &sentences);
        assert!(result.breakdown.contextual.is_empty());
        assert_eq!(result.breakdown.exact, vec!["python"]);
    }

    #[test]
    fn test_textual_recovery_from_sentences() {
        let sentences = vec!["Deployed microservices on Kubernetes using Helm".to_string()];
        let result = scorer().score(&skills(&["Python"]), &jd(&["Kubernetes"], &[]), &sentences);
        assert_eq!(result.breakdown.semantic.len(), 1);
        let recovered = &result.breakdown.semantic[0];
        assert_eq!(recovered.skill, "kubernetes");
        assert_eq!(recovered.confidence, 1.0);
        // tier weight 1.0 * semantic credit 0.6 over possible 1.0
        assert!((result.score - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_embedding_recovery_above_threshold() {
        let embedder = StubEmbedder::new(vec![
            ("orchestration", vec![1.0, 0.0, 0.0]),
            ("Container scheduling platform", vec![0.9, 0.1, 0.0]),
        ]);
        let scorer = ResumeScorer::new(ScoringConfig::default(), Some(Arc::new(embedder)));
        let sentences = vec!["Container scheduling platform work".to_string()];
        let result = scorer.score(&[], &jd(&["orchestration"], &[]), &sentences);
        assert_eq!(result.breakdown.semantic.len(), 1);
        assert!(result.breakdown.semantic[0].confidence > 0.6);
        assert!(result.breakdown.missing.is_empty());
    }

    #[test]
    fn test_embedding_below_threshold_is_missing() {
        let embedder = StubEmbedder::new(vec![
            ("orchestration", vec![1.0, 0.0, 0.0]),
            ("Wrote quarterly reports", vec![0.0, 1.0, 0.0]),
        ]);
        let scorer = ResumeScorer::new(ScoringConfig::default(), Some(Arc::new(embedder)));
        let sentences = vec!["Wrote quarterly reports".to_string()];
        let result = scorer.score(&[], &jd(&["orchestration"], &[]), &sentences);
        assert!(result.breakdown.semantic.is_empty());
        assert_eq!(result.breakdown.missing, vec!["orchestration"]);
    }

    #[test]
    fn test_no_embedder_degrades_to_exact_only() {
        let sentences = vec!["Ran the platform team".to_string()];
        let result = scorer().score(
            &skills(&["Python"]),
            &jd(&["Python", "Kubernetes"], &[]),
            &sentences,
        );
        assert_eq!(result.breakdown.exact, vec!["python"]);
        assert_eq!(result.breakdown.missing, vec!["kubernetes"]);
    }

    #[test]
    fn test_per_skill_embedding_failure_only_loses_that_skill() {
        let mut embedder = StubEmbedder::new(vec![
            ("terraform", vec![1.0, 0.0, 0.0]),
            ("Provisioned infrastructure as code", vec![0.95, 0.05, 0.0]),
        ]);
        embedder.fail_on = Some("kubernetes");
        let scorer = ResumeScorer::new(ScoringConfig::default(), Some(Arc::new(embedder)));
        let sentences = vec!["Provisioned infrastructure as code".to_string()];
        let result = scorer.score(&[], &jd(&["kubernetes", "terraform"], &[]), &sentences);
        assert_eq!(result.breakdown.missing, vec!["kubernetes"]);
        assert_eq!(result.breakdown.semantic.len(), 1);
        assert_eq!(result.breakdown.semantic[0].skill, "terraform");
    }

    #[test]
    fn test_must_have_penalty_applied() {
        // 5 must-have, 2 exact, 3 missing -> missing fraction 0.6 > 0.4
        let result = scorer().score(
            &skills(&["A1 Skill", "B2 Skill"]),
            &jd(&["A1 Skill", "B2 Skill", "C3", "D4", "E5"], &[]),
            &[],
        );
        // raw = 2/5 * 100 = 40, penalized = 24
        assert!((result.score - 24.0).abs() < 1e-9);
        assert_eq!(result.breakdown.missing.len(), 3);
    }

    #[test]
    fn test_penalty_not_applied_at_or_below_threshold() {
        // 5 must-have, 2 missing -> fraction 0.4, not strictly greater
        let result = scorer().score(
            &skills(&["A1 Skill", "B2 Skill", "C3 Skill"]),
            &jd(&["A1 Skill", "B2 Skill", "C3 Skill", "D4", "E5"], &[]),
            &[],
        );
        assert!((result.score - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_good_to_have_weight_is_half() {
        let result = scorer().score(
            &skills(&["Python", "React"]),
            &jd(&["Python"], &["React", "Docker"]),
            &[],
        );
        // earned 1.0 + 0.5, possible 1.0 + 0.5 + 0.5 = 2.0 -> 75
        assert!((result.score - 75.0).abs() < 1e-9);
        assert_eq!(result.verdict, Verdict::StrongFit);
    }

    #[test]
    fn test_adding_exact_match_never_decreases_score() {
        let jd_set = jd(&["Python", "Kubernetes"], &["React"]);
        let before = scorer().score(&skills(&["Python"]), &jd_set, &[]);
        let after = scorer().score(&skills(&["Python", "Kubernetes"]), &jd_set, &[]);
        assert!(after.score >= before.score);
    }

    #[test]
    fn test_verdict_thresholds() {
        let config = ScoringConfig::default();
        let scorer = ResumeScorer::new(config, None);
        let strong = scorer.score(&skills(&["Python"]), &jd(&["Python"], &[]), &[]);
        assert_eq!(strong.verdict, Verdict::StrongFit);
        let moderate = scorer.score(
            &skills(&["Python"]),
            &jd(&["Python"], &["React", "Docker"]),
            &[],
        );
        // 1.0 / 2.0 -> 50 -> Moderate
        assert_eq!(moderate.verdict, Verdict::ModerateFit);
        let weak = scorer.score(&[], &jd(&["Python"], &[]), &[]);
        assert_eq!(weak.verdict, Verdict::WeakFit);
    }

    #[test]
    fn test_end_to_end_scenario() {
        let resume_skills = skills(&["Python", "Django"]);
        let sentences = vec![
            "I have 5 years of experience with Python and Django".to_string(),
            "Deployed microservices on Kubernetes using Helm charts".to_string(),
        ];
        let jd_set = jd(&["Python", "Kubernetes"], &["React"]);
        let result = scorer().score(&resume_skills, &jd_set, &sentences);

        assert!(result.breakdown.exact.contains(&"python".to_string()));
        let kubernetes = result
            .breakdown
            .semantic
            .iter()
            .find(|m| m.skill == "kubernetes")
            .expect("kubernetes recovered from sentences");
        assert!(kubernetes.confidence > 0.60);
        assert_eq!(result.breakdown.missing, vec!["react"]);
        assert_eq!(result.details.total_must_have, 2);
        assert_eq!(result.details.total_good_to_have, 1);
    }

    #[test]
    fn test_verdict_serializes_with_spaces() {
        let json = serde_json::to_string(&Verdict::StrongFit).unwrap();
        assert_eq!(json, r#""Strong Fit""#);
        assert_eq!(Verdict::ModerateFit.to_string(), "Moderate Fit");
    }
}

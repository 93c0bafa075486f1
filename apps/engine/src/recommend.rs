//! Role recommendation: ranks a static catalogue of role profiles by
//! embedding similarity between the resume text and each profile's skill
//! summary. Profile vectors are embedded once and cached for the life of
//! the recommender.

use std::sync::{Arc, OnceLock};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::embedding::{cosine_similarity, Embedder};

pub struct RoleProfile {
    pub role: &'static str,
    pub skills: &'static str,
}

pub const ROLE_PROFILES: &[RoleProfile] = &[
    RoleProfile {
        role: "Software Engineer",
        skills: "data structures, algorithms, system design, Java, Python, C++, Git, testing",
    },
    RoleProfile {
        role: "Frontend Developer",
        skills: "JavaScript, TypeScript, React, HTML, CSS, responsive design, REST APIs",
    },
    RoleProfile {
        role: "Backend Developer",
        skills: "Node.js, Django, Spring Boot, SQL, PostgreSQL, REST APIs, microservices, Redis",
    },
    RoleProfile {
        role: "Full Stack Developer",
        skills: "React, Node.js, Express, MongoDB, SQL, REST APIs, JavaScript, deployment",
    },
    RoleProfile {
        role: "Data Scientist",
        skills: "Python, pandas, numpy, machine learning, statistics, data visualization, SQL",
    },
    RoleProfile {
        role: "Data Analyst",
        skills: "SQL, Excel, Tableau, PowerBI, data analysis, reporting, dashboards, statistics",
    },
    RoleProfile {
        role: "Machine Learning Engineer",
        skills: "Python, TensorFlow, PyTorch, deep learning, NLP, model deployment, MLOps",
    },
    RoleProfile {
        role: "DevOps Engineer",
        skills: "Docker, Kubernetes, CI/CD, Jenkins, Terraform, AWS, Linux, monitoring",
    },
    RoleProfile {
        role: "Mobile Developer",
        skills: "Kotlin, Swift, Android, iOS, Jetpack Compose, Firebase, mobile UI",
    },
    RoleProfile {
        role: "Cloud Engineer",
        skills: "AWS, Azure, GCP, cloud architecture, networking, serverless, infrastructure",
    },
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleRecommendation {
    pub role: String,
    pub score: f64,
}

/// Embedding-backed role recommender. Degrades to an empty recommendation
/// list when the provider is unavailable, never an error.
pub struct RoleRecommender {
    embedder: Option<Arc<dyn Embedder>>,
    profile_embeddings: OnceLock<Option<Vec<Vec<f32>>>>,
}

impl RoleRecommender {
    pub fn new(embedder: Option<Arc<dyn Embedder>>) -> Self {
        Self {
            embedder,
            profile_embeddings: OnceLock::new(),
        }
    }

    pub fn recommend(&self, resume_text: &str, top_k: usize) -> Vec<RoleRecommendation> {
        let Some(embedder) = self.embedder.as_deref() else {
            warn!("no embedding provider; skipping role recommendation");
            return Vec::new();
        };

        let profiles = match self.cached_profile_embeddings(embedder) {
            Some(vectors) => vectors,
            None => return Vec::new(),
        };

        let resume_embedding = match embedder.encode(resume_text) {
            Ok(v) => v,
            Err(e) => {
                warn!("resume embedding failed: {e}");
                return Vec::new();
            }
        };

        let mut ranked: Vec<RoleRecommendation> = ROLE_PROFILES
            .iter()
            .zip(profiles)
            .map(|(profile, vector)| RoleRecommendation {
                role: profile.role.to_string(),
                score: round2(cosine_similarity(&resume_embedding, vector) as f64),
            })
            .collect();
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        ranked.truncate(top_k);
        ranked
    }

    /// Profile summaries are embedded once; a failure is cached so the
    /// catalogue is not re-embedded on every call.
    fn cached_profile_embeddings(&self, embedder: &dyn Embedder) -> Option<&Vec<Vec<f32>>> {
        self.profile_embeddings
            .get_or_init(|| {
                let summaries: Vec<String> =
                    ROLE_PROFILES.iter().map(|p| p.skills.to_string()).collect();
                match embedder.encode_batch(&summaries) {
                    Ok(vectors) => Some(vectors),
                    Err(e) => {
                        warn!("role profile embedding failed: {e}");
                        None
                    }
                }
            })
            .as_ref()
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::EngineError;

    /// Maps any text to a fixed 3-dim vector keyed on marker substrings.
    struct StubEmbedder;

    impl Embedder for StubEmbedder {
        fn encode(&self, text: &str) -> Result<Vec<f32>, EngineError> {
            if text.contains("Kubernetes") || text.contains("Docker") {
                Ok(vec![1.0, 0.0, 0.0])
            } else if text.contains("pandas") || text.contains("statistics") {
                Ok(vec![0.0, 1.0, 0.0])
            } else {
                Ok(vec![0.0, 0.0, 1.0])
            }
        }
    }

    struct FailingEmbedder;

    impl Embedder for FailingEmbedder {
        fn encode(&self, _text: &str) -> Result<Vec<f32>, EngineError> {
            Err(EngineError::ModelUnavailable("stub".to_string()))
        }
    }

    #[test]
    fn test_ranking_is_descending_and_truncated() {
        let recommender = RoleRecommender::new(Some(Arc::new(StubEmbedder)));
        let ranked = recommender.recommend("Ran Docker and Kubernetes clusters", 3);
        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0].role, "DevOps Engineer");
        assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_scores_are_rounded_to_two_decimals() {
        let recommender = RoleRecommender::new(Some(Arc::new(StubEmbedder)));
        for entry in recommender.recommend("pandas and statistics work", 10) {
            assert_eq!(entry.score, round2(entry.score));
        }
    }

    #[test]
    fn test_no_embedder_yields_empty() {
        let recommender = RoleRecommender::new(None);
        assert!(recommender.recommend("anything", 3).is_empty());
    }

    #[test]
    fn test_failing_embedder_yields_empty() {
        let recommender = RoleRecommender::new(Some(Arc::new(FailingEmbedder)));
        assert!(recommender.recommend("anything", 3).is_empty());
    }

    #[test]
    fn test_top_k_larger_than_catalogue() {
        let recommender = RoleRecommender::new(Some(Arc::new(StubEmbedder)));
        let ranked = recommender.recommend("pandas", 100);
        assert_eq!(ranked.len(), ROLE_PROFILES.len());
    }
}

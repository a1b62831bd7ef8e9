//! Interview readiness evaluation
//!
//! Scores a transcript on four independent indicators, each worth 0.25,
//! and gates artifact generation at 0.8. Only the caller-supplied turns
//! are scanned; the assistant's latest reply is deliberately excluded so
//! the model echoing terminology back cannot move the score.

use crate::extract::lexicon::{INTEGRAL_TERMS, QUICK_TERMS};
use crate::transcript::Transcript;
use serde::{Deserialize, Serialize};

/// Terms indicating the conversation names a project at all.
const PROJECT_LABELS: &[&str] = &[
    "project",
    "proyecto",
    "system",
    "sistema",
    "application",
    "aplicacion",
    "aplicación",
    "platform",
    "plataforma",
    "solution",
    "solucion",
    "solución",
];

/// Technical-specificity lexicon; three distinct hits satisfy the indicator.
const TECHNICAL_TERMS: &[&str] = &[
    "size", "instance", "type", "region", "volume", "vpc", "security", "key", "gb", "tb",
    "micro", "small", "medium", "large", "xlarge", "cpu", "ram", "memory", "subnet", "port",
    "ssh", "storage",
];

/// Minimum distinct technical terms for the specificity indicator.
const MIN_TECHNICAL_TERMS: usize = 3;

/// Minimum user turns for the depth indicator.
const MIN_USER_TURNS: usize = 4;

/// Score at or above which generation fires.
const READY_THRESHOLD: f64 = 0.8;

/// Outcome of a readiness evaluation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ReadinessVerdict {
    /// Sum of the four indicators, in [0, 1]
    pub score: f64,

    /// Conversation names a project, system, or application
    pub has_project_label: bool,

    /// Conversation pins down the engagement kind
    pub has_project_kind: bool,

    /// At least three distinct technical terms present
    pub has_technical_details: bool,

    /// At least four user turns
    pub has_sufficient_context: bool,

    /// `score >= 0.8`
    pub ready: bool,
}

/// Four-indicator readiness evaluator
///
/// Pure and deterministic; holds no state between evaluations.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReadinessEvaluator;

impl ReadinessEvaluator {
    pub fn new() -> Self {
        Self
    }

    /// Evaluate a transcript. Each indicator contributes 0.25.
    pub fn evaluate(&self, transcript: &Transcript) -> ReadinessVerdict {
        let corpus = transcript.joined_text().to_lowercase();

        let has_project_label = PROJECT_LABELS.iter().any(|t| corpus.contains(t));
        let has_project_kind = INTEGRAL_TERMS
            .iter()
            .chain(QUICK_TERMS.iter())
            .any(|t| corpus.contains(t));
        let has_technical_details = TECHNICAL_TERMS
            .iter()
            .filter(|t| corpus.contains(*t))
            .count()
            >= MIN_TECHNICAL_TERMS;
        let has_sufficient_context = transcript.user_turns().count() >= MIN_USER_TURNS;

        let score = [
            has_project_label,
            has_project_kind,
            has_technical_details,
            has_sufficient_context,
        ]
        .iter()
        .filter(|&&b| b)
        .count() as f64
            * 0.25;

        ReadinessVerdict {
            score,
            has_project_label,
            has_project_kind,
            has_technical_details,
            has_sufficient_context,
            ready: score >= READY_THRESHOLD,
        }
    }
}

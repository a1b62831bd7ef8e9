//! Project-context extraction
//!
//! Distills a structured [`ProjectDescriptor`] from the free-form
//! conversation. Extraction is table-driven: the lexicons in
//! [`lexicon`] are scanned against the lowercased corpus (transcript
//! plus last assistant reply). Extraction never fails; every field has
//! a deterministic fallback, so an empty conversation still yields a
//! fully-populated descriptor.

use crate::transcript::Transcript;
use anyhow::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub mod lexicon;

use lexicon::{
    DEFAULT_OBJECTIVES, FALLBACK_NAME, FALLBACK_SERVICE, GENERIC_OBJECTIVE, GREETINGS,
    INTEGRAL_TERMS, NEED_PATTERNS, OBJECTIVE_PATTERNS, QUICK_TERMS, SERVICE_LEXICON,
};

/// Maximum length of the description and objective fields, in characters.
const FIELD_CHAR_CAP: usize = 200;

/// Maximum token count for a user turn to qualify as the project name.
const NAME_TOKEN_CAP: usize = 5;

/// Project engagement kind
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProjectKind {
    /// Single named AWS service, fast turnaround
    QuickService,

    /// Broad multi-service architecture
    IntegralSolution,

    /// Not enough signal to classify
    Unknown,
}

impl ProjectKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectKind::QuickService => "quick_service",
            ProjectKind::IntegralSolution => "integral_solution",
            ProjectKind::Unknown => "unknown",
        }
    }
}

/// Structured view of the project extracted from the conversation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectDescriptor {
    /// Stable project identifier (caller-supplied or generated)
    pub project_id: String,

    /// Opaque caller identifier
    pub user_id: String,

    /// Short human label for the project
    pub name: String,

    /// Engagement kind
    pub kind: ProjectKind,

    /// Most-mentioned known AWS service, `"AWS"` when none matched
    pub primary_service: String,

    /// What the user needs, one sentence, capped at 200 characters
    pub description: String,

    /// Why they need it, one sentence, capped at 200 characters
    pub objective: String,

    /// Known services seen at least once, in lexicon order
    pub mentioned_services: Vec<String>,
}

/// Table-driven extractor with precompiled sentence patterns
pub struct Extractor {
    need_patterns: Vec<Regex>,
    objective_patterns: Vec<Regex>,
    sentence_boundary: Regex,
}

impl Extractor {
    /// Compile the pattern tables.
    ///
    /// # Errors
    ///
    /// Returns an error if a pattern fails to compile, which cannot
    /// happen with the fixed tables in [`lexicon`].
    pub fn new() -> Result<Self> {
        let need_patterns = NEED_PATTERNS
            .iter()
            .map(|p| Regex::new(p))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        let objective_patterns = OBJECTIVE_PATTERNS
            .iter()
            .map(|p| Regex::new(p))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        let sentence_boundary = Regex::new(r"[.!?]+")?;

        Ok(Self {
            need_patterns,
            objective_patterns,
            sentence_boundary,
        })
    }

    /// Extract a fully-populated descriptor from the conversation.
    ///
    /// Deterministic: the same transcript, reply, and identifiers always
    /// produce the same descriptor.
    pub fn extract(
        &self,
        transcript: &Transcript,
        reply: &str,
        project_id: impl Into<String>,
        user_id: impl Into<String>,
    ) -> ProjectDescriptor {
        let corpus = format!("{}\n{}", transcript.joined_text(), reply).to_lowercase();

        let primary_service = self.primary_service(&corpus);
        let mentioned_services = self.mentioned_services(&corpus);
        let kind = self.kind(&corpus);

        // Sentence scans look at what the user said plus the reply, in order.
        let user_text: String = transcript
            .user_turns()
            .map(|t| t.content.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        let scan_text = format!("{} {}", user_text, reply);

        let description = self
            .first_matching_sentence(&scan_text, &self.need_patterns)
            .unwrap_or_else(|| {
                format!("Implementation of {}-based enterprise solution.", primary_service)
            });

        let objective = self
            .first_matching_sentence(&scan_text, &self.objective_patterns)
            .unwrap_or_else(|| default_objective(&primary_service).to_string());

        let name = self.project_name(transcript);

        ProjectDescriptor {
            project_id: project_id.into(),
            user_id: user_id.into(),
            name,
            kind,
            primary_service,
            description,
            objective,
            mentioned_services,
        }
    }

    /// Highest-count lexicon service, ties broken by lexicon order.
    fn primary_service(&self, corpus: &str) -> String {
        let mut best: Option<(&str, usize)> = None;
        for &(name, triggers) in SERVICE_LEXICON {
            let count: usize = triggers.iter().map(|t| corpus.matches(t).count()).sum();
            if count > 0 && best.map_or(true, |(_, c)| count > c) {
                best = Some((name, count));
            }
        }
        best.map_or_else(|| FALLBACK_SERVICE.to_string(), |(n, _)| n.to_string())
    }

    /// Lexicon services with at least one trigger hit, in lexicon order.
    fn mentioned_services(&self, corpus: &str) -> Vec<String> {
        SERVICE_LEXICON
            .iter()
            .filter(|(_, triggers)| triggers.iter().any(|t| corpus.contains(t)))
            .map(|(name, _)| (*name).to_string())
            .collect()
    }

    fn kind(&self, corpus: &str) -> ProjectKind {
        if INTEGRAL_TERMS.iter().any(|t| corpus.contains(t)) {
            ProjectKind::IntegralSolution
        } else if QUICK_TERMS.iter().any(|t| corpus.contains(t)) {
            ProjectKind::QuickService
        } else {
            ProjectKind::Unknown
        }
    }

    /// First sentence of `text` matched by any pattern, capped at 200 chars.
    fn first_matching_sentence(&self, text: &str, patterns: &[Regex]) -> Option<String> {
        self.sentence_boundary
            .split(text)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .find(|s| patterns.iter().any(|p| p.is_match(s)))
            .map(|s| truncate_chars(s, FIELD_CHAR_CAP))
    }

    /// First short user turn that is not a greeting.
    fn project_name(&self, transcript: &Transcript) -> String {
        transcript
            .user_turns()
            .map(|t| t.content.trim())
            .find(|text| {
                text.split_whitespace().count() <= NAME_TOKEN_CAP
                    && !text.is_empty()
                    && !is_greeting(text)
            })
            .map_or_else(|| FALLBACK_NAME.to_string(), str::to_string)
    }
}

/// True when the turn is a bare greeting, optionally with trailing
/// punctuation or a follow-up ("hola, soy Ana").
fn is_greeting(text: &str) -> bool {
    let lower = text.to_lowercase();
    GREETINGS.iter().any(|g| {
        lower == *g
            || lower
                .strip_prefix(g)
                .is_some_and(|rest| rest.starts_with([' ', ',', '!', '.']))
    })
}

/// Default objective for a primary service, from the fixed table.
fn default_objective(primary_service: &str) -> &'static str {
    DEFAULT_OBJECTIVES
        .iter()
        .find(|(svc, _)| *svc == primary_service)
        .map_or(GENERIC_OBJECTIVE, |(_, obj)| obj)
}

/// Hard character cap that never splits a UTF-8 multibyte sequence.
fn truncate_chars(s: &str, cap: usize) -> String {
    s.chars().take(cap).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::Turn;

    fn extractor() -> Extractor {
        Extractor::new().unwrap()
    }

    fn descriptor_for(turns: Vec<Turn>, reply: &str) -> ProjectDescriptor {
        extractor().extract(&Transcript::new(turns), reply, "pid", "uid")
    }

    #[test]
    fn test_empty_input_is_fully_populated() {
        let d = descriptor_for(vec![], "");
        assert_eq!(d.primary_service, "AWS");
        assert_eq!(d.name, "AWS Project");
        assert_eq!(d.kind, ProjectKind::Unknown);
        assert!(!d.description.is_empty());
        assert!(!d.objective.is_empty());
        assert!(d.mentioned_services.is_empty());
    }

    #[test]
    fn test_primary_service_by_count() {
        let d = descriptor_for(
            vec![Turn::user("ec2 instance with an s3 bucket, another ec2 later")],
            "",
        );
        assert_eq!(d.primary_service, "EC2");
        assert_eq!(d.mentioned_services, vec!["EC2".to_string(), "S3".to_string()]);
    }

    #[test]
    fn test_primary_service_tie_breaks_by_lexicon_order() {
        // One hit each; LAMBDA precedes EC2 in the lexicon.
        let d = descriptor_for(vec![Turn::user("lambda or ec2, undecided")], "");
        assert_eq!(d.primary_service, "LAMBDA");
    }

    #[test]
    fn test_name_from_short_user_turn() {
        let d = descriptor_for(
            vec![Turn::user("hello"), Turn::user("InventorySystem")],
            "",
        );
        assert_eq!(d.name, "InventorySystem");
    }

    #[test]
    fn test_greeting_never_becomes_name() {
        let d = descriptor_for(vec![Turn::user("hola")], "");
        assert_eq!(d.name, "AWS Project");
    }

    #[test]
    fn test_long_turn_never_becomes_name() {
        let d = descriptor_for(
            vec![Turn::user("this turn has clearly more than five tokens in it")],
            "",
        );
        assert_eq!(d.name, "AWS Project");
    }

    #[test]
    fn test_kind_integral_wins_over_quick() {
        let d = descriptor_for(vec![Turn::user("ec2 migration with security review")], "");
        assert_eq!(d.kind, ProjectKind::IntegralSolution);
    }

    #[test]
    fn test_kind_quick() {
        let d = descriptor_for(vec![Turn::user("just one ec2 please")], "");
        assert_eq!(d.kind, ProjectKind::QuickService);
    }

    #[test]
    fn test_description_from_need_sentence() {
        let d = descriptor_for(
            vec![Turn::user("Good day. I need to track inventory across warehouses. Thanks")],
            "",
        );
        assert_eq!(d.description, "I need to track inventory across warehouses");
    }

    #[test]
    fn test_description_fallback_names_service() {
        let d = descriptor_for(vec![Turn::user("rds")], "");
        assert!(d.description.contains("RDS"));
    }

    #[test]
    fn test_objective_from_sentence() {
        let d = descriptor_for(
            vec![Turn::user("The goal is to cut stockouts by half")],
            "",
        );
        assert_eq!(d.objective, "The goal is to cut stockouts by half");
    }

    #[test]
    fn test_objective_default_table_lookup() {
        let d = descriptor_for(vec![Turn::user("ec2")], "");
        assert_eq!(d.objective, "Provision reliable compute capacity sized to the workload.");
    }

    #[test]
    fn test_field_cap_is_character_safe() {
        let long = format!("necesito {}", "á".repeat(300));
        let d = descriptor_for(vec![Turn::user(long)], "");
        assert_eq!(d.description.chars().count(), 200);
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let turns = vec![
            Turn::user("InventorySystem"),
            Turn::assistant("Tell me more"),
            Turn::user("I need an ec2 instance to achieve faster builds"),
        ];
        let a = descriptor_for(turns.clone(), "Sounds good");
        let b = descriptor_for(turns, "Sounds good");
        assert_eq!(a, b);
    }

    #[test]
    fn test_reply_counts_toward_services() {
        let d = descriptor_for(vec![Turn::user("something vague")], "I suggest DynamoDB here");
        assert_eq!(d.primary_service, "DYNAMODB");
    }
}

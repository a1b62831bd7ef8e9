//! Deliverable artifact generation
//!
//! Seven per-kind generators, each a pure function of the project
//! descriptor and the assistant's reply. A generator may lift
//! pre-shaped sections out of the reply; when none are found it emits a
//! deterministic fallback that names the primary service prominently.
//! Generators never fail.
//!
//! Every artifact body goes through the ASCII fold exactly once, here,
//! before its bytes are fixed; individual generators do not strip
//! diacritics themselves.

use crate::extract::ProjectDescriptor;
use serde::{Deserialize, Serialize};

pub mod ascii;
mod sheets;
mod template;
mod text;

/// Maximum artifact size in bytes (200 KB)
const MAX_ARTIFACT_BYTES: usize = 200 * 1024;

/// The seven artifact kinds, in their fixed generation and persistence order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    ExecutiveProposal,
    TechnicalDocument,
    Template,
    Activities,
    Costs,
    CalculatorGuide,
    Architecture,
}

/// Fixed iteration order for generation and persistence.
pub const ARTIFACT_ORDER: [ArtifactKind; 7] = [
    ArtifactKind::ExecutiveProposal,
    ArtifactKind::TechnicalDocument,
    ArtifactKind::Template,
    ArtifactKind::Activities,
    ArtifactKind::Costs,
    ArtifactKind::CalculatorGuide,
    ArtifactKind::Architecture,
];

impl ArtifactKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactKind::ExecutiveProposal => "executive_proposal",
            ArtifactKind::TechnicalDocument => "technical_document",
            ArtifactKind::Template => "template",
            ArtifactKind::Activities => "activities",
            ArtifactKind::Costs => "costs",
            ArtifactKind::CalculatorGuide => "calculator_guide",
            ArtifactKind::Architecture => "architecture",
        }
    }

    /// File stem inside the per-project prefix.
    fn file_stem(&self) -> &'static str {
        match self {
            ArtifactKind::ExecutiveProposal => "propuesta-ejecutiva",
            ArtifactKind::TechnicalDocument => "documento-tecnico",
            ArtifactKind::Template => "cloudformation",
            ArtifactKind::Activities => "actividades",
            ArtifactKind::Costs => "costos",
            ArtifactKind::CalculatorGuide => "guia-calculadora",
            ArtifactKind::Architecture => "arquitectura",
        }
    }

    fn extension(&self) -> &'static str {
        match self {
            ArtifactKind::Template => "yaml",
            ArtifactKind::Activities | ArtifactKind::Costs => "csv",
            _ => "txt",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ArtifactKind::Template => "application/yaml",
            ArtifactKind::Activities | ArtifactKind::Costs => "text/csv",
            _ => "text/plain",
        }
    }

    /// `<stem>-<svc>.<ext>`, where `<svc>` is the primary service
    /// lowercased with spaces replaced by dashes.
    pub fn filename(&self, primary_service: &str) -> String {
        let svc = primary_service.to_lowercase().replace(' ', "-");
        format!("{}-{}.{}", self.file_stem(), svc, self.extension())
    }
}

/// A single generated artifact, ready to persist
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    pub kind: ArtifactKind,
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

impl Artifact {
    pub fn size_bytes(&self) -> usize {
        self.bytes.len()
    }
}

/// Run one generator and seal the result: fold to ASCII, cap the size,
/// fix the filename.
fn seal(kind: ArtifactKind, descriptor: &ProjectDescriptor, content: String) -> Artifact {
    let mut folded = ascii::fold_to_ascii(&content);
    // Folded text is pure ASCII, so the byte cap never splits a character.
    folded.truncate(MAX_ARTIFACT_BYTES);

    Artifact {
        kind,
        filename: kind.filename(&descriptor.primary_service),
        content_type: kind.content_type(),
        bytes: folded.into_bytes(),
    }
}

/// Generate one artifact of the given kind.
pub fn generate(kind: ArtifactKind, descriptor: &ProjectDescriptor, reply: &str) -> Artifact {
    let content = match kind {
        ArtifactKind::ExecutiveProposal => text::executive_proposal(descriptor, reply),
        ArtifactKind::TechnicalDocument => text::technical_document(descriptor, reply),
        ArtifactKind::Template => template::template(descriptor, reply),
        ArtifactKind::Activities => sheets::activities(descriptor, reply),
        ArtifactKind::Costs => sheets::costs(descriptor, reply),
        ArtifactKind::CalculatorGuide => text::calculator_guide(descriptor, reply),
        ArtifactKind::Architecture => text::architecture(descriptor, reply),
    };
    seal(kind, descriptor, content)
}

/// Generate the full artifact set in the fixed order.
pub fn generate_all(descriptor: &ProjectDescriptor, reply: &str) -> Vec<Artifact> {
    ARTIFACT_ORDER
        .iter()
        .map(|kind| generate(*kind, descriptor, reply))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::Extractor;
    use crate::transcript::{Transcript, Turn};

    fn descriptor() -> ProjectDescriptor {
        Extractor::new().unwrap().extract(
            &Transcript::new(vec![
                Turn::user("InventorySystem"),
                Turn::user("quick service on ec2, t3.large"),
            ]),
            "",
            "pid-1",
            "user-1",
        )
    }

    #[test]
    fn test_generates_all_seven_kinds() {
        let artifacts = generate_all(&descriptor(), "A fine reply about the EC2 setup.");
        assert_eq!(artifacts.len(), 7);
        let kinds: Vec<ArtifactKind> = artifacts.iter().map(|a| a.kind).collect();
        assert_eq!(kinds, ARTIFACT_ORDER.to_vec());
    }

    #[test]
    fn test_filenames_follow_layout() {
        let artifacts = generate_all(&descriptor(), "reply");
        let names: Vec<&str> = artifacts.iter().map(|a| a.filename.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "propuesta-ejecutiva-ec2.txt",
                "documento-tecnico-ec2.txt",
                "cloudformation-ec2.yaml",
                "actividades-ec2.csv",
                "costos-ec2.csv",
                "guia-calculadora-ec2.txt",
                "arquitectura-ec2.txt",
            ]
        );
    }

    #[test]
    fn test_filename_dashes_spaces() {
        assert_eq!(
            ArtifactKind::Template.filename("Amazon Aurora"),
            "cloudformation-amazon-aurora.yaml"
        );
    }

    #[test]
    fn test_every_artifact_is_ascii() {
        let artifacts = generate_all(&descriptor(), "Configuración de EC2 — diseño señalado");
        for artifact in artifacts {
            assert!(artifact.bytes.iter().all(u8::is_ascii), "{}", artifact.filename);
        }
    }

    #[test]
    fn test_every_artifact_names_the_service() {
        let artifacts = generate_all(&descriptor(), "Short reply mentioning ec2 only.");
        for artifact in artifacts {
            let body = String::from_utf8(artifact.bytes).unwrap().to_lowercase();
            assert!(body.contains("ec2"), "{} lacks the service", artifact.filename);
        }
    }

    #[test]
    fn test_size_cap() {
        let huge = "architecture ".repeat(40_000);
        let artifacts = generate_all(&descriptor(), &huge);
        for artifact in artifacts {
            assert!(artifact.size_bytes() <= 200 * 1024);
        }
    }

    #[test]
    fn test_generation_is_deterministic() {
        let d = descriptor();
        let a = generate_all(&d, "same reply");
        let b = generate_all(&d, "same reply");
        assert_eq!(a, b);
    }

    #[test]
    fn test_content_types() {
        assert_eq!(ArtifactKind::Template.content_type(), "application/yaml");
        assert_eq!(ArtifactKind::Costs.content_type(), "text/csv");
        assert_eq!(ArtifactKind::Architecture.content_type(), "text/plain");
    }
}

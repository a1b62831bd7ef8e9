//! Property tests for the extraction, readiness, and generation layers.

use proptest::prelude::*;

use archway_engine::artifacts::generate_all;
use archway_engine::extract::Extractor;
use archway_engine::readiness::ReadinessEvaluator;
use archway_engine::transcript::{Transcript, Turn};

fn transcript_from(texts: &[String]) -> Transcript {
    let turns = texts
        .iter()
        .enumerate()
        .map(|(i, text)| {
            if i % 2 == 0 {
                Turn::user(text.clone())
            } else {
                Turn::assistant(text.clone())
            }
        })
        .collect();
    Transcript::new(turns)
}

proptest! {
    // Extraction is a pure function: identical inputs, identical outputs.
    #[test]
    fn extraction_is_deterministic(
        texts in proptest::collection::vec(".{0,80}", 0..8),
        reply in ".{0,200}",
    ) {
        let extractor = Extractor::new().unwrap();
        let transcript = transcript_from(&texts);
        let a = extractor.extract(&transcript, &reply, "pid", "uid");
        let b = extractor.extract(&transcript, &reply, "pid", "uid");
        prop_assert_eq!(a, b);
    }

    // The descriptor is always fully populated, with capped fields.
    #[test]
    fn descriptor_is_always_populated(
        texts in proptest::collection::vec(".{0,120}", 0..8),
        reply in ".{0,300}",
    ) {
        let extractor = Extractor::new().unwrap();
        let descriptor = extractor.extract(&transcript_from(&texts), &reply, "pid", "uid");
        prop_assert!(!descriptor.primary_service.is_empty());
        prop_assert!(!descriptor.name.is_empty());
        prop_assert!(!descriptor.description.is_empty());
        prop_assert!(!descriptor.objective.is_empty());
        prop_assert!(descriptor.description.chars().count() <= 200);
        prop_assert!(descriptor.objective.chars().count() <= 200);
    }

    // Appending a turn never lowers the readiness score.
    #[test]
    fn readiness_is_monotone_under_append(
        texts in proptest::collection::vec(".{0,80}", 0..8),
        appended in ".{0,80}",
    ) {
        let evaluator = ReadinessEvaluator::new();
        let before = evaluator.evaluate(&transcript_from(&texts));

        let mut extended = transcript_from(&texts).turns().to_vec();
        extended.push(Turn::user(appended));
        let after = evaluator.evaluate(&Transcript::new(extended));

        prop_assert!(after.score >= before.score);
    }

    // Readiness evaluation is deterministic.
    #[test]
    fn readiness_is_deterministic(
        texts in proptest::collection::vec(".{0,80}", 0..8),
    ) {
        let evaluator = ReadinessEvaluator::new();
        let transcript = transcript_from(&texts);
        prop_assert_eq!(evaluator.evaluate(&transcript), evaluator.evaluate(&transcript));
    }

    // Every generated artifact byte is ASCII, whatever the model wrote.
    #[test]
    fn artifacts_are_always_ascii(
        texts in proptest::collection::vec(".{0,80}", 1..6),
        reply in ".{0,400}",
    ) {
        let extractor = Extractor::new().unwrap();
        let descriptor = extractor.extract(&transcript_from(&texts), &reply, "pid", "uid");
        for artifact in generate_all(&descriptor, &reply) {
            prop_assert!(artifact.bytes.iter().all(u8::is_ascii), "{}", artifact.filename);
        }
    }

    // Filenames are stable functions of the primary service.
    #[test]
    fn artifact_filenames_are_stable(
        texts in proptest::collection::vec(".{0,80}", 1..6),
        reply in ".{0,200}",
    ) {
        let extractor = Extractor::new().unwrap();
        let descriptor = extractor.extract(&transcript_from(&texts), &reply, "pid", "uid");
        let first = generate_all(&descriptor, &reply);
        let second = generate_all(&descriptor, &reply);
        let names = |set: &[archway_engine::artifacts::Artifact]| {
            set.iter().map(|a| a.filename.clone()).collect::<Vec<_>>()
        };
        prop_assert_eq!(names(&first), names(&second));
        for name in names(&first) {
            let svc = descriptor.primary_service.to_lowercase().replace(' ', "-");
            prop_assert!(name.contains(&svc));
        }
    }
}

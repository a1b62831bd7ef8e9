//! Master prompt and LLM input assembly
//!
//! The master prompt is a fixed configuration constant prepended as a
//! system turn to every completion call. Assembly never truncates; an
//! oversized conversation fails at the gateway and surfaces as a model
//! error.

use crate::transcript::{Transcript, Turn};

/// Fixed system prompt encoding the interview rules.
pub const MASTER_PROMPT: &str = "\
You are an AWS solutions architect conducting a structured discovery interview. \
Your job is to collect, one question at a time, the information needed to design \
and quote an AWS solution for the user.

Rules:
- Ask exactly one question per reply. Never stack questions.
- First establish whether the engagement is a quick service (a single named AWS \
service such as EC2, RDS, S3, SES, VPN, ELB, VPC, CloudFront, SSO or backup) or \
an integral solution (migration, new application, modernization, analytics, \
security, ML, IoT, data lake, networking, DRP, VDI or integration).
- For a quick service: collect the exact service parameters (instance type, \
sizes, region, network, access) before anything else.
- For an integral solution: collect the business problem, the current state, \
the expected scale, and the constraints.
- Keep replies short and concrete. Do not summarize what you already know \
unless asked.
- When drafting any document, template, table or diagram content, use plain \
ASCII only: never emit accented characters or any other diacritics.";

/// Prepend the master prompt to the conversation for the LLM call.
///
/// The transcript is passed through unmodified and untruncated; the
/// first message handed to the model is always the master prompt.
pub fn assemble(transcript: &Transcript) -> Vec<Turn> {
    let mut messages = Vec::with_capacity(transcript.len() + 1);
    messages.push(Turn::system(MASTER_PROMPT));
    messages.extend(transcript.turns().iter().cloned());
    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::Role;

    #[test]
    fn test_master_prompt_is_first() {
        let transcript = Transcript::new(vec![Turn::user("hello")]);
        let messages = assemble(&transcript);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[0].content, MASTER_PROMPT);
        assert_eq!(messages[1].content, "hello");
    }

    #[test]
    fn test_assemble_never_truncates() {
        let turns: Vec<Turn> = (0..50).map(|i| Turn::user(format!("turn {}", i))).collect();
        let transcript = Transcript::new(turns);
        assert_eq!(assemble(&transcript).len(), 51);
    }

    #[test]
    fn test_master_prompt_is_ascii() {
        assert!(MASTER_PROMPT.is_ascii());
    }
}

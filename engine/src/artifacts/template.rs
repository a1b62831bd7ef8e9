//! Infrastructure template generator
//!
//! Extracts the first contiguous template block from the reply, or
//! emits a minimal valid template for the primary service.

use crate::extract::ProjectDescriptor;

/// Lines that mark the start of a template block in the reply.
const BLOCK_MARKERS: &[&str] = &["AWSTemplateFormatVersion", "Resources:"];

/// Infrastructure template: first block in the reply starting at a
/// marker line, trimmed at a closing code fence; otherwise a minimal
/// deterministic template.
pub fn template(descriptor: &ProjectDescriptor, reply: &str) -> String {
    if let Some(block) = extract_block(reply) {
        return block;
    }
    template_fallback(descriptor)
}

/// Collect lines from the first marker line until a closing code fence
/// or the end of the reply. Trailing blank lines are dropped.
fn extract_block(reply: &str) -> Option<String> {
    let lines: Vec<&str> = reply.lines().collect();
    let start = lines
        .iter()
        .position(|line| BLOCK_MARKERS.iter().any(|m| line.contains(m)))?;

    let mut block: Vec<&str> = Vec::new();
    for line in lines[start..].iter().copied() {
        if line.trim_start().starts_with("```") {
            break;
        }
        block.push(line);
    }
    while block.last().is_some_and(|l| l.trim().is_empty()) {
        block.pop();
    }
    if block.is_empty() {
        return None;
    }
    let mut out = block.join("\n");
    out.push('\n');
    Some(out)
}

fn template_fallback(descriptor: &ProjectDescriptor) -> String {
    let svc = &descriptor.primary_service;
    format!(
        "AWSTemplateFormatVersion: '2010-09-09'\n\
         Description: Baseline deployment template for the {svc} solution\n\
         Parameters:\n\
         \x20 Environment:\n\
         \x20   Type: String\n\
         \x20   Default: dev\n\
         \x20   AllowedValues:\n\
         \x20     - dev\n\
         \x20     - prod\n\
         Resources: {{}}\n\
         Outputs:\n\
         \x20 PrimaryService:\n\
         \x20   Description: Central service of this deployment\n\
         \x20   Value: {svc}\n",
        svc = svc,
    )
}

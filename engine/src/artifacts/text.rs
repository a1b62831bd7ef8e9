//! Plain-text artifact generators
//!
//! Proposal, technical document, calculator guide, and architecture
//! description. Each generator scans the reply for lines already shaped
//! for its document and otherwise emits a deterministic fallback that
//! names the primary service prominently.

use crate::extract::ProjectDescriptor;

/// Executive proposal: the assistant's reply verbatim.
///
/// The reply is always available when generation runs, so this
/// generator has no fallback branch.
pub fn executive_proposal(_descriptor: &ProjectDescriptor, reply: &str) -> String {
    reply.to_string()
}

/// Technical document: reply lines that talk about architecture,
/// configuration, implementation, or the primary service.
pub fn technical_document(descriptor: &ProjectDescriptor, reply: &str) -> String {
    let service_lower = descriptor.primary_service.to_lowercase();
    let cues = [
        "architecture",
        "technical",
        "configuration",
        "implementation",
        service_lower.as_str(),
    ];

    let matched: Vec<&str> = reply
        .lines()
        .filter(|line| {
            let lower = line.to_lowercase();
            cues.iter().any(|cue| lower.contains(cue))
        })
        .collect();

    if matched.is_empty() {
        return technical_fallback(descriptor);
    }

    let mut doc = format!(
        "TECHNICAL DOCUMENT - {}\nPrimary service: {}\n\n",
        descriptor.name, descriptor.primary_service
    );
    doc.push_str(&matched.join("\n"));
    doc.push('\n');
    doc
}

fn technical_fallback(descriptor: &ProjectDescriptor) -> String {
    let svc = &descriptor.primary_service;
    format!(
        "TECHNICAL DOCUMENT - {name}\n\
         \n\
         1. Central component: {svc}\n\
         {svc} carries the core workload of this solution.\n\
         \n\
         2. Integration\n\
         Surrounding services connect to {svc} through managed AWS integration points.\n\
         \n\
         3. Security\n\
         Access to {svc} is restricted with IAM roles and least-privilege policies.\n\
         \n\
         4. Monitoring\n\
         {svc} metrics and logs are collected for operational visibility.\n",
        name = descriptor.name,
        svc = svc,
    )
}

/// Pricing-calculator guide: reply lines mentioning the calculator,
/// pricing, or steps; otherwise a fixed six-step guide.
pub fn calculator_guide(descriptor: &ProjectDescriptor, reply: &str) -> String {
    let cues = ["calculator", "pricing", "step"];
    let matched: Vec<&str> = reply
        .lines()
        .filter(|line| {
            let lower = line.to_lowercase();
            cues.iter().any(|cue| lower.contains(cue))
        })
        .collect();

    if matched.is_empty() {
        return calculator_fallback(descriptor);
    }

    let mut guide = format!(
        "PRICING CALCULATOR GUIDE - {}\n\n",
        descriptor.primary_service
    );
    guide.push_str(&matched.join("\n"));
    guide.push('\n');
    guide
}

fn calculator_fallback(descriptor: &ProjectDescriptor) -> String {
    let svc = &descriptor.primary_service;
    format!(
        "PRICING CALCULATOR GUIDE - {svc}\n\
         \n\
         Step 1. Open https://calculator.aws in your browser.\n\
         Step 2. Choose 'Create estimate' and search for {svc}.\n\
         Step 3. Add {svc} to the estimate and select your region.\n\
         Step 4. Enter the {svc} parameters discussed in the interview \
         (sizing, storage, expected usage).\n\
         Step 5. Add any supporting services to the same estimate.\n\
         Step 6. Save the estimate and export it to share with your team.\n",
        svc = svc,
    )
}

/// Architecture description: reply lines mentioning the diagram or
/// architecture; otherwise a fixed data-flow description.
pub fn architecture(descriptor: &ProjectDescriptor, reply: &str) -> String {
    let cues = ["diagram", "architecture", "svg"];
    let matched: Vec<&str> = reply
        .lines()
        .filter(|line| {
            let lower = line.to_lowercase();
            cues.iter().any(|cue| lower.contains(cue))
        })
        .collect();

    if matched.is_empty() {
        return architecture_fallback(descriptor);
    }

    let mut doc = format!(
        "ARCHITECTURE - {}\nPrimary service: {}\n\n",
        descriptor.name, descriptor.primary_service
    );
    doc.push_str(&matched.join("\n"));
    doc.push('\n');
    doc
}

fn architecture_fallback(descriptor: &ProjectDescriptor) -> String {
    let svc = &descriptor.primary_service;
    format!(
        "ARCHITECTURE - {name}\n\
         \n\
         Central component: {svc}\n\
         \n\
         Data flow:\n\
         Users reach the solution through its public entry point. Requests are \
         routed to {svc}, which performs the core processing for this project. \
         {svc} exchanges data with its supporting services over private \
         networking, and results are returned to the user through the same \
         path. Operational telemetry from {svc} flows to the monitoring layer.\n",
        name = descriptor.name,
        svc = svc,
    )
}

//! CSV artifact generators
//!
//! Activities plan and cost sheet. Comma-separated with a header row;
//! fields are sanitized so quoting is never needed (commas and line
//! breaks inside a field are dropped before the row is written).

use crate::extract::ProjectDescriptor;

/// Maximum extracted activity rows.
const MAX_ACTIVITY_ROWS: usize = 10;

/// Cues marking a reply line as an activity.
const ACTIVITY_CUES: &[&str] = &["phase", "step", "activity", "implement", "configure"];

/// Cues marking a reply line as a cost row (besides a literal `$`).
const COST_CUES: &[&str] = &["cost", "price", "monthly", "usd", "costo", "precio", "mensual"];

/// Drop characters that would require CSV quoting.
fn sanitize_field(field: &str) -> String {
    field
        .chars()
        .filter(|c| *c != ',' && *c != '\n' && *c != '\r' && *c != '"')
        .collect::<String>()
        .trim()
        .to_string()
}

/// Activities plan CSV: reply lines matching an activity cue become
/// rows, capped at ten; otherwise five deterministic setup rows.
pub fn activities(descriptor: &ProjectDescriptor, reply: &str) -> String {
    let svc = &descriptor.primary_service;
    let mut rows: Vec<(String, String, String)> = reply
        .lines()
        .filter(|line| {
            let lower = line.to_lowercase();
            ACTIVITY_CUES.iter().any(|cue| lower.contains(cue))
        })
        .take(MAX_ACTIVITY_ROWS)
        .map(|line| (svc.clone(), sanitize_field(line), "2 days".to_string()))
        .collect();

    if rows.is_empty() {
        rows = vec![
            (svc.clone(), format!("Set up the {} environment", svc), "3 days".to_string()),
            (svc.clone(), format!("Integrate {} with supporting services", svc), "2 days".to_string()),
            (svc.clone(), format!("Apply security baseline to {}", svc), "2 days".to_string()),
            (svc.clone(), format!("Test the {} deployment", svc), "2 days".to_string()),
            (svc.clone(), format!("Deploy {} to production", svc), "3 days".to_string()),
        ];
    }

    let mut csv = String::from("Service,Activity,Duration\n");
    for (service, activity, duration) in rows {
        csv.push_str(&format!("{},{},{}\n", service, activity, duration));
    }
    csv
}

/// Cost sheet CSV: reply lines carrying a `$` or a cost cue become
/// rows; otherwise a fixed three-row estimate.
pub fn costs(descriptor: &ProjectDescriptor, reply: &str) -> String {
    let svc = &descriptor.primary_service;
    let mut rows: Vec<(String, String, String)> = reply
        .lines()
        .filter(|line| {
            let lower = line.to_lowercase();
            line.contains('$') || COST_CUES.iter().any(|cue| lower.contains(cue))
        })
        .map(|line| {
            (
                svc.clone(),
                sanitize_field(line),
                first_dollar_token(line).unwrap_or_else(|| "see concept".to_string()),
            )
        })
        .collect();

    if rows.is_empty() {
        rows = vec![
            (svc.clone(), format!("{} base configuration", svc), "$100/mo".to_string()),
            (svc.clone(), format!("Supporting services for {}", svc), "$50/mo".to_string()),
            (svc.clone(), format!("Total estimated for {}", svc), "$150/mo".to_string()),
        ];
    }

    let mut csv = String::from("Service,Concept,Monthly\n");
    for (service, concept, monthly) in rows {
        csv.push_str(&format!("{},{},{}\n", service, concept, monthly));
    }
    csv
}

/// First `$`-prefixed token in a line, commas stripped.
fn first_dollar_token(line: &str) -> Option<String> {
    line.split_whitespace()
        .find(|token| token.starts_with('$'))
        .map(sanitize_field)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::Extractor;
    use crate::transcript::{Transcript, Turn};

    fn descriptor() -> ProjectDescriptor {
        Extractor::new().unwrap().extract(
            &Transcript::new(vec![Turn::user("ec2 box")]),
            "",
            "pid",
            "uid",
        )
    }

    #[test]
    fn test_activities_fallback_has_five_rows() {
        let csv = activities(&descriptor(), "nothing actionable");
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "Service,Activity,Duration");
        assert_eq!(lines.len(), 6);
        assert!(lines[1].contains("Set up the EC2 environment"));
        assert!(csv.lines().skip(1).all(|l| l.starts_with("EC2,")));
    }

    #[test]
    fn test_activities_extracts_cue_lines() {
        let reply = "Phase 1: land the network\nsome chatter\nConfigure the instances next";
        let csv = activities(&descriptor(), reply);
        assert!(csv.contains("Phase 1: land the network"));
        assert!(csv.contains("Configure the instances next"));
        assert!(!csv.contains("some chatter"));
    }

    #[test]
    fn test_activities_row_cap() {
        let reply = (0..20)
            .map(|i| format!("Step {}: more work", i))
            .collect::<Vec<_>>()
            .join("\n");
        let csv = activities(&descriptor(), &reply);
        // Header plus at most ten rows.
        assert_eq!(csv.lines().count(), 1 + 10);
    }

    #[test]
    fn test_costs_fallback_totals() {
        let csv = costs(&descriptor(), "no numbers at all");
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "Service,Concept,Monthly");
        assert_eq!(lines.len(), 4);
        assert!(csv.contains("$100/mo"));
        assert!(csv.contains("$50/mo"));
        assert!(csv.contains("$150/mo"));
        assert!(csv.lines().skip(1).all(|l| l.starts_with("EC2,")));
    }

    #[test]
    fn test_costs_extracts_dollar_lines() {
        let reply = "The instance runs at $62.50 monthly\nunrelated line";
        let csv = costs(&descriptor(), reply);
        assert!(csv.contains("$62.50"));
        assert!(!csv.contains("unrelated line"));
    }

    #[test]
    fn test_fields_never_need_quoting() {
        let reply = "Step 1: first, second, and \"third\"\ncost: $1,000 per month";
        let for_activities = activities(&descriptor(), reply);
        let for_costs = costs(&descriptor(), reply);
        for csv in [for_activities, for_costs] {
            for line in csv.lines().skip(1) {
                assert_eq!(line.matches(',').count(), 2, "exactly two separators: {}", line);
                assert!(!line.contains('"'));
            }
        }
    }
}

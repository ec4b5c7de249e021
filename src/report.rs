//! Plain-text rendering of query outcomes.

use serde_json::Value;

use crate::client::{QueryKind, RunAllReport};
use crate::outcome::OutcomeRecord;
use crate::protocol::{Locations, SignatureReply};

/// Line announcing a query before it is sent.
pub fn render_banner(
    kind: QueryKind,
    file: &str,
    line: u32,
    character: u32,
    include_declaration: Option<bool>,
) -> String {
    let mut banner = format!("Testing {}: {}:{}:{}", kind.name(), file, line, character);
    if let Some(include) = include_declaration {
        banner.push_str(&format!(" (include declaration: {})", include));
    }
    banner
}

pub fn render_locations(kind: QueryKind, outcome: &OutcomeRecord<Locations>) -> String {
    let mut lines: Vec<String> = Vec::new();
    let Some(data) = succeeded(kind, outcome, &mut lines) else {
        return lines.join("\n");
    };

    let noun = match kind {
        QueryKind::References => "references",
        _ => "definitions",
    };
    let items = data.items();
    if items.is_empty() {
        lines.push(format!("No {} found", noun));
    } else {
        lines.push(format!("Found {} {}:", items.len(), noun));
        for (i, loc) in items.iter().enumerate() {
            lines.push(format!("  {}. {}", i + 1, loc.uri.as_deref().unwrap_or("N/A")));
            lines.push(format!("     range: {}", compact(loc.range.as_ref())));
        }
    }
    lines.join("\n")
}

pub fn render_signature(outcome: &OutcomeRecord<SignatureReply>) -> String {
    let mut lines: Vec<String> = Vec::new();
    let Some(data) = succeeded(QueryKind::Signature, outcome, &mut lines) else {
        return lines.join("\n");
    };

    let signatures = data.signatures();
    if signatures.is_empty() {
        lines.push("No signature information".to_string());
    } else {
        lines.push(format!("Found {} signatures:", signatures.len()));
        for (i, sig) in signatures.iter().enumerate() {
            lines.push(format!("  {}. {}", i + 1, sig.label.as_deref().unwrap_or("N/A")));
            if let Some(doc) = sig.documentation_text() {
                lines.push(format!("     documentation: {}", doc));
            }
            if sig.parameter_count() > 0 {
                lines.push(format!("     parameters: {}", sig.parameter_count()));
            }
        }
    }
    lines.join("\n")
}

pub fn render_summary(report: &RunAllReport) -> String {
    let mut lines = vec![
        "Summary:".to_string(),
        format!("Succeeded: {}/{}", report.success_count(), report.total()),
    ];
    for (kind, ok) in report.entries() {
        let mark = if ok { "ok" } else { "FAILED" };
        lines.push(format!("  {}: {}", kind.name(), mark));
    }
    lines.join("\n")
}

/// Pushes the status line and hands back the data on success.
fn succeeded<'a, T>(
    kind: QueryKind,
    outcome: &'a OutcomeRecord<T>,
    lines: &mut Vec<String>,
) -> Option<&'a T> {
    if !outcome.is_success() {
        lines.push(format!(
            "{} failed: {}",
            kind.name(),
            outcome.error.as_deref().unwrap_or("unknown error")
        ));
        return None;
    }
    match outcome.status_code {
        Some(code) => lines.push(format!("{} succeeded (status {})", kind.name(), code)),
        None => lines.push(format!("{} succeeded", kind.name())),
    }
    outcome.data.as_ref()
}

fn compact(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "{}".to_string(),
        Some(other) => other.to_string(),
    }
}

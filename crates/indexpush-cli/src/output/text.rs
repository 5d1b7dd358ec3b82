//! Human-readable rendering of reports and the status probe.

use colored::Colorize;
use indexpush_core::{NotificationReport, Outcome, StatusReport};
use std::fmt::Write;

pub fn render_report(report: &NotificationReport) -> String {
    let mut out = String::new();

    if let Some(failure) = &report.failure {
        let _ = writeln!(out, "{} {}", "✗".red(), report.message);
        let _ = writeln!(out, "  reason: {}", failure.kind);
        return out;
    }

    let mark = if report.succeeded {
        "✓".green()
    } else {
        "✗".red()
    };
    let _ = writeln!(out, "{mark} {}", report.message);
    let _ = writeln!(
        out,
        "  {} URLs in {} batch(es)",
        report.submitted_urls.len(),
        report.batches
    );

    for result in &report.results {
        let detail = match (result.outcome, result.status, &result.error) {
            (Outcome::Fulfilled, Some(status), _) => format!("HTTP {status}"),
            (Outcome::Rejected, _, Some(error)) => error.clone(),
            _ => String::new(),
        };
        let state = if result.succeeded {
            "ok".green()
        } else {
            "failed".red()
        };
        let _ = writeln!(out, "  {:<12} {state:<6} {}", result.target, detail.dimmed());
    }
    out
}

pub fn render_status(status: &StatusReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<14}{}", "key:".bold(), status.key);
    let _ = writeln!(out, "{:<14}{}", "key location:".bold(), status.key_location);
    let _ = writeln!(out, "{:<14}{}", "endpoint:".bold(), status.endpoint);
    let _ = writeln!(out, "{:<14}{}", "targets:".bold(), status.targets.join(", "));
    out
}

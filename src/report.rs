//! Output formatting for diff and dead-code results.
//!
//! Two formats:
//! - JSON: the serde shape of the result, pretty-printed
//! - Pretty: colored terminal text
//!
//! Renderers return strings; printing is left to the caller. Coloring
//! follows `colored::control`, so callers can force it off for pipes.

use colored::*;
use std::fmt::Write;

use crate::deadcode::DeadCodeReport;
use crate::diff::{ChangeKind, DiffResult, SemanticChange};

// =============================================================================
// JSON Format
// =============================================================================

pub fn diff_to_json(result: &DiffResult) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}

pub fn dead_code_to_json(report: &DeadCodeReport) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

// =============================================================================
// Pretty Format
// =============================================================================

/// Colored listing of changes followed by a per-kind tally.
pub fn render_diff(result: &DiffResult) -> String {
    let mut out = String::new();

    if result.is_empty() {
        let _ = writeln!(out, "  {}", "✓ No semantic changes".green());
        return out;
    }

    for change in &result.changes {
        let _ = writeln!(out, "  {}", change_line(change));
    }

    let tally: Vec<String> = result
        .summary
        .iter()
        .map(|(kind, count)| format!("{} {}", count, kind))
        .collect();
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "  {} {}",
        format!("{} changes:", result.changes.len()).bold(),
        tally.join(", ")
    );
    out
}

fn change_line(change: &SemanticChange) -> String {
    let marker = match change.kind {
        ChangeKind::Add => "+".green().bold(),
        ChangeKind::Remove => "-".red().bold(),
        ChangeKind::Rename => "→".cyan().bold(),
        ChangeKind::Modify => "~".yellow().bold(),
        ChangeKind::Move | ChangeKind::Reorder => "↕".blue().bold(),
    };

    let location = match (change.old_location, change.new_location) {
        (Some(old), Some(new)) if old != new => format!("{} → {}", old, new),
        (_, Some(loc)) | (Some(loc), None) => loc.to_string(),
        (None, None) => String::new(),
    };

    let subject = match (change.kind, &change.old_identity, &change.new_identity) {
        (ChangeKind::Rename, Some(old), Some(new)) => format!("{} → {}", old, new),
        _ => change.path.clone(),
    };

    format!(
        "{} {:<8} {} {} {}",
        marker,
        change.kind.to_string(),
        subject.bold(),
        change.node_type.dimmed(),
        location.dimmed()
    )
    .trim_end()
    .to_string()
}

/// Colored listing of unused definitions, optionally with the excluded ones.
pub fn render_dead_code(report: &DeadCodeReport, show_excluded: bool) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "  {} {} files, {} definitions, {} called names",
        "Scanned:".dimmed(),
        report.files,
        report.definitions,
        report.call_sites
    );
    let _ = writeln!(out);

    if report.is_clean() {
        let _ = writeln!(out, "  {}", "✓ No unused definitions".green());
    } else {
        let _ = writeln!(
            out,
            "  {}",
            format!("✗ {} unused definitions", report.unused.len()).red()
        );
        for def in &report.unused {
            let file = def.source_file.as_deref().unwrap_or("<memory>");
            let _ = writeln!(
                out,
                "    {}:{}  {} {}",
                file,
                def.start_line,
                def.identifier.yellow().bold(),
                format!("({})", def.node_type).dimmed()
            );
        }
    }

    if !report.excluded.is_empty() {
        let _ = writeln!(out);
        if show_excluded {
            let _ = writeln!(out, "  {}", "Excluded:".dimmed());
            for excluded in &report.excluded {
                let def = &excluded.definition;
                let file = def.source_file.as_deref().unwrap_or("<memory>");
                let _ = writeln!(
                    out,
                    "    {}:{}  {} {}",
                    file,
                    def.start_line,
                    def.identifier,
                    format!("[{}]", def.reason).dimmed()
                );
            }
        } else {
            let _ = writeln!(
                out,
                "  {}",
                format!("({} excluded as likely false positives)", report.excluded.len()).dimmed()
            );
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deadcode::{ExcludedDefinition, UnusedDefinition};
    use crate::extract::StructuredNode;

    fn node(name: &str, line: usize) -> StructuredNode {
        StructuredNode {
            node_type: "function_declaration".to_string(),
            start_line: line,
            end_line: line,
            start_column: 0,
            end_column: 20,
            text: format!("function {}() {{}}", name),
            extractions: [("identifier".to_string(), name.to_string())].into(),
            parent_node_type: None,
            children: Vec::new(),
            source_file: None,
        }
    }

    fn unused(name: &str, reason: &str) -> UnusedDefinition {
        UnusedDefinition {
            identifier: name.to_string(),
            node_type: "function_definition".to_string(),
            source_file: Some("app.py".to_string()),
            start_line: 7,
            end_line: 9,
            reason: reason.to_string(),
            parent_node_type: None,
        }
    }

    #[test]
    fn test_render_diff() {
        colored::control::set_override(false);
        let old = node("foo", 1);
        let new = node("bar", 1);
        let result = DiffResult::from_changes(vec![
            SemanticChange::added(&node("baz", 3), "baz".into(), "function baz() {}".into()),
            SemanticChange::renamed(
                &SemanticChange::removed(&old, "foo".into(), old.text.clone()),
                &SemanticChange::added(&new, "bar".into(), new.text.clone()),
            ),
        ]);

        let text = render_diff(&result);
        assert!(text.contains("+ add"));
        assert!(text.contains("baz function_declaration 3:0"));
        assert!(text.contains("foo → bar"));
        assert!(text.contains("2 changes: 1 add, 1 rename"));
    }

    #[test]
    fn test_render_empty_diff() {
        colored::control::set_override(false);
        let text = render_diff(&DiffResult::default());
        assert!(text.contains("No semantic changes"));
    }

    #[test]
    fn test_render_dead_code() {
        colored::control::set_override(false);
        let report = DeadCodeReport {
            files: 1,
            definitions: 3,
            call_sites: 1,
            unused: vec![unused("helper", "No call sites found")],
            excluded: vec![ExcludedDefinition {
                definition: unused("main", "entry point"),
            }],
        };

        let text = render_dead_code(&report, false);
        assert!(text.contains("1 files, 3 definitions, 1 called names"));
        assert!(text.contains("app.py:7  helper (function_definition)"));
        assert!(text.contains("(1 excluded as likely false positives)"));
        assert!(!text.contains("[entry point]"));

        let text = render_dead_code(&report, true);
        assert!(text.contains("app.py:7  main [entry point]"));
    }

    #[test]
    fn test_json_output() {
        let report = DeadCodeReport {
            unused: vec![unused("helper", "No call sites found")],
            ..DeadCodeReport::default()
        };
        let json: serde_json::Value =
            serde_json::from_str(&dead_code_to_json(&report).unwrap()).unwrap();
        assert_eq!(json["unused"][0]["identifier"], "helper");
        assert_eq!(json["excluded"], serde_json::json!([]));

        let diff = DiffResult::from_changes(vec![SemanticChange::added(
            &node("a", 1),
            "a".into(),
            "function a() {}".into(),
        )]);
        let json: serde_json::Value = serde_json::from_str(&diff_to_json(&diff).unwrap()).unwrap();
        assert_eq!(json["changes"][0]["type"], "add");
        assert_eq!(json["summary"]["add"], 1);
    }
}

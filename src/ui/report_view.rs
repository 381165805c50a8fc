//! Rendering of the final report block.

use crate::report::Report;

use super::progress::format_duration;
use super::theme::RigupTheme;

const RULE: &str = "──────────────────────────────────────";

/// Render a report as boxed lines, ready to print.
pub fn format_report(report: &Report, theme: &RigupTheme) -> Vec<String> {
    let b = &theme.border;
    let bar = b.apply_to("│").to_string();
    let mut lines = Vec::new();

    let section = |title: &str| {
        let fill = RULE.chars().count().saturating_sub(title.chars().count() + 1);
        format!(
            "{} {}",
            b.apply_to("├─"),
            b.apply_to(format!("{} {}", title, "─".repeat(fill)))
        )
    };

    lines.push(format!(
        "{} {}",
        b.apply_to("┌─"),
        b.apply_to(format!("Report {}", "─".repeat(RULE.chars().count() - 7)))
    ));
    lines.push(format!("{} {}", bar, theme.highlight.apply_to(&report.title)));

    let p = &report.parameters;
    for (key, value) in [
        ("Resource group", &p.resource_group),
        ("Location", &p.location),
        ("Environment", &p.environment_tag),
    ] {
        lines.push(format!(
            "{} {} {}",
            bar,
            theme.key.apply_to(format!("{:<16}", key)),
            theme.value.apply_to(value)
        ));
    }

    lines.push(section("Steps"));
    for step in &report.steps {
        lines.push(format!(
            "{} {} {:<36} {}",
            bar,
            theme.success.apply_to("✓"),
            step.label,
            theme.duration.apply_to(format_duration(step.elapsed))
        ));
    }

    if !report.facts.is_empty() {
        lines.push(section("Facts"));
        let width = report
            .facts
            .iter()
            .map(|f| f.label.chars().count())
            .max()
            .unwrap_or(0);
        for fact in &report.facts {
            lines.push(format!(
                "{} {} {}",
                bar,
                theme.key.apply_to(format!("{:<width$}", fact.label, width = width)),
                theme.value.apply_to(&fact.value)
            ));
        }
    }

    if report.has_discrepancies() {
        lines.push(section(&format!(
            "Known issues ({})",
            report.discrepancies.len()
        )));
        for (i, d) in report.discrepancies.iter().enumerate() {
            if i > 0 {
                lines.push(bar.clone());
            }
            lines.push(format!("{} {}", bar, theme.format_error(&d.title)));
            if let Some(description) = &d.description {
                lines.push(format!("{}   {}", bar, theme.dim.apply_to(description)));
            }
            lines.push(format!(
                "{}   {}: expected {}, found {}",
                bar,
                d.fact_label,
                theme.success.apply_to(&d.expected),
                theme.error.apply_to(&d.actual)
            ));
            for command in &d.remediation {
                lines.push(format!(
                    "{}   {} {}",
                    bar,
                    theme.hint.apply_to("Fix:"),
                    theme.command.apply_to(command)
                ));
            }
        }
    } else {
        lines.push(section("Known issues"));
        lines.push(format!(
            "{} {}",
            bar,
            theme.format_success("No known issues detected")
        ));
    }

    let issues = report.discrepancies.len();
    lines.push(format!("{}", b.apply_to(format!("├{}", RULE))));
    lines.push(format!(
        "{} Total: {} {} {} {} {} {} {}",
        bar,
        theme.duration.apply_to(format_duration(report.total_elapsed)),
        theme.dim.apply_to("·"),
        report.steps.len(),
        if report.steps.len() == 1 { "step" } else { "steps" },
        theme.dim.apply_to("·"),
        issues,
        if issues == 1 { "issue" } else { "issues" },
    ));
    lines.push(format!("{}", b.apply_to(format!("└{}", RULE))));

    lines
}

use crate::model::Assignment;
use crate::scheduler::HorizonResult;
use std::fmt::Write;

/// Permet de customiser le rendu d'un horizon (texte, mail, etc.).
pub trait SummaryRenderer {
    fn render(&self, result: &HorizonResult) -> String;
}

/// Résumé texte : totaux, charge par personne, détail jour par jour.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextSummary;

impl SummaryRenderer for TextSummary {
    fn render(&self, result: &HorizonResult) -> String {
        let stats = &result.summary;
        let mut out = String::new();

        let _ = writeln!(out, "=== HORIZON SUMMARY ===");
        let _ = writeln!(out, "Total assignments: {}", stats.total_assignments);
        let _ = writeln!(
            out,
            "Staffed: {}/{} ({:.1}%)",
            stats.total_assigned, stats.total_required, stats.assignment_rate
        );
        let _ = writeln!(
            out,
            "Overtime days: {}/{}",
            stats.overtime_days, stats.total_assignments
        );
        let _ = writeln!(out, "Total shortage: {} person-days", stats.total_shortage);
        let _ = writeln!(out, "Average coverage: {:.1}%", stats.average_coverage);

        let _ = writeln!(out);
        let _ = writeln!(out, "WORKLOAD BALANCE:");
        for entry in &result.workload_balance {
            let _ = writeln!(out, "  {}: {} days", entry.name, entry.workdays);
        }

        let _ = writeln!(out);
        let _ = writeln!(out, "DAILY BREAKDOWN:");
        for a in &result.assignments {
            day_line(&mut out, a);
        }
        out
    }
}

fn day_line(out: &mut String, a: &Assignment) {
    let status = if a.overtime { "OVERTIME" } else { "normal" };
    let _ = writeln!(
        out,
        "  {} ({}): {}/{} - {} [{}]",
        a.date.format("%Y-%m-%d"),
        a.day_label,
        a.assigned_count,
        a.required,
        status,
        a.selected.join(", ")
    );
    if a.shortage > 0 {
        let _ = writeln!(out, "    short by {} person(s)", a.shortage);
    }
}

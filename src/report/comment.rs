//! Markdown rendering of a report diff
//!
//! Every rendered comment starts with [`REPORT_MARKER`], an HTML comment that
//! is invisible on the merge request page and lets later runs find and replace
//! their own comments.

use super::diff::{ChangeKind, ComponentChange, RemovedComponent, ReportDiff, TotalDelta};
use crate::fmt::format_kb;
use crate::size::ComponentReport;
use std::fmt::Write;

/// Invisible marker identifying tracked comments
pub const REPORT_MARKER: &str = "<!-- component-size-report -->";

/// Body used when the reports are equivalent
pub const NO_DIFF_MESSAGE: &str = "No component size differences";

/// Footer appended to every comment
pub const DISCLAIMER: &str =
    "<sub>Please don't reply to this comment, it may be removed by CI.</sub>";

const TABLE_HEADER: &str = "|Component|Size|\n|--- |--- |\n";

/// Render the comment comparing `current` against `baseline`
///
/// ```
/// use component_size_report::report::{render, NO_DIFF_MESSAGE, REPORT_MARKER};
/// use component_size_report::size::artifact;
///
/// let report = artifact::decode("Banner 3 2 1");
/// let comment = render(&report, &report);
///
/// assert!(comment.starts_with(REPORT_MARKER));
/// assert!(comment.contains(NO_DIFF_MESSAGE));
/// assert!(!comment.contains("|Component|"));
/// ```
pub fn render(current: &ComponentReport, baseline: &ComponentReport) -> String {
    render_diff(&ReportDiff::compute(current, baseline))
}

/// Render an already computed diff
pub fn render_diff(diff: &ReportDiff<'_>) -> String {
    if diff.is_empty() {
        return format!("{REPORT_MARKER}\n{NO_DIFF_MESSAGE}\n\n{DISCLAIMER}");
    }

    let mut table = String::new();
    for change in &diff.changed {
        write_change_row(&mut table, change);
    }
    for removed in &diff.removed {
        write_removed_row(&mut table, removed);
    }

    format!("{REPORT_MARKER}\n{TABLE_HEADER}{table}\n\n{DISCLAIMER}")
}

fn write_change_row(out: &mut String, change: &ComponentChange<'_>) {
    let size = change.current;
    let total = format_kb(size.total);
    // Writing to a String cannot fail.
    let _ = match (change.kind, change.total_delta()) {
        (ChangeKind::Added, _) => writeln!(out, "|🚨 {}|{} 🚨 Added|", change.name, total),
        (_, Some(TotalDelta::Increase(kb))) => writeln!(
            out,
            "|{}|{} 💔 +{}|",
            change.name,
            total,
            format_kb(kb)
        ),
        (_, Some(TotalDelta::Decrease(kb))) => writeln!(
            out,
            "|{}|{} 💚 -{}|",
            change.name,
            total,
            format_kb(kb)
        ),
        (_, None) => writeln!(out, "|{}|{}|", change.name, total),
    };

    if size.js > 0 || size.css > 0 {
        let _ = writeln!(out, "|└─ JS|{}|", format_kb(size.js));
        if size.css > 0 {
            let _ = writeln!(out, "|└─ CSS|{}|", format_kb(size.css));
        }
    }
}

fn write_removed_row(out: &mut String, removed: &RemovedComponent<'_>) {
    let size = removed.baseline;
    let _ = writeln!(
        out,
        "|{}|{} 🗑 Removed|",
        removed.name,
        format_kb(size.total)
    );
    let _ = writeln!(out, "|└─ JS|{}|", format_kb(size.js));
    let _ = writeln!(out, "|└─ CSS|{}|", format_kb(size.css));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::size::{artifact, SizeEntry};

    fn report(entries: &[(&str, u64, u64, u64)]) -> ComponentReport {
        entries
            .iter()
            .map(|&(name, js, css, total)| (name, SizeEntry::new(js, css, total)))
            .collect()
    }

    fn table_rows(comment: &str) -> Vec<&str> {
        comment
            .lines()
            .filter(|l| l.starts_with('|'))
            .skip(2)
            .collect()
    }

    #[test]
    fn test_only_added_component_is_listed() {
        let master = report(&[("A", 1, 0, 1)]);
        let branch = report(&[("A", 1, 0, 1), ("B", 2, 0, 2)]);

        let comment = render(&branch, &master);
        assert_eq!(
            table_rows(&comment),
            vec!["|🚨 B|2Kb 🚨 Added|", "|└─ JS|2Kb|"]
        );
    }

    #[test]
    fn test_full_layout_is_stable() {
        let master = report(&[("Banner", 1, 1, 2), ("Old", 3, 0, 3)]);
        let branch = report(&[("Banner", 2, 1, 3), ("New", 1, 1, 2)]);

        let expected = "<!-- component-size-report -->\n\
                        |Component|Size|\n\
                        |--- |--- |\n\
                        |Banner|3Kb 💔 +1Kb|\n\
                        |└─ JS|2Kb|\n\
                        |└─ CSS|1Kb|\n\
                        |🚨 New|2Kb 🚨 Added|\n\
                        |└─ JS|1Kb|\n\
                        |└─ CSS|1Kb|\n\
                        |Old|3Kb 🗑 Removed|\n\
                        |└─ JS|3Kb|\n\
                        |└─ CSS|0Kb|\n\
                        \n\n\
                        <sub>Please don't reply to this comment, it may be removed by CI.</sub>";
        assert_eq!(render(&branch, &master), expected);
    }

    #[test]
    fn test_decrease_uses_distinct_marker() {
        let master = report(&[("A", 5, 0, 5)]);
        let branch = report(&[("A", 3, 0, 3)]);

        let rows = table_rows(&render(&branch, &master)).join("\n");
        assert!(rows.contains("|A|3Kb 💚 -2Kb|"));
        assert!(!rows.contains("💔"));
    }

    #[test]
    fn test_huge_legacy_baseline_shrink_is_a_decrease() {
        let master = artifact::decode("A 18446744073709551615");
        let branch = report(&[("A", 0, 0, 0)]);

        let rows = table_rows(&render(&branch, &master)).join("\n");
        assert!(rows.contains("|A|0Kb 💚 -18446744073709551615Kb|"));
        assert!(!rows.contains("💔"));
    }

    #[test]
    fn test_internal_change_has_no_delta_suffix() {
        let master = report(&[("A", 1, 1, 2)]);
        let branch = report(&[("A", 2, 0, 2)]);

        assert_eq!(
            table_rows(&render(&branch, &master)),
            vec!["|A|2Kb|", "|└─ JS|2Kb|"]
        );
    }

    #[test]
    fn test_zero_sized_component_has_no_sub_rows() {
        let branch = report(&[("Empty", 0, 0, 0)]);
        assert_eq!(
            table_rows(&render(&branch, &ComponentReport::new())),
            vec!["|🚨 Empty|0Kb 🚨 Added|"]
        );
    }

    #[test]
    fn test_css_only_component_still_lists_js() {
        let branch = report(&[("Styles", 0, 2, 2)]);
        assert_eq!(
            table_rows(&render(&branch, &ComponentReport::new())),
            vec!["|🚨 Styles|2Kb 🚨 Added|", "|└─ JS|0Kb|", "|└─ CSS|2Kb|"]
        );
    }

    #[test]
    fn test_removed_always_shows_both_sub_rows() {
        let master = report(&[("Gone", 0, 0, 0)]);
        assert_eq!(
            table_rows(&render(&ComponentReport::new(), &master)),
            vec!["|Gone|0Kb 🗑 Removed|", "|└─ JS|0Kb|", "|└─ CSS|0Kb|"]
        );
    }

    #[test]
    fn test_no_difference_short_circuit() {
        let a = report(&[("A", 1, 0, 1)]);
        assert_eq!(
            render(&a, &a),
            "<!-- component-size-report -->\nNo component size differences\n\n\
             <sub>Please don't reply to this comment, it may be removed by CI.</sub>"
        );
    }

    #[test]
    fn test_two_empty_reports_are_no_difference() {
        let empty = ComponentReport::new();
        assert!(render(&empty, &empty).contains(NO_DIFF_MESSAGE));
    }

    #[test]
    fn test_every_comment_starts_with_marker_and_ends_with_disclaimer() {
        let cases = [
            (report(&[("A", 1, 0, 1)]), report(&[])),
            (report(&[]), report(&[("A", 1, 0, 1)])),
            (report(&[("A", 1, 0, 1)]), report(&[("A", 1, 0, 1)])),
        ];
        for (current, baseline) in &cases {
            let comment = render(current, baseline);
            assert!(comment.starts_with(REPORT_MARKER));
            assert!(comment.ends_with(DISCLAIMER));
        }
    }
}

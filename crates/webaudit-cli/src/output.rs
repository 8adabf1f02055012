//! Terminal output formatting.

use colored::{ColoredString, Colorize};
use webaudit_core::AnalysisReport;

/// Print a report as a colored summary.
pub fn print_report(report: &AnalysisReport) {
    println!();
    println!("{} {}", report.url.cyan().bold(), format!("({})", report.final_url).dimmed());
    println!("{}", report.description);
    println!();

    println!("{}", "Scores".bold());
    println!("  {:<12} {}", "Performance", score(report.scores.performance));
    println!("  {:<12} {}", "SEO", score(report.scores.seo));
    println!("  {:<12} {}", "Security", score(report.scores.security));

    print_list("Critical issues", &report.issues.critical, |s| s.red());
    print_list("Security issues", &report.security_issues, |s| s.yellow());
    print_list("Recommendations", &report.recommendations, |s| s.normal());
    println!();
}

fn score(value: u32) -> ColoredString {
    let text = format!("{value:>3}");
    match value {
        90..=100 => text.green(),
        50..=89 => text.yellow(),
        _ => text.red(),
    }
}

fn print_list(heading: &str, items: &[String], paint: impl Fn(&str) -> ColoredString) {
    println!();
    println!("{}", heading.bold());
    if items.is_empty() {
        println!("  {}", "none".dimmed());
        return;
    }
    for item in items {
        println!("  - {}", paint(item));
    }
}

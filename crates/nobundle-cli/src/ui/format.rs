//! Duration formatting and the build summary.

use std::time::Duration;

use console::Term;
use nobundle::BuildReport;
use owo_colors::OwoColorize;

use super::colors_enabled;

/// Format a duration as `50ms`, `1.50s` or `2m 30s`.
///
/// ```
/// use std::time::Duration;
/// use nobundle_cli::ui::format_duration;
///
/// assert_eq!(format_duration(Duration::from_millis(50)), "50ms");
/// assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
/// assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let total_ms = duration.as_millis();

    if total_ms < 1000 {
        format!("{total_ms}ms")
    } else if total_ms < 60_000 {
        format!("{:.2}s", duration.as_secs_f64())
    } else {
        let secs = duration.as_secs();
        format!("{}m {}s", secs / 60, secs % 60)
    }
}

/// Print files per loader and linked stylesheets to stderr.
pub fn print_build_summary(report: &BuildReport) {
    let width = (Term::stderr().size().1 as usize).min(60);
    let rule = "─".repeat(width);
    let colors = colors_enabled();

    if colors {
        eprintln!("\n{}", "Build Summary".bold().underline());
    } else {
        eprintln!("\nBuild Summary");
    }
    eprintln!("{rule}");

    for (loader, count) in &report.files_by_loader {
        if colors {
            eprintln!("  {} {:<10} {}", "▸".blue(), loader.bold(), count);
        } else {
            eprintln!("  ▸ {loader:<10} {count}");
        }
    }
    if report.skipped > 0 {
        eprintln!("  {:<12} {}", "skipped", report.skipped);
    }
    eprintln!("  {:<12} {}", "stylesheets", report.stylesheets.len());

    eprintln!("{rule}");
    eprintln!(
        "  Total: {} files in {}",
        report.files_processed(),
        format_duration(report.duration)
    );
}

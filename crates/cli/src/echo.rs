use std::time::Duration;

use docmirror_core::{CrawlReport, ExtractReport};
use owo_colors::OwoColorize;

use crate::VERSION;

/// Print a styled banner for verbose mode
pub fn print_banner() {
    eprintln!(
        "\n{} {} {}",
        "docmirror".bold().bright_blue(),
        "v".dimmed(),
        VERSION.dimmed()
    );
    eprintln!("{}", "Mirror documentation sites and extract their article text\n".dimmed());
}

/// Print a styled step message
pub fn print_step(step: usize, total: usize, message: &str) {
    eprintln!("{} {}", format!("[{}/{}]", step, total).dimmed(), message.bright_cyan());
}

/// Print a success message
pub fn print_success(message: &str) {
    eprintln!("{} {}", "✓".green(), message.bright_green());
}

/// Print an info message
pub fn print_info(message: &str) {
    eprintln!("{} {}", "ℹ".blue(), message.bright_blue());
}

/// Print a warning message
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message.bright_yellow());
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message.bright_red());
}

/// Format elapsed time for display
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs_f64();
    if secs >= 60.0 {
        format!("{}m {:02}s", elapsed.as_secs() / 60, elapsed.as_secs() % 60)
    } else if secs >= 1.0 {
        format!("{:.1}s", secs)
    } else {
        format!("{:.0}ms", secs * 1000.0)
    }
}

/// Print the outcome of one crawl
pub fn print_crawl_summary(report: &CrawlReport, elapsed: Duration) {
    if report.is_empty() {
        print_warning(&format!("Nothing downloaded from {}", report.seed));
    } else {
        print_success(&format!(
            "Saved {} pages to {} in {}",
            report.pages_saved(),
            report.output_dir.display().bright_white(),
            format_elapsed(elapsed)
        ));
    }

    if report.pages_failed() > 0 {
        print_warning(&format!("{} URLs could not be mirrored", report.pages_failed()));
        for failed in &report.failed {
            eprintln!("  {} {}", failed.url.dimmed(), failed.reason);
        }
    }
}

/// Print the outcome of one extraction run
pub fn print_extract_summary(report: &ExtractReport) {
    if report.is_empty() {
        print_info(&format!(
            "No HTML files found. Check the directory '{}'",
            report.html_dir.display()
        ));
        return;
    }

    print_success(&format!(
        "Converted {} of {} HTML files into {}",
        report.written.len(),
        report.found,
        report.output_dir.display().bright_white()
    ));

    if !report.skipped.is_empty() {
        eprintln!(
            "  {} {}",
            "Without content node:".dimmed(),
            report.skipped.len().to_string().bright_white()
        );
    }

    for name in &report.collisions {
        print_warning(&format!("{} was written more than once; the last source won", name));
    }

    for failed in &report.failed {
        print_error(&format!("{}: {}", failed.path.display(), failed.reason));
    }
}

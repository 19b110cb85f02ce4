//! Plain-text rendering for the terminal.

use penalcode_core::search::citation;
use penalcode_core::{CleanedOffense, RunSummary};
use penalcode_store::OutputPaths;

/// Print run counts and output locations.
pub fn print_summary(summary: &RunSummary, paths: &OutputPaths) {
    println!("Cleaned offenses: {}", summary.cleaned);
    println!("Removed/flagged offenses: {}", summary.rejected);
    println!();
    println!("  {:<26} {}", "not criminal", summary.not_criminal);
    println!("  {:<26} {}", "invalid section", summary.invalid_section);
    println!("  {:<26} {}", "violent felony offenses", summary.vfo);
    if summary.non_canonical > 0 {
        println!("  {:<26} {}", "non-canonical class", summary.non_canonical);
    }
    println!();
    println!("  {:<26} {}", "cleaned set", paths.cleaned.display());
    println!("  {:<26} {}", "rejection report", paths.report.display());
}

/// Print search hits, one per line with citation and class beneath.
pub fn print_results(query: &str, hits: &[&CleanedOffense]) {
    if hits.is_empty() {
        println!("No offenses found for '{query}'.");
        return;
    }

    println!("{} result(s) for '{query}':", hits.len());
    for offense in hits {
        let name = match offense.name() {
            "" => "Unknown Offense",
            n => n,
        };
        print!("  {name}");
        if offense.vfo {
            print!("  [VFO]");
        }
        println!();
        println!("    {} - {}", citation(offense), offense.class);
    }
}

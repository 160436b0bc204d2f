//! Terminal styling utilities for the county runs

use console::style;
use std::path::Path;
use std::time::Duration;

/// Print the application banner
pub fn print_banner(version: &str) {
    println!();
    println!(
        "    {} {}",
        style("ORGUNITS").cyan().bold(),
        style("Census blocks into door-to-door organizing units").dim()
    );
    println!("    {}", style(format!("v{}", version)).dim());
    println!("    {}", style("━".repeat(56)).dim());
    println!();
}

/// Print the run configuration card
pub fn print_config(
    data_dir: &Path,
    min_households: u32,
    target_households: u32,
    seed: Option<u64>,
) {
    println!("    {} Data directory: {}", style("▸").cyan(), data_dir.display());
    println!(
        "    {} Household floor: {}   Growth target: {}",
        style("▸").cyan(),
        style(min_households).yellow(),
        style(target_households).yellow()
    );
    match seed {
        Some(seed) => println!(
            "    {} Random seed: {} {}",
            style("▸").cyan(),
            style(seed).yellow(),
            style("(ids reproducible)").dim()
        ),
        None => println!(
            "    {} Random seed: {}",
            style("▸").cyan(),
            style("system entropy").dim()
        ),
    }
    println!();
}

/// Print a county header
pub fn print_county_header(name: &str, state: &str, fips: &str) {
    println!();
    println!(
        "    {} {} {}",
        style(format!("{name}, {state}")).white().bold(),
        style("│").dim(),
        style(format!("FIPS {fips}")).dim()
    );
    println!("    {}", style("─".repeat(56)).dim());
}

/// Print a step header within a county run
pub fn print_step_header(step_num: u8, title: &str) {
    println!(
        "    {} {}",
        style(format!("STEP {}", step_num)).cyan().bold(),
        style(title).white()
    );
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("    {} {}", style("✓").green().bold(), style(message).green());
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("    {} {}", style("ℹ").cyan(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("    {} {}", style("!").yellow().bold(), style(message).yellow());
}

/// Print a styled count line
pub fn print_count(description: &str, count: usize) {
    println!("      {} {}", style(count).yellow().bold(), description);
}

/// Print how long a step took
pub fn print_step_time(elapsed: Duration) {
    println!("      {}", style(format!("{:.2}s", elapsed.as_secs_f64())).dim());
}

/// Print the final completion message
pub fn print_completion(counties: usize) {
    println!();
    println!(
        "    {} {}",
        style("»").cyan(),
        style(format!("Finished {counties} county run(s)")).green().bold()
    );
    println!();
}

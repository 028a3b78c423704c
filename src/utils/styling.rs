//! Terminal styling utilities

use console::{style, Emoji};

// Emoji icons with fallbacks for terminals that don't support them
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "[*] ");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "[!] ");
pub static SHIP: Emoji<'_, '_> = Emoji("🚢 ", ">> ");

/// Print the survey banner
pub fn print_banner(version: &str) {
    println!();
    println!(
        "    {} {}",
        SHIP,
        style("PASSENGER MANIFEST SURVEY").cyan().bold()
    );
    println!(
        "    {}",
        style("Who survived, and what did they pay?").dim()
    );
    println!("    {}", style(format!("v{}", version)).dim());
    println!("    {}", style("━".repeat(50)).dim());
    println!();
}

/// Print a step header with styling
pub fn print_step_header(step_num: usize, title: &str) {
    println!();
    println!(
        "    {} {} {}",
        style(format!("STEP {}", step_num)).cyan().bold(),
        style("│").dim(),
        style(title).white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("    {} {}", style("✓").green().bold(), style(message).green());
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("    {} {}", INFO, message);
}

/// Print a warning to stderr
pub fn print_warning(message: &str) {
    eprintln!("    {} {}", WARN, style(message).yellow());
}

/// Print the final completion message
pub fn print_completion(results: usize) {
    println!();
    println!(
        "    {} {}",
        SHIP,
        style(format!("Survey complete: {} result(s)", results))
            .green()
            .bold()
    );
    println!();
}

//! Terminal output utilities

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Print a success message
pub fn success(msg: &str) {
    println!("{} {}", style("✓").green().bold(), msg);
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{} {}", style("✗").red().bold(), msg);
}

/// Print a warning message
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("⚠").yellow().bold(), msg);
}

/// Print a header
pub fn header(msg: &str) {
    println!("\n{}", style(msg).bold().underlined());
}

/// Print a key-value pair
pub fn kv(key: &str, value: &str) {
    println!("  {}: {}", style(key).dim(), value);
}

/// Print non-fatal problems under a count line
pub fn warnings(messages: &[String]) {
    if messages.is_empty() {
        return;
    }
    eprintln!();
    warning(&format!(
        "Finished with {} warning{}:",
        messages.len(),
        if messages.len() == 1 { "" } else { "s" }
    ));
    for message in messages {
        eprintln!("  {} {}", style("-").yellow(), message);
    }
}

/// Print commands for the user to run next
pub fn next_steps(commands: &[String]) {
    println!("\n{}", style("Next steps").bold());
    for command in commands {
        println!("  {}", style(command).cyan());
    }
}

/// Create a spinner
pub fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(spinner_style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(spinner_style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

//! Status lines and section headings for the interactive terminal.
//!
//! Everything goes to stdout except errors. Colors follow
//! [`disable_colors`] and the `colored` environment overrides.

use colored::*;

pub fn success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

pub fn error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message);
}

pub fn warning(message: &str) {
    println!("{} {}", "⚠".yellow().bold(), message);
}

pub fn info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}

/// Top-level section, e.g. the banner and the results table
pub fn header(title: &str) {
    println!();
    println!("{}", title.cyan().bold());
    println!("{}", underline(title, '=').cyan());
}

/// Nested section, e.g. batch progress and generated passwords
pub fn subheader(title: &str) {
    println!();
    println!("{}", title.yellow().bold());
    println!("{}", underline(title, '-').yellow());
}

/// Rule as wide as the title in characters, not bytes
fn underline(title: &str, rule: char) -> String {
    std::iter::repeat(rule).take(title.chars().count()).collect()
}

/// Turn colors off for the whole process
pub fn disable_colors() {
    colored::control::set_override(false);
    console::set_colors_enabled(false);
}

//! Output formatting utilities

use colored::Colorize;

/// Print a section header
pub(crate) fn section(title: &str) {
    println!("\n{}", format!("=== {title} ===").cyan().bold());
}

/// Print a key-value pair
pub(crate) fn kv(key: &str, value: impl std::fmt::Display) {
    println!("  {}: {}", key.white().bold(), value);
}

/// Print a named list entry with a dimmed description
pub(crate) fn item(name: &str, description: &str) {
    if description.is_empty() {
        println!("  {}", name.green());
    } else {
        println!("  {} {}", format!("{name:<22}").green(), description.dimmed());
    }
}

/// Print a success message
pub(crate) fn success(msg: &str) {
    println!("{} {}", "[DONE]".green().bold(), msg);
}

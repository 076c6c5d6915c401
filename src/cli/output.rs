//! Shared CLI output helpers.
//!
//! Status lines are coloured unless `NO_COLOR` is set. Errors and hints go to
//! stderr, everything else to stdout.

use console::style;

/// Check if color output is disabled via NO_COLOR env var.
fn colors_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

/// Print a success message with checkmark (green).
///
/// Example: `✓ encrypted 2 secrets in variables.yaml`
pub fn success(msg: &str) {
    if colors_enabled() {
        println!("{} {}", style("✓").green(), msg);
    } else {
        println!("✓ {}", msg);
    }
}

/// Print an error message to stderr (red).
pub fn error(msg: &str) {
    if colors_enabled() {
        eprintln!("{} {}", style("✗").red(), msg);
    } else {
        eprintln!("✗ {}", msg);
    }
}

/// Print a hint message to stderr (cyan).
///
/// Example: `→ available backends: dummy, age`
pub fn hint(msg: &str) {
    if colors_enabled() {
        eprintln!("{} {}", style("→").cyan(), style(msg).cyan());
    } else {
        eprintln!("→ {}", msg);
    }
}

/// Format a path string in cyan.
pub fn path(p: &str) -> String {
    if colors_enabled() {
        style(p).cyan().to_string()
    } else {
        p.to_string()
    }
}

/// Print machine output untouched, with a trailing newline.
pub fn raw(text: &str) {
    if text.ends_with('\n') {
        print!("{}", text);
    } else {
        println!("{}", text);
    }
}

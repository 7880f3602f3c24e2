//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use colored::Colorize;

use crate::domain::{ContentElement, ElementKind};

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print warning (yellow "Warning:" prefix) to stderr
pub fn warning(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "Warning".yellow(), msg);
}

/// Print section header (cyan bold)
pub fn header(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg.to_string().cyan().bold());
}

/// Print indented detail (no color)
pub fn detail(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("  {}", msg);
}

/// Print plain output (no color)
pub fn info(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg);
}

/// Print a link target (blue arrow, indented)
pub fn link(target: &(impl std::fmt::Display + ?Sized)) {
    println!("    {} {}", "→".blue(), target);
}

/// Print one rendered content element with its links.
pub fn element(element: &ContentElement) {
    match element.kind {
        ElementKind::Heading => println!("\n{}", element.text.bold()),
        ElementKind::Paragraph => println!("{}", element.text),
        ElementKind::Error => println!("{}", element.text.red()),
    }
    for target in &element.links {
        link(target);
    }
}

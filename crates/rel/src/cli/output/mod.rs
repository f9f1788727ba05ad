//! Terminal output for a release run
//!
//! Progress and diagnostics go to stderr so stdout carries only the summary.

use std::path::Path;

use console::{style, StyledObject};

const FIELD_WIDTH: usize = 10;

/// Progress line for the run
pub fn step(message: &str) {
    eprintln!("{} {}", style("rel").cyan().bold(), message);
}

/// Something the user should know that does not stop the run
pub fn notice(message: &str) {
    eprintln!("{} {}", style("warning:").yellow().bold(), message);
}

/// Final error, with its context chain on one line
pub fn failure(err: &anyhow::Error) {
    eprintln!("{} {:#}", style("error:").red().bold(), err);
}

/// Headline of a successful run
pub fn released(version: &str) -> String {
    format!(
        "{} {}",
        style("released").green().bold(),
        style(version).bold()
    )
}

/// Right-aligned summary field
pub fn field(key: &str, value: &str) -> String {
    format!("{:>width$}  {}", style(key).dim(), value, width = FIELD_WIDTH)
}

/// Path as shown in messages
pub fn path(path: &Path) -> StyledObject<String> {
    style(path.display().to_string()).underlined()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_rendering() {
        console::set_colors_enabled(false);

        assert_eq!(field("commit", "abc123"), "    commit  abc123");
        assert_eq!(released("2.0.0"), "released 2.0.0");
        assert_eq!(path(Path::new("/work/widget")).to_string(), "/work/widget");
    }
}

//! Common utilities shared across CLI commands.

use std::fs;
use std::io::{self, Read};

use ttcl::{NamedShape, extract_shapes_from_svg};

/// No collision found.
pub const EXIT_CLEAR: i32 = 0;
/// At least one collision found.
pub const EXIT_COLLISION: i32 = 1;
/// Bad arguments, unreadable input or an invalid query.
pub const EXIT_ERROR: i32 = 2;

/// Output format for query results.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "text" => Some(OutputFormat::Text),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

/// Progress messages go to stderr unless `--quiet` was given.
#[derive(Debug, Clone, Copy)]
pub struct Reporter {
    pub quiet: bool,
}

impl Reporter {
    pub fn status(&self, message: impl AsRef<str>) {
        if !self.quiet {
            eprintln!("{}", message.as_ref());
        }
    }
}

/// Print an error and hand back the error exit code.
pub fn fail(message: impl AsRef<str>) -> i32 {
    eprintln!("Error: {}", message.as_ref());
    EXIT_ERROR
}

/// Read SVG content from a file, or stdin when the path is `-`.
pub fn read_svg(path: &str, reporter: Reporter) -> Result<String, String> {
    if path == "-" {
        reporter.status("Reading SVG from stdin...");
        let mut content = String::new();
        io::stdin()
            .read_to_string(&mut content)
            .map_err(|e| format!("failed to read stdin: {}", e))?;
        Ok(content)
    } else {
        reporter.status(format!("Loading: {}", path));
        fs::read_to_string(path).map_err(|e| format!("failed to read {}: {}", path, e))
    }
}

/// Read and parse every shape in an SVG.
pub fn load_shapes(path: &str, reporter: Reporter) -> Result<Vec<NamedShape>, String> {
    let content = read_svg(path, reporter)?;
    let shapes = extract_shapes_from_svg(&content).map_err(|e| e.to_string())?;

    let circles = shapes.iter().filter(|s| s.shape.kind() == "circle").count();
    reporter.status(format!(
        "Loaded {} shapes ({} polygons, {} circles)",
        shapes.len(),
        shapes.len() - circles,
        circles
    ));
    Ok(shapes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_format_names() {
        assert_eq!(OutputFormat::from_name("text"), Some(OutputFormat::Text));
        assert_eq!(OutputFormat::from_name("json"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::from_name("yaml"), None);
    }

    #[test]
    fn fail_returns_error_code() {
        assert_eq!(fail("boom"), EXIT_ERROR);
    }
}

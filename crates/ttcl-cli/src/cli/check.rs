//! Check command: list every colliding pair of shapes in an SVG.

use std::time::Instant;

use serde::Serialize;
use ttcl::scene::{colliding_pairs, pair_count};
use ttcl::{NamedShape, Shape};

use super::common::{
    EXIT_CLEAR, EXIT_COLLISION, OutputFormat, Reporter, fail, load_shapes,
};

/// Parsed `check` arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckOptions {
    pub svg_path: String,
    pub format: OutputFormat,
    pub quiet: bool,
}

#[derive(Debug, Serialize)]
struct JsonPair {
    a: String,
    b: String,
}

#[derive(Debug, Serialize)]
struct JsonReport {
    shapes: usize,
    pairs: Vec<JsonPair>,
}

/// Parse `check` arguments. `Ok(None)` means help was requested.
pub fn parse_check_args(args: &[String]) -> Result<Option<CheckOptions>, String> {
    let mut svg_path: Option<String> = None;
    let mut format = OutputFormat::Text;
    let mut quiet = false;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-f" | "--format" => {
                i += 1;
                let name = args.get(i).ok_or("--format needs a value")?;
                format = OutputFormat::from_name(name)
                    .ok_or_else(|| format!("Unknown format: {}. Use 'text' or 'json'.", name))?;
            }
            "-q" | "--quiet" => quiet = true,
            "-h" | "--help" => return Ok(None),
            path if path == "-" || !path.starts_with('-') => {
                if svg_path.is_some() {
                    return Err(format!("Unexpected argument: {}", path));
                }
                svg_path = Some(path.to_string());
            }
            unknown => return Err(format!("Unknown option: {}", unknown)),
        }
        i += 1;
    }

    let svg_path = svg_path.ok_or("SVG file required (use '-' for stdin)")?;
    Ok(Some(CheckOptions { svg_path, format, quiet }))
}

/// Execute the check command and return the process exit code.
pub fn cmd_check(args: &[String]) -> i32 {
    let options = match parse_check_args(args) {
        Ok(Some(options)) => options,
        Ok(None) => {
            print_usage();
            return EXIT_CLEAR;
        }
        Err(msg) => {
            print_usage();
            return fail(msg);
        }
    };
    let reporter = Reporter { quiet: options.quiet };

    let named = match load_shapes(&options.svg_path, reporter) {
        Ok(named) => named,
        Err(msg) => return fail(msg),
    };
    let shapes: Vec<Shape> = named.iter().map(|n| n.shape.clone()).collect();

    let start = Instant::now();
    let pairs = match colliding_pairs(&shapes) {
        Ok(pairs) => pairs,
        Err(e) => return fail(format!("collision query failed: {}", e)),
    };
    reporter.status(format!(
        "Checked {} pairs in {:?}",
        pair_count(shapes.len()),
        start.elapsed()
    ));

    println!("{}", render(&named, &pairs, options.format));

    if pairs.is_empty() { EXIT_CLEAR } else { EXIT_COLLISION }
}

/// Format the result for stdout.
pub fn render(named: &[NamedShape], pairs: &[(usize, usize)], format: OutputFormat) -> String {
    let label = |i: usize| named[i].label(i);

    match format {
        OutputFormat::Text => {
            let mut out: Vec<String> = pairs
                .iter()
                .map(|&(a, b)| format!("{} <-> {}", label(a), label(b)))
                .collect();
            out.push(format!("{} colliding pair(s) among {} shapes", pairs.len(), named.len()));
            out.join("\n")
        }
        OutputFormat::Json => {
            let report = JsonReport {
                shapes: named.len(),
                pairs: pairs
                    .iter()
                    .map(|&(a, b)| JsonPair { a: label(a), b: label(b) })
                    .collect(),
            };
            serde_json::to_string_pretty(&report).expect("Failed to serialize JSON")
        }
    }
}

fn print_usage() {
    eprintln!("Usage: ttcl check <input.svg|-> [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -f, --format <fmt>    Output format: text (default) or json");
    eprintln!("  -q, --quiet           No progress messages on stderr");
    eprintln!();
    eprintln!("Lists every pair of shapes that touch or overlap.");
}

#[cfg(test)]
mod tests {
    use super::*;
    use ttcl::extract_shapes_from_svg;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parse_defaults() {
        let options = parse_check_args(&args(&["scene.svg"])).unwrap().unwrap();
        assert_eq!(options.svg_path, "scene.svg");
        assert_eq!(options.format, OutputFormat::Text);
        assert!(!options.quiet);
    }

    #[test]
    fn parse_flags() {
        let options = parse_check_args(&args(&["-q", "-", "--format", "json"]))
            .unwrap()
            .unwrap();
        assert_eq!(options.svg_path, "-");
        assert_eq!(options.format, OutputFormat::Json);
        assert!(options.quiet);
    }

    #[test]
    fn parse_errors() {
        assert!(parse_check_args(&args(&[])).is_err());
        assert!(parse_check_args(&args(&["a.svg", "-f", "xml"])).is_err());
        assert!(parse_check_args(&args(&["a.svg", "-f"])).is_err());
        assert!(parse_check_args(&args(&["a.svg", "b.svg"])).is_err());
        assert!(parse_check_args(&args(&["a.svg", "--bogus"])).is_err());
        assert_eq!(parse_check_args(&args(&["--help"])), Ok(None));
    }

    #[test]
    fn render_text_and_json() {
        let named = extract_shapes_from_svg(
            r#"<svg><circle id="sun" r="1"/><line x1="-2" y1="0" x2="2" y2="0"/></svg>"#,
        )
        .unwrap();
        let pairs = vec![(0, 1)];

        let text = render(&named, &pairs, OutputFormat::Text);
        assert!(text.starts_with("sun <-> #1"));
        assert!(text.contains("1 colliding pair(s) among 2 shapes"));

        let json: serde_json::Value =
            serde_json::from_str(&render(&named, &pairs, OutputFormat::Json)).unwrap();
        assert_eq!(json["shapes"], 2);
        assert_eq!(json["pairs"][0]["a"], "sun");
        assert_eq!(json["pairs"][0]["b"], "#1");
    }
}

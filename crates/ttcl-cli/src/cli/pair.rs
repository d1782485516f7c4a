//! Pair command: test two shapes picked by their SVG `id`.
//!
//! Goes through `ttcl::dispatch`, so neither side's concrete type is known
//! at the call site. A `<path>` with several subpaths contributes all of
//! them under the same id; the pair collides if any part does.

use ttcl::{Geometry, NamedShape, dispatch};

use super::common::{EXIT_CLEAR, EXIT_COLLISION, Reporter, fail, load_shapes};

/// Parsed `pair` arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct PairOptions {
    pub svg_path: String,
    pub id_a: String,
    pub id_b: String,
    pub quiet: bool,
}

/// Parse `pair` arguments. `Ok(None)` means help was requested.
pub fn parse_pair_args(args: &[String]) -> Result<Option<PairOptions>, String> {
    let mut positional: Vec<&str> = Vec::new();
    let mut quiet = false;

    for arg in args {
        match arg.as_str() {
            "-q" | "--quiet" => quiet = true,
            "-h" | "--help" => return Ok(None),
            value if value == "-" || !value.starts_with('-') => positional.push(value),
            unknown => return Err(format!("Unknown option: {}", unknown)),
        }
    }

    match positional.as_slice() {
        [svg_path, id_a, id_b] => Ok(Some(PairOptions {
            svg_path: svg_path.to_string(),
            id_a: id_a.to_string(),
            id_b: id_b.to_string(),
            quiet,
        })),
        _ => Err("expected <input.svg> <id-a> <id-b>".to_string()),
    }
}

/// Every shape carrying `id`.
fn find_parts<'a>(named: &'a [NamedShape], id: &str) -> Result<Vec<&'a dyn Geometry>, String> {
    let parts: Vec<&dyn Geometry> = named
        .iter()
        .filter(|n| n.id.as_deref() == Some(id))
        .map(|n| &n.shape as &dyn Geometry)
        .collect();

    if parts.is_empty() {
        Err(format!("no shape with id '{}'", id))
    } else {
        Ok(parts)
    }
}

/// Whether any part of `a` collides with any part of `b`.
pub fn parts_collide(a: &[&dyn Geometry], b: &[&dyn Geometry]) -> Result<bool, String> {
    for &lhs in a {
        for &rhs in b {
            if dispatch(lhs, rhs).map_err(|e| format!("collision query failed: {}", e))? {
                return Ok(true);
            }
        }
    }
    Ok(false)
}

/// Execute the pair command and return the process exit code.
pub fn cmd_pair(args: &[String]) -> i32 {
    let options = match parse_pair_args(args) {
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

    let result = find_parts(&named, &options.id_a).and_then(|a| {
        let b = find_parts(&named, &options.id_b)?;
        parts_collide(&a, &b)
    });

    match result {
        Ok(hit) => {
            println!("{}", hit);
            if hit { EXIT_COLLISION } else { EXIT_CLEAR }
        }
        Err(msg) => fail(msg),
    }
}

fn print_usage() {
    eprintln!("Usage: ttcl pair <input.svg> <id-a> <id-b> [-q]");
    eprintln!();
    eprintln!("Prints 'true' if the two shapes touch or overlap, 'false' otherwise.");
}

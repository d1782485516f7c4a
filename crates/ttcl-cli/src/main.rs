//! ttcl - check SVG drawings for colliding shapes
//!
//! Usage:
//!   ttcl check <svg|-> [options]     List every colliding pair of shapes
//!   ttcl pair <svg> <id-a> <id-b>    Test two shapes by id
//!   ttcl help                        Show this message

use std::env;
use std::process;

mod cli;

use cli::{EXIT_ERROR, cmd_check, cmd_pair};

fn print_usage(program: &str) {
    eprintln!("Usage:");
    eprintln!("  {} check <input.svg|-> [options]   List colliding shape pairs", program);
    eprintln!("  {} pair <input.svg> <id-a> <id-b>  Test two shapes by SVG id", program);
    eprintln!("  {} help                            Show this message", program);
    eprintln!();
    eprintln!("Exit status: 0 = no collision, 1 = collision found, 2 = error");
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("ttcl");

    let Some(command) = args.get(1) else {
        print_usage(program);
        process::exit(EXIT_ERROR);
    };

    let code = match command.as_str() {
        "check" => cmd_check(&args[2..]),
        "pair" => cmd_pair(&args[2..]),
        "help" | "--help" | "-h" => {
            print_usage(program);
            0
        }
        unknown => {
            eprintln!("Unknown command: {}", unknown);
            print_usage(program);
            EXIT_ERROR
        }
    };

    process::exit(code);
}

//! `Tortuga` CLI — run `Logo` programs and output SVG.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use tortuga_core::interpreter::Interpreter;
use tortuga_svg::render;

fn main() {
    init_tracing();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: tortuga <file.logo> [-o <out.svg>]");
        eprintln!("       tortuga -e <source>");
        process::exit(1);
    }

    let config = parse_args(&args);
    let source = read_source(&config);

    let mut interp = Interpreter::new();
    // Stream print/type/show to stdout with their exact terminators; the
    // in-memory buffer stays available regardless.
    interp.echo = true;

    let run_result = interp.run(&source);
    if let Err(ref e) = run_result {
        eprintln!("Error: {e}");
    }

    // The drawing accumulated so far is valid even after an error, so the
    // SVG is written either way.
    if let Some(path) = output_path(&config) {
        let doc = render(&interp.turtle().lines);
        if let Err(e) = svg::save(&path, &doc) {
            eprintln!("Error writing {}: {e}", path.display());
            process::exit(1);
        }
    }

    if run_result.is_err() {
        process::exit(1);
    }
}

/// Initialize the tracing subscriber: `RUST_LOG` filter syntax, `warn`
/// by default, always on stderr so program output stays clean.
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

struct Config {
    input_file: Option<String>,
    output_file: Option<String>,
    eval_source: Option<String>,
}

fn parse_args(args: &[String]) -> Config {
    let mut input_file = None;
    let mut output_file = None;
    let mut eval_source = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-o" | "--output" => {
                i += 1;
                if i < args.len() {
                    output_file = Some(args[i].clone());
                }
            }
            "-e" | "--eval" => {
                i += 1;
                if i < args.len() {
                    eval_source = Some(args[i].clone());
                }
            }
            "--help" | "-h" => {
                println!("Tortuga — Logo turtle graphics in Rust");
                println!();
                println!("Usage:");
                println!("  tortuga <file.logo>            Run a Logo file, write <file>.svg");
                println!("  tortuga -e <source>            Run Logo source from the argument");
                println!("  tortuga -o <out.svg> <file>    Choose the SVG output path");
                process::exit(0);
            }
            _ => {
                input_file = Some(args[i].clone());
            }
        }
        i += 1;
    }

    Config {
        input_file,
        output_file,
        eval_source,
    }
}

fn read_source(config: &Config) -> String {
    if let Some(ref source) = config.eval_source {
        return source.clone();
    }
    if let Some(ref file) = config.input_file {
        match fs::read_to_string(file) {
            Ok(s) => return s,
            Err(e) => {
                eprintln!("Error reading {file}: {e}");
                process::exit(1);
            }
        }
    }
    eprintln!("No input file or source specified");
    process::exit(1);
}

/// Where the SVG goes: an explicit `-o` path, or the input file with its
/// extension swapped for `.svg`. A bare `-e` run draws nowhere unless
/// `-o` is given.
fn output_path(config: &Config) -> Option<PathBuf> {
    if let Some(ref out) = config.output_file {
        return Some(PathBuf::from(out));
    }
    config
        .input_file
        .as_ref()
        .map(|file| Path::new(file).with_extension("svg"))
}

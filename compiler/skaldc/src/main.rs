//! Skald CLI
//!
//! Parses a source file, dumps the syntax tree, evaluates it against a
//! fresh root environment, and prints the final bindings.
//!
//! Exit codes: 0 on success (soft diagnostics included), 1 on missing
//! argument, unreadable file, parse error, or hard evaluation error.

use std::process::ExitCode;

use skald_eval::{EnvRef, Interpreter, Value};
use tracing_subscriber::EnvFilter;

struct Options {
    file: String,
    /// Suppress the syntax tree dump.
    quiet: bool,
    verbose: bool,
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    let Some(options) = parse_args(&args) else {
        print_usage();
        return ExitCode::FAILURE;
    };

    init_tracing(options.verbose);
    run(&options)
}

fn parse_args(args: &[String]) -> Option<Options> {
    let mut file = None;
    let mut quiet = false;
    let mut verbose = false;

    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "--quiet" | "-q" => quiet = true,
            "--verbose" | "-v" => verbose = true,
            "--help" | "-h" => return None,
            _ if !arg.starts_with('-') && file.is_none() => file = Some(arg.clone()),
            _ => {
                eprintln!("error: unrecognized argument `{arg}`");
                return None;
            }
        }
    }

    Some(Options {
        file: file?,
        quiet,
        verbose,
    })
}

fn print_usage() {
    eprintln!("Usage: skald <file.skald> [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -q, --quiet      Do not print the syntax tree");
    eprintln!("  -v, --verbose    Verbose diagnostic logging");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  SKALD_LOG        tracing filter (default: warn)");
}

/// Diagnostics stream to stderr through tracing as they occur; `-v`
/// widens the filter, `SKALD_LOG` overrides it entirely.
fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env("SKALD_LOG").unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(options: &Options) -> ExitCode {
    let source = match std::fs::read_to_string(&options.file) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("error: cannot read `{}`: {err}", options.file);
            return ExitCode::FAILURE;
        }
    };

    let outcome = skald_parse::parse(&source);
    tracing::debug!(file = %options.file, errors = outcome.errors.len(), "parsed");
    if outcome.tree.has_error() {
        eprintln!("error: `{}` did not parse:", options.file);
        for error in &outcome.errors {
            eprintln!("  {error}");
        }
        return ExitCode::FAILURE;
    }

    if !options.quiet {
        println!("{}", outcome.tree.root().to_sexp());
        println!();
    }

    let mut interpreter = Interpreter::new();
    let global = EnvRef::global();
    let result = interpreter.evaluate(outcome.tree.root(), &global);

    let diagnostics = interpreter.take_diagnostics();
    if !diagnostics.is_empty() {
        eprintln!(
            "{} diagnostic{} emitted",
            diagnostics.len(),
            if diagnostics.len() == 1 { "" } else { "s" }
        );
    }

    match result {
        Ok(Value::Block(env)) => {
            match serde_json::to_string_pretty(&env.snapshot()) {
                Ok(rendered) => println!("{rendered}"),
                Err(err) => {
                    eprintln!("error: cannot render bindings: {err}");
                    return ExitCode::FAILURE;
                }
            }
            ExitCode::SUCCESS
        }
        Ok(other) => {
            println!("{other}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

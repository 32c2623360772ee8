//! Meta interpreter CLI.

use std::process::ExitCode;

use metac::commands::{check_file, lex_file, parse_file, run_file};

fn main() -> ExitCode {
    // Honor RUST_LOG; silent by default.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return ExitCode::FAILURE;
    }

    match args[1].as_str() {
        "run" => {
            let Some(path) = file_arg(&args) else {
                eprintln!("Usage: meta run <file.mt>");
                return ExitCode::FAILURE;
            };
            run_file(path)
        }
        "check" => {
            let Some(path) = file_arg(&args) else {
                eprintln!("Usage: meta check <file.mt>");
                return ExitCode::FAILURE;
            };
            check_file(path)
        }
        "parse" => {
            let Some(path) = file_arg(&args) else {
                eprintln!("Usage: meta parse <file.mt>");
                return ExitCode::FAILURE;
            };
            parse_file(path)
        }
        "lex" => {
            let Some(path) = file_arg(&args) else {
                eprintln!("Usage: meta lex <file.mt>");
                return ExitCode::FAILURE;
            };
            lex_file(path)
        }
        "version" | "--version" | "-V" => {
            println!("meta {}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        "help" | "--help" | "-h" => {
            print_usage();
            ExitCode::SUCCESS
        }
        // `meta file.mt` runs the file directly.
        other if other.ends_with(".mt") => run_file(other),
        other => {
            eprintln!("error: unknown command `{other}`");
            print_usage();
            ExitCode::FAILURE
        }
    }
}

fn file_arg(args: &[String]) -> Option<&str> {
    args.get(2).map(String::as_str)
}

fn print_usage() {
    println!("Meta interpreter");
    println!();
    println!("Usage: meta <command> [arguments]");
    println!();
    println!("Commands:");
    println!("  run <file.mt>     Run a program (exit status is main's return value)");
    println!("  check <file.mt>   Check a program without running it");
    println!("  parse <file.mt>   Print the program's top-level items");
    println!("  lex <file.mt>     Print the program's token stream");
    println!("  version           Print version information");
    println!("  help              Show this help");
    println!();
    println!("Running `meta <file.mt>` is shorthand for `meta run <file.mt>`.");
}

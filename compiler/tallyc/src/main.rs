//! Tally CLI.

use tallyc::commands::{lex_file, parse_file, run_file, run_repl};
use tallyc::options::COLOR_ENV;
use tallyc::{init_tracing, CliOptions};

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = args[1].as_str();
    match command {
        "run" | "lex" | "parse" => {
            let options = parse_options(&args[2..]);
            let Some(path) = options.path.clone() else {
                eprintln!("error: missing file path");
                eprintln!("Usage: tally {command} <file.tally>");
                std::process::exit(1);
            };
            match command {
                "run" => run_file(&path, &options),
                "lex" => lex_file(&path, &options),
                _ => parse_file(&path, &options),
            }
        }
        "repl" => {
            let options = parse_options(&args[2..]);
            if let Some(extra) = &options.path {
                eprintln!("error: unexpected argument '{extra}'");
                std::process::exit(1);
            }
            run_repl(&options);
        }
        "help" | "--help" | "-h" => print_usage(),
        "version" | "--version" | "-V" => {
            println!("Tally {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            // A bare `.tally` path runs it.
            if std::path::Path::new(command)
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("tally"))
            {
                let options = parse_options(&args[1..]);
                run_file(command, &options);
            } else {
                eprintln!("Unknown command: {command}");
                eprintln!();
                print_usage();
                std::process::exit(1);
            }
        }
    }
}

fn parse_options(args: &[String]) -> CliOptions {
    let env_color = std::env::var(COLOR_ENV).ok();
    match CliOptions::parse(args, env_color.as_deref()) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("Tally, a scripting language for financial models");
    println!();
    println!("Usage: tally <command> [options]");
    println!();
    println!("Commands:");
    println!("  run <file.tally>     Run a Tally program");
    println!("  lex <file.tally>     Tokenize and display tokens");
    println!("  parse <file.tally>   Parse and display top-level statements");
    println!("  repl                 Start an interactive session");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Options:");
    println!("  --seed <n>           Seed for random and normal (default: 42)");
    println!("  --max-depth <n>      Maximum call depth (default: 1000)");
    println!("  --no-color           Disable colored diagnostics");
    println!();
    println!("Environment:");
    println!("  TALLY_COLOR          always, never or auto (default)");
    println!("  RUST_LOG             Enable tracing, e.g. RUST_LOG=tally_eval=debug");
    println!();
    println!("Examples:");
    println!("  tally run model.tally");
    println!("  tally run model.tally --seed 7");
    println!("  tally model.tally");
    println!("  tally repl");
}

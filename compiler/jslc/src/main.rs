//! `jsl` - runs JSL programs.

use jslc::commands::{check_file, eval_expression, parse_run_options, run_file, RunOptions};

fn main() {
    jslc::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }

    let command = args[1].as_str();

    let code = match command {
        "run" => match parse_run_options(&args[2..]) {
            Ok((path, options)) => run_file(&path, &options),
            Err(msg) => {
                eprintln!("run: {msg}");
                eprintln!("Usage: jsl run <file.jsl> [--max-depth=N] [--no-prelude]");
                1
            }
        },
        "check" => {
            if args.len() < 3 {
                eprintln!("Usage: jsl check <file.jsl>");
                std::process::exit(1);
            }
            check_file(&args[2])
        }
        "eval" => {
            if args.len() < 3 {
                eprintln!("Usage: jsl eval \"<expression>\"");
                std::process::exit(1);
            }
            eval_expression(&args[2..].join(" "))
        }
        "help" | "--help" | "-h" => {
            print_usage();
            0
        }
        "version" | "--version" | "-v" => {
            println!("jsl {}", env!("CARGO_PKG_VERSION"));
            0
        }
        _ => {
            // `jsl file.jsl` is shorthand for `jsl run file.jsl`.
            if std::path::Path::new(command)
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("jsl"))
            {
                run_file(command, &RunOptions::default())
            } else {
                eprintln!("Unknown command: {command}");
                print_usage();
                1
            }
        }
    };

    std::process::exit(code);
}

fn print_usage() {
    println!("JSL interpreter");
    println!();
    println!("Usage: jsl <command> [options]");
    println!();
    println!("Commands:");
    println!("  run <file>       Run a program");
    println!("  check <file>     Check block structure without running");
    println!("  eval <expr>      Evaluate one expression and print the result");
    println!("  help             Show this help message");
    println!("  version          Show version information");
    println!();
    println!("Run options:");
    println!("  --max-depth=N    Nested call limit (default: {})", jsl_eval::DEFAULT_MAX_CALL_DEPTH);
    println!("  --no-prelude     Start without front, back, not, max and min");
    println!();
    println!("Exit codes: 0 on success or `bye`, 1 on an uncaught error, 2 on call depth overflow.");
    println!();
    println!("Set RUST_LOG (e.g. RUST_LOG=jsl_eval=trace) to trace evaluation.");
}
